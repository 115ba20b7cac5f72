//! # CAVERN Procedural Generation
//!
//! Deterministic, infinite 2D cave worlds: noise-seeded terrain
//! refined by cellular-automaton smoothing, organized into fixed-size
//! chunks that are generated lazily and cached for reuse as a viewer
//! moves.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same cave
//! 2. **Chunked**: Generated on first touch, cached forever
//! 3. **Boundary-independent**: A chunk never reads its neighbors;
//!    cross-edge smoothing decisions are synthesized from noise alone
//! 4. **Explicit**: The world is a constructed value passed to its
//!    consumers, never global state
//!
//! ## Core Components
//!
//! - [`SimplexNoise`]: seeded 2D noise behind the [`NoiseField`] seam
//! - [`ChunkGenerator`]: thresholded noise + smoothing per chunk
//! - [`CaveWorld`]: lazy chunk cache, area extraction, block mutation
//! - [`generate_walled`]: standalone bounded caves with a solid rim
//!
//! ## Example
//!
//! ```rust,ignore
//! use cavern_procedural::{CaveConfig, CaveWorld};
//!
//! let world = CaveWorld::new(&CaveConfig::default().with_seed(42))?;
//!
//! // Viewport for the renderer: true = rock, false = background.
//! let view = world.load_area(-40, -25, 80, 50);
//!
//! // Movement gate and mining for the input layer.
//! if world.is_accessible(12, -7) { /* step there */ }
//! world.break_block(12, -6);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bounded;
pub mod cave;
pub mod chunk;
pub mod config;
pub mod error;
pub mod noise;

pub use bounded::generate_walled;
pub use cave::CaveWorld;
pub use chunk::{Chunk, ChunkCoord, ChunkGenerator, Tile, TileGrid, SOLID_NEIGHBOR_THRESHOLD};
pub use config::CaveConfig;
pub use error::{CaveError, CaveResult};
pub use noise::{CaveSeed, NoiseField, SimplexNoise};
