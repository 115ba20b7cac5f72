//! # Cave World
//!
//! The world engine: owns the seed, the generation parameters, and the
//! chunk cache. Explicitly constructed and handed to consumers (the
//! render loop, the input handler) - never ambient global state - so
//! multiple worlds and isolated tests stay cheap.
//!
//! ## Cache Contract
//!
//! Chunk lookup is a single atomic get-or-create behind a mutex: a
//! chunk is generated at most once for the lifetime of the world, and
//! no caller can observe a partially written grid. After a chunk is
//! mutated it permanently diverges from its generated form; no path
//! regenerates over it.
//!
//! ## Resource Model
//!
//! The cache is unbounded and never evicts. Generation cost per chunk
//! is bounded by `chunk_size^2 * (1 + steps)` noise evaluations plus
//! the virtual-neighbor samples along the rim, and always completes
//! synchronously.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::bounded;
use crate::chunk::{Chunk, ChunkCoord, ChunkGenerator, Tile, TileGrid};
use crate::config::CaveConfig;
use crate::error::CaveResult;
use crate::noise::{CaveSeed, NoiseField, SimplexNoise};

/// An infinite, lazily generated 2D cave world.
///
/// Generic over the noise source so tests can substitute deterministic
/// stubs; production worlds use [`SimplexNoise`].
///
/// All operations take `&self`: the chunk cache mutex is the single
/// serialization point, so a shared `CaveWorld` can serve concurrent
/// chunk requests without duplicated generation work.
pub struct CaveWorld<N: NoiseField = SimplexNoise> {
    /// The seed this world was built with.
    seed: CaveSeed,
    /// Chunk generator (noise + parameters).
    generator: ChunkGenerator<N>,
    /// Sparse chunk cache; sole owner of generated terrain.
    chunks: Mutex<HashMap<ChunkCoord, Chunk>>,
    /// Chunks generated since construction.
    generated: AtomicU64,
}

impl CaveWorld<SimplexNoise> {
    /// Creates a world from configuration, with the built-in noise
    /// source.
    ///
    /// If the configuration does not pin a seed, a fresh one is drawn
    /// from OS entropy, once, here.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CaveError::InvalidChunkSize`] if the
    /// configuration fails validation.
    pub fn new(config: &CaveConfig) -> CaveResult<Self> {
        config.validate()?;
        let seed = config.seed.map_or_else(CaveSeed::random, CaveSeed::new);
        Ok(Self::assemble(seed, SimplexNoise::new(seed), config))
    }
}

impl<N: NoiseField> CaveWorld<N> {
    /// Creates a world with a caller-supplied noise source.
    ///
    /// The configured (or freshly drawn) seed is still recorded for
    /// introspection, but the supplied source decides the terrain.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CaveError::InvalidChunkSize`] if the
    /// configuration fails validation.
    pub fn with_noise(config: &CaveConfig, noise: N) -> CaveResult<Self> {
        config.validate()?;
        let seed = config.seed.map_or_else(CaveSeed::random, CaveSeed::new);
        Ok(Self::assemble(seed, noise, config))
    }

    fn assemble(seed: CaveSeed, noise: N, config: &CaveConfig) -> Self {
        tracing::info!(
            "cave world ready: seed={}, threshold={}, steps={}, chunk_size={}",
            seed.value(),
            config.threshold,
            config.steps,
            config.chunk_size
        );
        Self {
            seed,
            generator: ChunkGenerator::new(
                noise,
                config.threshold,
                config.steps,
                config.chunk_size as usize,
            ),
            chunks: Mutex::new(HashMap::new()),
            generated: AtomicU64::new(0),
        }
    }

    /// The seed this world was constructed with.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> CaveSeed {
        self.seed
    }

    /// Chunk side length in cells.
    #[inline]
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.generator.chunk_size()
    }

    /// The noise cutoff this world generates with.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.generator.threshold()
    }

    /// Number of smoothing passes this world generates with.
    #[inline]
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.generator.steps()
    }

    /// Number of chunks currently resident in the cache.
    #[must_use]
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.lock().len()
    }

    /// Total chunks generated since construction.
    ///
    /// Cache hits do not advance this counter, so repeated loads of
    /// the same chunk leave it unchanged.
    #[must_use]
    pub fn generated_count(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of the chunk at `coord`, generating and
    /// caching it first if absent.
    ///
    /// The cache remains the sole owner of the authoritative chunk;
    /// mutate through [`Self::break_block`], not through the snapshot.
    #[must_use]
    pub fn load_chunk(&self, coord: ChunkCoord) -> Chunk {
        let mut chunks = self.chunks.lock();
        self.chunk_mut(&mut chunks, coord).clone()
    }

    /// Get-or-create inside the locked cache map.
    fn chunk_mut<'a>(
        &self,
        chunks: &'a mut HashMap<ChunkCoord, Chunk>,
        coord: ChunkCoord,
    ) -> &'a mut Chunk {
        match chunks.entry(coord) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                let chunk = self.generator.generate(coord);
                self.generated.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("generated chunk ({}, {})", coord.x, coord.y);
                slot.insert(chunk)
            }
        }
    }

    /// Extracts a dense tile grid for an arbitrary world rectangle.
    ///
    /// Index `(0, 0)` of the result corresponds to world coordinate
    /// `(left, top)`; dimensions are exactly `(width, height)`. Every
    /// covering chunk is loaded (generating on miss) and its overlap
    /// copied in, so each cell reflects the authoritative - possibly
    /// mutated - cache content, never a re-derived value.
    ///
    /// Zero width or height yields an empty grid.
    #[must_use]
    pub fn load_area(&self, left: i64, top: i64, width: usize, height: usize) -> TileGrid {
        let mut area = TileGrid::new(width, height);
        if width == 0 || height == 0 {
            return area;
        }

        let size = self.chunk_size() as i64;
        let right = left + width as i64 - 1;
        let bottom = top + height as i64 - 1;
        let start = ChunkCoord::from_world_pos(left, top, self.chunk_size());
        let end = ChunkCoord::from_world_pos(right, bottom, self.chunk_size());

        let mut chunks = self.chunks.lock();
        for chunk_y in start.y..=end.y {
            for chunk_x in start.x..=end.x {
                let coord = ChunkCoord::new(chunk_x, chunk_y);
                let chunk = self.chunk_mut(&mut chunks, coord);
                let (origin_x, origin_y) = coord.origin(size as usize);

                // Overlap of this chunk's world rectangle with the
                // request.
                let x_lo = origin_x.max(left);
                let x_hi = (origin_x + size - 1).min(right);
                let y_lo = origin_y.max(top);
                let y_hi = (origin_y + size - 1).min(bottom);

                for world_y in y_lo..=y_hi {
                    for world_x in x_lo..=x_hi {
                        let tile =
                            chunk.tile((world_x - origin_x) as usize, (world_y - origin_y) as usize);
                        area.set((world_x - left) as usize, (world_y - top) as usize, tile);
                    }
                }
            }
        }

        area
    }

    /// Opens the world cell at `(x, y)`, generating the owning chunk
    /// first if needed.
    ///
    /// Idempotent: breaking an already-open cell is a no-op in effect.
    /// No failure mode for any integer coordinates.
    pub fn break_block(&self, x: i64, y: i64) {
        let coord = ChunkCoord::from_world_pos(x, y, self.chunk_size());
        let size = self.chunk_size() as i64;

        let mut chunks = self.chunks.lock();
        let chunk = self.chunk_mut(&mut chunks, coord);
        chunk.set_tile(
            x.rem_euclid(size) as usize,
            y.rem_euclid(size) as usize,
            Tile::Open,
        );
    }

    /// Whether the world cell at `(x, y)` is passable.
    ///
    /// May lazily generate the owning chunk - and only that chunk.
    #[must_use]
    pub fn is_accessible(&self, x: i64, y: i64) -> bool {
        let coord = ChunkCoord::from_world_pos(x, y, self.chunk_size());
        let size = self.chunk_size() as i64;

        let mut chunks = self.chunks.lock();
        let chunk = self.chunk_mut(&mut chunks, coord);
        chunk
            .tile(x.rem_euclid(size) as usize, y.rem_euclid(size) as usize)
            .is_open()
    }

    /// Generates a standalone walled cave with this world's noise and
    /// parameters.
    ///
    /// Independent of the chunk cache; see [`bounded::generate_walled`].
    #[must_use]
    pub fn generate_walled(&self, width: usize, height: usize) -> TileGrid {
        bounded::generate_walled(
            self.generator.noise(),
            width,
            height,
            self.generator.threshold(),
            self.generator.steps(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64 as Counter;

    /// Counts every sample so tests can prove generation ran at most
    /// once.
    struct CountingNoise {
        calls: Counter,
    }

    impl CountingNoise {
        fn new() -> Self {
            Self {
                calls: Counter::new(0),
            }
        }
    }

    impl NoiseField for CountingNoise {
        fn sample(&self, x: f64, _y: f64) -> f64 {
            self.calls.fetch_add(1, Ordering::Relaxed);
            // Deterministic pattern: solid at even x.
            if (x as i64).rem_euclid(2) == 0 {
                1.0
            } else {
                -1.0
            }
        }
    }

    fn test_config(chunk_size: u32, steps: u32) -> CaveConfig {
        CaveConfig::default()
            .with_seed(42)
            .with_chunk_size(chunk_size)
            .with_steps(steps)
    }

    #[test]
    fn test_load_chunk_caches() {
        let world = CaveWorld::new(&test_config(16, 2)).unwrap();

        let first = world.load_chunk(ChunkCoord::new(3, -4));
        assert_eq!(world.loaded_chunk_count(), 1);
        assert_eq!(world.generated_count(), 1);

        let second = world.load_chunk(ChunkCoord::new(3, -4));
        assert_eq!(world.loaded_chunk_count(), 1);
        assert_eq!(world.generated_count(), 1, "Cache hit must not regenerate");
        assert_eq!(first.grid(), second.grid());
    }

    #[test]
    fn test_repeated_loads_cost_one_generation() {
        let config = test_config(8, 1).with_threshold(0.0);
        let world = CaveWorld::with_noise(&config, CountingNoise::new()).unwrap();

        let _ = world.load_chunk(ChunkCoord::new(0, 0));
        let single_load = world.generator.noise().calls.load(Ordering::Relaxed);
        assert!(single_load > 0);

        for _ in 0..10 {
            let _ = world.load_chunk(ChunkCoord::new(0, 0));
        }
        assert_eq!(
            world.generator.noise().calls.load(Ordering::Relaxed),
            single_load,
            "Repeated loads of a cached chunk must not sample noise again"
        );
    }

    #[test]
    fn test_single_cell_area_matches_accessibility() {
        let world = CaveWorld::new(&test_config(10, 3)).unwrap();

        for &(x, y) in &[(0i64, 0i64), (5, 5), (-7, 13), (49, -50), (-1, -1)] {
            let area = world.load_area(x, y, 1, 1);
            assert_eq!(area.width(), 1);
            assert_eq!(area.height(), 1);
            assert_eq!(
                area.get(0, 0).is_open(),
                world.is_accessible(x, y),
                "Single-cell area disagrees with is_accessible at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_break_block_generates_and_opens() {
        // chunk_size=10: breaking (5, 5) must generate chunk (0, 0)
        // and open exactly that cell.
        let world = CaveWorld::new(&test_config(10, 5)).unwrap();
        assert_eq!(world.loaded_chunk_count(), 0);

        world.break_block(5, 5);
        assert_eq!(world.loaded_chunk_count(), 1);
        assert!(world.is_accessible(5, 5));

        // The neighbor keeps whatever generation produced.
        let generated = CaveWorld::new(&test_config(10, 5)).unwrap();
        assert_eq!(world.is_accessible(5, 6), generated.is_accessible(5, 6));
    }

    #[test]
    fn test_break_block_is_idempotent() {
        let world = CaveWorld::new(&test_config(10, 5)).unwrap();

        world.break_block(-3, 8);
        let after_first = world.load_chunk(ChunkCoord::from_world_pos(-3, 8, 10));
        world.break_block(-3, 8);
        let after_second = world.load_chunk(ChunkCoord::from_world_pos(-3, 8, 10));

        assert!(world.is_accessible(-3, 8));
        assert_eq!(after_first.grid(), after_second.grid());
    }

    #[test]
    fn test_mutation_survives_area_loads() {
        let world = CaveWorld::new(&test_config(10, 5)).unwrap();

        world.break_block(5, 5);

        // Load unrelated chunks, then re-read the mutated cell through
        // every query path.
        let _ = world.load_chunk(ChunkCoord::new(40, 40));
        let _ = world.load_area(-100, -100, 30, 30);

        assert!(world.is_accessible(5, 5));
        let area = world.load_area(0, 0, 10, 10);
        assert!(area.get(5, 5).is_open(), "Area extraction must see the mutation");
    }

    #[test]
    fn test_zero_sized_area() {
        let world = CaveWorld::new(&test_config(10, 1)).unwrap();

        let area = world.load_area(3, 3, 0, 5);
        assert_eq!(area.width(), 0);
        assert_eq!(world.loaded_chunk_count(), 0, "Empty request must not load chunks");
    }

    #[test]
    fn test_area_spanning_chunks_matches_direct_reads() {
        let world = CaveWorld::new(&test_config(8, 2)).unwrap();

        // 3x3 chunks' worth of area, offset to straddle boundaries.
        let area = world.load_area(-5, -5, 20, 20);
        assert_eq!(area.width(), 20);
        assert_eq!(area.height(), 20);

        for y in 0..20i64 {
            for x in 0..20i64 {
                let world_x = x - 5;
                let world_y = y - 5;
                assert_eq!(
                    area.get(x as usize, y as usize).is_open(),
                    world.is_accessible(world_x, world_y),
                    "Stitched cell ({world_x}, {world_y}) disagrees with direct read"
                );
            }
        }
    }

    #[test]
    fn test_walled_cave_uses_world_parameters() {
        let world = CaveWorld::new(&test_config(16, 2)).unwrap();
        let cave = world.generate_walled(40, 30);
        assert_eq!(cave.width(), 40);
        assert_eq!(cave.height(), 30);
        assert!(cave.get(0, 0).is_solid(), "Border must be solid");
    }

    #[test]
    fn test_invalid_chunk_size_rejected() {
        let config = CaveConfig::default().with_chunk_size(0);
        assert!(CaveWorld::new(&config).is_err());
    }

    #[test]
    fn test_seed_recorded() {
        let world = CaveWorld::new(&test_config(10, 1)).unwrap();
        assert_eq!(world.seed().value(), 42);
        assert_eq!(world.chunk_size(), 10);
        assert_eq!(world.steps(), 1);
        assert!((world.threshold() - CaveConfig::DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    }
}
