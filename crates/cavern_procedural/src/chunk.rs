//! # Chunk System
//!
//! The infinite cave is organized into fixed-size square chunks:
//! - Memory efficiency (only touched chunks exist)
//! - Lazy streaming (generate on first access, cache forever)
//! - Deterministic content (a chunk is a pure function of seed and
//!   generation parameters)
//!
//! ## Generation
//!
//! A chunk starts as thresholded noise, then a cellular-automaton
//! smoothing pass runs a configured number of steps. Neighbors that
//! fall outside the chunk are never read from adjacent chunks -
//! they are synthesized from noise alone, so chunks can be generated
//! in any order with no cross-chunk dependencies.

use crate::noise::NoiseField;

/// Minimum solid Moore neighbors for a cell to come out of a smoothing
/// step solid.
pub const SOLID_NEIGHBOR_THRESHOLD: u32 = 5;

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not cells).
    pub x: i64,
    /// Y coordinate (in chunks, not cells).
    pub y: i64,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Converts world cell coordinates to the owning chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn from_world_pos(world_x: i64, world_y: i64, chunk_size: usize) -> Self {
        Self {
            x: world_x.div_euclid(chunk_size as i64),
            y: world_y.div_euclid(chunk_size as i64),
        }
    }

    /// Returns the world coordinates of the chunk's origin corner.
    #[inline]
    #[must_use]
    pub const fn origin(self, chunk_size: usize) -> (i64, i64) {
        (
            self.x * chunk_size as i64,
            self.y * chunk_size as i64,
        )
    }
}

/// A single cell of cave terrain.
///
/// An explicit two-variant type rather than a bare boolean, so intent
/// stays readable if richer tile kinds are added later.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tile {
    /// Passable cave floor.
    #[default]
    Open = 0,
    /// Blocked rock.
    Solid = 1,
}

impl Tile {
    /// Returns true if this tile is blocked rock.
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Solid)
    }

    /// Returns true if this tile is passable.
    #[inline]
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A dense 2D tile grid, row-major, indexed `(x, y)` from the top-left.
///
/// Used both for chunk contents and for the stitched result of area
/// extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Box<[Tile]>,
}

impl TileGrid {
    /// Creates a grid with every cell open.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Tile::Open; width * height].into_boxed_slice(),
        }
    }

    /// Creates a grid with every cell solid.
    #[must_use]
    pub fn solid(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Tile::Solid; width * height].into_boxed_slice(),
        }
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Gets the tile at `(x, y)`. Out-of-bounds reads are open.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Tile {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Tile::Open
        }
    }

    /// Sets the tile at `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = tile;
        }
    }
}

/// A chunk of cave terrain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk position in the world grid.
    pub coord: ChunkCoord,
    /// Tile contents, `chunk_size` on each side.
    grid: TileGrid,
    /// Whether this chunk diverged from its generated form.
    pub modified: bool,
}

impl Chunk {
    /// Wraps a generated grid into a chunk.
    #[must_use]
    pub const fn new(coord: ChunkCoord, grid: TileGrid) -> Self {
        Self {
            coord,
            grid,
            modified: false,
        }
    }

    /// Chunk side length in cells.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.grid.width()
    }

    /// Gets the tile at local coordinates.
    #[inline]
    #[must_use]
    pub fn tile(&self, local_x: usize, local_y: usize) -> Tile {
        self.grid.get(local_x, local_y)
    }

    /// Sets the tile at local coordinates and marks the chunk modified.
    ///
    /// A modified chunk permanently diverges from its generated form;
    /// the cache never regenerates over it.
    #[inline]
    pub fn set_tile(&mut self, local_x: usize, local_y: usize, tile: Tile) {
        self.grid.set(local_x, local_y, tile);
        self.modified = true;
    }

    /// Read-only view of the full tile grid.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }
}

/// Deterministic chunk generator: thresholded noise plus cellular
/// smoothing.
pub struct ChunkGenerator<N> {
    noise: N,
    threshold: f64,
    steps: u32,
    chunk_size: usize,
}

impl<N: NoiseField> ChunkGenerator<N> {
    /// Creates a generator.
    ///
    /// `chunk_size` must already be validated positive by the caller.
    #[must_use]
    pub const fn new(noise: N, threshold: f64, steps: u32, chunk_size: usize) -> Self {
        Self {
            noise,
            threshold,
            steps,
            chunk_size,
        }
    }

    /// The noise field driving generation.
    #[inline]
    #[must_use]
    pub const fn noise(&self) -> &N {
        &self.noise
    }

    /// The noise cutoff above which base-fill cells are solid.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of smoothing passes.
    #[inline]
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Chunk side length in cells.
    #[inline]
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Generates the chunk at the given coordinates.
    ///
    /// Content is a pure function of (seed, threshold, steps,
    /// chunk_size): regenerating from scratch reproduces bit-identical
    /// tiles, because every smoothing decision at a chunk edge derives
    /// from noise alone, never from neighboring chunks' state.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let size = self.chunk_size;
        let (origin_x, origin_y) = coord.origin(size);

        // Base fill: threshold raw noise at each world position.
        let mut grid = TileGrid::new(size, size);
        for local_y in 0..size {
            for local_x in 0..size {
                let world_x = origin_x + local_x as i64;
                let world_y = origin_y + local_y as i64;
                if self.noise.sample(world_x as f64, world_y as f64) > self.threshold {
                    grid.set(local_x, local_y, Tile::Solid);
                }
            }
        }

        for _ in 0..self.steps {
            grid = self.smooth(&grid, origin_x, origin_y);
        }

        Chunk::new(coord, grid)
    }

    /// One smoothing pass over the working grid.
    fn smooth(&self, grid: &TileGrid, origin_x: i64, origin_y: i64) -> TileGrid {
        let size = self.chunk_size;
        let mut next = TileGrid::new(size, size);

        for local_y in 0..size {
            for local_x in 0..size {
                let count = self.solid_neighbors(grid, origin_x, origin_y, local_x, local_y);
                if count >= SOLID_NEIGHBOR_THRESHOLD {
                    next.set(local_x, local_y, Tile::Solid);
                }
            }
        }

        next
    }

    /// Counts solid tiles among the 8 Moore neighbors of a cell.
    ///
    /// In-bounds neighbors read the working grid; out-of-bounds
    /// neighbors are synthesized from noise without touching any other
    /// chunk.
    fn solid_neighbors(
        &self,
        grid: &TileGrid,
        origin_x: i64,
        origin_y: i64,
        local_x: usize,
        local_y: usize,
    ) -> u32 {
        let size = self.chunk_size as i64;
        let mut count = 0;

        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let nx = local_x as i64 + dx;
                let ny = local_y as i64 + dy;

                let solid = if nx >= 0 && nx < size && ny >= 0 && ny < size {
                    grid.get(nx as usize, ny as usize).is_solid()
                } else {
                    self.virtual_neighbor_solid(origin_x + nx, origin_y + ny, dx, dy)
                };

                if solid {
                    count += 1;
                }
            }
        }

        count
    }

    /// Decides whether a neighbor in an adjacent (possibly
    /// never-generated) chunk counts as solid.
    ///
    /// Noise is evaluated at the neighbor's world position and once
    /// more offset by the same delta; the neighbor counts as solid only
    /// if both samples clear the threshold. This approximates the
    /// neighbor chunk's own base fill plus first smoothing, without
    /// requiring that chunk to exist. It is an approximation: it is
    /// never reconciled with the neighbor chunk once generated, so
    /// adjacent chunks can disagree along a one-cell seam.
    fn virtual_neighbor_solid(&self, world_x: i64, world_y: i64, dx: i64, dy: i64) -> bool {
        let near = self.noise.sample(world_x as f64, world_y as f64);
        if near <= self.threshold {
            return false;
        }
        let far = self
            .noise
            .sample((world_x + dx) as f64, (world_y + dy) as f64);
        far > self.threshold
    }
}
