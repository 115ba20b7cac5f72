//! # Walled Cave Generation
//!
//! Standalone fixed-size caves: a bounded grid of thresholded noise,
//! smoothed the same way as chunks, wrapped in a one-cell solid
//! border. Useful for self-contained maps (arenas, previews) that
//! never join the infinite world.
//!
//! Unlike chunk generation there is nothing beyond the edge, so
//! out-of-bounds neighbors are simply ignored during smoothing instead
//! of being synthesized from noise.

use crate::chunk::{Tile, TileGrid, SOLID_NEIGHBOR_THRESHOLD};
use crate::noise::NoiseField;

/// Generates a walled cave of exactly `width` x `height` tiles.
///
/// The interior (`width - 2` x `height - 2`) is noise thresholded at
/// `threshold` and smoothed `steps` times; the outermost ring is
/// always solid. Noise is sampled at interior-local coordinates, so
/// the result depends only on the noise source and parameters.
///
/// Total function: dimensions too small to hold an interior (either
/// side below 3) yield an entirely solid grid.
#[must_use]
pub fn generate_walled<N: NoiseField>(
    noise: &N,
    width: usize,
    height: usize,
    threshold: f64,
    steps: u32,
) -> TileGrid {
    if width < 3 || height < 3 {
        return TileGrid::solid(width, height);
    }

    let interior_w = width - 2;
    let interior_h = height - 2;

    let mut interior = TileGrid::new(interior_w, interior_h);
    for y in 0..interior_h {
        for x in 0..interior_w {
            if noise.sample(x as f64, y as f64) > threshold {
                interior.set(x, y, Tile::Solid);
            }
        }
    }

    for _ in 0..steps {
        interior = smooth_bounded(&interior);
    }

    let mut cave = TileGrid::solid(width, height);
    for y in 0..interior_h {
        for x in 0..interior_w {
            cave.set(x + 1, y + 1, interior.get(x, y));
        }
    }
    cave
}

/// One smoothing pass with out-of-bounds neighbors ignored.
fn smooth_bounded(grid: &TileGrid) -> TileGrid {
    let width = grid.width() as i64;
    let height = grid.height() as i64;
    let mut next = TileGrid::new(grid.width(), grid.height());

    for y in 0..height {
        for x in 0..width {
            let mut count = 0;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx >= 0
                        && nx < width
                        && ny >= 0
                        && ny < height
                        && grid.get(nx as usize, ny as usize).is_solid()
                    {
                        count += 1;
                    }
                }
            }
            if count >= SOLID_NEIGHBOR_THRESHOLD {
                next.set(x as usize, y as usize, Tile::Solid);
            }
        }
    }

    next
}
