//! Conversions between grid cells, local (unscaled) pixels and screen pixels.
//!
//! Local pixels are the scene's own coordinate space: cell `(x, y)` spans
//! `[x*tw, (x+1)*tw) × [y*th, (y+1)*th)`. Screen pixels are canvas pixels after
//! the view transform (`screen = local * scale + offset`) has been applied.

use crate::config::{
    AUTO_TILE_MAX_PX, AUTO_TILE_MIN_PX, MANUAL_TILE_MAX_PX, MANUAL_TILE_MIN_PX, MAX_SCALE,
    MIN_SCALE, MM_TO_PX, ZOOM_STEP,
};
use crate::model::GridDimensions;

/// Pixel footprint of one cell before zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSize {
    pub width: f64,
    pub height: f64,
}

impl TileSize {
    /// Fit the whole grid into a viewport, rounding down to whole pixels.
    pub fn auto_fit(viewport_w: f64, viewport_h: f64, dims: GridDimensions) -> Self {
        let fit = |avail: f64, cells: u32| {
            (avail / cells.max(1) as f64)
                .floor()
                .clamp(AUTO_TILE_MIN_PX, AUTO_TILE_MAX_PX)
        };
        Self {
            width: fit(viewport_w, dims.width),
            height: fit(viewport_h, dims.height),
        }
    }

    /// Tile size from physical dimensions entered by the user.
    pub fn from_millimetres(width_mm: f64, height_mm: f64) -> Self {
        let px = |mm: f64| (mm * MM_TO_PX).clamp(MANUAL_TILE_MIN_PX, MANUAL_TILE_MAX_PX);
        Self {
            width: px(width_mm),
            height: px(height_mm),
        }
    }
}

/// Centre of a cell in local pixels.
pub fn cell_to_local_pixel(cell_x: i32, cell_y: i32, tile: TileSize) -> (f64, f64) {
    (
        cell_x as f64 * tile.width + tile.width / 2.0,
        cell_y as f64 * tile.height + tile.height / 2.0,
    )
}

/// Snap a local pixel position to the cell whose centre is nearest.
/// Not bounds-checked; the result may lie outside the grid.
pub fn local_pixel_to_cell(px: f64, py: f64, tile: TileSize) -> (i32, i32) {
    (
        round_half_up(px / tile.width - 0.5) as i32,
        round_half_up(py / tile.height - 0.5) as i32,
    )
}

// Half-way cases round toward +inf so a drop exactly on a cell border
// picks the right/lower cell consistently on both axes.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Scroll up (negative delta) zooms in, scroll down zooms out.
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(ZoomDirection::In)
        } else if delta_y > 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }

    fn factor(self) -> f64 {
        match self {
            ZoomDirection::In => 1.0 + ZOOM_STEP,
            ZoomDirection::Out => 1.0 - ZOOM_STEP,
        }
    }
}

/// Pan offset and zoom scale applied uniformly to the rendered scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ViewTransform {
    pub fn screen_to_local(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.offset_x) / self.scale,
            (screen_y - self.offset_y) / self.scale,
        )
    }

    pub fn local_to_screen(&self, px: f64, py: f64) -> (f64, f64) {
        (
            px * self.scale + self.offset_x,
            py * self.scale + self.offset_y,
        )
    }

    /// Rescale one step while keeping the local point under `(screen_x, screen_y)` fixed.
    pub fn zoom_at(&self, screen_x: f64, screen_y: f64, direction: ZoomDirection) -> Self {
        let (local_x, local_y) = self.screen_to_local(screen_x, screen_y);
        let scale = (self.scale * direction.factor()).clamp(MIN_SCALE, MAX_SCALE);
        Self {
            scale,
            offset_x: screen_x - local_x * scale,
            offset_y: screen_y - local_y * scale,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// All `W+1` vertical lines followed by all `H+1` horizontal lines.
pub fn grid_lines(dims: GridDimensions, tile: TileSize) -> Vec<GridLine> {
    let total_w = dims.width as f64 * tile.width;
    let total_h = dims.height as f64 * tile.height;
    let vertical = (0..=dims.width).map(|i| {
        let x = i as f64 * tile.width;
        GridLine {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: total_h,
        }
    });
    let horizontal = (0..=dims.height).map(|j| {
        let y = j as f64 * tile.height;
        GridLine {
            x1: 0.0,
            y1: y,
            x2: total_w,
            y2: y,
        }
    });
    vertical.chain(horizontal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: TileSize = TileSize {
        width: 48.0,
        height: 30.0,
    };

    fn dims(width: u32, height: u32) -> GridDimensions {
        GridDimensions { width, height }
    }

    #[test]
    fn cell_centre_round_trips() {
        for y in 0..12 {
            for x in 0..20 {
                let (px, py) = cell_to_local_pixel(x, y, TILE);
                assert_eq!(local_pixel_to_cell(px, py, TILE), (x, y));
            }
        }
    }

    #[test]
    fn release_snaps_to_nearest_cell() {
        // just inside cell (2, 1)
        assert_eq!(local_pixel_to_cell(96.5, 30.5, TILE), (2, 1));
        // just inside cell (1, 0)
        assert_eq!(local_pixel_to_cell(95.9, 29.9, TILE), (1, 0));
        // left of the grid
        assert_eq!(local_pixel_to_cell(-30.0, 10.0, TILE), (-1, 0));
    }

    #[test]
    fn millimetre_input_scales_and_clamps() {
        let t = TileSize::from_millimetres(600.0, 600.0);
        assert_eq!(t.width, 48.0);
        assert_eq!(t.height, 48.0);
        let t = TileSize::from_millimetres(100.0, 5000.0);
        assert_eq!(t.width, 20.0);
        assert_eq!(t.height, 200.0);
    }

    #[test]
    fn auto_fit_floors_and_clamps() {
        let t = TileSize::auto_fit(1000.0, 700.0, dims(20, 12));
        assert_eq!(t.width, 50.0);
        assert_eq!(t.height, 58.0);
        let t = TileSize::auto_fit(100.0, 10000.0, dims(20, 12));
        assert_eq!(t.width, 20.0);
        assert_eq!(t.height, 120.0);
    }

    #[test]
    fn screen_local_inverse() {
        let v = ViewTransform {
            scale: 1.7,
            offset_x: -42.0,
            offset_y: 13.5,
        };
        let (lx, ly) = v.screen_to_local(300.0, 220.0);
        let (sx, sy) = v.local_to_screen(lx, ly);
        assert!((sx - 300.0).abs() < 1e-9);
        assert!((sy - 220.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_keeps_pointer_anchor() {
        let mut v = ViewTransform {
            scale: 1.3,
            offset_x: 25.0,
            offset_y: -80.0,
        };
        let (px, py) = (412.0, 187.0);
        for dir in [
            ZoomDirection::In,
            ZoomDirection::In,
            ZoomDirection::Out,
            ZoomDirection::In,
        ] {
            let before = v.screen_to_local(px, py);
            v = v.zoom_at(px, py, dir);
            let after = v.screen_to_local(px, py);
            assert!((before.0 - after.0).abs() < 1e-9);
            assert!((before.1 - after.1).abs() < 1e-9);
        }
    }

    #[test]
    fn zoom_scale_is_bounded() {
        let mut v = ViewTransform::default();
        for _ in 0..100 {
            v = v.zoom_at(10.0, 10.0, ZoomDirection::In);
        }
        assert_eq!(v.scale, 4.0);
        for _ in 0..100 {
            v = v.zoom_at(10.0, 10.0, ZoomDirection::Out);
        }
        assert_eq!(v.scale, 0.2);
    }

    #[test]
    fn wheel_direction_mapping() {
        assert_eq!(ZoomDirection::from_wheel_delta(-3.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_wheel_delta(120.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_wheel_delta(0.0), None);
    }

    #[test]
    fn grid_line_geometry() {
        let lines = grid_lines(dims(3, 2), TILE);
        assert_eq!(lines.len(), 4 + 3);
        assert_eq!(
            lines[3],
            GridLine {
                x1: 144.0,
                y1: 0.0,
                x2: 144.0,
                y2: 60.0
            }
        );
        assert_eq!(
            lines[6],
            GridLine {
                x1: 0.0,
                y1: 60.0,
                x2: 144.0,
                y2: 60.0
            }
        );
    }
}
