// Camera: view transform plus pan gesture bookkeeping.
use crate::model::GridDimensions;
use crate::transform::{TileSize, ViewTransform, ZoomDirection};

#[derive(Debug, Clone, Default)]
pub struct Camera {
    pub view: ViewTransform,
    pub panning: bool,
    pub last_x: f64,
    pub last_y: f64,
    pub initialized: bool,
}

impl Camera {
    pub fn begin_pan(&mut self, x: f64, y: f64) {
        self.panning = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Shift the offset by the pointer delta since the last event. No bounds.
    pub fn pan_to(&mut self, x: f64, y: f64) -> bool {
        if !self.panning {
            return false;
        }
        self.view.offset_x += x - self.last_x;
        self.view.offset_y += y - self.last_y;
        self.last_x = x;
        self.last_y = y;
        true
    }

    pub fn end_pan(&mut self) {
        self.panning = false;
    }

    pub fn zoom_wheel(&mut self, screen_x: f64, screen_y: f64, delta_y: f64) -> bool {
        match ZoomDirection::from_wheel_delta(delta_y) {
            Some(dir) => {
                self.view = self.view.zoom_at(screen_x, screen_y, dir);
                true
            }
            None => false,
        }
    }

    pub fn zoom_step(&mut self, screen_x: f64, screen_y: f64, dir: ZoomDirection) {
        self.view = self.view.zoom_at(screen_x, screen_y, dir);
    }

    /// Keep the current scale and place the grid centre at the viewport centre.
    pub fn center_on(&mut self, dims: GridDimensions, tile: TileSize, viewport_w: f64, viewport_h: f64) {
        let grid_w = dims.width as f64 * tile.width * self.view.scale;
        let grid_h = dims.height as f64 * tile.height * self.view.scale;
        self.view.offset_x = (viewport_w - grid_w) * 0.5;
        self.view.offset_y = (viewport_h - grid_h) * 0.5;
        self.initialized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_follows_pointer_delta() {
        let mut cam = Camera::default();
        assert!(!cam.pan_to(50.0, 50.0));
        cam.begin_pan(10.0, 20.0);
        assert!(cam.pan_to(15.0, 12.0));
        assert!(cam.pan_to(-100.0, 12.0));
        assert_eq!((cam.view.offset_x, cam.view.offset_y), (-110.0, -8.0));
        cam.end_pan();
        assert!(!cam.pan_to(0.0, 0.0));
        assert_eq!(cam.view.offset_x, -110.0);
    }

    #[test]
    fn wheel_zoom_keeps_anchor_and_ignores_zero_delta() {
        let mut cam = Camera::default();
        cam.view.offset_x = 40.0;
        let before = cam.view.screen_to_local(200.0, 150.0);
        assert!(cam.zoom_wheel(200.0, 150.0, -100.0));
        assert!((cam.view.scale - 1.1).abs() < 1e-12);
        let after = cam.view.screen_to_local(200.0, 150.0);
        assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);
        let snapshot = cam.view;
        assert!(!cam.zoom_wheel(200.0, 150.0, 0.0));
        assert_eq!(cam.view, snapshot);
    }

    #[test]
    fn center_places_grid_in_middle() {
        let mut cam = Camera::default();
        let tile = TileSize { width: 40.0, height: 40.0 };
        cam.center_on(GridDimensions { width: 20, height: 12 }, tile, 1000.0, 600.0);
        assert_eq!((cam.view.offset_x, cam.view.offset_y), (100.0, 60.0));
        assert!(cam.initialized);
    }
}
