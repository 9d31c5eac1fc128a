// Drag-item lifecycle: grab, follow the pointer, snap on release.
use crate::model::{GridItem, GridState};
use crate::placement::{PlacementError, propose_move};
use crate::transform::{TileSize, cell_to_local_pixel, local_pixel_to_cell};

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub item_id: String,
    /// Last committed cell; the item returns here when a release is rejected.
    pub committed: (u32, u32),
    /// Live anchor (item centre) in local pixels.
    pub anchor_x: f64,
    pub anchor_y: f64,
    grab_dx: f64,
    grab_dy: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragRelease {
    /// Dropped back on its own cell.
    Stay,
    Commit { id: String, x: u32, y: u32 },
    /// Target occupied; item must be shown at `committed` again.
    SnapBack { x: u32, y: u32 },
    /// Item disappeared while being dragged.
    Vanished,
}

impl DragState {
    pub fn begin(item: &GridItem, pointer_x: f64, pointer_y: f64, tile: TileSize) -> Self {
        let (cx, cy) = cell_to_local_pixel(item.x as i32, item.y as i32, tile);
        Self {
            item_id: item.id.clone(),
            committed: (item.x, item.y),
            anchor_x: cx,
            anchor_y: cy,
            grab_dx: pointer_x - cx,
            grab_dy: pointer_y - cy,
        }
    }

    pub fn move_to(&mut self, pointer_x: f64, pointer_y: f64) {
        self.anchor_x = pointer_x - self.grab_dx;
        self.anchor_y = pointer_y - self.grab_dy;
    }

    /// Snap the anchor to a cell and validate it against `state`. Writes nothing.
    pub fn release(&self, state: &GridState, tile: TileSize) -> DragRelease {
        let (tx, ty) = local_pixel_to_cell(self.anchor_x, self.anchor_y, tile);
        match propose_move(state, &self.item_id, tx, ty) {
            Ok(cell) if cell == self.committed => DragRelease::Stay,
            Ok((x, y)) => DragRelease::Commit {
                id: self.item_id.clone(),
                x,
                y,
            },
            Err(PlacementError::NotFound { .. }) => DragRelease::Vanished,
            Err(PlacementError::Occupied { .. }) | Err(PlacementError::Full { .. }) => {
                DragRelease::SnapBack {
                    x: self.committed.0,
                    y: self.committed.1,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GridDimensions, ItemKind};

    const TILE: TileSize = TileSize { width: 40.0, height: 40.0 };

    fn state() -> GridState {
        let mut s = GridState::new(GridDimensions { width: 20, height: 12 });
        for (id, x, y) in [("a", 5u32, 5u32), ("b", 7, 5)] {
            s.add_item(GridItem { id: id.into(), x, y, kind: ItemKind::Light });
        }
        s
    }

    #[test]
    fn grab_offset_is_preserved() {
        let s = state();
        // centre of (5, 5) is (220, 220); grab 6px right of it
        let mut d = DragState::begin(s.find("a").unwrap(), 226.0, 220.0, TILE);
        d.move_to(306.0, 140.0);
        assert_eq!((d.anchor_x, d.anchor_y), (300.0, 140.0));
        assert_eq!(d.release(&s, TILE), DragRelease::Commit { id: "a".into(), x: 7, y: 3 });
    }

    #[test]
    fn release_on_occupied_cell_snaps_back() {
        let s = state();
        let mut d = DragState::begin(s.find("a").unwrap(), 220.0, 220.0, TILE);
        d.move_to(295.0, 228.0);
        assert_eq!(d.release(&s, TILE), DragRelease::SnapBack { x: 5, y: 5 });
    }

    #[test]
    fn small_jitter_stays_put() {
        let s = state();
        let mut d = DragState::begin(s.find("a").unwrap(), 220.0, 220.0, TILE);
        d.move_to(231.0, 209.0);
        assert_eq!(d.release(&s, TILE), DragRelease::Stay);
    }

    #[test]
    fn release_far_outside_clamps_to_edge() {
        let s = state();
        let mut d = DragState::begin(s.find("a").unwrap(), 220.0, 220.0, TILE);
        d.move_to(-500.0, 9000.0);
        assert_eq!(d.release(&s, TILE), DragRelease::Commit { id: "a".into(), x: 0, y: 11 });
    }

    #[test]
    fn removed_item_vanishes() {
        let mut s = state();
        let d = DragState::begin(s.find("a").unwrap(), 220.0, 220.0, TILE);
        s.remove_item("a");
        assert_eq!(d.release(&s, TILE), DragRelease::Vanished);
    }
}
