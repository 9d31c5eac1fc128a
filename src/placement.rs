//! Occupancy rules: where an item may go, and where a new one lands.

use std::collections::HashSet;
use thiserror::Error;

use crate::model::{GridItem, GridState, ItemKind};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: u32, y: u32 },
    #[error("no free cell left (capacity {capacity})")]
    Full { capacity: u64 },
    #[error("no item with id {id}")]
    NotFound { id: String },
}

/// True iff no item other than `excluding` sits on `(x, y)`.
pub fn is_cell_free(state: &GridState, x: u32, y: u32, excluding: Option<&str>) -> bool {
    !state
        .items()
        .iter()
        .any(|it| it.x == x && it.y == y && Some(it.id.as_str()) != excluding)
}

/// Distinct occupied cells inside `width × height`.
pub fn occupied_cells(items: &[GridItem], width: u32, height: u32) -> HashSet<(u32, u32)> {
    items
        .iter()
        .filter(|it| it.x < width && it.y < height)
        .map(|it| (it.x, it.y))
        .collect()
}

/// Draw a uniformly distributed free cell. `sample` must yield values in `[0, 1)`.
///
/// The capacity check runs before any sampling. Rejection sampling is capped at
/// four draws per cell; if every draw hits an occupied cell the free cells are
/// enumerated and one of them is drawn instead, so the search always ends.
pub fn pick_random_free_cell(
    width: u32,
    height: u32,
    occupied: &HashSet<(u32, u32)>,
    mut sample: impl FnMut() -> f64,
) -> Result<(u32, u32), PlacementError> {
    let capacity = width as u64 * height as u64;
    let taken = occupied
        .iter()
        .filter(|&&(x, y)| x < width && y < height)
        .count() as u64;
    if taken >= capacity {
        return Err(PlacementError::Full { capacity });
    }
    let mut pick = |n: u32| ((sample() * n as f64).floor() as u32).min(n - 1);
    for _ in 0..capacity.saturating_mul(4) {
        let cell = (pick(width), pick(height));
        if !occupied.contains(&cell) {
            return Ok(cell);
        }
    }
    let free: Vec<(u32, u32)> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|cell| !occupied.contains(cell))
        .collect();
    // capacity check above guarantees at least one entry
    let idx = pick(free.len() as u32) as usize;
    Ok(free[idx])
}

/// Create a new item of `kind` on a random free cell of `state`.
pub fn place_new_item(
    state: &GridState,
    kind: ItemKind,
    id: String,
    sample: impl FnMut() -> f64,
) -> Result<GridItem, PlacementError> {
    let dims = state.dimensions();
    let occupied = occupied_cells(state.items(), dims.width, dims.height);
    let (x, y) = pick_random_free_cell(dims.width, dims.height, &occupied, sample)?;
    Ok(GridItem { id, x, y, kind })
}

/// Validate moving `id` to `(target_x, target_y)`. The target is clamped to
/// the grid first. Nothing is written; the caller commits on `Ok`.
pub fn propose_move(
    state: &GridState,
    id: &str,
    target_x: i32,
    target_y: i32,
) -> Result<(u32, u32), PlacementError> {
    if state.find(id).is_none() {
        return Err(PlacementError::NotFound { id: id.to_string() });
    }
    let dims = state.dimensions();
    let x = target_x.clamp(0, dims.width as i32 - 1) as u32;
    let y = target_y.clamp(0, dims.height as i32 - 1) as u32;
    if !is_cell_free(state, x, y, Some(id)) {
        return Err(PlacementError::Occupied { x, y });
    }
    Ok((x, y))
}

/// Remove every item of `kind`, one `remove_item` per match. Returns how many went.
pub fn remove_by_type(state: &mut GridState, kind: ItemKind) -> usize {
    let ids: Vec<String> = state
        .items()
        .iter()
        .filter(|it| it.kind == kind)
        .map(|it| it.id.clone())
        .collect();
    ids.iter().filter(|id| state.remove_item(id)).count()
}
