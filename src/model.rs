//! Core data model for the ceiling grid editor.
//! `GridState` is the single source of truth for grid dimensions and placed items;
//! components reach it through a `GridStore` handle published via context.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::{Reducible, UseReducerHandle};

use crate::placement;
use crate::util::{clog, cwarn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    /// Build dimensions, clamping each axis to at least one cell.
    pub fn clamped(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1) as u32,
            height: height.max(1) as u32,
        }
    }

    pub fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Light,
    AirSupply,
    AirReturn,
    SmokeDetector,
    /// Marks a cell that cannot host a fixture.
    Invalid,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Light,
        ItemKind::AirSupply,
        ItemKind::AirReturn,
        ItemKind::SmokeDetector,
        ItemKind::Invalid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Light => "Light",
            ItemKind::AirSupply => "Air Supply",
            ItemKind::AirReturn => "Air Return",
            ItemKind::SmokeDetector => "Smoke Detector",
            ItemKind::Invalid => "Invalid Tile",
        }
    }

    pub fn plural_label(self) -> &'static str {
        match self {
            ItemKind::Light => "Lights",
            ItemKind::AirSupply => "Air Supply",
            ItemKind::AirReturn => "Air Return",
            ItemKind::SmokeDetector => "Smoke Detectors",
            ItemKind::Invalid => "Invalid Tiles",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ItemKind::Light => "#f6c84c",
            ItemKind::AirSupply => "#4ea8f2",
            ItemKind::AirReturn => "#60d394",
            ItemKind::SmokeDetector => "#ff7777",
            ItemKind::Invalid => "#000000",
        }
    }

    fn index(self) -> usize {
        match self {
            ItemKind::Light => 0,
            ItemKind::AirSupply => 1,
            ItemKind::AirReturn => 2,
            ItemKind::SmokeDetector => 3,
            ItemKind::Invalid => 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    pub id: String,
    pub x: u32,
    pub y: u32,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// Fields to merge into an existing item; `None` leaves the field untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub kind: Option<ItemKind>,
}

impl ItemPatch {
    pub fn position(x: u32, y: u32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            kind: None,
        }
    }
}

/// Per-kind item tally, indexable by `ItemKind`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KindCounts([usize; 5]);

impl KindCounts {
    pub fn get(&self, kind: ItemKind) -> usize {
        self.0[kind.index()]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridState {
    dimensions: GridDimensions,
    items: Vec<GridItem>,
    /// Bumped on every effective mutation; views redraw when it changes.
    #[serde(skip)]
    version: u64,
}

impl GridState {
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            items: Vec::new(),
            version: 0,
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn find(&self, id: &str) -> Option<&GridItem> {
        self.items.iter().find(|it| it.id == id)
    }

    pub fn count_by_kind(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for it in &self.items {
            counts.0[it.kind.index()] += 1;
        }
        counts
    }

    /// Items left outside the grid after a shrink.
    pub fn out_of_bounds_count(&self) -> usize {
        self.items
            .iter()
            .filter(|it| !self.dimensions.contains(it.x, it.y))
            .count()
    }

    /// Replace the grid size. Values below one are clamped; existing items are kept.
    pub fn set_dimensions(&mut self, width: i32, height: i32) -> bool {
        let next = GridDimensions::clamped(width, height);
        if next == self.dimensions {
            return false;
        }
        self.dimensions = next;
        true
    }

    /// Append without any collision check; callers go through `placement` first.
    pub fn add_item(&mut self, item: GridItem) -> bool {
        self.items.push(item);
        true
    }

    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> bool {
        let Some(item) = self.items.iter_mut().find(|it| it.id == id) else {
            return false;
        };
        let before = item.clone();
        if let Some(x) = patch.x {
            item.x = x;
        }
        if let Some(y) = patch.y {
            item.y = y;
        }
        if let Some(kind) = patch.kind {
            item.kind = kind;
        }
        *item != before
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|it| it.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        true
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GridAction {
    SetDimensions { width: i32, height: i32 },
    AddItem(GridItem),
    UpdateItem { id: String, patch: ItemPatch },
    /// Drag-release commit; re-validated against the current state.
    MoveItem { id: String, x: i32, y: i32 },
    RemoveItem { id: String },
    RemoveByKind(ItemKind),
    Clear,
}

pub type GridStore = UseReducerHandle<GridState>;

impl Reducible for GridState {
    type Action = GridAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GridAction::*;
        let mut new = (*self).clone();
        let changed = match action {
            SetDimensions { width, height } => new.set_dimensions(width, height),
            AddItem(item) => new.add_item(item),
            UpdateItem { id, patch } => new.update_item(&id, patch),
            MoveItem { id, x, y } => match placement::propose_move(&new, &id, x, y) {
                Ok((cx, cy)) => new.update_item(&id, ItemPatch::position(cx, cy)),
                Err(err) => {
                    cwarn(&format!("move of {id} dropped: {err}"));
                    false
                }
            },
            RemoveItem { id } => new.remove_item(&id),
            RemoveByKind(kind) => {
                let removed = placement::remove_by_type(&mut new, kind);
                clog(&format!("removed {removed} {}", kind.plural_label()));
                removed > 0
            }
            Clear => new.clear(),
        };
        if !changed {
            return self;
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, x: u32, y: u32, kind: ItemKind) -> GridItem {
        GridItem {
            id: id.to_string(),
            x,
            y,
            kind,
        }
    }

    fn state() -> GridState {
        GridState::new(GridDimensions {
            width: 20,
            height: 12,
        })
    }

    #[test]
    fn set_dimensions_clamps_to_one() {
        let mut s = state();
        assert!(s.set_dimensions(0, -3));
        assert_eq!(
            s.dimensions(),
            GridDimensions {
                width: 1,
                height: 1
            }
        );
    }

    #[test]
    fn shrinking_keeps_items() {
        let mut s = state();
        s.add_item(item("a", 15, 10, ItemKind::Light));
        s.set_dimensions(10, 10);
        assert_eq!(s.items().len(), 1);
        assert_eq!(s.out_of_bounds_count(), 1);
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut s = state();
        s.add_item(item("a", 1, 2, ItemKind::Light));
        assert!(s.update_item(
            "a",
            ItemPatch {
                x: Some(7),
                ..Default::default()
            }
        ));
        assert_eq!(s.find("a"), Some(&item("a", 7, 2, ItemKind::Light)));
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut s = state();
        s.add_item(item("a", 1, 2, ItemKind::Light));
        let before = s.clone();
        assert!(!s.update_item("zzz", ItemPatch::position(3, 3)));
        assert!(!s.remove_item("zzz"));
        assert_eq!(s, before);
    }

    #[test]
    fn clear_keeps_dimensions() {
        let mut s = state();
        s.add_item(item("a", 1, 2, ItemKind::Light));
        s.add_item(item("b", 2, 2, ItemKind::Invalid));
        assert!(s.clear());
        assert!(s.items().is_empty());
        assert_eq!(s.dimensions().width, 20);
        assert!(!s.clear());
    }

    #[test]
    fn counts_by_kind() {
        let mut s = state();
        s.add_item(item("a", 0, 0, ItemKind::Light));
        s.add_item(item("b", 1, 0, ItemKind::Light));
        s.add_item(item("c", 2, 0, ItemKind::SmokeDetector));
        let counts = s.count_by_kind();
        assert_eq!(counts.get(ItemKind::Light), 2);
        assert_eq!(counts.get(ItemKind::SmokeDetector), 1);
        assert_eq!(counts.get(ItemKind::AirReturn), 0);
    }

    #[test]
    fn kind_serializes_as_snake_case_type_tag() {
        let json = serde_json::to_string(&item("a", 1, 2, ItemKind::AirSupply)).unwrap();
        assert_eq!(json, r#"{"id":"a","x":1,"y":2,"type":"air_supply"}"#);
    }

    #[test]
    fn reducer_bumps_version_only_on_change() {
        let s = Rc::new(state());
        let s = s.reduce(GridAction::AddItem(item("a", 1, 1, ItemKind::Light)));
        assert_eq!(s.version(), 1);
        let same = s.clone().reduce(GridAction::RemoveItem { id: "nope".into() });
        assert!(Rc::ptr_eq(&s, &same));
        assert_eq!(same.version(), 1);
    }

    #[test]
    fn reducer_rejects_move_into_occupied_cell() {
        let s = Rc::new(state());
        let s = s.reduce(GridAction::AddItem(item("a", 5, 5, ItemKind::Light)));
        let s = s.reduce(GridAction::AddItem(item("b", 6, 5, ItemKind::Light)));
        let before = serde_json::to_string(&*s).unwrap();
        let after = s.clone().reduce(GridAction::MoveItem {
            id: "b".into(),
            x: 5,
            y: 5,
        });
        assert!(Rc::ptr_eq(&s, &after));
        assert_eq!(serde_json::to_string(&*after).unwrap(), before);
    }

    #[test]
    fn reducer_commits_clamped_move() {
        let s = Rc::new(state());
        let s = s.reduce(GridAction::AddItem(item("a", 5, 5, ItemKind::Light)));
        let s = s.reduce(GridAction::MoveItem {
            id: "a".into(),
            x: 99,
            y: -4,
        });
        assert_eq!(s.find("a").map(|it| (it.x, it.y)), Some((19, 0)));
    }

    #[test]
    fn reducer_update_merges_patch() {
        let s = Rc::new(state());
        let s = s.reduce(GridAction::AddItem(item("a", 2, 3, ItemKind::Light)));
        let s = s.reduce(GridAction::UpdateItem {
            id: "a".into(),
            patch: ItemPatch {
                kind: Some(ItemKind::SmokeDetector),
                ..Default::default()
            },
        });
        assert_eq!(s.find("a"), Some(&item("a", 2, 3, ItemKind::SmokeDetector)));
        assert_eq!(s.version(), 2);
    }

    #[test]
    fn reducer_set_dimensions_retains_out_of_bounds_items() {
        let s = Rc::new(state());
        let s = s.reduce(GridAction::AddItem(item("a", 19, 11, ItemKind::Light)));
        let s = s.reduce(GridAction::SetDimensions { width: 5, height: 0 });
        assert_eq!(s.dimensions(), GridDimensions { width: 5, height: 1 });
        assert_eq!(s.out_of_bounds_count(), 1);
    }

    #[test]
    fn reducer_removes_by_kind() {
        let mut s = Rc::new(state());
        s = s.reduce(GridAction::AddItem(item("a", 0, 0, ItemKind::Invalid)));
        s = s.reduce(GridAction::AddItem(item("b", 1, 0, ItemKind::Light)));
        s = s.reduce(GridAction::RemoveByKind(ItemKind::Invalid));
        assert_eq!(s.items().len(), 1);
        assert_eq!(s.items()[0].kind, ItemKind::Light);
    }
}
