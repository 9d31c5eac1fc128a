pub mod camera;
pub mod drag;

pub use camera::Camera;
pub use drag::{DragRelease, DragState};
pub use hit_test::{ItemShape, item_at};
