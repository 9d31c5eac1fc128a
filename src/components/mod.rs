pub mod app;
pub mod camera_controls;
pub mod grid_canvas;
pub mod legend;
pub mod notice;
pub mod settings_panel;
pub mod stats_panel;
pub mod toolbar;
