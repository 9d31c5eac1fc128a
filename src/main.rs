mod components;
mod config;
mod model;
mod placement;
mod state;
mod transform;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
