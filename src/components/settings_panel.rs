use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::EditorConfig;
use crate::model::{GridAction, GridStore};
use crate::transform::TileSize;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsPanelProps {
    pub config: EditorConfig,
    pub on_tile: Callback<TileSize>,
    pub on_notice: Callback<String>,
}

fn text_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        handle.set(input.value());
    })
}

fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

/// Tile size in millimetres and grid size, each applied explicitly.
#[function_component]
pub fn SettingsPanel(props: &SettingsPanelProps) -> Html {
    let store = use_context::<GridStore>();
    let tile_w_mm = use_state(|| props.config.tile_width_mm.to_string());
    let tile_h_mm = use_state(|| props.config.tile_height_mm.to_string());
    let grid_w = use_state(|| props.config.grid_width.to_string());
    let grid_h = use_state(|| props.config.grid_height.to_string());
    let Some(store) = store else {
        return html! {};
    };

    let apply_tile = {
        let tile_w_mm = tile_w_mm.clone();
        let tile_h_mm = tile_h_mm.clone();
        let on_tile = props.on_tile.clone();
        let on_notice = props.on_notice.clone();
        Callback::from(move |_: MouseEvent| {
            match (parse_positive(&tile_w_mm), parse_positive(&tile_h_mm)) {
                (Some(w), Some(h)) => on_tile.emit(TileSize::from_millimetres(w, h)),
                _ => on_notice.emit("Tile size must be a positive number of millimetres.".to_string()),
            }
        })
    };
    let apply_grid = {
        let grid_w = grid_w.clone();
        let grid_h = grid_h.clone();
        let store = store.clone();
        let on_notice = props.on_notice.clone();
        Callback::from(move |_: MouseEvent| {
            match (grid_w.trim().parse::<i32>(), grid_h.trim().parse::<i32>()) {
                (Ok(width), Ok(height)) => store.dispatch(GridAction::SetDimensions { width, height }),
                _ => on_notice.emit("Grid size must be whole numbers.".to_string()),
            }
        })
    };

    let label_style = "display:flex; flex-direction:column; gap:2px; font-size:12px;";
    html! {<div style="display:flex; flex-direction:column; gap:10px;">
        <div style="font-weight:600;">{"Tile Size (mm)"}</div>
        <label style={label_style}>
            <span>{"Tile Width (mm)"}</span>
            <input type="number" value={(*tile_w_mm).clone()} oninput={text_input(&tile_w_mm)} />
        </label>
        <label style={label_style}>
            <span>{"Tile Height (mm)"}</span>
            <input type="number" value={(*tile_h_mm).clone()} oninput={text_input(&tile_h_mm)} />
        </label>
        <button onclick={apply_tile}>{"Apply Tile Size"}</button>
        <div style="font-weight:600; margin-top:6px;">{"Grid Size"}</div>
        <div style="display:flex; gap:6px;">
            <label style={label_style}>
                <span>{"Columns"}</span>
                <input type="number" min="1" style="width:70px;" value={(*grid_w).clone()} oninput={text_input(&grid_w)} />
            </label>
            <label style={label_style}>
                <span>{"Rows"}</span>
                <input type="number" min="1" style="width:70px;" value={(*grid_h).clone()} oninput={text_input(&grid_h)} />
            </label>
        </div>
        <button onclick={apply_grid}>{"Apply Grid Size"}</button>
    </div>}
}

#[cfg(test)]
mod tests {
    use super::parse_positive;

    #[test]
    fn positive_numbers_only() {
        assert_eq!(parse_positive(" 600 "), Some(600.0));
        assert_eq!(parse_positive("12.5"), Some(12.5));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive("abc"), None);
    }
}
