use super::{
    grid_canvas::GridCanvas, notice::Notice, settings_panel::SettingsPanel,
    stats_panel::StatsPanel, toolbar::Toolbar,
};
use crate::config::{EditorConfig, HEADER_HEIGHT_PX, PANEL_WIDTH_PX};
use crate::model::{GridDimensions, GridState, GridStore};
use crate::transform::TileSize;
use yew::prelude::*;

fn auto_fit_to_window(dims: GridDimensions) -> TileSize {
    let (w, h) = web_sys::window()
        .map(|win| {
            (
                win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
                win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
            )
        })
        .unwrap_or((800.0, 600.0));
    TileSize::auto_fit(w - PANEL_WIDTH_PX, h - HEADER_HEIGHT_PX, dims)
}

#[function_component(App)]
pub fn app() -> Html {
    let config = *use_memo((), |_| EditorConfig::load());
    let store: GridStore = use_reducer(|| {
        GridState::new(GridDimensions::clamped(config.grid_width, config.grid_height))
    });
    let tile = use_state(|| TileSize::from_millimetres(config.tile_width_mm, config.tile_height_mm));
    let notice = use_state(|| None::<String>);

    // Re-fit tiles whenever the grid is resized; an explicit apply wins until then
    {
        let tile = tile.clone();
        use_effect_with(store.dimensions(), move |dims| {
            tile.set(auto_fit_to_window(*dims));
            || ()
        });
    }

    let on_notice = {
        let notice = notice.clone();
        Callback::from(move |msg: String| notice.set(Some(msg)))
    };
    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |()| notice.set(None))
    };
    let on_tile = {
        let tile = tile.clone();
        Callback::from(move |t: TileSize| tile.set(t))
    };

    let header_style = format!(
        "height:{}px; box-sizing:border-box; padding:12px; border-bottom:1px solid #30363d; display:flex; gap:8px; align-items:center;",
        HEADER_HEIGHT_PX
    );
    let aside_style = format!(
        "width:{}px; box-sizing:border-box; border-right:1px solid #30363d; padding:12px; overflow-y:auto; display:flex; flex-direction:column; gap:16px;",
        PANEL_WIDTH_PX
    );

    html! { <ContextProvider<GridStore> context={store.clone()}>
        <div style="height:100vh; display:flex; flex-direction:column; background:#0e1116; color:#c9d1d9;">
            <header style={header_style}>
                <h2 style="margin:0; font-size:18px;">{"Ceiling Grid Editor"}</h2>
                <small style="margin-left:auto; opacity:0.7;">{"Use the toolbar to add items. Drag items to move. Wheel to zoom. Drag the background to pan."}</small>
            </header>
            <div style="display:flex; flex:1; overflow:hidden;">
                <aside style={aside_style}>
                    <Toolbar on_notice={on_notice.clone()} />
                    <SettingsPanel config={config} on_tile={on_tile} on_notice={on_notice.clone()} />
                    <StatsPanel />
                </aside>
                <main style="flex:1; position:relative; overflow:hidden;">
                    <GridCanvas store={store.clone()} tile={*tile} on_notice={on_notice} />
                    <Notice message={(*notice).clone()} on_dismiss={on_dismiss} />
                </main>
            </div>
        </div>
    </ContextProvider<GridStore>> }
}
