use yew::prelude::*;

use super::legend::LegendRow;
use crate::model::{GridAction, GridStore, ItemKind};

/// Item totals and bulk removal.
#[function_component]
pub fn StatsPanel() -> Html {
    let Some(store) = use_context::<GridStore>() else {
        return html! {};
    };
    let counts = store.count_by_kind();
    let total = store.items().len();
    let outside = store.out_of_bounds_count();
    let dims = store.dimensions();

    let remove_cb = |kind: ItemKind| {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(GridAction::RemoveByKind(kind)))
    };
    let clear_cb = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(GridAction::Clear))
    };

    html! {<div style="display:flex; flex-direction:column; gap:6px; font-size:13px;">
        <div style="font-weight:600;">{ format!("Total Tiles: {} / {}", total, dims.cell_count()) }</div>
        { for ItemKind::ALL.iter().map(|kind| html! {
            <LegendRow key={kind.label()} kind={*kind} count={counts.get(*kind)} />
        }) }
        { if outside > 0 {
            html! { <div style="font-size:11px; color:#f0883e;">{ format!("{} item(s) outside the grid", outside) }</div> }
        } else { html! {} } }
        <div style="font-weight:600; margin-top:6px;">{"Remove Tiles:"}</div>
        { for ItemKind::ALL.iter().map(|kind| html! {
            <button key={kind.plural_label()} onclick={remove_cb(*kind)}>{ format!("Remove {}", kind.plural_label()) }</button>
        }) }
        <button onclick={clear_cb} style="background:#f85149; border:1px solid #b62324; color:#fff;">{"Clear All"}</button>
    </div>}
}
