use uuid::Uuid;
use yew::prelude::*;

use crate::config::FULL_NOTICE;
use crate::model::{GridAction, GridStore, ItemKind};
use crate::placement::place_new_item;
use crate::util::{clog, cwarn};

#[derive(Properties, PartialEq, Clone)]
pub struct ToolbarProps {
    pub on_notice: Callback<String>,
}

#[function_component]
pub fn Toolbar(props: &ToolbarProps) -> Html {
    let Some(store) = use_context::<GridStore>() else {
        return html! {};
    };

    let add_cb = |kind: ItemKind| {
        let store = store.clone();
        let on_notice = props.on_notice.clone();
        Callback::from(move |_: MouseEvent| {
            let id = Uuid::new_v4().to_string();
            match place_new_item(&store, kind, id, js_sys::Math::random) {
                Ok(item) => {
                    clog(&format!("add {} at ({}, {})", kind.label(), item.x, item.y));
                    store.dispatch(GridAction::AddItem(item));
                }
                Err(err) => {
                    cwarn(&format!("add {} refused: {err}", kind.label()));
                    on_notice.emit(FULL_NOTICE.to_string());
                }
            }
        })
    };
    let clear_cb = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(GridAction::Clear))
    };

    html! {<div style="display:flex; flex-direction:column; gap:8px;">
        <div style="display:flex; flex-direction:column; gap:4px;">
            { for ItemKind::ALL.iter().map(|kind| html! {
                <button key={kind.label()} onclick={add_cb(*kind)}>{ format!("Add {}", kind.label()) }</button>
            }) }
        </div>
        <button onclick={clear_cb}>{"Clear All"}</button>
        <div style="font-size:11px; opacity:0.7; line-height:1.4;">
            <div>{"Drag items to move them (snap to grid on release)."}</div>
            <div>{"Double-click an item to remove it."}</div>
            <div>{"Wheel to zoom, drag the background to pan."}</div>
        </div>
    </div>}
}
