use yew::prelude::*;

use crate::model::ItemKind;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendRowProps {
    pub kind: ItemKind,
    pub count: usize,
}

/// Colour swatch, label and live count for one item kind.
#[function_component(LegendRow)]
pub fn legend_row(props: &LegendRowProps) -> Html {
    let swatch = match props.kind {
        ItemKind::Invalid => format!(
            "display:inline-block; width:12px; height:12px; background:{}; opacity:0.25; border:1px solid #30363d; border-radius:2px;",
            props.kind.color()
        ),
        ItemKind::Light | ItemKind::AirSupply | ItemKind::AirReturn | ItemKind::SmokeDetector => {
            format!(
                "display:inline-block; width:12px; height:12px; background:{}; border:1px solid #30363d; border-radius:50%;",
                props.kind.color()
            )
        }
    };
    html! { <div style="display:flex; align-items:center; gap:8px; margin:3px 0;"> <span style={swatch}></span> <span style="flex:1;">{ props.kind.plural_label() }</span> <span style="font-variant-numeric:tabular-nums; font-weight:600;">{ props.count }</span> </div> }
}
