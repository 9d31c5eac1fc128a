use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NoticeProps {
    pub message: Option<String>,
    pub on_dismiss: Callback<()>,
}

/// Feedback for rejected operations; stays until dismissed or replaced.
#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    let Some(msg) = props.message.as_ref().filter(|m| !m.is_empty()) else {
        return html! {};
    };
    let dismiss = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div role="alert" style="position:absolute; left:50%; top:12px; transform:translateX(-50%); background:rgba(22,27,34,0.92); border:1px solid #f85149; border-radius:10px; padding:8px 12px; display:flex; gap:10px; align-items:center; z-index:20;">
        <span style="font-size:13px;">{ msg.clone() }</span>
        <button onclick={dismiss} style="padding:2px 8px;">{"OK"}</button>
    </div>}
}
