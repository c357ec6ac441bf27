use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_show_help: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let help_cb = {
        let cb = props.on_show_help.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:140px; display:flex; flex-direction:column; gap:6px;">
        <button onclick={settings_cb}>{"Settings"}</button>
        <button onclick={help_cb}>{"Help"}</button>
        <div style="font-size:11px; opacity:0.7; color:#c9d1d9;">{"Click or pinch to add a point"}</div>
    </div>}
}
