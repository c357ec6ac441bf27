use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub show_preview: bool,
    pub on_toggle_preview: Callback<()>,
    pub show_stats: bool,
    pub on_toggle_stats: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_preview_cb = {
        let cb = props.on_toggle_preview.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_stats_cb = {
        let cb = props.on_toggle_stats.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:320px; max-width:440px; display:flex; flex-direction:column; gap:14px; color:#c9d1d9;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.show_preview} onclick={toggle_preview_cb} />
                    <span>{"Show Camera Preview"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.show_stats} onclick={toggle_stats_cb} />
                    <span>{"Show Mesh Stats"}</span>
                </label>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Points are kept only for this session and clear on reload."}</div>
        </div>
    </div>}
}
