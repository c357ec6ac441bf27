use yew::prelude::*;

use super::{
    controls_panel::ControlsPanel, intro_overlay::IntroOverlay, scene_view::SceneView,
    settings_modal::SettingsModal, status_overlay::StatusOverlay,
};
use crate::bridge::{self, PipelineStatus};
use crate::model::{CanvasSize, SceneState, Settings};

const SETTINGS_KEY: &str = "pm_settings";
const INTRO_SEEN_KEY: &str = "pm_intro_seen";

fn load_settings() -> Settings {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(SETTINGS_KEY) {
                if let Ok(s) = serde_json::from_str(&raw) {
                    return s;
                }
            }
        }
    }
    Settings::default()
}

#[function_component(App)]
pub fn app() -> Html {
    let scene = use_reducer(|| SceneState::new(CanvasSize::default()));
    let settings = use_state(load_settings);
    let status = use_state(|| PipelineStatus::Starting);
    let open_settings = use_state(|| false);
    let show_intro = use_state(|| {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                // Show only if key absent
                return store.get_item(INTRO_SEEN_KEY).ok().flatten().is_none();
            }
        }
        true
    });

    // Pipeline status notifications from the JS glue
    {
        let status = status.clone();
        use_effect_with((), move |_| {
            bridge::set_status_sink(move |s| status.set(s));
            || bridge::clear_status_sink()
        });
    }

    // Persist settings changes & apply the preview toggle to the video
    // element owned by the glue
    {
        let settings = settings.clone();
        use_effect_with((*settings).clone(), move |current| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    if let Ok(s) = serde_json::to_string(current) {
                        let _ = store.set_item(SETTINGS_KEY, &s);
                    }
                }
                if let Some(doc) = win.document() {
                    if let Some(el) = doc.get_element_by_id("camera-preview") {
                        el.set_class_name(if current.show_preview {
                            "preview"
                        } else {
                            "preview hidden"
                        });
                    }
                }
            }
            || ()
        });
    }

    let toggle_preview_cb: Callback<()> = {
        let settings = settings.clone();
        Callback::from(move |()| {
            let mut s = (*settings).clone();
            s.show_preview = !s.show_preview;
            settings.set(s);
        })
    };
    let toggle_stats_cb: Callback<()> = {
        let settings = settings.clone();
        Callback::from(move |()| {
            let mut s = (*settings).clone();
            s.show_stats = !s.show_stats;
            settings.set(s);
        })
    };
    let open_settings_cb: Callback<()> = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(true))
    };
    let close_settings_cb: Callback<()> = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(false))
    };
    let hide_intro_cb: Callback<()> = {
        let show_intro = show_intro.clone();
        Callback::from(move |()| {
            show_intro.set(false);
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    let _ = store.set_item(INTRO_SEEN_KEY, "1");
                }
            }
        })
    };
    let show_help_cb: Callback<()> = {
        let show_intro = show_intro.clone();
        Callback::from(move |()| show_intro.set(true))
    };

    html! {<>
        <SceneView scene={scene.clone()} show_stats={settings.show_stats} />
        <ControlsPanel on_show_help={show_help_cb} on_open_settings={open_settings_cb} />
        <IntroOverlay show={*show_intro} hide_intro={hide_intro_cb} />
        <SettingsModal
            show={*open_settings}
            on_close={close_settings_cb}
            show_preview={settings.show_preview}
            on_toggle_preview={toggle_preview_cb}
            show_stats={settings.show_stats}
            on_toggle_stats={toggle_stats_cb}
        />
        <StatusOverlay status={(*status).clone()} />
    </>}
}
