pub mod app;
pub mod controls_panel;
pub mod intro_overlay;
pub mod scene_view;
pub mod settings_modal;
pub mod stats_panel;
pub mod status_overlay;
