use crate::bridge::PipelineStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusOverlayProps {
    pub status: PipelineStatus,
}

/// Reflects the detection pipeline's startup gates: a quiet hint while the
/// camera and model come up, a fatal banner if either fails. Clicking still
/// works in both cases; only pinch input depends on the pipeline.
#[function_component]
pub fn StatusOverlay(props: &StatusOverlayProps) -> Html {
    match &props.status {
        PipelineStatus::Running => html! {},
        PipelineStatus::Starting => html! {
            <div style="position:absolute; bottom:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px 12px; font-size:13px; color:#c9d1d9;">
                {"Starting camera and hand tracking…"}
            </div>
        },
        PipelineStatus::Failed { stage, message } => html! {
            <div style="position:absolute; bottom:12px; left:50%; transform:translateX(-50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:16px 24px; border-radius:12px; text-align:center; min-width:320px; color:#c9d1d9;">
                <h3 style="margin:0 0 8px 0; color:#f85149;">{"Hand tracking unavailable"}</h3>
                <p style="margin:4px 0;">{ format!("{}: {}", stage, message) }</p>
                <p style="margin:4px 0; font-size:12px; opacity:0.7;">{"You can still add points by clicking."}</p>
            </div>
        },
    }
}
