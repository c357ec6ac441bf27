//! Wasm-side of the detection pipeline boundary.
//!
//! The JS glue owns the camera stream and the MediaPipe hand-landmarker and
//! calls the exported functions here: one per detection frame with the first
//! hand's landmarks flattened to x,y,z triples, plus one-shot startup status
//! notifications. Consumers register sinks; the scene view installs a frame
//! sink at mount and the app installs a status sink.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::gesture::{HandFrame, Landmark, LANDMARK_COUNT};

/// One detection frame as delivered across the JS boundary. `hand` is `None`
/// when the detector saw no hand (or the buffer was malformed, which is
/// treated as a skipped frame).
pub struct FrameUpdate {
    pub hand: Option<HandFrame>,
    pub video_width: f64,
    pub video_height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PipelineStatus {
    /// Camera/model startup gates not yet passed.
    Starting,
    /// Steady-state detection loop running.
    Running,
    /// Fatal startup failure; the app never reaches steady state.
    Failed { stage: String, message: String },
}

type FrameSink = Box<dyn Fn(FrameUpdate)>;
type StatusSink = Box<dyn Fn(PipelineStatus)>;

thread_local! {
    static FRAME_SINK: RefCell<Option<FrameSink>> = RefCell::new(None);
    static STATUS_SINK: RefCell<Option<StatusSink>> = RefCell::new(None);
}

pub fn set_frame_sink(sink: impl Fn(FrameUpdate) + 'static) {
    FRAME_SINK.with(|s| *s.borrow_mut() = Some(Box::new(sink)));
}

pub fn clear_frame_sink() {
    FRAME_SINK.with(|s| *s.borrow_mut() = None);
}

pub fn set_status_sink(sink: impl Fn(PipelineStatus) + 'static) {
    STATUS_SINK.with(|s| *s.borrow_mut() = Some(Box::new(sink)));
}

pub fn clear_status_sink() {
    STATUS_SINK.with(|s| *s.borrow_mut() = None);
}

fn emit_status(status: PipelineStatus) {
    STATUS_SINK.with(|s| {
        if let Some(sink) = &*s.borrow() {
            sink(status);
        }
    });
}

/// Parse the flat landmark buffer for the first detected hand.
pub fn parse_hand_frame(flat: &[f64], num_hands: usize) -> Option<HandFrame> {
    if num_hands == 0 || flat.len() < LANDMARK_COUNT * 3 {
        return None;
    }
    let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
    for (i, lm) in landmarks.iter_mut().enumerate() {
        let base = i * 3;
        *lm = Landmark {
            x: flat[base],
            y: flat[base + 1],
            z: flat[base + 2],
        };
    }
    Some(HandFrame { landmarks })
}

/// Called by the JS glue once per detection frame. Frames with no hand are
/// still delivered so the gesture interpreter sees its quiescent no-op.
#[wasm_bindgen]
pub fn push_hand_frame(flat: &[f64], num_hands: usize, video_width: f64, video_height: f64) {
    let update = FrameUpdate {
        hand: parse_hand_frame(flat, num_hands),
        video_width,
        video_height,
    };
    FRAME_SINK.with(|s| {
        if let Some(sink) = &*s.borrow() {
            sink(update);
        }
    });
}

/// Called by the JS glue when the camera stream, model load and first video
/// frame have all completed and the detection loop is running.
#[wasm_bindgen]
pub fn notify_pipeline_ready() {
    emit_status(PipelineStatus::Running);
}

/// Called by the JS glue on a fatal startup failure (camera permission
/// denied, model load failure). Transient per-frame detector errors are
/// handled glue-side by skipping the frame and never reach here.
#[wasm_bindgen]
pub fn report_pipeline_error(stage: &str, message: &str) {
    emit_status(PipelineStatus::Failed {
        stage: stage.to_string(),
        message: message.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{INDEX_TIP, THUMB_TIP};

    #[test]
    fn parse_reads_xyz_triples_in_order() {
        let mut flat = vec![0.0; LANDMARK_COUNT * 3];
        flat[THUMB_TIP * 3] = 0.4;
        flat[THUMB_TIP * 3 + 1] = 0.5;
        flat[THUMB_TIP * 3 + 2] = -0.1;
        flat[INDEX_TIP * 3] = 0.42;
        let frame = parse_hand_frame(&flat, 1).expect("frame");
        assert_eq!(frame.landmarks[THUMB_TIP].x, 0.4);
        assert_eq!(frame.landmarks[THUMB_TIP].y, 0.5);
        assert_eq!(frame.landmarks[THUMB_TIP].z, -0.1);
        assert_eq!(frame.landmarks[INDEX_TIP].x, 0.42);
    }

    #[test]
    fn no_hands_parses_to_none() {
        let flat = vec![0.0; LANDMARK_COUNT * 3];
        assert!(parse_hand_frame(&flat, 0).is_none());
    }

    #[test]
    fn short_buffer_parses_to_none() {
        let flat = vec![0.0; LANDMARK_COUNT * 3 - 1];
        assert!(parse_hand_frame(&flat, 1).is_none());
    }
}
