//! Pinch recognition over per-frame hand-landmark detections.
//!
//! The detector reports 21 normalized (x, y, z) landmarks per hand; the
//! tracker reduces each frame to a pinch boolean (thumb tip close to index
//! fingertip) and edge-triggers a single emission per pinch-close transition,
//! not one per frame while the pinch is held.

use crate::model::Point;

pub const LANDMARK_COUNT: usize = 21;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

/// Pinch predicate threshold in the detector's normalized coordinate space.
/// Strict `<`; empirically fixed, not reconfigurable at runtime.
pub const PINCH_DISTANCE: f64 = 0.04;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One hand's landmarks for a single detection frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    pub landmarks: [Landmark; LANDMARK_COUNT],
}

/// A point in the detector's normalized space, before mapping to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

fn distance(a: Landmark, b: Landmark) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Edge-triggered pinch debounce.
///
/// `armed` means "eligible to emit on the next detected pinch". A frame with
/// no hand leaves both flags untouched; the tracker simply waits for the
/// next detection.
#[derive(Clone, Debug)]
pub struct PinchTracker {
    is_pinched: bool,
    armed: bool,
}

impl Default for PinchTracker {
    fn default() -> Self {
        Self {
            is_pinched: false,
            armed: true,
        }
    }
}

impl PinchTracker {
    pub fn is_pinched(&self) -> bool {
        self.is_pinched
    }

    /// Feed one detection frame. Returns the midpoint of thumb tip and index
    /// fingertip (normalized space) exactly once per pinch-close transition.
    pub fn observe(&mut self, hand: Option<&HandFrame>) -> Option<NormPoint> {
        let frame = hand?;
        let thumb = frame.landmarks[THUMB_TIP];
        let index = frame.landmarks[INDEX_TIP];
        if distance(thumb, index) < PINCH_DISTANCE {
            self.is_pinched = true;
            if self.armed {
                self.armed = false;
                return Some(NormPoint {
                    x: (thumb.x + index.x) / 2.0,
                    y: (thumb.y + index.y) / 2.0,
                });
            }
        } else {
            self.is_pinched = false;
            self.armed = true;
        }
        None
    }
}

/// Maps a normalized detection point into canvas pixel space. The x axis is
/// mirrored so emitted points line up with the mirrored self-view preview.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoMapping {
    pub canvas_width: f64,
    pub video_width: f64,
    pub video_height: f64,
}

impl VideoMapping {
    pub fn to_canvas(&self, p: NormPoint) -> Point {
        Point {
            x: self.canvas_width - p.x * self.video_width,
            y: p.y * self.video_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A frame whose thumb/index tips are `gap` apart along x.
    fn frame_with_gap(gap: f64) -> HandFrame {
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks[THUMB_TIP] = Landmark {
            x: 0.5,
            y: 0.5,
            z: 0.0,
        };
        landmarks[INDEX_TIP] = Landmark {
            x: 0.5 + gap,
            y: 0.5,
            z: 0.0,
        };
        HandFrame { landmarks }
    }

    #[test]
    fn held_pinch_emits_exactly_once() {
        let mut tracker = PinchTracker::default();
        let pinched = frame_with_gap(0.01);
        let emissions = (0..10)
            .filter(|_| tracker.observe(Some(&pinched)).is_some())
            .count();
        assert_eq!(emissions, 1);
        assert!(tracker.is_pinched());
    }

    #[test]
    fn release_rearms_for_the_next_pinch() {
        let mut tracker = PinchTracker::default();
        let pinched = frame_with_gap(0.01);
        let open = frame_with_gap(0.2);
        // [true, false, true] -> exactly 2 emitted points.
        assert!(tracker.observe(Some(&pinched)).is_some());
        assert!(tracker.observe(Some(&open)).is_none());
        assert!(tracker.observe(Some(&pinched)).is_some());
    }

    #[test]
    fn threshold_is_strict() {
        let mut tracker = PinchTracker::default();
        assert!(tracker.observe(Some(&frame_with_gap(0.04))).is_none());
        assert!(!tracker.is_pinched());
        assert!(tracker.observe(Some(&frame_with_gap(0.0399))).is_some());
    }

    #[test]
    fn missing_hand_leaves_state_unchanged() {
        let mut tracker = PinchTracker::default();
        let pinched = frame_with_gap(0.01);
        assert!(tracker.observe(Some(&pinched)).is_some());
        // Hand drops out of frame mid-pinch: no reset, no emission.
        assert!(tracker.observe(None).is_none());
        assert!(tracker.is_pinched());
        // Still pinched on return, so still debounced.
        assert!(tracker.observe(Some(&pinched)).is_none());
    }

    #[test]
    fn emitted_point_is_the_tip_midpoint() {
        let mut tracker = PinchTracker::default();
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks[THUMB_TIP] = Landmark {
            x: 0.49,
            y: 0.51,
            z: 0.0,
        };
        landmarks[INDEX_TIP] = Landmark {
            x: 0.51,
            y: 0.49,
            z: 0.0,
        };
        let p = tracker
            .observe(Some(&HandFrame { landmarks }))
            .expect("pinch");
        assert!((p.x - 0.5).abs() < 1e-12);
        assert!((p.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn mapping_mirrors_x_and_scales_by_video_size() {
        let mapping = VideoMapping {
            canvas_width: 640.0,
            video_width: 1280.0,
            video_height: 720.0,
        };
        let p = mapping.to_canvas(NormPoint { x: 0.5, y: 0.5 });
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 360.0);
    }
}
