//! Pose feature extraction.
//!
//! Derives the per-finger extension vector and the thumb orientation
//! from a single hand's keypoints. Both features are total for any
//! validated [`HandKeypoints`]; malformed input cannot exist past
//! construction.

use crate::geometry::thumb_direction;
use crate::types::{Finger, FingerExtension, HandKeypoints, HandLandmark, ThumbDirection};
use crate::FINGER_COUNT;

/// Features derived from one hand's pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseFeatures {
    /// Open/closed state per finger
    pub extension: FingerExtension,
    /// Dominant thumb orientation
    pub thumb_direction: ThumbDirection,
}

/// Inferred handedness of a keypoint set, from the wrist/thumb-tip
/// x-relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handedness {
    Left,
    Right,
}

fn infer_handedness(hand: &HandKeypoints) -> Handedness {
    if hand.wrist().x > hand[HandLandmark::ThumbTip].x {
        Handedness::Right
    } else {
        Handedness::Left
    }
}

/// Extracts the finger-extension vector and thumb direction from a
/// hand's keypoints.
///
/// The thumb is handedness-aware: it counts as extended when its tip
/// lies past its MCP joint in the direction away from the palm
/// centerline, with the comparison mirrored between left and right
/// hands. The remaining fingers are extended when the fingertip sits
/// above its DIP joint on screen (smaller y), independent of
/// handedness.
#[must_use]
pub fn extract_features(hand: &HandKeypoints) -> PoseFeatures {
    let mut flags = [false; FINGER_COUNT];

    let thumb_tip = &hand[HandLandmark::ThumbTip];
    let thumb_mcp = &hand[HandLandmark::ThumbMcp];
    flags[Finger::Thumb as usize] = match infer_handedness(hand) {
        Handedness::Right => thumb_tip.x < thumb_mcp.x,
        Handedness::Left => thumb_tip.x > thumb_mcp.x,
    };

    for finger in [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky] {
        let tip = &hand[finger.tip()];
        let joint = &hand[finger.extension_joint()];
        flags[finger as usize] = tip.y < joint.y;
    }

    PoseFeatures {
        extension: FingerExtension::new(flags),
        thumb_direction: thumb_direction(
            &hand[HandLandmark::ThumbCmc],
            &hand[HandLandmark::ThumbTip],
        ),
    }
}
