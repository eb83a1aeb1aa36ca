//! Geometric gesture classification.
//!
//! An ordered rule engine over pose features: each rule pairs a required
//! finger-extension pattern (or a partial predicate on specific fingers)
//! with an optional secondary geometric test and yields a fixed
//! confidence on match. Rules are evaluated in strict priority order and
//! the first match wins; there is no scoring across rules. An
//! unrecognized pose falls through to an `Unknown` classification with
//! low confidence.
//!
//! The composite two-hand Heart is a separate entry point,
//! [`GestureClassifier::classify_two_hands`], evaluated by the caller
//! before any single-hand rule and short-circuiting them when it fires.

use tracing::trace;

use crate::features::extract_features;
use crate::geometry::{angle_at_wrist, distance, planar_distance, thumb_direction};
use crate::types::{
    Confidence, Finger, GestureClassification, GestureKind, HandKeypoints, HandLandmark,
    ThumbDirection,
};

// Rule thresholds. All comparisons are strict; distances are in
// normalized image units, angles in degrees.
const PEACE_MIN_ANGLE_DEG: f32 = 20.0;
const OK_MAX_TIP_DISTANCE: f32 = 0.07;
const OPEN_HAND_MIN_AVG_ANGLE_DEG: f32 = 15.0;
const PINCH_MAX_TIP_DISTANCE: f32 = 0.10;
const GUN_MIN_ANGLE_DEG: f32 = 45.0;
const COUNT_TWO_MAX_ANGLE_DEG: f32 = 15.0;
const PHONE_WRIST_MARGIN: f32 = 0.1;
const HEART_MAX_TIP_DISTANCE: f32 = 0.15;

const TWO_HAND_MAX_PINCH_DISTANCE: f32 = 0.15;
const TWO_HAND_MAX_THUMB_SEPARATION: f32 = 0.3;

// Fixed per-rule confidences.
const CONF_THUMBS: f32 = 0.90;
const CONF_PEACE: f32 = 0.85;
const CONF_OK: f32 = 0.85;
const CONF_FIST: f32 = 0.85;
const CONF_OPEN_HAND: f32 = 0.80;
const CONF_POINTING: f32 = 0.85;
const CONF_ROCK: f32 = 0.85;
const CONF_PINCH: f32 = 0.80;
const CONF_GUN: f32 = 0.85;
const CONF_COUNT: f32 = 0.90;
const CONF_PHONE: f32 = 0.85;
const CONF_HEART_SINGLE: f32 = 0.75;
const CONF_HEART_TWO_HAND: f32 = 0.95;

/// Ordered-rule gesture classifier.
///
/// Stateless; one instance can classify any number of hands and frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier;

impl GestureClassifier {
    /// Creates a new classifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classifies a single hand's pose.
    ///
    /// Never fails for a validated [`HandKeypoints`]; an unmatched pose
    /// yields an `Unknown` classification with the fixed fallback
    /// confidence.
    #[must_use]
    pub fn classify(&self, hand: &HandKeypoints) -> GestureClassification {
        let features = extract_features(hand);
        let pattern = features.extension.pattern();
        let wrist = hand.wrist();
        let thumb_tip = &hand[HandLandmark::ThumbTip];
        let index_tip = &hand[HandLandmark::IndexTip];

        // Thumbs up / down: only the thumb open, oriented vertically.
        if pattern == [true, false, false, false, false] {
            match features.thumb_direction {
                ThumbDirection::Up => {
                    return detected(GestureKind::ThumbsUp, CONF_THUMBS);
                }
                ThumbDirection::Down => {
                    return detected(GestureKind::ThumbsDown, CONF_THUMBS);
                }
                _ => {}
            }
        }

        // Index + middle open: counting-two when both tips are raised
        // above the wrist and held together, peace when spread apart.
        if pattern == [false, true, true, false, false] {
            let middle_tip = &hand[HandLandmark::MiddleTip];
            let spread = angle_at_wrist(wrist, index_tip, middle_tip);
            let both_raised = index_tip.y < wrist.y && middle_tip.y < wrist.y;
            if both_raised && spread < COUNT_TWO_MAX_ANGLE_DEG {
                return detected(GestureKind::CountTwo, CONF_COUNT);
            }
            if spread > PEACE_MIN_ANGLE_DEG {
                return detected(GestureKind::Peace, CONF_PEACE);
            }
        }

        // OK: thumb open with its tip touching the index tip. Checked
        // before the all-extended rules so the ring closure wins.
        if features.extension.is_extended(Finger::Thumb)
            && distance(thumb_tip, index_tip) < OK_MAX_TIP_DISTANCE
        {
            return detected(GestureKind::Ok, CONF_OK);
        }

        // Fist: everything closed.
        if pattern == [false; 5] {
            return detected(GestureKind::Fist, CONF_FIST);
        }

        // Open hand: everything extended and the fingers actually spread.
        if pattern == [true; 5] {
            let tips = [
                thumb_tip,
                index_tip,
                &hand[HandLandmark::MiddleTip],
                &hand[HandLandmark::RingTip],
                &hand[HandLandmark::PinkyTip],
            ];
            let avg_spread = tips
                .windows(2)
                .map(|pair| angle_at_wrist(wrist, pair[0], pair[1]))
                .sum::<f32>()
                / (tips.len() - 1) as f32;
            if avg_spread > OPEN_HAND_MIN_AVG_ANGLE_DEG {
                return detected(GestureKind::OpenHand, CONF_OPEN_HAND);
            }
        }

        // Index only: counting-one when raised above the wrist,
        // otherwise plain pointing.
        if pattern == [false, true, false, false, false] {
            if index_tip.y < wrist.y {
                return detected(GestureKind::CountOne, CONF_COUNT);
            }
            return detected(GestureKind::Pointing, CONF_POINTING);
        }

        // Rock: index + pinky.
        if pattern == [false, true, false, false, true] {
            return detected(GestureKind::Rock, CONF_ROCK);
        }

        // Pinch: index open with the thumb tip nearby (looser than OK).
        if features.extension.is_extended(Finger::Index)
            && distance(thumb_tip, index_tip) < PINCH_MAX_TIP_DISTANCE
        {
            return detected(GestureKind::Pinch, CONF_PINCH);
        }

        // Gun: thumb up, index out, wide angle between them.
        if pattern == [true, true, false, false, false]
            && features.thumb_direction == ThumbDirection::Up
            && angle_at_wrist(wrist, thumb_tip, index_tip) > GUN_MIN_ANGLE_DEG
        {
            return detected(GestureKind::Gun, CONF_GUN);
        }

        // Phone: thumb + pinky out with the pinky raised to ear height.
        if pattern == [true, false, false, false, true] {
            let pinky_tip = &hand[HandLandmark::PinkyTip];
            if pinky_tip.y < wrist.y - PHONE_WRIST_MARGIN {
                return detected(GestureKind::Phone, CONF_PHONE);
            }
        }

        // Single-hand heart heuristic.
        if self.is_single_hand_heart(hand, &pattern) {
            return detected(GestureKind::Heart, CONF_HEART_SINGLE);
        }

        trace!(pattern = ?pattern, "No gesture rule matched");
        GestureClassification::unknown()
    }

    /// Classifies the two-hand composite Heart.
    ///
    /// Returns `Some` only when both hands independently pinch their
    /// thumb and index tips together, the two thumb tips are close to
    /// each other, and both thumbs point below their own wrists. The
    /// caller evaluates this before any single-hand rule and
    /// short-circuits them when it fires.
    #[must_use]
    pub fn classify_two_hands(
        &self,
        left: &HandKeypoints,
        right: &HandKeypoints,
    ) -> Option<GestureClassification> {
        let left_thumb = &left[HandLandmark::ThumbTip];
        let right_thumb = &right[HandLandmark::ThumbTip];

        let left_pinch = planar_distance(left_thumb, &left[HandLandmark::IndexTip]);
        let right_pinch = planar_distance(right_thumb, &right[HandLandmark::IndexTip]);
        let thumb_separation = planar_distance(left_thumb, right_thumb);
        let thumbs_below_wrists =
            left_thumb.y > left.wrist().y && right_thumb.y > right.wrist().y;

        if left_pinch < TWO_HAND_MAX_PINCH_DISTANCE
            && right_pinch < TWO_HAND_MAX_PINCH_DISTANCE
            && thumb_separation < TWO_HAND_MAX_THUMB_SEPARATION
            && thumbs_below_wrists
        {
            return Some(detected(GestureKind::Heart, CONF_HEART_TWO_HAND));
        }
        None
    }

    /// One-handed heart: thumb and pinky tips dropped below the wrist
    /// and held together, thumb folded inward across the palm, index
    /// and middle fingers retracted.
    fn is_single_hand_heart(&self, hand: &HandKeypoints, pattern: &[bool; 5]) -> bool {
        let wrist = hand.wrist();
        let thumb_tip = &hand[HandLandmark::ThumbTip];
        let pinky_tip = &hand[HandLandmark::PinkyTip];

        if thumb_tip.y <= wrist.y || pinky_tip.y <= wrist.y {
            return false;
        }
        if pattern[Finger::Index as usize] || pattern[Finger::Middle as usize] {
            return false;
        }

        let direction = thumb_direction(&hand[HandLandmark::ThumbCmc], thumb_tip);
        let inward = match direction {
            ThumbDirection::Right => thumb_tip.x < wrist.x,
            ThumbDirection::Left => thumb_tip.x > wrist.x,
            ThumbDirection::Up | ThumbDirection::Down => false,
        };

        inward && distance(thumb_tip, pinky_tip) < HEART_MAX_TIP_DISTANCE
    }
}

fn detected(kind: GestureKind, confidence: f32) -> GestureClassification {
    GestureClassification::detected(kind, Confidence::new_unchecked(confidence))
}
