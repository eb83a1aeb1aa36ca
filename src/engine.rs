//! Per-frame recognition driver.
//!
//! Combines the classifier and the dispatcher for one video frame's
//! worth of hand keypoints: the two-hand composite rule is evaluated
//! first and short-circuits single-hand classification when it fires;
//! otherwise each hand is classified independently and every
//! classification is forwarded to the dispatcher.
//!
//! Frame pacing, capture and rendering belong to the embedding
//! application; the engine only consumes keypoint sets.

use crate::classifier::GestureClassifier;
use crate::dispatcher::{DispatchOutcome, GestureDispatcher};
use crate::error::{GestureError, GestureResult};
use crate::types::{GestureClassification, HandKeypoints};

/// Maximum number of hands the upstream pose provider reports per frame.
const MAX_HANDS_PER_FRAME: usize = 2;

/// Classifications and dispatch outcomes produced from one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// One entry per classified hand, or a single entry for the
    /// two-hand composite
    pub classifications: Vec<GestureClassification>,
    /// Dispatch outcome for each classification, same order
    pub dispatches: Vec<DispatchOutcome>,
}

impl FrameOutput {
    /// Returns the recognized classification with the highest
    /// confidence, if any.
    #[must_use]
    pub fn best(&self) -> Option<&GestureClassification> {
        self.classifications
            .iter()
            .filter(|c| !c.is_unknown())
            .max_by(|a, b| {
                a.confidence
                    .value()
                    .partial_cmp(&b.confidence.value())
                    .expect("confidence is never NaN")
            })
    }

    /// Returns `true` if any action fired this frame.
    #[must_use]
    pub fn any_dispatched(&self) -> bool {
        self.dispatches.iter().any(|d| d.dispatched)
    }
}

/// Frame-level recognition engine.
pub struct GestureEngine {
    classifier: GestureClassifier,
    dispatcher: GestureDispatcher,
}

impl GestureEngine {
    /// Creates an engine from a classifier and a dispatcher.
    #[must_use]
    pub fn new(classifier: GestureClassifier, dispatcher: GestureDispatcher) -> Self {
        Self {
            classifier,
            dispatcher,
        }
    }

    /// Processes one frame's hands.
    ///
    /// With two hands present, the hand with the smaller wrist x is
    /// treated as the left one and the two-hand composite is tried
    /// first; on a match it is dispatched once and single-hand rules
    /// are skipped for the frame.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidInput`] if more than two hands
    /// are supplied.
    pub fn process_frame(&self, hands: &[HandKeypoints]) -> GestureResult<FrameOutput> {
        if hands.len() > MAX_HANDS_PER_FRAME {
            return Err(GestureError::invalid_input(format!(
                "expected at most {MAX_HANDS_PER_FRAME} hands, got {}",
                hands.len()
            )));
        }

        let mut output = FrameOutput::default();

        if let [first, second] = hands {
            let (left, right) = if first.wrist().x <= second.wrist().x {
                (first, second)
            } else {
                (second, first)
            };
            if let Some(composite) = self.classifier.classify_two_hands(left, right) {
                output.dispatches.push(self.dispatcher.process(&composite));
                output.classifications.push(composite);
                return Ok(output);
            }
        }

        for hand in hands {
            let classification = self.classifier.classify(hand);
            output.dispatches.push(self.dispatcher.process(&classification));
            output.classifications.push(classification);
        }
        Ok(output)
    }

    /// Returns the underlying dispatcher (history queries, counters).
    #[must_use]
    pub fn dispatcher(&self) -> &GestureDispatcher {
        &self.dispatcher
    }

    /// Returns the underlying classifier.
    #[must_use]
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::NullSink;
    use crate::types::{GestureKind, HandLandmark, Landmark};
    use crate::LANDMARK_COUNT;
    use std::sync::Arc;

    fn set(lms: &mut [Landmark], lm: HandLandmark, x: f32, y: f32) {
        lms[lm.index()] = Landmark::new(x, y, 0.0);
    }

    fn curled_hand(wrist_x: f32) -> Vec<Landmark> {
        let mut lms = vec![Landmark::default(); LANDMARK_COUNT];
        set(&mut lms, HandLandmark::Wrist, wrist_x, 0.80);
        set(&mut lms, HandLandmark::ThumbCmc, wrist_x - 0.04, 0.76);
        set(&mut lms, HandLandmark::ThumbMcp, wrist_x - 0.06, 0.72);
        set(&mut lms, HandLandmark::ThumbIp, wrist_x - 0.07, 0.70);
        set(&mut lms, HandLandmark::ThumbTip, wrist_x - 0.05, 0.68);
        for (mcp, dx) in [
            (HandLandmark::IndexMcp, -0.04),
            (HandLandmark::MiddleMcp, 0.0),
            (HandLandmark::RingMcp, 0.04),
            (HandLandmark::PinkyMcp, 0.08),
        ] {
            let base = mcp.index();
            let x = wrist_x + dx;
            set(&mut lms, HandLandmark::try_from(base).unwrap(), x, 0.60);
            set(&mut lms, HandLandmark::try_from(base + 1).unwrap(), x, 0.55);
            set(&mut lms, HandLandmark::try_from(base + 2).unwrap(), x, 0.52);
            set(&mut lms, HandLandmark::try_from(base + 3).unwrap(), x, 0.56);
        }
        lms
    }

    fn heart_half(wrist_x: f32, thumb_x: f32) -> HandKeypoints {
        let mut lms = curled_hand(wrist_x);
        set(&mut lms, HandLandmark::Wrist, wrist_x, 0.50);
        set(&mut lms, HandLandmark::ThumbTip, thumb_x, 0.60);
        set(&mut lms, HandLandmark::IndexTip, thumb_x, 0.65);
        HandKeypoints::new(lms).unwrap()
    }

    fn engine() -> GestureEngine {
        GestureEngine::new(
            GestureClassifier::new(),
            crate::dispatcher::GestureDispatcher::with_defaults(Arc::new(NullSink)),
        )
    }

    #[tokio::test]
    async fn test_empty_frame() {
        let output = engine().process_frame(&[]).unwrap();
        assert!(output.classifications.is_empty());
        assert!(!output.any_dispatched());
    }

    #[tokio::test]
    async fn test_too_many_hands_rejected() {
        let hand = HandKeypoints::new(curled_hand(0.5)).unwrap();
        let err = engine()
            .process_frame(&[hand.clone(), hand.clone(), hand])
            .unwrap_err();
        assert!(err.to_string().contains("at most 2"));
    }

    #[tokio::test]
    async fn test_single_hand_classifies_and_dispatches() {
        let engine = engine();
        let fist = HandKeypoints::new(curled_hand(0.5)).unwrap();

        let output = engine.process_frame(&[fist]).unwrap();
        assert_eq!(output.classifications.len(), 1);
        assert_eq!(output.classifications[0].label, Some(GestureKind::Fist));
        assert!(output.any_dispatched());
        assert_eq!(engine.dispatcher().history().len(), 1);
    }

    #[tokio::test]
    async fn test_two_hand_heart_short_circuits() {
        let engine = engine();
        let left = heart_half(0.40, 0.45);
        let right = heart_half(0.60, 0.55);

        // Hand order must not matter.
        let output = engine.process_frame(&[right, left]).unwrap();
        assert_eq!(output.classifications.len(), 1);
        assert_eq!(output.classifications[0].label, Some(GestureKind::Heart));
        assert!((output.classifications[0].confidence.value() - 0.95).abs() < f32::EPSILON);
        assert!(output.any_dispatched());

        // Exactly one dispatch, no single-hand labels.
        let history = engine.dispatcher().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].gesture, GestureKind::Heart);
    }

    #[tokio::test]
    async fn test_two_plain_hands_classified_independently() {
        let engine = engine();
        let left = HandKeypoints::new(curled_hand(0.3)).unwrap();
        let right = HandKeypoints::new(curled_hand(0.7)).unwrap();

        let output = engine.process_frame(&[left, right]).unwrap();
        assert_eq!(output.classifications.len(), 2);
        assert_eq!(output.classifications[0].label, Some(GestureKind::Fist));
        assert_eq!(output.classifications[1].label, Some(GestureKind::Fist));
        // The second fist lands inside the first one's cooldown.
        assert!(output.dispatches[0].dispatched);
        assert!(!output.dispatches[1].dispatched);
        assert_eq!(engine.dispatcher().suppressed_count(), 1);
    }

    #[tokio::test]
    async fn test_best_prefers_highest_confidence() {
        let engine = engine();
        let left = heart_half(0.40, 0.45);
        let right = heart_half(0.60, 0.55);
        let output = engine.process_frame(&[left, right]).unwrap();
        let best = output.best().unwrap();
        assert_eq!(best.label, Some(GestureKind::Heart));
    }
}
