//! # hand-gestures
//!
//! Geometric hand-gesture recognition and cooldown-gated action
//! dispatch over 3D hand-skeleton keypoints.
//!
//! This crate recognizes a fixed vocabulary of hand poses from
//! normalized 21-landmark hand skeletons (as produced by an external
//! pose-estimation provider) and triggers each gesture's bound action
//! exactly once per occurrence, subject to a cooldown:
//!
//! - **Geometry** ([`geometry`]): pure distance/angle/orientation
//!   helpers over landmarks.
//! - **Feature Extraction** ([`features`]): per-finger extension vector
//!   and thumb direction for one hand.
//! - **Classification** ([`classifier`]): ordered rule engine producing
//!   a [`GestureClassification`] per hand, plus the two-hand composite
//!   Heart.
//! - **Dispatch** ([`dispatcher`], [`action`], [`history`]):
//!   cooldown-gated, concurrency-safe action firing with a bounded
//!   audit history.
//! - **Frame Driver** ([`engine`]): ties classification and dispatch
//!   together for one frame's worth of hands.
//!
//! ## Feature Flags
//!
//! - `serde`: serialization/deserialization for the public data types
//!
//! ## Example
//!
//! ```rust
//! use hand_gestures::{GestureClassifier, GestureKind, HandKeypoints, Landmark};
//!
//! // A closed fist: every fingertip folded below its middle joint.
//! let landmarks: Vec<Landmark> = (0..21)
//!     .map(|i| Landmark::new(0.5, 0.5 + i as f32 * 0.01, 0.0))
//!     .collect();
//! let hand = HandKeypoints::new(landmarks)?;
//!
//! let classifier = GestureClassifier::new();
//! let result = classifier.classify(&hand);
//! assert_eq!(result.label, Some(GestureKind::Fist));
//! # Ok::<(), hand_gestures::GestureError>(())
//! ```
//!
//! Dispatch requires a Tokio runtime, since each fired action runs as a
//! detached task:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hand_gestures::{
//!     GestureClassifier, GestureDispatcher, GestureEngine, LogSink,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = GestureEngine::new(
//!         GestureClassifier::new(),
//!         GestureDispatcher::with_defaults(Arc::new(LogSink)),
//!     );
//!     // for each frame: engine.process_frame(&hands)
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod action;
pub mod classifier;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod features;
pub mod geometry;
pub mod history;
pub mod types;

// Re-export commonly used types at the crate root
pub use action::{ActionSink, LogSink, NullSink};
pub use classifier::GestureClassifier;
pub use dispatcher::{DispatchOutcome, DispatcherConfig, GestureDispatcher};
pub use engine::{FrameOutput, GestureEngine};
pub use error::{ActionError, GestureError, GestureResult};
pub use features::{extract_features, PoseFeatures};
pub use history::ActionHistory;
pub use types::{
    // Keypoint types
    HandKeypoints, HandLandmark, Landmark,
    // Feature types
    Finger, FingerExtension, ThumbDirection,
    // Classification types
    GestureClassification, GestureKind,
    // Dispatch types
    ActionRecord,
    // Common types
    Confidence, Timestamp,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of landmarks in one hand skeleton
pub const LANDMARK_COUNT: usize = 21;

/// Number of fingers in the extension vector
pub const FINGER_COUNT: usize = 5;

/// Default minimum confidence for a classification to dispatch
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Default cooldown before the same gesture may dispatch again
pub const DEFAULT_COOLDOWN: std::time::Duration = std::time::Duration::from_secs(2);

/// Default capacity of the dispatch history
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Fixed confidence reported for an unrecognized pose
pub const UNKNOWN_CONFIDENCE: f32 = 0.4;

/// Prelude module for convenient imports.
///
/// ```rust
/// use hand_gestures::prelude::*;
/// ```
pub mod prelude {

    pub use crate::action::{ActionSink, LogSink, NullSink};
    pub use crate::classifier::GestureClassifier;
    pub use crate::dispatcher::{DispatchOutcome, DispatcherConfig, GestureDispatcher};
    pub use crate::engine::{FrameOutput, GestureEngine};
    pub use crate::error::{ActionError, GestureError, GestureResult};
    pub use crate::features::{extract_features, PoseFeatures};
    pub use crate::types::{
        ActionRecord, Confidence, Finger, FingerExtension, GestureClassification, GestureKind,
        HandKeypoints, HandLandmark, Landmark, ThumbDirection, Timestamp,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_valid() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(LANDMARK_COUNT, 21);
        assert_eq!(FINGER_COUNT, 5);
        assert_eq!(DEFAULT_HISTORY_CAPACITY, 10);
        assert!(DEFAULT_CONFIDENCE_THRESHOLD > UNKNOWN_CONFIDENCE);
        assert!(DEFAULT_CONFIDENCE_THRESHOLD < 1.0);
        assert_eq!(DEFAULT_COOLDOWN.as_secs_f64(), 2.0);
    }
}
