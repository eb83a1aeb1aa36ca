//! Core data types for hand-gesture recognition.
//!
//! This module defines the data structures shared by the classifier and
//! the action dispatcher.
//!
//! # Type Categories
//!
//! - **Keypoint Types**: [`Landmark`], [`HandLandmark`], [`HandKeypoints`]
//! - **Feature Types**: [`Finger`], [`FingerExtension`], [`ThumbDirection`]
//! - **Classification Types**: [`GestureKind`], [`GestureClassification`]
//! - **Dispatch Types**: [`ActionRecord`]
//! - **Common Types**: [`Confidence`], [`Timestamp`]

use chrono::Utc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GestureError, GestureResult};
use crate::{FINGER_COUNT, LANDMARK_COUNT, UNKNOWN_CONFIDENCE};

// =============================================================================
// Common Types
// =============================================================================

/// Wall-clock timestamp attached to dispatched action records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp {
    /// Seconds since Unix epoch
    pub seconds: i64,
    /// Nanoseconds within the second
    pub nanos: u32,
}

impl Timestamp {
    /// Creates a new timestamp from seconds and nanoseconds.
    #[must_use]
    pub fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// Creates a timestamp from the current time.
    #[must_use]
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            seconds: now.timestamp(),
            nanos: now.timestamp_subsec_nanos(),
        }
    }

    /// Returns the timestamp as total nanoseconds since epoch.
    #[must_use]
    pub fn as_nanos(&self) -> i128 {
        i128::from(self.seconds) * 1_000_000_000 + i128::from(self.nanos)
    }

    /// Returns the duration between two timestamps in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_since(&self, earlier: &Self) -> f64 {
        let diff_nanos = self.as_nanos() - earlier.as_nanos();
        diff_nanos as f64 / 1_000_000_000.0
    }
}

/// Confidence score in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range [0.0, 1.0].
    pub fn new(value: f32) -> GestureResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(GestureError::invalid_input(format!(
                "confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Creates a confidence value without validation (for fixed rule
    /// constants).
    #[must_use]
    pub(crate) fn new_unchecked(value: f32) -> Self {
        debug_assert!((0.0..=1.0).contains(&value));
        Self(value)
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns `true` if the confidence meets or exceeds the given
    /// threshold.
    #[must_use]
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// Keypoint Types
// =============================================================================

/// A single 3D hand keypoint in normalized image-relative coordinates.
///
/// `x` and `y` are in `[0, 1]` (y grows downward in screen space); `z`
/// is relative depth with no fixed range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Landmark {
    /// Normalized horizontal coordinate
    pub x: f32,
    /// Normalized vertical coordinate (smaller is higher on screen)
    pub y: f32,
    /// Relative depth
    pub z: f32,
}

impl Landmark {
    /// Creates a new landmark.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Named landmark indices of the 21-point hand skeleton.
///
/// Index 0 is the wrist; each finger runs base to tip: thumb 1-4,
/// index 5-8, middle 9-12, ring 13-16, pinky 17-20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    /// Returns the position of this landmark within a [`HandKeypoints`]
    /// sequence.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the landmark name as a string.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbCmc => "thumb_cmc",
            Self::ThumbMcp => "thumb_mcp",
            Self::ThumbIp => "thumb_ip",
            Self::ThumbTip => "thumb_tip",
            Self::IndexMcp => "index_mcp",
            Self::IndexPip => "index_pip",
            Self::IndexDip => "index_dip",
            Self::IndexTip => "index_tip",
            Self::MiddleMcp => "middle_mcp",
            Self::MiddlePip => "middle_pip",
            Self::MiddleDip => "middle_dip",
            Self::MiddleTip => "middle_tip",
            Self::RingMcp => "ring_mcp",
            Self::RingPip => "ring_pip",
            Self::RingDip => "ring_dip",
            Self::RingTip => "ring_tip",
            Self::PinkyMcp => "pinky_mcp",
            Self::PinkyPip => "pinky_pip",
            Self::PinkyDip => "pinky_dip",
            Self::PinkyTip => "pinky_tip",
        }
    }

    /// Returns all landmarks in skeletal order.
    #[must_use]
    pub const fn all() -> &'static [Self; LANDMARK_COUNT] {
        &[
            Self::Wrist,
            Self::ThumbCmc,
            Self::ThumbMcp,
            Self::ThumbIp,
            Self::ThumbTip,
            Self::IndexMcp,
            Self::IndexPip,
            Self::IndexDip,
            Self::IndexTip,
            Self::MiddleMcp,
            Self::MiddlePip,
            Self::MiddleDip,
            Self::MiddleTip,
            Self::RingMcp,
            Self::RingPip,
            Self::RingDip,
            Self::RingTip,
            Self::PinkyMcp,
            Self::PinkyPip,
            Self::PinkyDip,
            Self::PinkyTip,
        ]
    }
}

impl TryFrom<usize> for HandLandmark {
    type Error = GestureError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::all()
            .get(value)
            .copied()
            .ok_or_else(|| GestureError::invalid_input(format!("invalid landmark index: {value}")))
    }
}

/// A validated, immutable set of exactly 21 hand landmarks for one hand
/// in one frame.
///
/// Construction is the input boundary of the crate: a wrong landmark
/// count or out-of-range coordinates fail with
/// [`GestureError::InvalidInput`], and everything downstream may assume
/// a well-formed skeleton.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandKeypoints {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandKeypoints {
    /// Creates a keypoint set from a sequence of landmarks in skeletal
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidInput`] if the sequence does not
    /// contain exactly 21 landmarks, or if any landmark's `x` or `y`
    /// coordinate falls outside `[0, 1]`.
    pub fn new(landmarks: Vec<Landmark>) -> GestureResult<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = landmarks.try_into().map_err(
            |v: Vec<Landmark>| {
                GestureError::invalid_input(format!(
                    "expected {LANDMARK_COUNT} landmarks, got {}",
                    v.len()
                ))
            },
        )?;
        Self::from_array(landmarks)
    }

    /// Creates a keypoint set from a fixed-size landmark array.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidInput`] if any landmark's `x` or
    /// `y` coordinate falls outside `[0, 1]`.
    pub fn from_array(landmarks: [Landmark; LANDMARK_COUNT]) -> GestureResult<Self> {
        for (i, lm) in landmarks.iter().enumerate() {
            if !(0.0..=1.0).contains(&lm.x) || !(0.0..=1.0).contains(&lm.y) {
                return Err(GestureError::invalid_input(format!(
                    "landmark {i} out of range: ({}, {})",
                    lm.x, lm.y
                )));
            }
        }
        Ok(Self { landmarks })
    }

    /// Returns the landmark at the given skeletal position.
    #[must_use]
    pub fn get(&self, landmark: HandLandmark) -> &Landmark {
        &self.landmarks[landmark.index()]
    }

    /// Returns the wrist landmark.
    #[must_use]
    pub fn wrist(&self) -> &Landmark {
        self.get(HandLandmark::Wrist)
    }

    /// Returns all landmarks in skeletal order.
    #[must_use]
    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }
}

impl std::ops::Index<HandLandmark> for HandKeypoints {
    type Output = Landmark;

    fn index(&self, landmark: HandLandmark) -> &Self::Output {
        self.get(landmark)
    }
}

// =============================================================================
// Feature Types
// =============================================================================

/// The five fingers, in the fixed order used by [`FingerExtension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

impl Finger {
    /// Returns all fingers in extension-vector order.
    #[must_use]
    pub const fn all() -> &'static [Self; FINGER_COUNT] {
        &[Self::Thumb, Self::Index, Self::Middle, Self::Ring, Self::Pinky]
    }

    /// Returns the fingertip landmark for this finger.
    #[must_use]
    pub const fn tip(self) -> HandLandmark {
        match self {
            Self::Thumb => HandLandmark::ThumbTip,
            Self::Index => HandLandmark::IndexTip,
            Self::Middle => HandLandmark::MiddleTip,
            Self::Ring => HandLandmark::RingTip,
            Self::Pinky => HandLandmark::PinkyTip,
        }
    }

    /// Returns the joint compared against the fingertip when deciding
    /// extension (the thumb uses its MCP, the other fingers their DIP).
    #[must_use]
    pub const fn extension_joint(self) -> HandLandmark {
        match self {
            Self::Thumb => HandLandmark::ThumbMcp,
            Self::Index => HandLandmark::IndexDip,
            Self::Middle => HandLandmark::MiddleDip,
            Self::Ring => HandLandmark::RingDip,
            Self::Pinky => HandLandmark::PinkyDip,
        }
    }
}

/// Open/closed state per finger, in [`Finger`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FingerExtension([bool; FINGER_COUNT]);

impl FingerExtension {
    /// Creates an extension vector from per-finger flags.
    #[must_use]
    pub const fn new(flags: [bool; FINGER_COUNT]) -> Self {
        Self(flags)
    }

    /// Returns `true` if the given finger is extended.
    #[must_use]
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    /// Returns the raw per-finger flags (thumb, index, middle, ring,
    /// pinky).
    #[must_use]
    pub const fn pattern(&self) -> [bool; FINGER_COUNT] {
        self.0
    }

    /// Returns the number of extended fingers.
    #[must_use]
    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }
}

/// Dominant screen-space orientation of the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ThumbDirection {
    /// Tip above the base (smaller y)
    Up,
    /// Tip below the base
    Down,
    /// Tip to the left of the base
    Left,
    /// Tip to the right of the base
    Right,
}

// =============================================================================
// Classification Types
// =============================================================================

/// The closed vocabulary of recognizable gestures.
///
/// Each variant carries a fixed display name, a bound action resource
/// and a dispatch description; the binding is total, so every recognized
/// gesture has an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum GestureKind {
    ThumbsUp,
    ThumbsDown,
    Peace,
    Ok,
    Fist,
    OpenHand,
    Pointing,
    Heart,
    Rock,
    Pinch,
    Gun,
    CountOne,
    CountTwo,
    Phone,
}

impl GestureKind {
    /// Returns all gesture kinds.
    #[must_use]
    pub const fn all() -> &'static [Self; 14] {
        &[
            Self::ThumbsUp,
            Self::ThumbsDown,
            Self::Peace,
            Self::Ok,
            Self::Fist,
            Self::OpenHand,
            Self::Pointing,
            Self::Heart,
            Self::Rock,
            Self::Pinch,
            Self::Gun,
            Self::CountOne,
            Self::CountTwo,
            Self::Phone,
        ]
    }

    /// Returns the stable snake_case identifier of this gesture.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::ThumbsUp => "thumbs_up",
            Self::ThumbsDown => "thumbs_down",
            Self::Peace => "peace",
            Self::Ok => "ok",
            Self::Fist => "fist",
            Self::OpenHand => "open_hand",
            Self::Pointing => "pointing",
            Self::Heart => "heart",
            Self::Rock => "rock",
            Self::Pinch => "pinch",
            Self::Gun => "gun",
            Self::CountOne => "count_one",
            Self::CountTwo => "count_two",
            Self::Phone => "phone",
        }
    }

    /// Returns the human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ThumbsUp => "Thumbs Up",
            Self::ThumbsDown => "Thumbs Down",
            Self::Peace => "Peace Sign",
            Self::Ok => "OK Sign",
            Self::Fist => "Fist",
            Self::OpenHand => "Open Hand",
            Self::Pointing => "Pointing",
            Self::Heart => "Heart",
            Self::Rock => "Rock Sign",
            Self::Pinch => "Pinch",
            Self::Gun => "Gun Sign",
            Self::CountOne => "One",
            Self::CountTwo => "Two",
            Self::Phone => "Phone",
        }
    }

    /// Returns the action resource bound to this gesture, handed to the
    /// [`ActionSink`](crate::action::ActionSink) on dispatch.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::ThumbsUp => "thumbs_up.wav",
            Self::ThumbsDown => "thumbs_down.wav",
            Self::Peace => "peace.wav",
            Self::Ok => "ok.wav",
            Self::Fist => "fist.wav",
            Self::OpenHand => "open_hand.wav",
            Self::Pointing => "pointing.wav",
            Self::Heart => "heart.wav",
            Self::Rock => "rock.wav",
            Self::Pinch => "pinch.wav",
            Self::Gun => "gun.wav",
            Self::CountOne => "count_one.wav",
            Self::CountTwo => "count_two.wav",
            Self::Phone => "phone.wav",
        }
    }

    /// Returns the human-readable description reported when this
    /// gesture's action is dispatched.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ThumbsUp => "Approval registered",
            Self::ThumbsDown => "Disapproval registered",
            Self::Peace => "Peace sign sent",
            Self::Ok => "Confirmation accepted",
            Self::Fist => "Stop requested",
            Self::OpenHand => "Greeting waved",
            Self::Pointing => "Target marked",
            Self::Heart => "Heart sent",
            Self::Rock => "Rock on",
            Self::Pinch => "Precision grab engaged",
            Self::Gun => "Finger gun fired",
            Self::CountOne => "Counted one",
            Self::CountTwo => "Counted two",
            Self::Phone => "Call answered",
        }
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// The result of classifying one hand (or one two-hand composite) in one
/// frame.
///
/// A `None` label means no rule matched; it carries the fixed fallback
/// confidence and never dispatches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureClassification {
    /// Recognized gesture, or `None` for an unrecognized pose
    pub label: Option<GestureKind>,
    /// Classification confidence
    pub confidence: Confidence,
}

impl GestureClassification {
    /// Creates a classification for a recognized gesture.
    #[must_use]
    pub fn detected(label: GestureKind, confidence: Confidence) -> Self {
        Self {
            label: Some(label),
            confidence,
        }
    }

    /// Creates the fallback classification for an unrecognized pose.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            label: None,
            confidence: Confidence::new_unchecked(UNKNOWN_CONFIDENCE),
        }
    }

    /// Returns `true` if no rule matched.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.label.is_none()
    }
}

// =============================================================================
// Dispatch Types
// =============================================================================

/// One successfully dispatched action, as recorded in the dispatcher's
/// bounded history.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionRecord {
    /// The gesture whose action was dispatched
    pub gesture: GestureKind,
    /// Dispatch description at the time of firing
    pub description: String,
    /// Wall-clock time of the dispatch
    pub timestamp: Timestamp,
}
