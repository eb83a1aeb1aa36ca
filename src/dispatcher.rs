//! Cooldown-gated action dispatch.
//!
//! The dispatcher decides whether a recognized gesture should fire its
//! bound action, executes that action without blocking the recognition
//! loop, and maintains a bounded audit history.
//!
//! Gating runs synchronously on the calling task under a single mutex
//! guard covering the whole read-check-write sequence, so two
//! near-simultaneous classifications of the same gesture cannot both
//! pass the cooldown check. Action execution is decoupled: each
//! successful dispatch spawns a detached Tokio task that invokes the
//! sink and terminates. The dispatcher never awaits, cancels, or joins
//! these tasks; a dispatch counts as performed once its task is spawned,
//! whatever the action's eventual fate.
//!
//! The cooldown slot is shared across gesture labels: only a repeat of
//! the *same* label is suppressed, and a different label always
//! interrupts the cooling one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::action::ActionSink;
use crate::error::{GestureError, GestureResult};
use crate::history::ActionHistory;
use crate::types::{ActionRecord, Confidence, GestureClassification, GestureKind, Timestamp};
use crate::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_COOLDOWN, DEFAULT_HISTORY_CAPACITY};

/// Configuration for gesture dispatch, fixed at construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DispatcherConfig {
    /// Minimum elapsed time before the same gesture may dispatch again
    pub cooldown: Duration,
    /// Minimum confidence for a classification to be considered
    pub confidence_threshold: f32,
    /// Maximum number of records retained in the dispatch history
    pub history_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl DispatcherConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Configuration`] if the confidence
    /// threshold is outside `[0, 1]` or the history capacity is zero.
    pub fn validate(&self) -> GestureResult<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(GestureError::configuration(format!(
                "confidence threshold must be in [0.0, 1.0], got {}",
                self.confidence_threshold
            )));
        }
        if self.history_capacity == 0 {
            return Err(GestureError::configuration(
                "history capacity must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Outcome of one `process_gesture` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// `true` if the gesture's action was spawned
    pub dispatched: bool,
    /// Dispatch description, empty when nothing fired
    pub description: String,
}

impl DispatchOutcome {
    fn fired(gesture: GestureKind) -> Self {
        Self {
            dispatched: true,
            description: gesture.description().to_string(),
        }
    }

    fn skipped() -> Self {
        Self {
            dispatched: false,
            description: String::new(),
        }
    }
}

/// Mutable dispatch state, guarded by the dispatcher's mutex.
#[derive(Debug)]
struct DispatchState {
    /// Label of the most recently dispatched gesture.
    last_action: Option<GestureKind>,
    /// Monotonic instant of the most recent dispatch.
    last_dispatch: Option<Instant>,
    /// Bounded record of successful dispatches.
    history: ActionHistory,
    /// Number of classifications dropped by the cooldown gate.
    suppressed: u64,
}

/// Cooldown-gated, concurrency-safe gesture-action dispatcher.
///
/// One dispatcher value owns all dispatch state for its lifetime; there
/// is no process-wide singleton. In-flight action tasks are
/// fire-and-forget and outlive the dispatcher by design.
///
/// [`process_gesture`](Self::process_gesture) must be called within a
/// Tokio runtime context.
pub struct GestureDispatcher {
    config: DispatcherConfig,
    sink: Arc<dyn ActionSink>,
    state: Mutex<DispatchState>,
}

impl GestureDispatcher {
    /// Creates a dispatcher with the given configuration and sink.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Configuration`] if the configuration is
    /// invalid.
    pub fn new(config: DispatcherConfig, sink: Arc<dyn ActionSink>) -> GestureResult<Self> {
        config.validate()?;
        let history = ActionHistory::new(config.history_capacity);
        Ok(Self {
            config,
            sink,
            state: Mutex::new(DispatchState {
                last_action: None,
                last_dispatch: None,
                history,
                suppressed: 0,
            }),
        })
    }

    /// Creates a dispatcher with the default configuration.
    #[must_use]
    pub fn with_defaults(sink: Arc<dyn ActionSink>) -> Self {
        Self::new(DispatcherConfig::default(), sink)
            .expect("default dispatcher config is valid")
    }

    /// Forwards a classification, treating an `Unknown` label as
    /// non-dispatchable.
    pub fn process(&self, classification: &GestureClassification) -> DispatchOutcome {
        self.process_gesture(classification.label, classification.confidence)
    }

    /// Decides whether `gesture` should fire its bound action and, if
    /// so, spawns it.
    ///
    /// An unknown label (`None`) or a confidence below the threshold is
    /// rejected without touching state. A repeat of the most recently
    /// dispatched label within the cooldown window is suppressed and
    /// counted. Otherwise the shared slot is updated, an
    /// [`ActionRecord`] is appended to the bounded history, and the
    /// sink invocation is spawned as a detached task whose failures are
    /// logged and discarded.
    pub fn process_gesture(
        &self,
        gesture: Option<GestureKind>,
        confidence: Confidence,
    ) -> DispatchOutcome {
        let Some(gesture) = gesture else {
            return DispatchOutcome::skipped();
        };
        if !confidence.exceeds(self.config.confidence_threshold) {
            return DispatchOutcome::skipped();
        }

        {
            let mut state = self.state.lock();
            let cooling = state.last_action == Some(gesture)
                && state
                    .last_dispatch
                    .is_some_and(|at| at.elapsed() < self.config.cooldown);
            if cooling {
                state.suppressed += 1;
                debug!(gesture = %gesture, "Suppressed by cooldown");
                return DispatchOutcome::skipped();
            }

            state.last_action = Some(gesture);
            state.last_dispatch = Some(Instant::now());
            state.history.push(ActionRecord {
                gesture,
                description: gesture.description().to_string(),
                timestamp: Timestamp::now(),
            });
        }

        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(e) = sink.invoke(gesture.resource(), confidence).await {
                warn!(
                    gesture = %gesture,
                    sink = sink.name(),
                    error = %e,
                    "Action failed"
                );
            }
        });

        info!(
            gesture = %gesture,
            confidence = confidence.value(),
            "Dispatched action"
        );
        DispatchOutcome::fired(gesture)
    }

    /// Returns a snapshot of the dispatch history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<ActionRecord> {
        self.state.lock().history.snapshot()
    }

    /// Returns the label of the most recently dispatched gesture.
    #[must_use]
    pub fn last_action(&self) -> Option<GestureKind> {
        self.state.lock().last_action
    }

    /// Returns the number of classifications dropped by the cooldown
    /// gate.
    #[must_use]
    pub fn suppressed_count(&self) -> u64 {
        self.state.lock().suppressed
    }

    /// Resets all dispatch state (history, cooldown slot, counters).
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.last_action = None;
        state.last_dispatch = None;
        state.history.clear();
        state.suppressed = 0;
    }

    /// Returns the dispatcher configuration.
    #[must_use]
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::NullSink;
    use crate::error::ActionError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Sink that records how often it was invoked.
    #[derive(Default)]
    struct CountingSink {
        invocations: AtomicUsize,
    }

    #[async_trait]
    impl ActionSink for CountingSink {
        fn name(&self) -> &str {
            "counting"
        }

        async fn invoke(&self, _resource: &str, _confidence: Confidence) -> Result<(), ActionError> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Sink that always fails.
    struct FailingSink;

    #[async_trait]
    impl ActionSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        async fn invoke(&self, resource: &str, _confidence: Confidence) -> Result<(), ActionError> {
            Err(ActionError::unavailable(resource))
        }
    }

    fn quick_config() -> DispatcherConfig {
        DispatcherConfig {
            cooldown: Duration::from_millis(50),
            ..DispatcherConfig::default()
        }
    }

    fn confident() -> Confidence {
        Confidence::new(0.9).unwrap()
    }

    #[test]
    fn test_config_validation() {
        let mut config = DispatcherConfig::default();
        assert!(config.validate().is_ok());

        config.confidence_threshold = 1.5;
        assert!(config.validate().is_err());

        config.confidence_threshold = 0.6;
        config.history_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_unknown_and_low_confidence_leave_state_untouched() {
        let dispatcher = GestureDispatcher::with_defaults(Arc::new(NullSink));

        let outcome = dispatcher.process_gesture(None, confident());
        assert!(!outcome.dispatched);
        assert!(outcome.description.is_empty());

        let low = Confidence::new(0.55).unwrap();
        let outcome = dispatcher.process_gesture(Some(GestureKind::Fist), low);
        assert!(!outcome.dispatched);
        assert!(outcome.description.is_empty());

        assert!(dispatcher.history().is_empty());
        assert!(dispatcher.last_action().is_none());
        assert_eq!(dispatcher.suppressed_count(), 0);
    }

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let dispatcher = GestureDispatcher::with_defaults(Arc::new(NullSink));
        let at_threshold = Confidence::new(0.6).unwrap();
        let outcome = dispatcher.process_gesture(Some(GestureKind::Peace), at_threshold);
        assert!(outcome.dispatched);
        assert_eq!(outcome.description, GestureKind::Peace.description());
    }

    #[tokio::test]
    async fn test_cooldown_suppresses_same_gesture() {
        let dispatcher =
            GestureDispatcher::new(quick_config(), Arc::new(NullSink)).unwrap();

        let first = dispatcher.process_gesture(Some(GestureKind::ThumbsUp), confident());
        assert!(first.dispatched);

        let second = dispatcher.process_gesture(Some(GestureKind::ThumbsUp), confident());
        assert!(!second.dispatched);
        assert!(second.description.is_empty());
        assert_eq!(dispatcher.suppressed_count(), 1);
        assert_eq!(dispatcher.history().len(), 1);
    }

    #[tokio::test]
    async fn test_cooldown_expires() {
        let dispatcher =
            GestureDispatcher::new(quick_config(), Arc::new(NullSink)).unwrap();

        assert!(dispatcher
            .process_gesture(Some(GestureKind::ThumbsUp), confident())
            .dispatched);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(dispatcher
            .process_gesture(Some(GestureKind::ThumbsUp), confident())
            .dispatched);
        assert_eq!(dispatcher.history().len(), 2);
    }

    #[tokio::test]
    async fn test_different_gesture_interrupts_cooling() {
        let dispatcher = GestureDispatcher::with_defaults(Arc::new(NullSink));

        assert!(dispatcher
            .process_gesture(Some(GestureKind::ThumbsUp), confident())
            .dispatched);
        assert!(dispatcher
            .process_gesture(Some(GestureKind::Fist), confident())
            .dispatched);
        assert_eq!(dispatcher.last_action(), Some(GestureKind::Fist));
        assert_eq!(dispatcher.history().len(), 2);
    }

    #[tokio::test]
    async fn test_history_keeps_ten_most_recent() {
        let dispatcher = GestureDispatcher::with_defaults(Arc::new(NullSink));

        // Alternating labels never cool, so every call dispatches.
        let pair = [GestureKind::ThumbsUp, GestureKind::Fist];
        for i in 0..12 {
            let outcome = dispatcher.process_gesture(Some(pair[i % 2]), confident());
            assert!(outcome.dispatched);
        }

        let history = dispatcher.history();
        assert_eq!(history.len(), 10);
        // Oldest surviving record is the third dispatch overall.
        assert_eq!(history[0].gesture, pair[2 % 2]);
        assert_eq!(history[9].gesture, pair[11 % 2]);
        for w in history.windows(2) {
            assert!(w[0].timestamp <= w[1].timestamp);
        }
    }

    #[tokio::test]
    async fn test_sink_is_invoked_per_dispatch() {
        let sink = Arc::new(CountingSink::default());
        let dispatcher = GestureDispatcher::with_defaults(sink.clone());

        dispatcher.process_gesture(Some(GestureKind::Rock), confident());
        dispatcher.process_gesture(Some(GestureKind::Peace), confident());
        // Suppressed: must not reach the sink.
        dispatcher.process_gesture(Some(GestureKind::Peace), confident());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(sink.invocations.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_disturb_state() {
        let dispatcher = GestureDispatcher::with_defaults(Arc::new(FailingSink));

        let outcome = dispatcher.process_gesture(Some(GestureKind::Heart), confident());
        // The dispatch is performed once the task is spawned.
        assert!(outcome.dispatched);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(dispatcher.history().len(), 1);
        assert_eq!(dispatcher.last_action(), Some(GestureKind::Heart));
    }

    #[tokio::test]
    async fn test_clear_resets_state() {
        let dispatcher = GestureDispatcher::with_defaults(Arc::new(NullSink));
        dispatcher.process_gesture(Some(GestureKind::Gun), confident());
        dispatcher.process_gesture(Some(GestureKind::Gun), confident());
        assert_eq!(dispatcher.suppressed_count(), 1);

        dispatcher.clear();
        assert!(dispatcher.history().is_empty());
        assert!(dispatcher.last_action().is_none());
        assert_eq!(dispatcher.suppressed_count(), 0);

        // The slot is free again after a clear.
        assert!(dispatcher
            .process_gesture(Some(GestureKind::Gun), confident())
            .dispatched);
    }
}
