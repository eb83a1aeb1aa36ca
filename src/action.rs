//! Action side-effect boundary.
//!
//! The dispatcher performs a gesture's side effect through an
//! [`ActionSink`], an injected capability resolved once at startup by
//! the embedding application (a platform sound player, an automation
//! hook, a test recorder). A sink is invoked with the gesture's bound
//! resource name and the classification confidence; it is expected to
//! run briefly and fail silently — errors are logged by the dispatcher's
//! spawned task and never reach the recognition loop.

use async_trait::async_trait;
use tracing::info;

use crate::error::ActionError;
use crate::types::Confidence;

/// Sink for performing gesture-bound side effects.
#[async_trait]
pub trait ActionSink: Send + Sync {
    /// Sink name, used in logs.
    fn name(&self) -> &str;

    /// Performs the action bound to `resource`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is absent or the backend is
    /// unavailable; the caller logs and discards it.
    async fn invoke(&self, resource: &str, confidence: Confidence) -> Result<(), ActionError>;
}

/// Sink that logs each invocation instead of performing it.
///
/// The default when no platform backend is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl ActionSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn invoke(&self, resource: &str, confidence: Confidence) -> Result<(), ActionError> {
        info!(
            resource,
            confidence = confidence.value(),
            "Would perform action"
        );
        Ok(())
    }
}

/// Sink that silently accepts every invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl ActionSink for NullSink {
    fn name(&self) -> &str {
        "null"
    }

    async fn invoke(&self, _resource: &str, _confidence: Confidence) -> Result<(), ActionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sink_accepts_invocations() {
        let sink = LogSink;
        assert_eq!(sink.name(), "log");
        assert!(sink.invoke("thumbs_up.wav", Confidence::MAX).await.is_ok());
    }

    #[tokio::test]
    async fn test_null_sink_accepts_invocations() {
        let sink = NullSink;
        assert_eq!(sink.name(), "null");
        assert!(sink.invoke("heart.wav", Confidence::MIN).await.is_ok());
    }
}
