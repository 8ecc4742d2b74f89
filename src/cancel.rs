//! Composite cancellation: an external signal OR'd with an internal one.
//!
//! The component owns the internal token and cancels it on disposal. An
//! external token supplied by the caller is only observed, never cancelled.

use tokio_util::sync::CancellationToken;

/// Cancellation observed by a consumption pass.
///
/// Cancelled as soon as either side fires.
#[derive(Debug, Clone)]
pub struct CompositeCancellation {
    internal: CancellationToken,
    external: Option<CancellationToken>,
}

impl CompositeCancellation {
    /// Create a composite with a fresh internal token.
    pub fn new(external: Option<CancellationToken>) -> Self {
        Self {
            internal: CancellationToken::new(),
            external,
        }
    }

    /// Cancel the internal side.
    pub fn cancel(&self) {
        self.internal.cancel();
    }

    /// Whether either side has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.internal.is_cancelled()
            || self
                .external
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
    }

    /// Whether the external side specifically has been cancelled.
    pub fn is_externally_cancelled(&self) -> bool {
        self.external
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Resolve once either side is cancelled.
    pub async fn cancelled(&self) {
        match &self.external {
            Some(external) => {
                tokio::select! {
                    () = self.internal.cancelled() => {}
                    () = external.cancelled() => {}
                }
            }
            None => self.internal.cancelled().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_internal_cancel() {
        let cancellation = CompositeCancellation::new(None);
        assert!(!cancellation.is_cancelled());
        cancellation.cancel();
        assert!(cancellation.is_cancelled());
        assert!(!cancellation.is_externally_cancelled());
    }

    #[test]
    fn test_external_is_observed_not_mutated() {
        let external = CancellationToken::new();
        let cancellation = CompositeCancellation::new(Some(external.clone()));

        cancellation.cancel();
        assert!(cancellation.is_cancelled());
        assert!(!external.is_cancelled());

        let cancellation = CompositeCancellation::new(Some(external.clone()));
        external.cancel();
        assert!(cancellation.is_cancelled());
        assert!(cancellation.is_externally_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_on_either_side() {
        let external = CancellationToken::new();
        let cancellation = CompositeCancellation::new(Some(external.clone()));
        let waiter = cancellation.clone();
        let task = tokio::spawn(async move { waiter.cancelled().await });

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(!task.is_finished());
        external.cancel();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("composite should resolve")
            .unwrap();

        let cancellation = CompositeCancellation::new(None);
        cancellation.cancel();
        tokio::time::timeout(Duration::from_secs(1), cancellation.cancelled())
            .await
            .expect("internal cancel should resolve");
    }
}
