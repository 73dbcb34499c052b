mod errors;
mod types;

pub use errors::NotifyError;
pub use types::{Notifier, TracingNotifier};

use std::sync::{Arc, OnceLock};

static NOTIFIER: OnceLock<Arc<dyn Notifier>> = OnceLock::new();

/// Install the process-wide notifier. Call once at startup, before the first
/// code is issued; afterwards the installed transport is fixed.
pub fn set_notifier(notifier: Arc<dyn Notifier>) -> Result<(), NotifyError> {
    NOTIFIER
        .set(notifier)
        .map_err(|_| NotifyError::AlreadyInstalled)
}

fn current_notifier() -> Arc<dyn Notifier> {
    NOTIFIER
        .get_or_init(|| Arc::new(TracingNotifier))
        .clone()
}

/// Hand a code to the notifier on a detached task.
///
/// The issuing operation never waits on delivery and never observes its
/// outcome; failures are logged and dropped.
pub(crate) fn dispatch_code(recipient: &str, code: &str) {
    dispatch_code_with(current_notifier(), recipient, code);
}

fn dispatch_code_with(notifier: Arc<dyn Notifier>, recipient: &str, code: &str) {
    let recipient = recipient.to_string();
    let code = code.to_string();

    tokio::spawn(async move {
        if let Err(e) = notifier.send_code(&recipient, &code).await {
            tracing::warn!(error = %e, recipient = %recipient, "Verification code delivery failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Notifier that records every delivery for inspection
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_code(&self, recipient: &str, code: &str) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .expect("recording lock")
                .push((recipient.to_string(), code.to_string()));
            Ok(())
        }
    }

    /// Notifier that always fails
    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send_code(&self, _recipient: &str, _code: &str) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery("mail relay unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_tracing_notifier_send() {
        // The default notifier only logs; sending always succeeds
        let result = TracingNotifier.send_code("user@example.com", "123456").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_delivers_to_notifier() {
        let recorder = Arc::new(RecordingNotifier {
            sent: Mutex::new(Vec::new()),
        });

        dispatch_code_with(recorder.clone(), "user@example.com", "042137");

        // Delivery runs on a detached task; poll briefly for it to land
        for _ in 0..50 {
            if !recorder.sent.lock().expect("recording lock").is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }

        let sent = recorder.sent.lock().expect("recording lock");
        assert_eq!(sent.len(), 1, "Exactly one delivery should have landed");
        assert_eq!(sent[0].0, "user@example.com");
        assert_eq!(sent[0].1, "042137");
    }

    #[tokio::test]
    async fn test_dispatch_swallows_delivery_failure() {
        // The caller sees nothing: no panic, no error
        dispatch_code_with(Arc::new(FailingNotifier), "user@example.com", "042137");

        // Give the spawned task a moment to run its failure path
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}
