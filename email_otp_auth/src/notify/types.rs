use async_trait::async_trait;

use super::errors::NotifyError;

/// Outbound delivery contract for verification codes.
///
/// Implementations wrap an external transport (SMTP and the like). The auth
/// core treats every send as fire-and-forget: no retry, no rollback of the
/// code row on failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_code(&self, recipient: &str, code: &str) -> Result<(), NotifyError>;
}

/// Default notifier: logs the delivery instead of sending anything.
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send_code(&self, recipient: &str, code: &str) -> Result<(), NotifyError> {
        tracing::info!(recipient = %recipient, "Verification code ready for delivery");
        tracing::debug!(code = %code, "Verification code value");
        Ok(())
    }
}
