use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum NotifyError {
    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Notifier already installed")]
    AlreadyInstalled,
}
