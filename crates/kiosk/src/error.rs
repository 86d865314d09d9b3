use reserva_core::error::CoreError;

/// Errors surfaced by the kiosk.
///
/// Everything except [`KioskError::Io`] is reported to the user and the
/// input loop carries on.
#[derive(Debug, thiserror::Error)]
pub enum KioskError {
    /// A domain-level error from `reserva_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Unknown command '{0}'. Type 'help' for the list of commands")]
    UnknownCommand(String),

    #[error("Invalid argument for '{command}': {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },

    /// Only `close`, `quit` and `help` are accepted while a confirmation is shown.
    #[error("A booking confirmation is open. Type 'close' to finish")]
    ConfirmationOpen,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed. Ends the run.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
