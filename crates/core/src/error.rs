use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A wizard operation was called while its step gate was closed.
    ///
    /// The presentation layer is expected to prevent this, so callers treat
    /// it as invariant breakage rather than a user-facing failure.
    #[error("Precondition failed at step {step}: {reason}")]
    Precondition { step: u8, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },
}
