//! Booking submission contract.
//!
//! Submitting a confirmed selection is the only asynchronous boundary of the
//! wizard. The core hands over the frozen selection and passes the outcome
//! through without interpreting it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::wizard::BookingSelection;

/// Acknowledgement returned by a submitter when a booking is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Reference the backend assigned to the booking.
    pub reference: String,
}

/// Errors a submitter may report.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Booking rejected: {0}")]
    Rejected(String),

    #[error("Booking service unavailable: {0}")]
    Unavailable(String),
}

/// Sends a confirmed booking to wherever bookings are recorded.
pub trait BookingSubmitter: Send + Sync {
    fn submit(
        &self,
        booking: &BookingSelection,
    ) -> impl std::future::Future<Output = Result<SubmissionReceipt, SubmissionError>> + Send;
}

/// Submitter that records nothing and always reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSubmitter;

impl BookingSubmitter for LocalSubmitter {
    async fn submit(&self, booking: &BookingSelection) -> Result<SubmissionReceipt, SubmissionError> {
        let reference = Uuid::new_v4().to_string();
        tracing::info!(
            %reference,
            summary = ?booking.summary(),
            "Booking accepted locally",
        );
        Ok(SubmissionReceipt { reference })
    }
}
