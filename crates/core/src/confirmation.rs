//! Contract with the confirmation collaborator.
//!
//! The collaborator is a display component invoked with
//! `(open, on_close, message, details)`. [`ConfirmationPrompt`] carries the
//! data half; [`ConfirmationDialog`] tracks open/close cycles so the close
//! signal that tears the session down fires exactly once per cycle.

use serde::{Deserialize, Serialize};

use crate::locale::format_weekday_day;
use crate::wizard::BookingSelection;

/// Message shown when a booking has been placed.
pub const DEFAULT_CONFIRMATION_MESSAGE: &str = "Reserva agendada correctamente";

/// Fixed closing line shown under every confirmation.
pub const CONFIRMATION_FOOTER: &str =
    "Te hemos enviado la confirmación. Gracias por confiar en nosotros.";

/// Data handed to the confirmation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationPrompt {
    pub open: bool,
    pub message: Option<String>,
    pub details: Option<String>,
}

impl ConfirmationPrompt {
    /// Open prompt for a confirmed selection.
    pub fn for_selection(selection: &BookingSelection, message: Option<String>) -> Self {
        Self {
            open: true,
            message,
            details: selection.summary(),
        }
    }

    /// Message to display, falling back to [`DEFAULT_CONFIRMATION_MESSAGE`].
    pub fn message_or_default(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or(DEFAULT_CONFIRMATION_MESSAGE)
    }
}

/// Signal that the wizard session should be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTeardown;

/// Open/close state of the confirmation collaborator.
#[derive(Debug, Default)]
pub struct ConfirmationDialog {
    prompt: Option<ConfirmationPrompt>,
}

impl ConfirmationDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.prompt.is_some()
    }

    /// Prompt currently on display, if any.
    pub fn prompt(&self) -> Option<&ConfirmationPrompt> {
        self.prompt.as_ref()
    }

    /// Start an open cycle. Re-opening replaces the displayed prompt.
    pub fn open(&mut self, prompt: ConfirmationPrompt) {
        self.prompt = Some(ConfirmationPrompt {
            open: true,
            ..prompt
        });
    }

    /// Dismiss the dialog.
    ///
    /// Returns the teardown signal on the first call of an open cycle and
    /// `None` afterwards.
    pub fn close(&mut self) -> Option<SessionTeardown> {
        self.prompt.take().map(|_| SessionTeardown)
    }
}

// ---------------------------------------------------------------------------
// Review summary
// ---------------------------------------------------------------------------

/// A labelled row of the review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRow {
    pub label: &'static str,
    pub value: String,
}

/// The rows shown on the review step before the user confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub rows: Vec<ReviewRow>,
}

impl ReviewSummary {
    /// Build the review rows. Missing fields render as empty values.
    pub fn from_selection(selection: &BookingSelection) -> Self {
        let service = selection
            .service
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default();
        let staff = selection
            .staff
            .as_ref()
            .map(|s| s.display_name().to_string())
            .unwrap_or_default();
        let date = selection.date.map(format_weekday_day).unwrap_or_default();
        let time = selection
            .time
            .as_ref()
            .map(|t| t.to_string())
            .unwrap_or_default();
        let total = selection
            .service
            .as_ref()
            .map(|s| format!("{}€", s.price))
            .unwrap_or_default();

        Self {
            rows: vec![
                ReviewRow {
                    label: "Servicio",
                    value: service,
                },
                ReviewRow {
                    label: "Profesional",
                    value: staff,
                },
                ReviewRow {
                    label: "Fecha",
                    value: format!("{date} - {time}"),
                },
                ReviewRow {
                    label: "Total Estimado",
                    value: total,
                },
            ],
        }
    }

    /// Value of the row with `label`.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}
