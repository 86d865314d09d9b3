use std::num::NonZeroUsize;

use reserva_core::catalog::DEFAULT_BOOKABLE_DAYS;
use reserva_core::confirmation::DEFAULT_CONFIRMATION_MESSAGE;

use crate::error::KioskError;

/// Kiosk configuration loaded from environment variables.
///
/// All fields have defaults matching the salon's booking page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskConfig {
    /// Number of consecutive days offered per session (default: `3`).
    pub days_ahead: NonZeroUsize,
    /// Message shown once a booking is placed.
    pub confirmation_message: String,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            days_ahead: NonZeroUsize::new(DEFAULT_BOOKABLE_DAYS).unwrap_or(NonZeroUsize::MIN),
            confirmation_message: DEFAULT_CONFIRMATION_MESSAGE.to_string(),
        }
    }
}

impl KioskConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `BOOKING_DAYS_AHEAD`   | `3`                              |
    /// | `CONFIRMATION_MESSAGE` | `Reserva agendada correctamente` |
    pub fn from_env() -> Result<Self, KioskError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, KioskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let days_ahead = match lookup("BOOKING_DAYS_AHEAD") {
            Some(raw) => raw
                .trim()
                .parse::<NonZeroUsize>()
                .map_err(|_| {
                    KioskError::Config(format!(
                        "BOOKING_DAYS_AHEAD must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => defaults.days_ahead,
        };

        let confirmation_message = lookup("CONFIRMATION_MESSAGE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.confirmation_message);

        Ok(Self {
            days_ahead,
            confirmation_message,
        })
    }
}
