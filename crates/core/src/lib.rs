//! `reserva-core` -- domain logic for the appointment-booking wizard.
//!
//! Pure, synchronous state: the static catalog, the step-gated wizard
//! session, and the contracts with the confirmation and submission
//! collaborators. Nothing here performs I/O.

pub mod catalog;
pub mod confirmation;
pub mod error;
pub mod locale;
pub mod submission;
pub mod types;
pub mod wizard;
