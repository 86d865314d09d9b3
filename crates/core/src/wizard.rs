//! Booking wizard state machine.
//!
//! A [`WizardSession`] owns the step cursor and the in-progress
//! [`BookingSelection`]. Its methods are the only mutation entry points, and
//! forward movement is gated by [`WizardSession::can_advance`].
//!
//! Steps form a linear chain `Service -> Staff -> Schedule -> Review`.
//! Moving back is never validated and never discards picks.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Service, StaffChoice, TimeSlot};
use crate::error::CoreError;
use crate::locale::format_short_date;

/// Separator between the parts of a booking summary line.
pub const SUMMARY_SEPARATOR: &str = " · ";

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The four steps of the booking wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Service,
    Staff,
    Schedule,
    Review,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 4;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 4;

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Service),
            2 => Ok(Self::Staff),
            3 => Ok(Self::Schedule),
            4 => Ok(Self::Review),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Service => 1,
            Self::Staff => 2,
            Self::Schedule => 3,
            Self::Review => 4,
        }
    }

    /// Heading shown for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Service => "Elige tu Servicio",
            Self::Staff => "Selecciona Profesional",
            Self::Schedule => "Fecha y Hora",
            Self::Review => "Confirma tu Cita",
        }
    }

    /// The following step, or `None` at the terminal step.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Service => Some(Self::Staff),
            Self::Staff => Some(Self::Schedule),
            Self::Schedule => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// The preceding step, or `None` at the first step.
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Service => None,
            Self::Staff => Some(Self::Service),
            Self::Schedule => Some(Self::Staff),
            Self::Review => Some(Self::Schedule),
        }
    }

    /// Fields that must be filled before leaving this step.
    pub fn requirements(self) -> &'static [Requirement] {
        match self {
            Self::Service => &[Requirement::Service],
            Self::Staff => &[Requirement::Staff],
            Self::Schedule => &[Requirement::Date, Requirement::Time],
            Self::Review => &[],
        }
    }
}

/// A selection field a step gate can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Service,
    Staff,
    Date,
    Time,
}

impl Requirement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Staff => "staff",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The accumulating booking draft. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub service: Option<Arc<Service>>,
    pub staff: Option<StaffChoice>,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
}

impl BookingSelection {
    /// Whether `requirement` is satisfied by this selection.
    pub fn has(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Service => self.service.is_some(),
            Requirement::Staff => self.staff.is_some(),
            Requirement::Date => self.date.is_some(),
            Requirement::Time => self.time.is_some(),
        }
    }

    /// One-line summary for the confirmation dialog.
    ///
    /// Service name, short date and time joined by [`SUMMARY_SEPARATOR`];
    /// absent parts are omitted. `None` when no service is chosen.
    pub fn summary(&self) -> Option<String> {
        let service = self.service.as_ref()?;

        let mut parts = vec![service.name.clone()];
        if let Some(date) = self.date {
            parts.push(format_short_date(date));
        }
        if let Some(time) = &self.time {
            parts.push(time.to_string());
        }

        Some(parts.join(SUMMARY_SEPARATOR))
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One user's in-progress booking attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSession {
    step: WizardStep,
    selection: BookingSelection,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    /// Fresh session at step 1 with nothing selected.
    pub fn new() -> Self {
        Self {
            step: WizardStep::Service,
            selection: BookingSelection::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    /// Progress through the wizard as a whole percentage (25, 50, 75, 100).
    pub fn progress_percent(&self) -> u8 {
        let percent = u16::from(self.step.to_number()) * 100 / u16::from(TOTAL_STEPS);
        u8::try_from(percent).unwrap_or(100)
    }

    pub fn select_service(&mut self, service: Arc<Service>) {
        tracing::debug!(service_id = service.id, step = self.step.to_number(), "Service selected");
        self.selection.service = Some(service);
    }

    pub fn select_staff(&mut self, staff: StaffChoice) {
        tracing::debug!(staff_id = ?staff.staff_id(), step = self.step.to_number(), "Staff selected");
        self.selection.staff = Some(staff);
    }

    /// Set the booking date. A previously chosen time is kept.
    pub fn select_date(&mut self, date: NaiveDate) {
        tracing::debug!(%date, step = self.step.to_number(), "Date selected");
        self.selection.date = Some(date);
    }

    /// Set the booking time. Ignored (returns `false`) until a date exists.
    pub fn select_time(&mut self, time: TimeSlot) -> bool {
        if self.selection.date.is_none() {
            tracing::debug!(%time, "Time ignored: no date selected");
            return false;
        }
        tracing::debug!(%time, step = self.step.to_number(), "Time selected");
        self.selection.time = Some(time);
        true
    }

    /// Fields the current step still needs before the wizard can move on.
    pub fn missing_requirements(&self) -> Vec<Requirement> {
        self.step
            .requirements()
            .iter()
            .copied()
            .filter(|r| !self.selection.has(*r))
            .collect()
    }

    /// Step gate for the current step. Always `true` at the review step.
    pub fn can_advance(&self) -> bool {
        self.missing_requirements().is_empty()
    }

    /// Move one step forward.
    ///
    /// Fails with [`CoreError::Precondition`] and leaves the step unchanged
    /// when the gate is closed. At the review step this is a no-op.
    pub fn advance(&mut self) -> Result<WizardStep, CoreError> {
        let missing = self.missing_requirements();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|r| r.as_str()).collect();
            return Err(CoreError::Precondition {
                step: self.step.to_number(),
                reason: format!("missing {}", names.join(", ")),
            });
        }

        if let Some(next) = self.step.next() {
            tracing::debug!(from = self.step.to_number(), to = next.to_number(), "Wizard advanced");
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move one step back. Never fails, never clears picks.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            tracing::debug!(from = self.step.to_number(), to = previous.to_number(), "Wizard retreated");
            self.step = previous;
        }
        self.step
    }

    /// Hand over the completed selection. Only valid at the review step.
    ///
    /// The session is left untouched; tearing it down is the caller's job
    /// once the confirmation collaborator has been dismissed.
    pub fn confirm(&self) -> Result<BookingSelection, CoreError> {
        if self.step != WizardStep::Review {
            return Err(CoreError::Precondition {
                step: self.step.to_number(),
                reason: format!("confirmation is only available at step {MAX_STEP}"),
            });
        }
        tracing::info!(summary = ?self.selection.summary(), "Booking confirmed");
        Ok(self.selection.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use assert_matches::assert_matches;

    use super::*;
    use crate::catalog::{next_bookable_days, CatalogProvider, StaticCatalog};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
    }

    fn slot(token: &str) -> TimeSlot {
        catalog().time_slot(token).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    /// Session walked to the review step with every field filled.
    fn completed_session() -> WizardSession {
        let catalog = catalog();
        let mut session = WizardSession::new();
        session.select_service(catalog.service_by_id(1).unwrap());
        session.advance().unwrap();
        session.select_staff(StaffChoice::Any);
        session.advance().unwrap();
        session.select_date(today());
        assert!(session.select_time(slot("10:00")));
        session.advance().unwrap();
        session
    }

    // -- WizardStep --

    #[test]
    fn step_numbers_round_trip() {
        for n in MIN_STEP..=MAX_STEP {
            assert_eq!(WizardStep::from_number(n).unwrap().to_number(), n);
        }
    }

    #[test]
    fn step_number_out_of_range() {
        assert_matches!(WizardStep::from_number(0), Err(CoreError::Validation(_)));
        assert_matches!(WizardStep::from_number(5), Err(CoreError::Validation(_)));
    }

    #[test]
    fn step_chain_is_linear() {
        assert_eq!(WizardStep::Service.previous(), None);
        assert_eq!(WizardStep::Service.next(), Some(WizardStep::Staff));
        assert_eq!(WizardStep::Schedule.previous(), Some(WizardStep::Staff));
        assert_eq!(WizardStep::Review.next(), None);
    }

    #[test]
    fn step_labels() {
        assert_eq!(WizardStep::Service.label(), "Elige tu Servicio");
        assert_eq!(WizardStep::Review.label(), "Confirma tu Cita");
    }

    // -- initial state --

    #[test]
    fn new_session_starts_empty_at_step_one() {
        let session = WizardSession::new();
        assert_eq!(session.step(), WizardStep::Service);
        assert_eq!(session.selection(), &BookingSelection::default());
        assert_eq!(session.progress_percent(), 25);
    }

    #[test]
    fn progress_percent_covers_every_step() {
        let mut session = completed_session();
        assert_eq!(session.progress_percent(), 100);
        session.retreat();
        assert_eq!(session.progress_percent(), 75);
        session.retreat();
        assert_eq!(session.progress_percent(), 50);
        session.retreat();
        assert_eq!(session.progress_percent(), 25);
    }

    // -- gating --

    #[test]
    fn advance_with_closed_gate_fails_and_keeps_step() {
        let catalog = catalog();
        let mut session = WizardSession::new();

        // Step 1: no service.
        assert!(!session.can_advance());
        assert_matches!(session.advance(), Err(CoreError::Precondition { step: 1, .. }));
        assert_eq!(session.step(), WizardStep::Service);

        // Step 2: no staff.
        session.select_service(catalog.service_by_id(1).unwrap());
        session.advance().unwrap();
        assert!(!session.can_advance());
        assert_matches!(session.advance(), Err(CoreError::Precondition { step: 2, .. }));
        assert_eq!(session.step(), WizardStep::Staff);

        // Step 3: date without time.
        session.select_staff(StaffChoice::Any);
        session.advance().unwrap();
        session.select_date(today());
        assert_eq!(session.missing_requirements(), vec![Requirement::Time]);
        assert_matches!(session.advance(), Err(CoreError::Precondition { step: 3, .. }));
        assert_eq!(session.step(), WizardStep::Schedule);
    }

    #[test]
    fn precondition_error_names_missing_fields() {
        let mut session = WizardSession::new();
        session.select_service(catalog().service_by_id(2).unwrap());
        session.advance().unwrap();
        session.select_staff(StaffChoice::Any);
        session.advance().unwrap();

        let err = session.advance().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Precondition failed at step 3: missing date, time"
        );
    }

    #[test]
    fn review_step_gate_is_vacuously_open() {
        let session = completed_session();
        assert_eq!(session.step(), WizardStep::Review);
        assert!(session.missing_requirements().is_empty());
        assert!(session.can_advance());
    }

    #[test]
    fn advance_at_review_step_is_a_no_op() {
        let mut session = completed_session();
        let before = session.clone();
        assert_eq!(session.advance().unwrap(), WizardStep::Review);
        assert_eq!(session, before);
    }

    // -- retreat --

    #[test]
    fn retreat_is_floored_at_step_one() {
        let mut session = WizardSession::new();
        assert_eq!(session.retreat(), WizardStep::Service);
    }

    #[test]
    fn retreat_never_clears_selection() {
        let mut session = completed_session();
        let selection = session.selection().clone();

        for expected in [WizardStep::Schedule, WizardStep::Staff, WizardStep::Service] {
            assert_eq!(session.retreat(), expected);
            assert_eq!(session.selection(), &selection);
        }
    }

    #[test]
    fn backward_edit_keeps_later_fields() {
        let catalog = catalog();
        let mut session = completed_session();
        session.retreat();
        session.retreat();
        session.retreat();

        session.select_service(catalog.service_by_id(4).unwrap());

        let selection = session.selection();
        assert_eq!(selection.service.as_ref().unwrap().id, 4);
        assert_eq!(selection.staff, Some(StaffChoice::Any));
        assert_eq!(selection.time, Some(slot("10:00")));
    }

    // -- selection --

    #[test]
    fn selecting_same_service_twice_is_idempotent() {
        let service = catalog().service_by_id(2).unwrap();
        let mut session = WizardSession::new();
        session.select_service(Arc::clone(&service));
        let once = session.clone();
        session.select_service(service);
        assert_eq!(session, once);
    }

    #[test]
    fn select_date_keeps_previous_time() {
        let mut session = WizardSession::new();
        session.select_date(today());
        assert!(session.select_time(slot("12:30")));
        session.select_date(today().succ_opt().unwrap());
        assert_eq!(session.selection().time, Some(slot("12:30")));
    }

    #[test]
    fn specific_staff_choice_is_stored() {
        let staff = catalog().staff_by_id(2).unwrap();
        let mut session = WizardSession::new();
        session.select_staff(StaffChoice::Specific(staff));
        assert_eq!(session.selection().staff.as_ref().unwrap().staff_id(), Some(2));
    }

    // -- confirm --

    #[test]
    fn confirm_before_review_fails() {
        let session = WizardSession::new();
        assert_matches!(session.confirm(), Err(CoreError::Precondition { step: 1, .. }));
    }

    #[test]
    fn confirm_does_not_mutate_session() {
        let session = completed_session();
        let before = session.clone();
        let confirmed = session.confirm().unwrap();
        assert_eq!(&confirmed, session.selection());
        assert_eq!(session, before);
    }

    // -- summary --

    #[test]
    fn summary_requires_service() {
        let selection = BookingSelection {
            date: Some(today()),
            ..Default::default()
        };
        assert_eq!(selection.summary(), None);
    }

    #[test]
    fn summary_omits_absent_parts() {
        let selection = BookingSelection {
            service: catalog().service_by_id(1),
            time: Some(slot("19:00")),
            ..Default::default()
        };
        assert_eq!(selection.summary().unwrap(), "Corte Estilo · 19:00");
    }

    // -- scenarios --

    #[test]
    fn scenario_service_pick_opens_first_gate() {
        let mut session = WizardSession::new();
        let service = catalog().service_by_id(2).unwrap();
        assert_eq!(service.name, "Corte + Barba");
        assert_eq!(service.price, 35);
        assert_eq!(service.duration_minutes, 60);

        session.select_service(service);
        assert_eq!(session.advance().unwrap(), WizardStep::Staff);
        assert_eq!(session.step().to_number(), 2);
    }

    #[test]
    fn scenario_time_before_date_is_ignored() {
        let catalog = catalog();
        let mut session = WizardSession::new();
        session.select_service(catalog.service_by_id(1).unwrap());
        session.advance().unwrap();
        session.select_staff(StaffChoice::Specific(catalog.staff_by_id(2).unwrap()));
        session.advance().unwrap();

        assert!(!session.select_time(slot("11:00")));
        assert_eq!(session.selection().time, None);
        assert_eq!(session.step(), WizardStep::Schedule);
    }

    #[test]
    fn scenario_full_booking_summary() {
        let catalog = catalog();
        let days = next_bookable_days(NonZeroUsize::new(3).unwrap(), today());
        let mut session = WizardSession::new();

        session.select_service(catalog.service_by_id(3).unwrap());
        session.advance().unwrap();
        session.select_staff(StaffChoice::Specific(catalog.staff_by_id(1).unwrap()));
        session.advance().unwrap();
        session.select_date(days[1]);
        assert!(session.select_time(slot("16:00")));
        session.advance().unwrap();

        let confirmed = session.confirm().unwrap();
        assert_eq!(confirmed.service.as_ref().unwrap().price, 50);
        assert_eq!(
            confirmed.summary().unwrap(),
            format!("Tinte Completo · {} · 16:00", format_short_date(days[1]))
        );
        assert_eq!(confirmed.summary().unwrap(), "Tinte Completo · 17/10/2026 · 16:00");
    }

    #[test]
    fn scenario_retreat_then_advance_returns_to_review() {
        let mut session = completed_session();
        let selection = session.selection().clone();

        session.retreat();
        assert_eq!(session.advance().unwrap(), WizardStep::Review);
        assert_eq!(session.selection(), &selection);
        assert!(session.can_advance());
    }
}
