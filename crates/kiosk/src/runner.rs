//! Drives one wizard session from line commands.
//!
//! The kiosk plays the presentation layer: it lists the catalog, forwards
//! picks to the [`WizardSession`], submits confirmed bookings and acts as the
//! confirmation collaborator. Closing the confirmation tears the session
//! down and starts a fresh one.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use serde::Serialize;

use reserva_core::catalog::{today_local, CatalogProvider, StaffChoice, TimeSlot};
use reserva_core::confirmation::{
    ConfirmationDialog, ConfirmationPrompt, ReviewSummary, CONFIRMATION_FOOTER,
};
use reserva_core::error::CoreError;
use reserva_core::locale::format_long_date;
use reserva_core::submission::BookingSubmitter;
use reserva_core::wizard::{BookingSelection, Requirement, WizardSession, TOTAL_STEPS};

use crate::command::{Command, StaffArg, HELP};
use crate::config::KioskConfig;
use crate::error::KioskError;

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// JSON view printed by the `status` command.
#[derive(Debug, Serialize)]
struct StatusView<'a> {
    step: u8,
    label: &'static str,
    progress_percent: u8,
    can_advance: bool,
    missing: Vec<Requirement>,
    selection: &'a BookingSelection,
}

pub struct Kiosk<C, S> {
    catalog: C,
    submitter: S,
    config: KioskConfig,
    clock: fn() -> NaiveDate,
    session: WizardSession,
    days: Vec<NaiveDate>,
    dialog: ConfirmationDialog,
}

impl<C, S> Kiosk<C, S>
where
    C: CatalogProvider,
    S: BookingSubmitter,
{
    /// Kiosk whose sessions start on the local calendar's today.
    pub fn new(catalog: C, submitter: S, config: KioskConfig) -> Self {
        Self::with_clock(catalog, submitter, config, today_local)
    }

    /// Kiosk with an explicit source for "today".
    pub fn with_clock(catalog: C, submitter: S, config: KioskConfig, clock: fn() -> NaiveDate) -> Self {
        let days = catalog.next_bookable_days(config.days_ahead, clock());
        Self {
            catalog,
            submitter,
            config,
            clock,
            session: WizardSession::new(),
            days,
            dialog: ConfirmationDialog::new(),
        }
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn dialog(&self) -> &ConfirmationDialog {
        &self.dialog
    }

    /// Discard the current session and start a new one.
    fn reset(&mut self) {
        self.session = WizardSession::new();
        self.days = self
            .catalog
            .next_bookable_days(self.config.days_ahead, (self.clock)());
        tracing::info!(first_day = ?self.days.first(), "New booking session started");
    }

    /// Read commands until `quit` or end of input.
    ///
    /// Command errors are reported on `out` and the loop continues; only
    /// I/O failures end the run early.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<(), KioskError>
    where
        R: BufRead,
        W: Write,
    {
        self.print_step(out)?;

        for line in input.lines() {
            let line = line?;
            let result = match Command::parse(&line) {
                Ok(None) => continue,
                Ok(Some(command)) => self.handle(command, out).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(KioskError::Io(err)) => return Err(KioskError::Io(err)),
                Err(err) => {
                    tracing::warn!(error = %err, input = %line.trim(), "Command rejected");
                    writeln!(out, "error: {err}")?;
                }
            }
        }

        tracing::info!("Input closed, session abandoned");
        Ok(())
    }

    /// Apply a single command.
    ///
    /// An open confirmation overlays the wizard: until it is closed the
    /// booking has been handed off and cannot be edited or resubmitted.
    pub async fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, KioskError> {
        if self.dialog.is_open()
            && !matches!(command, Command::Close | Command::Quit | Command::Help)
        {
            return Err(KioskError::ConfirmationOpen);
        }

        match command {
            Command::Help => writeln!(out, "{HELP}")?,
            Command::ListServices => {
                let selected = self.session.selection().service.as_ref().map(|s| s.id);
                for service in self.catalog.list_services() {
                    let marker = if selected == Some(service.id) { "*" } else { " " };
                    writeln!(
                        out,
                        "{marker} {}. {} | {} min | {}€",
                        service.id, service.name, service.duration_minutes, service.price
                    )?;
                }
            }
            Command::ListStaff => {
                for staff in self.catalog.list_staff() {
                    writeln!(out, "  {}. {} ({})", staff.id, staff.name, staff.role)?;
                }
                writeln!(out, "  any. {}", StaffChoice::Any.display_name())?;
            }
            Command::ListDays => {
                for (index, day) in self.days.iter().enumerate() {
                    writeln!(out, "  {index}. {}", format_long_date(*day))?;
                }
            }
            Command::ListSlots => {
                if self.session.selection().date.is_none() {
                    writeln!(out, "(elige un día primero)")?;
                }
                let slots: Vec<String> = self
                    .catalog
                    .list_time_slots()
                    .iter()
                    .map(|slot| slot.to_string())
                    .collect();
                writeln!(out, "  {}", slots.join("  "))?;
            }
            Command::SelectService(id) => {
                let service = self
                    .catalog
                    .service_by_id(id)
                    .ok_or(CoreError::NotFound { entity: "service", id })?;
                writeln!(out, "Servicio: {} ({}€)", service.name, service.price)?;
                self.session.select_service(service);
            }
            Command::SelectStaff(arg) => {
                let choice = match arg {
                    StaffArg::Any => StaffChoice::Any,
                    StaffArg::Id(id) => StaffChoice::Specific(
                        self.catalog
                            .staff_by_id(id)
                            .ok_or(CoreError::NotFound { entity: "staff", id })?,
                    ),
                };
                writeln!(out, "Profesional: {}", choice.display_name())?;
                self.session.select_staff(choice);
            }
            Command::SelectDate(index) => {
                let day = *self.days.get(index).ok_or_else(|| KioskError::InvalidArgument {
                    command: "date",
                    reason: format!("day index {index} is out of range (0..{})", self.days.len()),
                })?;
                writeln!(out, "Día: {}", format_long_date(day))?;
                self.session.select_date(day);
            }
            Command::SelectTime(token) => {
                let parsed = TimeSlot::parse(&token)?;
                let slot = self.catalog.time_slot(parsed.as_str()).ok_or_else(|| {
                    CoreError::Validation(format!("Time slot '{token}' is not offered"))
                })?;
                if self.session.select_time(slot.clone()) {
                    writeln!(out, "Hora: {slot}")?;
                } else {
                    writeln!(out, "Elige un día antes de la hora")?;
                }
            }
            Command::Next => {
                self.session.advance()?;
                self.print_step(out)?;
            }
            Command::Back => {
                self.session.retreat();
                self.print_step(out)?;
            }
            Command::Status => {
                let view = StatusView {
                    step: self.session.step().to_number(),
                    label: self.session.step().label(),
                    progress_percent: self.session.progress_percent(),
                    can_advance: self.session.can_advance(),
                    missing: self.session.missing_requirements(),
                    selection: self.session.selection(),
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            }
            Command::Review => {
                for row in ReviewSummary::from_selection(self.session.selection()).rows {
                    writeln!(out, "  {}: {}", row.label, row.value)?;
                }
            }
            Command::Confirm => self.confirm(out).await?,
            Command::Close => match self.dialog.close() {
                Some(_teardown) => {
                    writeln!(out, "Sesión finalizada")?;
                    self.reset();
                    self.print_step(out)?;
                }
                None => writeln!(out, "No hay ninguna confirmación abierta")?,
            },
            Command::Quit => {
                tracing::info!(step = self.session.step().to_number(), "Session abandoned");
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    async fn confirm<W: Write>(&mut self, out: &mut W) -> Result<(), KioskError> {
        let booking = self.session.confirm()?;

        match self.submitter.submit(&booking).await {
            Ok(receipt) => {
                tracing::info!(reference = %receipt.reference, "Booking submitted");
                let prompt = ConfirmationPrompt::for_selection(
                    &booking,
                    Some(self.config.confirmation_message.clone()),
                );
                writeln!(out, "{}", prompt.message_or_default())?;
                if let Some(details) = &prompt.details {
                    writeln!(out, "{details}")?;
                }
                writeln!(out, "{CONFIRMATION_FOOTER}")?;
                writeln!(out, "Referencia: {}", receipt.reference)?;
                writeln!(out, "Escribe 'close' para terminar")?;
                self.dialog.open(prompt);
            }
            Err(err) => {
                tracing::error!(error = %err, "Booking submission failed");
                writeln!(out, "No se pudo registrar la reserva: {err}")?;
            }
        }

        Ok(())
    }

    fn print_step<W: Write>(&self, out: &mut W) -> Result<(), KioskError> {
        let step = self.session.step();
        writeln!(
            out,
            "Paso {} de {TOTAL_STEPS}: {} [{}%]",
            step.to_number(),
            step.label(),
            self.session.progress_percent()
        )?;
        Ok(())
    }
}
