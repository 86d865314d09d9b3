//! Line commands understood by the kiosk.

use reserva_core::types::DbId;

use crate::error::KioskError;

/// Staff argument: a catalog id or the "any professional" choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffArg {
    Id(DbId),
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    ListServices,
    ListStaff,
    ListDays,
    ListSlots,
    SelectService(DbId),
    SelectStaff(StaffArg),
    /// 0-based index into the session's bookable days.
    SelectDate(usize),
    SelectTime(String),
    Next,
    Back,
    Status,
    Review,
    Confirm,
    Close,
    Quit,
}

/// Text printed by the `help` command.
pub const HELP: &str = "\
Comandos:
  services            lista de servicios
  staff               lista de profesionales
  days                días disponibles
  slots               horas disponibles
  service <id>        elegir servicio
  staff <id|any>      elegir profesional
  date <n>            elegir día (índice de 'days')
  time <HH:MM>        elegir hora
  next | back         avanzar / volver un paso
  status              estado de la reserva (JSON)
  review              resumen de la cita
  confirm             confirmar la reserva
  close               cerrar la confirmación
  quit                abandonar";

impl Command {
    /// Parse one input line. Verbs are case-insensitive.
    ///
    /// Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, KioskError> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Ok(None);
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(KioskError::InvalidArgument {
                command: "input",
                reason: "too many arguments".to_string(),
            });
        }

        let command = match (verb.to_ascii_lowercase().as_str(), arg) {
            ("help", None) => Self::Help,
            ("services", None) => Self::ListServices,
            ("staff", None) => Self::ListStaff,
            ("days", None) => Self::ListDays,
            ("slots", None) => Self::ListSlots,
            ("service", Some(id)) => Self::SelectService(parse_id("service", id)?),
            ("staff", Some(arg)) if arg.eq_ignore_ascii_case("any") => {
                Self::SelectStaff(StaffArg::Any)
            }
            ("staff", Some(id)) => Self::SelectStaff(StaffArg::Id(parse_id("staff", id)?)),
            ("date", Some(index)) => Self::SelectDate(index.parse().map_err(|_| {
                KioskError::InvalidArgument {
                    command: "date",
                    reason: format!("'{index}' is not a day index"),
                }
            })?),
            ("time", Some(token)) => Self::SelectTime(token.to_string()),
            ("next", None) => Self::Next,
            ("back", None) => Self::Back,
            ("status", None) => Self::Status,
            ("review", None) => Self::Review,
            ("confirm", None) => Self::Confirm,
            ("close", None) => Self::Close,
            ("quit", None) => Self::Quit,
            ("service", None) => return Err(missing_argument("service")),
            ("date", None) => return Err(missing_argument("date")),
            ("time", None) => return Err(missing_argument("time")),
            _ => return Err(KioskError::UnknownCommand(line.trim().to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_id(command: &'static str, raw: &str) -> Result<DbId, KioskError> {
    raw.parse().map_err(|_| KioskError::InvalidArgument {
        command,
        reason: format!("'{raw}' is not a numeric id"),
    })
}

fn missing_argument(command: &'static str) -> KioskError {
    KioskError::InvalidArgument {
        command,
        reason: "missing argument".to_string(),
    }
}
