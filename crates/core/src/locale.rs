//! Spanish (es-ES) date display.
//!
//! Only date rendering is localized; everything else in the wizard is
//! locale-neutral.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Short numeric form without zero padding, e.g. `17/10/2026`.
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Long form used when listing bookable days, e.g. `sábado, 17 de octubre`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize]
    )
}

/// Weekday and day of month, e.g. `sábado, 17`.
pub fn format_weekday_day(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date.weekday()), date.day())
}
