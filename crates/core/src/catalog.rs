//! Catalog of bookable services, staff and time slots.
//!
//! The catalog is static reference data. [`CatalogProvider`] is the seam a
//! future backend-backed catalog plugs into; implementations must keep the
//! ordering and cardinality guarantees documented on each method.

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Euros};

/// Number of bookable days offered per session.
pub const DEFAULT_BOOKABLE_DAYS: usize = 3;

/// Display name of the "any professional" staff choice.
pub const ANY_STAFF_NAME: &str = "Cualquiera";

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// A service offered by the salon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub price: Euros,
    pub duration_minutes: u32,
}

/// A staff member who can take a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub image_url: String,
}

/// The staff pick in a booking: a specific person or "any professional".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "staff", rename_all = "snake_case")]
pub enum StaffChoice {
    Specific(Arc<Staff>),
    Any,
}

impl StaffChoice {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Specific(staff) => &staff.name,
            Self::Any => ANY_STAFF_NAME,
        }
    }

    /// Id of the chosen staff member, `None` for [`StaffChoice::Any`].
    pub fn staff_id(&self) -> Option<DbId> {
        match self {
            Self::Specific(staff) => Some(staff.id),
            Self::Any => None,
        }
    }
}

/// An offered start time, `HH:MM` on a 24-hour clock.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(String);

impl TimeSlot {
    /// Parse a `HH:MM` token.
    pub fn parse(token: &str) -> Result<Self, CoreError> {
        let invalid = || {
            CoreError::Validation(format!(
                "Invalid time slot '{token}'. Expected HH:MM (24-hour clock)"
            ))
        };

        let (hours, minutes) = token.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        let hours: u8 = hours.parse().map_err(|_| invalid())?;
        let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = CoreError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::parse(&token)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.0
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Source of the reference data a wizard session picks from.
pub trait CatalogProvider {
    /// Services in display order. Never empty.
    fn list_services(&self) -> Vec<Arc<Service>>;

    /// Staff in display order. Never empty.
    fn list_staff(&self) -> Vec<Arc<Staff>>;

    /// Offered start times, chronologically ordered.
    fn list_time_slots(&self) -> Vec<TimeSlot>;

    /// Exactly `count` consecutive calendar days starting at `today`.
    fn next_bookable_days(&self, count: NonZeroUsize, today: NaiveDate) -> Vec<NaiveDate> {
        next_bookable_days(count, today)
    }

    fn service_by_id(&self, id: DbId) -> Option<Arc<Service>> {
        self.list_services().into_iter().find(|s| s.id == id)
    }

    fn staff_by_id(&self, id: DbId) -> Option<Arc<Staff>> {
        self.list_staff().into_iter().find(|s| s.id == id)
    }

    /// Look up an offered slot by its token.
    fn time_slot(&self, token: &str) -> Option<TimeSlot> {
        self.list_time_slots()
            .into_iter()
            .find(|slot| slot.as_str() == token)
    }
}

/// `count` consecutive days from `today` (inclusive). Pure.
pub fn next_bookable_days(count: NonZeroUsize, today: NaiveDate) -> Vec<NaiveDate> {
    today.iter_days().take(count.get()).collect()
}

/// Today's date on the local calendar.
pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Bookable days starting today. Call once per session so "today" stays
/// current for long-lived processes.
pub fn bookable_days_from_today(catalog: &impl CatalogProvider, count: NonZeroUsize) -> Vec<NaiveDate> {
    catalog.next_bookable_days(count, today_local())
}

// ---------------------------------------------------------------------------
// Static catalog
// ---------------------------------------------------------------------------

const SERVICES: &[(DbId, &str, Euros, u32)] = &[
    (1, "Corte Estilo", 25, 45),
    (2, "Corte + Barba", 35, 60),
    (3, "Tinte Completo", 50, 90),
    (4, "Mechas Balayage", 75, 150),
    (5, "Tratamiento Keratina", 100, 120),
    (6, "Peinado Evento", 40, 60),
];

const STAFF: &[(DbId, &str, &str, &str)] = &[
    (
        1,
        "Elena M.",
        "Directora",
        "https://images.unsplash.com/photo-1605497788044-5a32c7078486?q=80&w=1000&auto=format&fit=crop",
    ),
    (
        2,
        "Carlos R.",
        "Estilista",
        "https://images.unsplash.com/photo-1580618672591-eb180b1a97be?q=80&w=1000&auto=format&fit=crop",
    ),
];

const TIME_SLOTS: &[&str] = &["10:00", "11:00", "12:30", "16:00", "17:30", "19:00"];

/// In-memory catalog with the salon's fixed offering.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    services: Vec<Arc<Service>>,
    staff: Vec<Arc<Staff>>,
    time_slots: Vec<TimeSlot>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        let services = SERVICES
            .iter()
            .map(|&(id, name, price, duration_minutes)| {
                Arc::new(Service {
                    id,
                    name: name.to_string(),
                    price,
                    duration_minutes,
                })
            })
            .collect();

        let staff = STAFF
            .iter()
            .map(|&(id, name, role, image_url)| {
                Arc::new(Staff {
                    id,
                    name: name.to_string(),
                    role: role.to_string(),
                    image_url: image_url.to_string(),
                })
            })
            .collect();

        let time_slots = TIME_SLOTS
            .iter()
            .map(|token| TimeSlot(token.to_string()))
            .collect();

        Self {
            services,
            staff,
            time_slots,
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_services(&self) -> Vec<Arc<Service>> {
        self.services.clone()
    }

    fn list_staff(&self) -> Vec<Arc<Staff>> {
        self.staff.clone()
    }

    fn list_time_slots(&self) -> Vec<TimeSlot> {
        self.time_slots.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn days(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    // -- listings --

    #[test]
    fn services_keep_definition_order() {
        let ids: Vec<DbId> = StaticCatalog::new()
            .list_services()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn services_have_positive_durations() {
        for service in StaticCatalog::new().list_services() {
            assert!(service.duration_minutes > 0, "{} has no duration", service.name);
        }
    }

    #[test]
    fn staff_is_not_empty() {
        let staff = StaticCatalog::new().list_staff();
        assert_eq!(staff.len(), 2);
        assert_eq!(staff[0].name, "Elena M.");
        assert_eq!(staff[1].role, "Estilista");
    }

    #[test]
    fn time_slots_are_chronological() {
        let slots = StaticCatalog::new().list_time_slots();
        assert_eq!(slots.len(), 6);
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn listings_share_entries_instead_of_copying() {
        let catalog = StaticCatalog::new();
        let first = catalog.list_services();
        let second = catalog.list_services();
        assert!(Arc::ptr_eq(&first[0], &second[0]));
    }

    // -- lookups --

    #[test]
    fn service_lookup_by_id() {
        let service = StaticCatalog::new().service_by_id(3).unwrap();
        assert_eq!(service.name, "Tinte Completo");
        assert_eq!(service.price, 50);
    }

    #[test]
    fn unknown_ids_return_none() {
        let catalog = StaticCatalog::new();
        assert!(catalog.service_by_id(99).is_none());
        assert!(catalog.staff_by_id(0).is_none());
    }

    #[test]
    fn time_slot_lookup_requires_offered_token() {
        let catalog = StaticCatalog::new();
        assert_eq!(catalog.time_slot("16:00").unwrap().as_str(), "16:00");
        assert!(catalog.time_slot("09:00").is_none());
    }

    // -- TimeSlot::parse --

    #[test]
    fn parse_accepts_valid_tokens() {
        assert_eq!(TimeSlot::parse("00:00").unwrap().as_str(), "00:00");
        assert_eq!(TimeSlot::parse("23:59").unwrap().to_string(), "23:59");
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        for token in ["", "1600", "16:0", "6:00", "24:00", "12:60", "ab:cd", "16:00:00"] {
            assert!(TimeSlot::parse(token).is_err(), "accepted {token:?}");
        }
    }

    #[test]
    fn deserialize_validates_token() {
        let slot: TimeSlot = serde_json::from_str("\"17:30\"").unwrap();
        assert_eq!(slot.as_str(), "17:30");
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"17:30\"");

        assert!(serde_json::from_str::<TimeSlot>("\"banana\"").is_err());
        assert!(serde_json::from_str::<TimeSlot>("\"25:00\"").is_err());
    }

    // -- day generation --

    #[test]
    fn next_bookable_days_starts_today_and_steps_one_day() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let result = StaticCatalog::new().next_bookable_days(days(3), today);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0], today);
        for pair in result.windows(2) {
            assert_eq!(pair[1].signed_duration_since(pair[0]).num_days(), 1);
        }
    }

    #[test]
    fn next_bookable_days_crosses_month_and_year_boundaries() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let result = next_bookable_days(days(2), today);
        assert_eq!(result[1], NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }

    #[test]
    fn bookable_days_from_today_uses_local_date() {
        let result = bookable_days_from_today(&StaticCatalog::new(), days(1));
        assert_eq!(result, vec![today_local()]);
    }

    // -- StaffChoice --

    #[test]
    fn any_staff_has_sentinel_name_and_no_id() {
        assert_eq!(StaffChoice::Any.display_name(), "Cualquiera");
        assert_eq!(StaffChoice::Any.staff_id(), None);
    }

    #[test]
    fn specific_staff_exposes_member() {
        let elena = StaticCatalog::new().staff_by_id(1).unwrap();
        let choice = StaffChoice::Specific(elena);
        assert_eq!(choice.display_name(), "Elena M.");
        assert_eq!(choice.staff_id(), Some(1));
    }
}
