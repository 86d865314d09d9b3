/// Catalog identifiers mirror the backend's BIGSERIAL keys.
pub type DbId = i64;

/// Whole euros. The catalog has no fractional prices.
pub type Euros = u32;
