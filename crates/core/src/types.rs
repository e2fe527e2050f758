/// Order identifiers are human-readable strings (`EGA-2026-123`).
pub type OrderId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (created / scheduled) carry no time zone.
pub type Date = chrono::NaiveDate;
