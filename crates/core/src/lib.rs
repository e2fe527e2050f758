//! Domain logic for the Ermel quote system.
//!
//! Everything here is pure and database-free so both the repository layer
//! and the HTTP handlers can share it.

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod estimation;
pub mod measurement;
pub mod order_id;
pub mod phone;
pub mod quote_status;
pub mod sanitize;
pub mod scheduling;
pub mod submission;
pub mod types;
