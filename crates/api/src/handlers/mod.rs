pub mod admin;
pub mod catalog;
pub mod quotes;
pub mod tracking;
