//! # IUT Douala ERP core
//!
//! Entity model and display logic shared by the ERP client: the records the
//! REST backend returns, the occupancy query over time slots, collection
//! filters, the calendar projection of the timetable and dashboard counters.
//!
//! Nothing in this crate performs I/O. Every function is a pure computation
//! over the collections it is handed.

pub mod board;
pub mod catalog;
pub mod dashboard;
pub mod errors;
pub mod filters;
pub mod models;
pub mod occupancy;
pub mod timetable;
