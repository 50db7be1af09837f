//! Page models.
//!
//! Each page owns the collections its screen renders, loads them through an
//! authorized [`ErpClient`](crate::client::ErpClient), and re-fetches them in
//! full after every create or delete. Views are derived on demand from the
//! loaded collections; nothing is cached between calls.

pub mod classes;
pub mod courses;
pub mod dashboard;
pub mod equipment;
pub mod teachers;
pub mod timetable;
