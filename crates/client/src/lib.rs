//! # IUT Douala ERP client
//!
//! Talks to the ERP REST backend on behalf of the administration screens.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven settings
//! - **Client**: the `reqwest` wrapper and the error mapping of failed calls
//! - **Session**: the logged-in user, restored and persisted explicitly
//! - **Pages**: per-screen data loading on top of `iut-erp-core` views

pub mod client;
pub mod config;
pub mod pages;
pub mod session;

pub use client::{Collection, ErpClient};
pub use config::ClientConfig;
pub use session::{FileSessionStore, Session, SessionStore, StoredSession};
