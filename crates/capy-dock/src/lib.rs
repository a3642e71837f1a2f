//! capy-dock - zbus client for the dock service
//!
//! Features:
//! - Single D-Bus connection per client
//! - One-way `add`/`remove` calls, no reply requested
//! - `DockNotifier` trait so callers can swap the transport

pub mod client;
pub mod error;

pub use client::{DockClient, DockNotifier, DockRequest};
pub use error::DockError;
