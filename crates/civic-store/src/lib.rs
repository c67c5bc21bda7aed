//! Civic Grid Store - Complaint storage port and adapters
//!
//! The engine never persists anything itself. This crate defines the port
//! the intake layer writes complaints through and reads snapshots from, plus
//! an in-memory adapter.

pub mod memory;
pub mod ports;

pub use memory::MemoryComplaintStore;
pub use ports::{ComplaintStore, ComplaintUpdate, NewComplaint, RecordFilter};
