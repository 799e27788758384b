// --- File: crates/slotwise_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod models; // Shared domain model
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    conflict, config_error, internal_error, not_found, validation_error, HttpStatusCode,
    SlotwiseError,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

// Re-export the repository seam for easier access
pub use services::{BookingRepository, BoxFuture, NewAppointment};
