//! Core types and service wiring for the skiphire skip selection flow.

/// Pending-fetch guard and load state for the catalog.
pub mod loader;
/// Raw and display records for skips.
pub mod model;
/// Traits describing the catalog backend and its error type.
pub mod ports;
/// Single-selection state machine.
pub mod selection;
/// High-level service facade used by clients.
pub mod service;
/// Checkout steps shown by the step indicator.
pub mod steps;
/// Pure mapping from raw records to display records.
pub mod transform;

pub use loader::*;
pub use model::*;
pub use ports::*;
pub use selection::*;
pub use service::*;
pub use steps::*;
pub use transform::*;
