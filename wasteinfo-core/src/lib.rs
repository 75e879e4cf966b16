//! Core types and service wiring for the wasteinfo facility finder.

/// Lookup failures and the stages they happen in.
pub mod error;
/// Domain models for locations, places, and waste centers.
pub mod model;
/// Mapping from provider places to waste centers.
pub mod normalize;
/// Bundle of provider ports handed to the service.
pub mod plugin;
/// Traits describing the provider interfaces.
pub mod ports;
/// High-level lookup service used by clients.
pub mod service;

pub use error::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
