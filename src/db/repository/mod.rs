//! Repository layer: patient-scoped assessment storage.

mod assessment;

pub use assessment::*;
