pub mod assessment;
pub mod enums;
pub mod metrics;

pub use assessment::*;
pub use metrics::*;
