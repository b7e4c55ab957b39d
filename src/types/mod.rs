//! Tipos compartilhados do Bateria.

pub mod battery;
pub mod config;
pub mod errors;
pub mod profile;
pub mod reports;
pub mod test_result;

pub use battery::{Battery, HealthStatus};
pub use profile::{ProfileParameters, TestProfile};
pub use test_result::{Measurements, TestResult, TestResultUpdate, TestStatus};
