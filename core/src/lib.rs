//! Data model and presentation logic for the VisionShield deepfake-detection
//! client.
//!
//! The modules mirror the layers of the web frontend while providing typed
//! view-models, deterministic demo generators, and a UI-free trim engine that
//! the viewer and the demo server share.

pub mod analysis;
pub mod dashboard;
pub mod format;
pub mod mock;
pub mod model;
pub mod overlay;
pub mod prelude;
pub mod telemetry;
pub mod trim;

pub use prelude::{DataError, DataResult, ResultsDataSource};
