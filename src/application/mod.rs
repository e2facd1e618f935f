//! Application layer: tree files and the sample suite
//!
//! This layer orchestrates domain logic and owns file I/O.

pub mod document;
pub mod error;
pub mod error_ext;
pub mod samples;

pub use document::{load_document, parse_document, TreeFile};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use samples::{run_samples, sample_cases, Expected, SampleCase, SampleOutcome};
