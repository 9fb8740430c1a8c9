pub mod executor;
pub mod report;

pub use executor::{progress_fraction, Pipeline, ProgressCallback};
pub use report::RunReport;
