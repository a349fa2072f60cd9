//! Computes per-pulse LED calibration metrics from raw PMT records, for gain and
//! single-photoelectron calibration.
//!
//! A batch of records is reduced as follows:
//! ```text
//! records ── channel filter ── pulse selection ── baseline correction ─┬─ amplitudes ─┬─ entries
//!                                                                      └─ area ───────┘
//! ```
//! Typical usage:
//! ```ignore
//! let calibrator = Calibrator::new(CalibrationParameters::default())?;
//! let output = calibrator.process(&raw_records);
//! ```
pub mod amplitude;
pub mod area;
pub mod assembler;
pub mod baseline;
pub mod error;
pub mod loader;
mod metrics;
pub mod parameters;
pub mod processing;
pub mod record;
pub mod schema;
pub mod selection;
mod timer;

pub use error::{ConfigError, LoaderError, ParseError, RecordError};
pub use parameters::{CalibrationParameters, ChannelList, SampleWindow};
pub use processing::{CalibrationOutput, Calibrator, compute};
pub use record::{CalibrationEntry, CorrectedBatch, RawRecord, WindowMetric};
pub use selection::SelectionSummary;

pub type Real = f64;
