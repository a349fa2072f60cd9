use crate::parameters::SampleWindow;
use pmt_calibration_common::SAMPLES_PER_RECORD;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum WindowKind {
    #[strum(to_string = "baseline_window")]
    Baseline,
    #[strum(to_string = "led_window")]
    Led,
    #[strum(to_string = "noise_window")]
    Noise,
}

/// Raised once, when a [crate::Calibrator] is built from its parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{kind} {window} is reversed, start must not exceed end")]
    ReversedWindow {
        kind: WindowKind,
        window: SampleWindow,
    },
    #[error("{kind} {window} extends past the end of a record ({samples} samples)", samples = SAMPLES_PER_RECORD)]
    WindowOutOfBounds {
        kind: WindowKind,
        window: SampleWindow,
    },
    #[error("baseline_window {0} is empty")]
    EmptyBaselineWindow(SampleWindow),
    #[error("led_window {window} integrates up to sample {required}, records hold {samples}", samples = SAMPLES_PER_RECORD)]
    IntegrationOutOfBounds {
        window: SampleWindow,
        required: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected pattern 'start,end', got '{0}'")]
    WindowPattern(String),
    #[error("Invalid integer: {0}")]
    Int(#[from] ParseIntError),
    #[error("Invalid channel range '{0}', expected 'first..last'")]
    ChannelRange(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record {index} holds {found} samples, expected {expected}", expected = SAMPLES_PER_RECORD)]
    SampleCount { index: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("IO Error: {0}")]
    IO(#[from] std::io::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Record(#[from] RecordError),
}
