//! The fixed output shape of the calibration, from which the host framework lays out
//! its columns. It must not change between invocations.
use serde::Serialize;

/// Name under which calibration entries are stored.
pub const DATA_KIND: &str = "led_cal";
/// Kind of data the calibration is computed from.
pub const DEPENDS_ON: &str = "raw_records";
/// Bumped whenever the output of the calibration changes for the same input.
pub const VERSION: &str = "0.2.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColumnType {
    Int16,
    Int32,
    Int64,
    Float64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub dtype: ColumnType,
    pub description: &'static str,
}

const fn column(name: &'static str, dtype: ColumnType, description: &'static str) -> Column {
    Column {
        name,
        dtype,
        description,
    }
}

/// Columns of [crate::CalibrationEntry], in storage order.
pub const CALIBRATION_SCHEMA: [Column; 7] = [
    column("area", ColumnType::Float64, "Area averaged in integration windows"),
    column("amplitude_led", ColumnType::Float64, "Amplitude in LED window"),
    column("amplitude_noise", ColumnType::Float64, "Amplitude in off LED window"),
    column("channel", ColumnType::Int16, "Channel"),
    column(
        "time",
        ColumnType::Int64,
        "Start time of the interval (ns since unix epoch)",
    ),
    column("dt", ColumnType::Int16, "Time resolution in ns"),
    column("length", ColumnType::Int32, "Length of the interval in samples"),
];
