use crate::{
    error::{LoaderError, RecordError},
    parameters::CalibrationParameters,
    record::{CalibrationEntry, RawRecord},
};
use pmt_calibration_common::{Channel, FragmentIndex, Length, Sample, SampleWidth, Time};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Read, Write},
    path::Path,
};

/// The on-disk form of a [RawRecord], with `data` as a plain list of samples.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawRecordRow {
    pub time: Time,
    pub length: Length,
    pub dt: SampleWidth,
    pub channel: Channel,
    pub pulse_length: Length,
    pub record_i: FragmentIndex,
    pub data: Vec<Sample>,
}

impl RawRecordRow {
    /// `index` is the position of the row in its file, used to report a malformed row.
    pub fn into_record(self, index: usize) -> Result<RawRecord, RecordError> {
        let found = self.data.len();
        let data = self
            .data
            .try_into()
            .map_err(|_| RecordError::SampleCount { index, found })?;
        Ok(RawRecord {
            time: self.time,
            length: self.length,
            dt: self.dt,
            channel: self.channel,
            pulse_length: self.pulse_length,
            record_i: self.record_i,
            data,
        })
    }
}

impl From<&RawRecord> for RawRecordRow {
    fn from(record: &RawRecord) -> Self {
        Self {
            time: record.time,
            length: record.length,
            dt: record.dt,
            channel: record.channel,
            pulse_length: record.pulse_length,
            record_i: record.record_i,
            data: record.data.to_vec(),
        }
    }
}

/// Reads a JSON array of raw records.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, LoaderError> {
    let rows: Vec<RawRecordRow> = serde_json::from_reader(reader)?;
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| row.into_record(index).map_err(LoaderError::from))
        .collect()
}

#[tracing::instrument(fields(num_records))]
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, LoaderError> {
    let records = read_records(BufReader::new(File::open(path)?))?;
    tracing::Span::current().record("num_records", records.len());
    Ok(records)
}

pub fn load_parameters(path: &Path) -> Result<CalibrationParameters, LoaderError> {
    Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
}

/// Writes the entries as a JSON array, one entry per line.
pub fn write_entries<W: Write>(
    mut writer: W,
    entries: &[CalibrationEntry],
) -> Result<(), LoaderError> {
    writeln!(writer, "[")?;
    for (i, entry) in entries.iter().enumerate() {
        serde_json::to_writer(&mut writer, entry)?;
        writeln!(writer, "{}", if i + 1 < entries.len() { "," } else { "" })?;
    }
    writeln!(writer, "]")?;
    writer.flush()?;
    Ok(())
}
