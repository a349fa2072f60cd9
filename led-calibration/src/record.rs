use crate::Real;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use pmt_calibration_common::{
    Channel, FragmentIndex, Length, SAMPLES_PER_RECORD, Sample, SampleWidth, Time,
};
use serde::{Deserialize, Serialize};

/// One fragment of a digitised PMT pulse, as decoded by the host framework.
/// Only the first `length` samples of `data` are meaningful, the rest are zero padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub time: Time,
    pub length: Length,
    pub dt: SampleWidth,
    pub channel: Channel,
    pub pulse_length: Length,
    pub record_i: FragmentIndex,
    pub data: [Sample; SAMPLES_PER_RECORD],
}

impl RawRecord {
    pub fn header(&self) -> RecordHeader {
        RecordHeader {
            time: self.time,
            length: self.length,
            dt: self.dt,
            channel: self.channel,
            pulse_length: self.pulse_length,
            record_i: self.record_i,
        }
    }

    /// The record opens its pulse, rather than continuing one.
    pub fn is_first_fragment(&self) -> bool {
        self.record_i == 0
    }

    /// Every slot of `data` holds a real sample.
    pub fn is_full_length(&self) -> bool {
        usize::try_from(self.length).is_ok_and(|length| length == SAMPLES_PER_RECORD)
    }
}

/// The scalar fields of a record, carried unchanged through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub time: Time,
    pub length: Length,
    pub dt: SampleWidth,
    pub channel: Channel,
    pub pulse_length: Length,
    pub record_i: FragmentIndex,
}

/// Baseline corrected, sign flipped waveforms of a batch of selected records.
///
/// Waveforms are stored as the rows of a `records x SAMPLES_PER_RECORD` matrix,
/// so window operations apply to the whole batch at once.
/// A batch is never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedBatch {
    headers: Vec<RecordHeader>,
    baselines: Vec<Real>,
    data: Array2<Real>,
}

impl CorrectedBatch {
    pub(crate) fn new(headers: Vec<RecordHeader>, baselines: Vec<Real>, data: Array2<Real>) -> Self {
        debug_assert_eq!(headers.len(), baselines.len());
        debug_assert_eq!(headers.len(), data.nrows());
        Self {
            headers,
            baselines,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn headers(&self) -> &[RecordHeader] {
        &self.headers
    }

    pub fn baselines(&self) -> &[Real] {
        &self.baselines
    }

    pub fn data(&self) -> ArrayView2<'_, Real> {
        self.data.view()
    }

    pub fn get(&self, index: usize) -> Option<CorrectedRecord<'_>> {
        Some(CorrectedRecord {
            header: *self.headers.get(index)?,
            baseline: *self.baselines.get(index)?,
            data: self.data.index_axis(Axis(0), index),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = CorrectedRecord<'_>> {
        self.headers
            .iter()
            .zip(&self.baselines)
            .zip(self.data.rows())
            .map(|((header, baseline), data)| CorrectedRecord {
                header: *header,
                baseline: *baseline,
                data,
            })
    }
}

/// A view of a single waveform within a [CorrectedBatch].
#[derive(Debug, Clone)]
pub struct CorrectedRecord<'a> {
    pub header: RecordHeader,
    pub baseline: Real,
    pub data: ArrayView1<'a, Real>,
}

/// A per record value computed over a sample window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMetric {
    pub channel: Channel,
    pub value: Real,
}

/// The calibration metrics of one selected record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationEntry {
    /// Area averaged in integration windows.
    pub area: Real,
    /// Amplitude in LED window.
    pub amplitude_led: Real,
    /// Amplitude in off LED window.
    pub amplitude_noise: Real,
    pub channel: Channel,
    /// Start time of the interval (ns since unix epoch).
    pub time: Time,
    /// Time resolution in ns.
    pub dt: SampleWidth,
    /// Length of the interval in samples.
    pub length: Length,
}
