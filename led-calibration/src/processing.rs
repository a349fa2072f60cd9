use crate::{
    amplitude::extract_amplitudes,
    area::integrate_area,
    assembler::assemble,
    baseline::correct_baseline,
    error::ConfigError,
    metrics,
    parameters::CalibrationParameters,
    record::{CalibrationEntry, RawRecord},
    selection::{SelectionSummary, select},
    timer::{Stage, StageTimer, timed},
};

/// The result of calibrating one batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CalibrationOutput {
    /// One entry per selected record, in input order.
    pub entries: Vec<CalibrationEntry>,
    pub summary: SelectionSummary,
}

/// Computes LED calibration metrics with a fixed, validated set of parameters.
#[derive(Debug, Clone)]
pub struct Calibrator {
    parameters: CalibrationParameters,
}

impl Calibrator {
    pub fn new(parameters: CalibrationParameters) -> Result<Self, ConfigError> {
        parameters.validate()?;
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &CalibrationParameters {
        &self.parameters
    }

    /// Calibrates every first-fragment, full-length record on a selected channel.
    /// A batch in which nothing survives selection gives an empty output.
    #[tracing::instrument(skip_all, fields(num_records = records.len(), num_entries))]
    pub fn process(&self, records: &[RawRecord]) -> CalibrationOutput {
        let mut timer = StageTimer::default();

        let (selected, summary) = timer.time(Stage::Selection, || {
            select(records, &self.parameters.channel_list)
        });
        metrics::record_selection(&summary);
        if summary.dropped() > 0 {
            tracing::debug!(
                channel_not_selected = summary.channel_not_selected,
                continuation_fragments = summary.continuation_fragments,
                incomplete_records = summary.incomplete_records,
                "Records dropped"
            );
        }

        let batch = timer.time(Stage::Baseline, || {
            correct_baseline(&selected, self.parameters.baseline_window)
        });

        let ((amplitudes, amplitude_time), (area, area_time)) = rayon::join(
            || {
                timed(|| {
                    extract_amplitudes(
                        &batch,
                        self.parameters.led_window,
                        self.parameters.noise_window,
                    )
                })
            },
            || {
                timed(|| {
                    integrate_area(
                        &batch,
                        self.parameters.led_window,
                        self.parameters.baseline_window,
                    )
                })
            },
        );
        timer.record(Stage::Amplitude, amplitude_time);
        timer.record(Stage::Area, area_time);

        let entries = timer.time(Stage::Assembly, || {
            assemble(batch.headers(), &amplitudes, &area)
        });
        metrics::record_entries(entries.len());
        timer.log();

        tracing::Span::current().record("num_entries", entries.len());
        CalibrationOutput { entries, summary }
    }
}

impl TryFrom<CalibrationParameters> for Calibrator {
    type Error = ConfigError;

    fn try_from(parameters: CalibrationParameters) -> Result<Self, Self::Error> {
        Self::new(parameters)
    }
}

/// Validates `parameters` and calibrates a single batch with them.
pub fn compute(
    records: &[RawRecord],
    parameters: CalibrationParameters,
) -> Result<CalibrationOutput, ConfigError> {
    Ok(Calibrator::new(parameters)?.process(records))
}
