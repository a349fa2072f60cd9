use crate::{
    Real,
    parameters::SampleWindow,
    record::{CorrectedBatch, WindowMetric},
};
use ndarray::{Array1, Axis, s};

/// Number of integration windows the area is averaged over.
pub const INTEGRATION_WINDOWS: usize = 6;
/// Samples by which the right edge of each successive integration window moves.
pub const INTEGRATION_STEP: usize = 2;

/// Right edges of the integration windows: all start at the left edge of
/// `led_window`, the first ends where it ends and each further one is wider.
pub fn integration_ends(led_window: SampleWindow) -> impl Iterator<Item = usize> {
    (0..INTEGRATION_WINDOWS).map(move |k| led_window.end + INTEGRATION_STEP * k)
}

/// One past the last sample read by the widest integration window.
pub fn widest_integration_end(led_window: SampleWindow) -> usize {
    led_window.end + INTEGRATION_STEP * (INTEGRATION_WINDOWS - 1)
}

/// Area of every record integrated from the start of `led_window`, corrected for the
/// residual baseline in `baseline_window` and averaged over [INTEGRATION_WINDOWS] windows.
///
/// For each window the mean residual of `baseline_window`, scaled by the width of the
/// window, is subtracted from the sum of its samples.
/// `baseline_window` must be non-empty and the widest integration window must lie
/// within the record; [Calibrator::new] checks this for its parameters.
///
/// # Panics
/// If either window is reversed or [widest_integration_end] of `led_window` is past
/// the end of the record.
///
/// [Calibrator::new]: crate::Calibrator::new
#[tracing::instrument(skip_all, fields(num_records = batch.len(), %led_window, %baseline_window))]
pub fn integrate_area(
    batch: &CorrectedBatch,
    led_window: SampleWindow,
    baseline_window: SampleWindow,
) -> Vec<WindowMetric> {
    let data = batch.data();
    let left = led_window.start;

    let residual = data.slice(s![.., baseline_window.range()]).sum_axis(Axis(1));
    let baseline_width = baseline_window.width() as Real;

    let mut area = Array1::<Real>::zeros(batch.len());
    for right in integration_ends(led_window) {
        let width = (right - left) as Real;
        area += &data.slice(s![.., left..right]).sum_axis(Axis(1));
        area -= &residual.mapv(|sum| width * sum / baseline_width);
    }
    area /= INTEGRATION_WINDOWS as Real;

    area.iter()
        .zip(batch.headers())
        .map(|(&value, header)| WindowMetric {
            channel: header.channel,
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{baseline::correct_baseline, record::tests::raw_record};
    use assert_approx_eq::assert_approx_eq;
    use pmt_calibration_common::SAMPLES_PER_RECORD;
    use rand::Rng;

    #[test]
    fn ends_step_outwards() {
        let ends: Vec<_> = integration_ends(SampleWindow::new(75, 105)).collect();
        assert_eq!(ends, vec![105, 107, 109, 111, 113, 115]);
        assert_eq!(widest_integration_end(SampleWindow::new(75, 105)), 115);
    }

    #[test]
    #[should_panic]
    fn integration_past_record_end_panics() {
        let record = raw_record(0, 0, [0; SAMPLES_PER_RECORD]);
        let batch = correct_baseline(&[&record], SampleWindow::new(0, 40));
        // Widest window ends at 601.
        integrate_area(&batch, SampleWindow::new(560, 591), SampleWindow::new(0, 40));
    }

    #[test]
    fn short_pulse_inside_every_window() {
        // Raw waveform sits at zero with a 6 sample dip, so the corrected pulse is +100.
        let mut data = [0; SAMPLES_PER_RECORD];
        data[75..81].iter_mut().for_each(|v| *v = -100);
        let record = raw_record(0, 0, data);
        let batch = correct_baseline(&[&record], SampleWindow::new(0, 40));

        let area = integrate_area(&batch, SampleWindow::new(75, 105), SampleWindow::new(0, 40));
        assert_eq!(area.len(), 1);
        assert_approx_eq!(area[0].value, 600.0, 1e-9);
    }

    #[test]
    fn pulse_tail_partially_integrated() {
        let mut data = [0; SAMPLES_PER_RECORD];
        data[100..112].iter_mut().for_each(|v| *v = -1);
        let record = raw_record(0, 0, data);
        let batch = correct_baseline(&[&record], SampleWindow::new(0, 40));

        let area = integrate_area(&batch, SampleWindow::new(75, 105), SampleWindow::new(0, 40));
        // Windows end at 105, 107, ..., 115 and so contain 5, 7, 9, 11, 12, 12 pulse samples.
        assert_approx_eq!(area[0].value, 56.0 / 6.0, 1e-9);
    }

    #[test]
    fn residual_baseline_is_removed_per_window_width() {
        // A constant offset in the corrected waveform, as left by a baseline estimated
        // from a different window, must integrate to zero.
        let mut data = [-5; SAMPLES_PER_RECORD];
        data[0..10].iter_mut().for_each(|v| *v = 0);
        let record = raw_record(0, 0, data);
        let batch = correct_baseline(&[&record], SampleWindow::new(0, 10));

        let area = integrate_area(&batch, SampleWindow::new(75, 105), SampleWindow::new(20, 60));
        assert_approx_eq!(area[0].value, 0.0, 1e-9);
    }

    #[test]
    fn matches_direct_recomputation() {
        let mut rng = rand::rng();
        let records: Vec<_> = (0..5)
            .map(|channel| {
                let mut data = [0; SAMPLES_PER_RECORD];
                data.iter_mut()
                    .for_each(|v| *v = rng.random_range(-2000..2000));
                raw_record(channel, 0, data)
            })
            .collect();
        let refs: Vec<_> = records.iter().collect();
        let batch = correct_baseline(&refs, SampleWindow::new(0, 40));
        let (led, bsl) = (SampleWindow::new(60, 90), SampleWindow::new(0, 40));
        let area = integrate_area(&batch, led, bsl);

        for (record, metric) in batch.iter().zip(&area) {
            let sum = |from: usize, to: usize| record.data.slice(s![from..to]).sum();
            let expected = (0..6)
                .map(|k| {
                    let right = 90 + 2 * k;
                    sum(60, right) - (right - 60) as Real * sum(0, 40) / 40.0
                })
                .sum::<Real>()
                / 6.0;
            assert_eq!(metric.channel, record.header.channel);
            assert_approx_eq!(metric.value, expected, 1e-6);
        }
    }

    #[test]
    fn empty_batch() {
        let batch = correct_baseline(&[], SampleWindow::new(0, 40));
        let area = integrate_area(&batch, SampleWindow::new(75, 105), SampleWindow::new(0, 40));
        assert!(area.is_empty());
    }
}
