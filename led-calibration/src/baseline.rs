use crate::{
    Real,
    parameters::SampleWindow,
    record::{CorrectedBatch, RawRecord},
};
use ndarray::{Array2, Axis, Zip, s};
use pmt_calibration_common::SAMPLES_PER_RECORD;

/// Subtracts each waveform from its baseline, the mean of the samples in `window`.
///
/// Every sample of the record is re-based, not only those in the window, which flips
/// the negative going PMT pulses to positive values.
/// `window` must be non-empty and lie within the record; [Calibrator::new] checks
/// this for its parameters.
///
/// # Panics
/// If `window` is reversed or ends past [SAMPLES_PER_RECORD].
///
/// [Calibrator::new]: crate::Calibrator::new
#[tracing::instrument(skip_all, fields(num_records = records.len(), %window))]
pub fn correct_baseline(records: &[&RawRecord], window: SampleWindow) -> CorrectedBatch {
    let mut data = Array2::from_shape_fn((records.len(), SAMPLES_PER_RECORD), |(r, i)| {
        Real::from(records[r].data[i])
    });

    let width = window.width() as Real;
    let baselines = data
        .slice(s![.., window.range()])
        .sum_axis(Axis(1))
        .mapv(|sum| sum / width);

    Zip::from(data.rows_mut())
        .and(&baselines)
        .for_each(|mut waveform, &baseline| waveform.mapv_inplace(|v| baseline - v));

    let headers = records.iter().map(|record| record.header()).collect();
    CorrectedBatch::new(headers, baselines.to_vec(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::raw_record;
    use assert_approx_eq::assert_approx_eq;
    use pmt_calibration_common::Sample;
    use rand::Rng;

    #[test]
    #[should_panic]
    fn window_past_record_end_panics() {
        let record = raw_record(0, 0, [1000; SAMPLES_PER_RECORD]);
        correct_baseline(&[&record], SampleWindow::new(0, SAMPLES_PER_RECORD + 1));
    }

    #[test]
    fn constant_waveform() {
        let record = raw_record(0, 0, [1000; SAMPLES_PER_RECORD]);
        let batch = correct_baseline(&[&record], SampleWindow::new(0, 40));
        assert_eq!(batch.baselines(), &[1000.0]);
        assert!(batch.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn pulse_is_flipped() {
        let mut data = [200; SAMPLES_PER_RECORD];
        data[80] = 150;
        data[81] = 120;
        let record = raw_record(0, 0, data);
        let batch = correct_baseline(&[&record], SampleWindow::new(0, 40));

        let corrected = batch.get(0).unwrap();
        assert_eq!(corrected.data[79], 0.0);
        assert_eq!(corrected.data[80], 50.0);
        assert_eq!(corrected.data[81], 80.0);
    }

    #[test]
    fn whole_waveform_rebased_by_window_mean() {
        let mut data = [0; SAMPLES_PER_RECORD];
        data[10..14].copy_from_slice(&[1, 2, 3, 6]);
        data[599] = 7;
        let record = raw_record(0, 0, data);
        let batch = correct_baseline(&[&record], SampleWindow::new(10, 14));

        assert_eq!(batch.baselines(), &[3.0]);
        let corrected = batch.get(0).unwrap();
        assert_eq!(corrected.data[0], 3.0);
        assert_eq!(corrected.data[13], -3.0);
        assert_eq!(corrected.data[599], -4.0);
    }

    #[test]
    fn sign_law_on_random_records() {
        let mut rng = rand::rng();
        let records: Vec<_> = (0..8)
            .map(|channel| {
                let mut data = [0 as Sample; SAMPLES_PER_RECORD];
                data.iter_mut()
                    .for_each(|v| *v = rng.random_range(15000..16000));
                raw_record(channel, 0, data)
            })
            .collect();
        let refs: Vec<_> = records.iter().collect();
        let window = SampleWindow::new(5, 45);
        let batch = correct_baseline(&refs, window);

        for (raw, corrected) in records.iter().zip(batch.iter()) {
            let baseline = raw.data[window.range()]
                .iter()
                .map(|&v| Real::from(v))
                .sum::<Real>()
                / 40.0;
            assert_approx_eq!(corrected.baseline, baseline, 1e-9);
            for (&r, &c) in raw.data.iter().zip(corrected.data.iter()) {
                assert_approx_eq!(c, baseline - Real::from(r), 1e-9);
            }
        }
    }

    #[test]
    fn input_is_untouched() {
        let record = raw_record(0, 0, [42; SAMPLES_PER_RECORD]);
        let copy = record.clone();
        let _ = correct_baseline(&[&record], SampleWindow::new(0, 40));
        assert_eq!(record, copy);
    }

    #[test]
    fn empty_batch() {
        let batch = correct_baseline(&[], SampleWindow::new(0, 40));
        assert!(batch.is_empty());
        assert_eq!(batch.data().dim(), (0, SAMPLES_PER_RECORD));
    }
}
