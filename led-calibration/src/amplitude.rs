use crate::{
    Real,
    parameters::SampleWindow,
    record::{CorrectedBatch, WindowMetric},
};
use ndarray::{ArrayView1, Axis, s};

/// Peak amplitudes of each record, index aligned with the batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Amplitudes {
    /// Maximum in the window where the LED signal is expected.
    pub led: Vec<WindowMetric>,
    /// Maximum in a window away from the signal.
    pub noise: Vec<WindowMetric>,
}

/// Maximum of the samples, or zero when there are none.
pub fn safe_max(samples: ArrayView1<'_, Real>) -> Real {
    samples
        .iter()
        .copied()
        .reduce(Real::max)
        .unwrap_or_default()
}

/// The largest corrected sample of every record within `window`.
/// An empty window gives an amplitude of zero for every record.
pub fn window_maximum(batch: &CorrectedBatch, window: SampleWindow) -> Vec<WindowMetric> {
    let data = batch.data();
    let range = window.clamped(data.ncols());
    data.slice(s![.., range])
        .axis_iter(Axis(0))
        .zip(batch.headers())
        .map(|(samples, header)| WindowMetric {
            channel: header.channel,
            value: safe_max(samples),
        })
        .collect()
}

#[tracing::instrument(skip_all, fields(num_records = batch.len(), %led_window, %noise_window))]
pub fn extract_amplitudes(
    batch: &CorrectedBatch,
    led_window: SampleWindow,
    noise_window: SampleWindow,
) -> Amplitudes {
    Amplitudes {
        led: window_maximum(batch, led_window),
        noise: window_maximum(batch, noise_window),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{baseline::correct_baseline, record::tests::raw_record};
    use ndarray::{Array1, array};
    use pmt_calibration_common::SAMPLES_PER_RECORD;

    fn pulse_batch() -> CorrectedBatch {
        let mut first = [1000; SAMPLES_PER_RECORD];
        first[30] = 990;
        first[90] = 880;
        first[91] = 860;
        let mut second = [500; SAMPLES_PER_RECORD];
        second[100] = 470;
        second[40] = 495;
        let first = raw_record(4, 0, first);
        let second = raw_record(9, 0, second);
        correct_baseline(&[&first, &second], SampleWindow::new(0, 20))
    }

    #[test]
    fn safe_max_of_values() {
        assert_eq!(safe_max(array![-3.0, -1.5, -2.0].view()), -1.5);
        assert_eq!(safe_max(Array1::<Real>::zeros(0).view()), 0.0);
    }

    #[test]
    fn led_and_noise_peaks() {
        let amplitudes = extract_amplitudes(
            &pulse_batch(),
            SampleWindow::new(75, 105),
            SampleWindow::new(20, 55),
        );
        assert_eq!(
            amplitudes.led,
            vec![
                WindowMetric { channel: 4, value: 140.0 },
                WindowMetric { channel: 9, value: 30.0 }
            ]
        );
        assert_eq!(
            amplitudes.noise,
            vec![
                WindowMetric { channel: 4, value: 10.0 },
                WindowMetric { channel: 9, value: 5.0 }
            ]
        );
    }

    #[test]
    fn zero_width_window_gives_zero() {
        let amplitudes = extract_amplitudes(
            &pulse_batch(),
            SampleWindow::new(90, 90),
            SampleWindow::new(30, 30),
        );
        assert!(amplitudes.led.iter().all(|m| m.value == 0.0));
        assert!(amplitudes.noise.iter().all(|m| m.value == 0.0));
        assert_eq!(amplitudes.led.len(), 2);
    }

    #[test]
    fn negative_only_window() {
        let mut data = [0; SAMPLES_PER_RECORD];
        data[60..70].iter_mut().for_each(|v| *v = 10);
        let record = raw_record(0, 0, data);
        let batch = correct_baseline(&[&record], SampleWindow::new(0, 40));
        let maxima = window_maximum(&batch, SampleWindow::new(60, 70));
        assert_eq!(maxima[0].value, -10.0);
    }

    #[test]
    fn window_past_end_is_truncated() {
        let mut data = [0; SAMPLES_PER_RECORD];
        data[598] = -25;
        let record = raw_record(0, 0, data);
        let batch = correct_baseline(&[&record], SampleWindow::new(0, 40));
        let maxima = window_maximum(&batch, SampleWindow::new(590, 700));
        assert_eq!(maxima[0].value, 25.0);
    }

    #[test]
    fn empty_batch() {
        let batch = correct_baseline(&[], SampleWindow::new(0, 40));
        let amplitudes = extract_amplitudes(
            &batch,
            SampleWindow::new(75, 105),
            SampleWindow::new(20, 55),
        );
        assert_eq!(amplitudes, Amplitudes::default());
    }
}
