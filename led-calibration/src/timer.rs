use std::time::{Duration, Instant};
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub(crate) enum Stage {
    #[strum(to_string = "selection")]
    Selection,
    #[strum(to_string = "baseline")]
    Baseline,
    #[strum(to_string = "amplitude")]
    Amplitude,
    #[strum(to_string = "area")]
    Area,
    #[strum(to_string = "assembly")]
    Assembly,
}

/// Runs `f`, returning its result with the time it took.
pub(crate) fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Wall-clock time spent in each stage of one call.
#[derive(Default, Debug)]
pub(crate) struct StageTimer {
    durations: Vec<(Stage, Duration)>,
}

impl StageTimer {
    pub(crate) fn record(&mut self, stage: Stage, duration: Duration) {
        self.durations.push((stage, duration));
    }

    pub(crate) fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let (result, duration) = timed(f);
        self.record(stage, duration);
        result
    }

    pub(crate) fn total(&self, stage: Stage) -> Duration {
        self.durations
            .iter()
            .filter(|(s, _)| *s == stage)
            .map(|(_, d)| *d)
            .sum()
    }

    pub(crate) fn log(&self) {
        for stage in Stage::iter() {
            let elapsed_us = self.total(stage).as_micros() as u64;
            tracing::debug!(%stage, elapsed_us, "Stage timing");
        }
    }
}
