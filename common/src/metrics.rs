use metrics::{describe_counter, describe_gauge, gauge};

pub fn component_info_metric(name: &'static str) {
    static NAME: &str = "pmt_calibration_component_info";

    describe_gauge!(NAME, "Basic information about the component");

    let git_rev = option_env!("GIT_VERSION").unwrap_or("unknown");
    gauge!(NAME, "component" => name, "git_version" => git_rev).set(1);
}

/// Registers descriptions for every counter the calibration pipeline updates.
pub fn describe_pipeline_metrics() {
    describe_counter!(names::RECORDS_RECEIVED, "Raw records handed to the pipeline");
    describe_counter!(
        names::RECORDS_DROPPED,
        "Raw records discarded before baseline correction, by reason"
    );
    describe_counter!(names::ENTRIES_PRODUCED, "Calibration entries produced");
}

pub mod names {
    use const_format::concatcp;

    pub const METRIC_NAME_PREFIX: &str = "pmt_calibration_";

    pub const RECORDS_RECEIVED: &str = concatcp!(METRIC_NAME_PREFIX, "records_received");
    pub const RECORDS_DROPPED: &str = concatcp!(METRIC_NAME_PREFIX, "records_dropped");
    pub const ENTRIES_PRODUCED: &str = concatcp!(METRIC_NAME_PREFIX, "entries_produced");
}

pub mod dropped {
    #[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
    pub enum DropReason {
        ChannelNotSelected,
        ContinuationFragment,
        IncompleteRecord,
    }

    // Label building function
    pub fn get_label(reason: DropReason) -> (&'static str, &'static str) {
        (
            "drop_reason",
            match reason {
                DropReason::ChannelNotSelected => "channel_not_selected",
                DropReason::ContinuationFragment => "continuation_fragment",
                DropReason::IncompleteRecord => "incomplete_record",
            },
        )
    }
}
