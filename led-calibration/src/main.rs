use anyhow::{Result, anyhow};
use clap::Parser;
use led_calibration::{
    CalibrationParameters, Calibrator,
    loader::{load_parameters, load_records, write_entries},
    schema::{CALIBRATION_SCHEMA, DATA_KIND, VERSION},
};
use pmt_calibration_common::{
    metrics::{component_info_metric, describe_pipeline_metrics},
    tracer::{TracerEngine, TracerOptions},
};
use std::{
    fs::File,
    io::{BufWriter, stdout},
    path::PathBuf,
};
use tracing::info;

// cargo run --bin led-calibration -- --input raw_records.json --output led_cal.json --led-window 75,105 --channel-list 0..10

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// JSON file holding an array of raw records.
    #[clap(long, required_unless_present = "print_schema")]
    input: Option<PathBuf>,

    /// File to write calibration entries to, stdout if omitted.
    #[clap(long)]
    output: Option<PathBuf>,

    /// JSON file of calibration parameters, overriding the window and channel options.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Print the output columns and exit.
    #[clap(long, default_value = "false")]
    print_schema: bool,

    /// Disable coloured log output.
    #[clap(long, default_value = "false")]
    no_ansi: bool,

    #[clap(flatten)]
    parameters: CalibrationParameters,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let tracer = TracerEngine::new(
        TracerOptions {
            ansi: !args.no_ansi,
            ..Default::default()
        },
        env!("CARGO_BIN_NAME"),
    )?;
    describe_pipeline_metrics();
    component_info_metric("led-calibration");

    if args.print_schema {
        serde_json::to_writer_pretty(stdout().lock(), &CALIBRATION_SCHEMA)?;
        println!();
        return Ok(());
    }

    let parameters = match &args.config {
        Some(path) => load_parameters(path)?,
        None => args.parameters,
    };
    let calibrator = Calibrator::new(parameters)?;
    info!(
        service = tracer.service_name(),
        data_kind = DATA_KIND,
        version = VERSION,
        parameters = ?calibrator.parameters(),
        "Calibrator ready"
    );

    let input = args
        .input
        .ok_or_else(|| anyhow!("An input file is required"))?;
    let records = load_records(&input)?;
    let output = calibrator.process(&records);
    info!(
        received = output.summary.received,
        selected = output.summary.selected,
        dropped = output.summary.dropped(),
        "Calibrated {} records",
        output.entries.len()
    );

    match args.output {
        Some(path) => write_entries(BufWriter::new(File::create(path)?), &output.entries)?,
        None => write_entries(stdout().lock(), &output.entries)?,
    }
    Ok(())
}
