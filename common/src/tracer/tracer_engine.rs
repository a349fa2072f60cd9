use tracing_subscriber::{
    EnvFilter, Layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

pub struct TracerOptions<'a> {
    /// Directive used when `RUST_LOG` is not set, e.g. `"info"`.
    pub default_directive: &'a str,
    /// Emit ANSI colour codes.
    pub ansi: bool,
}

impl Default for TracerOptions<'_> {
    fn default() -> Self {
        Self {
            default_directive: "info",
            ansi: true,
        }
    }
}

/// This object initialises the stdout tracer, given a TracerOptions struct.
/// Records are written to stderr so that stdout stays free for component output.
pub struct TracerEngine {
    service_name: String,
}

impl TracerEngine {
    /// Initialises the stderr tracer for the crate
    /// #Arguments
    /// * `options` - The caller-specified instance of TracerOptions.
    /// * `service_name` - The name of the component, attached to the start-up event.
    /// #Returns
    /// An instance of TracerEngine, or an error if a global subscriber was already installed.
    pub fn new(options: TracerOptions, service_name: &str) -> Result<Self, TryInitError> {
        let stderr_tracer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(options.ansi);

        // This filter is applied to the stderr tracer
        let log_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(options.default_directive));

        tracing_subscriber::Registry::default()
            .with(stderr_tracer.with_filter(log_filter))
            .try_init()?;

        tracing::debug!(service = service_name, "Tracer initialised");
        Ok(Self {
            service_name: service_name.to_owned(),
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
