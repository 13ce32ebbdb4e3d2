use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

use crate::cli::LogFormat;

const DEFAULT_DIRECTIVES: &str = "gcm2pc_verify=info,gcm2pc_tag=info";

fn format_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // Logs go to stderr, stdout carries the verdicts.
    let f = fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Compact => f.compact().boxed(),
        LogFormat::Json => f.json().boxed(),
    }
}

pub(crate) fn init_tracing(log_level: Option<&str>, format: LogFormat) -> Result<()> {
    let filter_layer = match log_level {
        Some(directives) => EnvFilter::builder().parse(directives)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::builder().parse(DEFAULT_DIRECTIVES))?,
    };

    Registry::default()
        .with(filter_layer)
        .with(format_layer(format))
        .try_init()?;

    Ok(())
}
