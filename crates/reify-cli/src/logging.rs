//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the configured filter
pub const LOG_ENV: &str = "REIFY_LOG";

/// Pick the filter directives: `REIFY_LOG` when set and non-empty, else `fallback`
pub fn filter_directives(env_value: Option<String>, fallback: &str) -> String {
    match env_value {
        Some(value) if !value.trim().is_empty() => value,
        _ => fallback.to_string(),
    }
}

/// Install the global subscriber, writing to stderr so stdout stays machine readable
pub fn init(fallback: &str) -> anyhow::Result<()> {
    let directives = filter_directives(std::env::var(LOG_ENV).ok(), fallback);
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("Invalid log filter `{}`: {}", directives, e))?;

    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .try_init()?;
    Ok(())
}
