use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "operation_name");
/// // Or with additional fields:
/// trace_time!(start, "operation_name", nodes = vault.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging on stderr
///
/// Filter precedence: `LINKWEIGHT_LOG`, `RUST_LOG`, `--log-level`, then
/// `--verbose` (debug) or the quiet default (warn).
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = log_level.unwrap_or(if verbose { "debug" } else { "warn" });
    let overrides = [
        std::env::var("LINKWEIGHT_LOG").ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    ];
    let filter = select_filter(&overrides, level);

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// First usable directive from `overrides`, else the CLI level.
///
/// Unset, blank or unparsable overrides fall through to the next source.
fn select_filter(overrides: &[Option<String>], level: &str) -> EnvFilter {
    overrides
        .iter()
        .flatten()
        .filter(|directive| !directive.trim().is_empty())
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(cli_directive(level)))
}

/// A bare level applies to linkweight crates only
fn cli_directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("linkweight={}", level)
    }
}
