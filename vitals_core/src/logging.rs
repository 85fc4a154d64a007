//! Logging infrastructure for the vitals tools.
//!
//! Events go to stderr so command output on stdout stays parseable.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Target of the classifier's verbose trace events
const TRACE_TARGET: &str = "vitals_core::classifier";

/// Initialize logging for the `vitals` binary
///
/// Default level is INFO and RUST_LOG overrides it. When `verbose` is set
/// the classifier trace stays visible even under a stricter RUST_LOG.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(with_verbose_trace(filter, verbose))
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Add an INFO directive for the classifier trace when `verbose` is set
fn with_verbose_trace(filter: EnvFilter, verbose: bool) -> EnvFilter {
    if !verbose {
        return filter;
    }
    match format!("{}=info", TRACE_TARGET).parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_classifier_trace() {
        let filter = with_verbose_trace(EnvFilter::new("warn"), true);
        assert!(filter.to_string().contains("vitals_core::classifier=info"));
    }

    #[test]
    fn test_quiet_keeps_filter() {
        let filter = with_verbose_trace(EnvFilter::new("warn"), false);
        assert!(!filter.to_string().contains("vitals_core::classifier"));
    }
}
