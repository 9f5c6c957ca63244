use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` directives always apply;
/// `verbose` raises the level to `debug`. Output goes to stderr so printed
/// labels stay clean on stdout.
pub fn init_log(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(verbose, rust_log.as_deref());

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = tracing::subscriber::set_global_default(subscriber);
}

// Invalid directives in `rust_log` are skipped, the rest still apply.
fn build_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::ERROR.into())
        .parse_lossy(rust_log.unwrap_or_default());

    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }

    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated_directives() {
        let filter = build_filter(false, Some("wrap_label=trace,info"));
        let shown = filter.to_string();
        assert!(shown.contains("wrap_label=trace"), "{shown}");
        assert!(shown.contains("info"), "{shown}");
    }

    #[test]
    fn test_verbose_adds_debug() {
        let filter = build_filter(true, None);
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn test_invalid_directive_is_skipped() {
        let filter = build_filter(false, Some("wrap_label=trace,not a directive==="));
        assert!(filter.to_string().contains("wrap_label=trace"));
    }
}
