use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "sales_inquiry_core=info,sales_inquiry_reads=info";

/// Install the global subscriber. JSON output emits one object per event,
/// which keeps each fetched batch on a single line.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_names_both_crate_targets() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());

        let targets: Vec<&str> = DEFAULT_FILTER
            .split(',')
            .filter_map(|directive| directive.split_once('=').map(|(target, _)| target))
            .collect();
        let this_crate = module_path!().split("::").next().unwrap();
        assert_eq!(targets, ["sales_inquiry_core", this_crate]);
    }
}
