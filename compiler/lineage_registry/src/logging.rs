//! Tracing subscriber setup.
//!
//! Enable with `RUST_LOG=lineage_tree=debug` (or `trace` to see every node
//! attachment). Set `LINEAGE_LOG_FORMAT=tree` for indented span output.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Output layout for log lines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One line per event with target and level.
    #[default]
    Flat,
    /// Events nested under their spans.
    Tree,
}

impl LogFormat {
    /// Parse a `LINEAGE_LOG_FORMAT` value. Anything other than `tree`
    /// (ignoring case) means [`LogFormat::Flat`].
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("tree") {
            LogFormat::Tree
        } else {
            LogFormat::Flat
        }
    }
}

/// Subscriber settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `lineage_tree=debug`.
    pub filter: String,
    /// Output layout.
    pub format: LogFormat,
}

impl LogConfig {
    /// Read `RUST_LOG` and `LINEAGE_LOG_FORMAT`. Returns `None` when `RUST_LOG`
    /// is unset, meaning logging stays off.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let filter = lookup("RUST_LOG")?;
        let format = lookup("LINEAGE_LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();
        Some(LogConfig { filter, format })
    }
}

/// Initialize tracing from the environment.
///
/// Call this once at startup. Safe to call multiple times. Does nothing when
/// `RUST_LOG` is unset.
pub fn init_tracing() {
    if let Some(config) = LogConfig::from_env() {
        init_tracing_with(&config);
    }
}

/// Initialize tracing with explicit settings. Only the first call in a process
/// has any effect, and a subscriber installed elsewhere is left alone.
pub fn init_tracing_with(config: &LogConfig) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::new(&config.filter);
        let registry = tracing_subscriber::registry().with(filter);
        let installed = match config.format {
            LogFormat::Flat => registry
                .with(fmt::layer().with_target(true).with_level(true))
                .try_init(),
            LogFormat::Tree => registry
                .with(HierarchicalLayer::new(2).with_targets(true))
                .try_init(),
        };
        if installed.is_err() {
            tracing::debug!("global subscriber already set; keeping it");
        }
    });
}
