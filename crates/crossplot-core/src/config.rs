//! Session configuration.

use crate::logging;
use crate::profiling::{self, ProfilingBackend};

/// Configuration for a crossplot session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: logging::DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    /// Set the fallback log filter.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Set the profiling mode.
    pub fn with_profiling(mut self, mode: ProfilingMode) -> Self {
        self.profiling = mode;
        self
    }

    /// Install logging and start profiling according to this configuration.
    pub fn apply(&self) {
        logging::init_with_filter(&self.log_filter);

        match self.profiling {
            ProfilingMode::Off => {}
            ProfilingMode::On => profiling::init_profiling(ProfilingBackend::InProcess),
            #[cfg(feature = "profiling")]
            ProfilingMode::WithWebserver => profiling::init_profiling(ProfilingBackend::PuffinHttp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling is disabled
    #[default]
    Off,
    /// Puffin scopes are recorded in-process
    On,
    /// Puffin scopes are recorded and served to external tools such as
    /// 'puffin_viewer'
    #[cfg(feature = "profiling")]
    WithWebserver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_filter, logging::DEFAULT_FILTER);
        assert_eq!(config.profiling, ProfilingMode::Off);
    }

    #[test]
    fn test_config_builder() {
        let config = Config::default()
            .with_log_filter("warn")
            .with_profiling(ProfilingMode::On);
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.profiling, ProfilingMode::On);
    }
}
