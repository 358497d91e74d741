use std::sync::Once;

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` filter string; wins over `RUST_LOG` when set.
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Installs `env_logger` on first call, `info` level unless told otherwise.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string());

        let installed = env_logger::Builder::new()
            .parse_filters(&filter)
            .format_timestamp_millis()
            .try_init();
        if installed.is_ok() {
            log::debug!("logger installed with filter '{filter}'");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_sets_level_once() {
        init_logging(LoggingConfig {
            env_filter: Some("debug".to_string()),
        });
        assert_eq!(log::max_level(), log::LevelFilter::Debug);

        init_logging(LoggingConfig {
            env_filter: Some("error".to_string()),
        });
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
    }
}
