use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;

/// Runtime settings for the delivery system.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub store: StoreSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StoreSettings {
    /// Capacity of the actor's request channel.
    pub channel_buffer: usize,
    /// Reject rows that reference missing customers, agents, or orders.
    pub enforce_references: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LogSettings {
    /// Used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreSettings {
                channel_buffer: 32,
                enforce_references: true,
            },
            log: LogSettings {
                filter: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Loads defaults, then `config/default.*` if present, then the environment.
    ///
    /// `FOOD_DELIVERY__STORE__CHANNEL_BUFFER=64` sets `store.channel_buffer`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("FOOD_DELIVERY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only, no files or environment.
    pub fn from_defaults() -> Result<Self, config::ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        let defaults = Settings::default();
        config::Config::builder()
            .set_default("store.channel_buffer", defaults.store.channel_buffer as i64)?
            .set_default("store.enforce_references", defaults.store.enforce_references)?
            .set_default("log.filter", defaults.log.filter)
    }
}
