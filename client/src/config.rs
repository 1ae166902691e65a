//! Client configuration.
//!
//! All endpoint addresses and on-chain identifiers are carried by an
//! explicit [`Config`] value passed into the client constructors, so
//! nothing in the library reads process-global state after startup.
//! [`Config::from_env`] is a convenience constructor for binaries.

use std::env;

use crate::error::ConfigError;

/// Gas budget for the module publish transaction, in chain units.
pub const PUBLISH_GAS_BUDGET: u64 = 20_000_000;

/// Type suffix of the module object created by a publish transaction.
pub const CREATED_MODULE_SUFFIX: &str = "::Core::ComposableModule";

/// Default marketplace server address.
pub const DEFAULT_MARKETPLACE_URL: &str = "http://localhost:5001";

/// Default agent server port.
pub const DEFAULT_AGENT_PORT: u16 = 5000;

/// Default chain network name.
pub const DEFAULT_NETWORK: &str = "testnet";

/// Endpoint and on-chain package configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// On-chain package identifier hosting the `Core` module.
    pub package_id: String,
    /// Chain network name (e.g. "testnet", "mainnet").
    pub network: String,
    /// Base URL of the agent/chat server.
    pub agent_server_url: String,
    /// Base URL of the marketplace server.
    pub marketplace_url: String,
}

impl Config {
    /// Create a configuration with default endpoints for a given package.
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            network: DEFAULT_NETWORK.to_string(),
            agent_server_url: format!("http://localhost:{}", DEFAULT_AGENT_PORT),
            marketplace_url: DEFAULT_MARKETPLACE_URL.to_string(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Reads `MARKET_PACKAGE_ID` (required), `MARKET_NETWORK`,
    /// `AGENT_SERVER_PORT` and `MARKETPLACE_URL`. A `.env` file is honored
    /// when present. Values are read once; the environment is never
    /// consulted again afterwards.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let package_id = env::var("MARKET_PACKAGE_ID")
            .map_err(|_| ConfigError::MissingVar("MARKET_PACKAGE_ID"))?;

        let mut config = Self::new(package_id);

        if let Ok(network) = env::var("MARKET_NETWORK") {
            config.network = network;
        }
        if let Ok(port) = env::var("AGENT_SERVER_PORT") {
            config.agent_server_url = format!("http://localhost:{}", port);
        }
        if let Ok(url) = env::var("MARKETPLACE_URL") {
            config.marketplace_url = url;
        }

        Ok(config)
    }

    /// Override the agent server address.
    pub fn with_agent_server_url(mut self, url: impl Into<String>) -> Self {
        self.agent_server_url = url.into();
        self
    }

    /// Override the marketplace server address.
    pub fn with_marketplace_url(mut self, url: impl Into<String>) -> Self {
        self.marketplace_url = url.into();
        self
    }

    /// Fully qualified target of the publish call.
    pub fn publish_target(&self) -> String {
        format!("{}::Core::publish_module", self.package_id)
    }

    /// Fully qualified struct type of owned module instances.
    pub fn instance_struct_type(&self) -> String {
        format!("{}::Core::ComposableModuleInstance", self.package_id)
    }
}
