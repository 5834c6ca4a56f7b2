//! Configuration loading from environment.

use std::env;

use reepay_types::ReepayOptions;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub reepay: ReepayOptions,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let api_key = env::var("REEPAY_API_KEY")
            .map_err(|_| anyhow::anyhow!("REEPAY_API_KEY environment variable is required"))?;

        let payment_methods = env::var("REEPAY_PAYMENT_METHODS").ok().map(|raw| {
            raw.split(',')
                .map(|method| method.trim().to_string())
                .filter(|method| !method.is_empty())
                .collect()
        });

        Ok(Self {
            port,
            reepay: ReepayOptions {
                api_key,
                webhook_secret: env::var("REEPAY_WEBHOOK_SECRET").ok(),
                accept_url: env::var("REEPAY_ACCEPT_URL").ok(),
                cancel_url: env::var("REEPAY_CANCEL_URL").ok(),
                payment_methods,
            },
        })
    }
}
