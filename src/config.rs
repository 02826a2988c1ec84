//! Enrichment configuration.
//!
//! Defaults for missing order fields can be overridden from a TOML file with a `[defaults]`
//! section. Every key is optional; absent keys keep the documented default.
//!
//! ```toml
//! [defaults]
//! quantity = 0
//! unit_price = 0.0
//! discount = 0.0
//! shipping_cost = 0.0
//! order_priority = "Medium"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EnrichmentError, EnrichmentResult};

/// Fallback values substituted for missing order fields before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentDefaults {
    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub unit_price: f64,

    #[serde(default)]
    pub discount: f64,

    #[serde(default)]
    pub shipping_cost: f64,

    #[serde(default = "default_order_priority")]
    pub order_priority: String,
}

impl Default for EnrichmentDefaults {
    fn default() -> Self {
        Self {
            quantity: 0,
            unit_price: 0.0,
            discount: 0.0,
            shipping_cost: 0.0,
            order_priority: default_order_priority(),
        }
    }
}

fn default_order_priority() -> String {
    "Medium".into()
}

/// Top-level config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// `[defaults]` section.
    #[serde(default)]
    pub defaults: EnrichmentDefaults,
}

impl EnrichmentConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> EnrichmentResult<Self> {
        toml::from_str(content).map_err(|e| EnrichmentError::config(format!("invalid toml: {e}")))
    }

    /// Render the config as pretty TOML.
    pub fn to_toml_string(&self) -> EnrichmentResult<String> {
        toml::to_string_pretty(self).map_err(|e| EnrichmentError::config(e.to_string()))
    }
}

/// Load the config from a specific file path.
pub fn load_config_from(path: impl AsRef<Path>) -> EnrichmentResult<EnrichmentConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| {
        EnrichmentError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "loaded enrichment config");
    Ok(config)
}
