// FILE: src/cli/config.rs

use crate::error::{Result, StyleError};
use crate::registry::StyleContext;
use crate::token::TokenTree;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub class_prefix: Option<String>,
    pub property_aliases: Option<HashMap<String, Vec<String>>>,
    pub key_aliases: Option<HashMap<String, String>>,
    pub tokens: Option<TokenTree>,
    pub token_groups: Option<HashMap<String, String>>,
    pub reset_defaults: Option<bool>,
    pub strict_tokens: Option<bool>,
}

impl ConfigFile {
    /// Merge this configuration into `context`
    pub fn apply(&self, context: &mut StyleContext) {
        if self.reset_defaults.unwrap_or(false) {
            log::debug!("Clearing built-in aliases and token groups");
            context.reset();
        }
        if let Some(aliases) = &self.property_aliases {
            context.property_aliases.extend(aliases);
        }
        if let Some(aliases) = &self.key_aliases {
            context.key_aliases.extend(aliases);
        }
        if let Some(tokens) = &self.tokens {
            context.tokens.merge(tokens);
        }
        if let Some(groups) = &self.token_groups {
            context.token_groups.extend(groups.clone());
        }
    }
}

pub fn load(config_path: &str) -> Result<ConfigFile> {
    log::info!("Loaded configuration from {}", config_path);
    let config_content = fs::read_to_string(config_path).map_err(|e| StyleError::FileNotFound {
        path: format!("Config file {}: {}", config_path, e),
    })?;

    if config_path.ends_with(".json") {
        serde_json::from_str(&config_content)
            .map_err(|e| StyleError::json(config_path, format!("Invalid JSON config: {}", e)))
    } else if config_path.ends_with(".toml") {
        toml::from_str(&config_content)
            .map_err(|e| StyleError::toml(config_path, format!("Invalid TOML config: {}", e)))
    } else {
        Err(StyleError::invalid_format(
            "Config file must be .json or .toml format",
        ))
    }
}
