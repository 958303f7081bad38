// config.rs - Interaction Configuration
// Reads reply settings from botconfig.txt, the same KEY=VALUE file the bot
// keeps its DISCORD_TOKEN and PREFIX in.
//
// Key Features:
// - Multi-path fallback (., .., ../.., src/)
// - BOM stripping, comments, blank lines
// - Emoji glyph overrides and reply visibility defaults
//
// Used by: context.rs (UserInteraction::with_config)

// ============================================================================
// IMPORTS
// ============================================================================

use crate::emoji::{EmojiSet, ResponseEmoji};
use crate::error::{InteractionError, Result};
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const CONFIG_PATHS: [&str; 4] = [
    "botconfig.txt",
    "../botconfig.txt",
    "../../botconfig.txt",
    "src/botconfig.txt",
];

/// Longest error text `oops` will show a user.
pub const DEFAULT_ERROR_MESSAGE_LIMIT: usize = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionConfig {
    /// Visibility used by `UserInteraction::init`.
    pub ephemeral_replies: bool,
    pub error_message_limit: usize,
    pub emojis: EmojiSet,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            ephemeral_replies: true,
            error_message_limit: DEFAULT_ERROR_MESSAGE_LIMIT,
            emojis: EmojiSet::default(),
        }
    }
}

impl InteractionConfig {
    /// Load from the first botconfig.txt found.
    pub fn load() -> Result<Self> {
        Self::load_from(&CONFIG_PATHS)
    }

    /// Load from the first readable file in `paths`; later paths are only
    /// tried when earlier ones are missing.
    pub fn load_from<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        for config_path in paths {
            let config_path = config_path.as_ref();
            match fs::read_to_string(config_path) {
                Ok(content) => {
                    info!("✅ [CONFIG] Interaction settings loaded from {}", config_path.display());
                    return Self::parse(&content);
                }
                Err(_) => continue,
            }
        }

        Err(InteractionError::ConfigNotFound)
    }

    /// Like `load`, but any failure leaves the defaults in place.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(&CONFIG_PATHS)
    }

    pub fn load_or_default_from<P: AsRef<Path>>(paths: &[P]) -> Self {
        match Self::load_from(paths) {
            Ok(config) => config,
            Err(e) => {
                warn!("⚠️ [CONFIG] {} - using default interaction settings", e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let map = parse_key_values(content);
        let mut config = Self::default();

        if let Some(value) = map.get("REPLY_EPHEMERAL") {
            config.ephemeral_replies = parse_bool(value).ok_or_else(|| invalid("REPLY_EPHEMERAL", value))?;
        }

        if let Some(value) = map.get("ERROR_MESSAGE_LIMIT") {
            config.error_message_limit = value
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| invalid("ERROR_MESSAGE_LIMIT", value))?;
        }

        for emoji in ResponseEmoji::ALL {
            if let Some(glyph) = map.get(emoji.config_key()) {
                if glyph.is_empty() {
                    return Err(invalid(emoji.config_key(), glyph));
                }
                config.emojis.set(emoji, glyph.as_str());
            }
        }

        Ok(config)
    }
}

fn parse_key_values(content: &str) -> HashMap<String, String> {
    // Remove BOM if present
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(equals_pos) = line.find('=') {
            let key = line[..equals_pos].trim().to_string();
            let value = line[equals_pos + 1..].trim().to_string();
            config.insert(key, value);
        }
    }

    config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(key: &str, value: &str) -> InteractionError {
    InteractionError::ConfigInvalid {
        key: key.to_string(),
        value: value.to_string(),
    }
}
