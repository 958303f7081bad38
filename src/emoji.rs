// emoji.rs - Response Emoji Tags
// Tags used to mark the tone of a reply, and the glyph table that renders them.
// Glyphs can be overridden through botconfig.txt (see config.rs).

// ============================================================================
// IMPORTS
// ============================================================================

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseEmoji {
    Success,
    Info,
    Warning,
    Danger,
    Loading,
}

impl ResponseEmoji {
    pub const ALL: [ResponseEmoji; 5] = [
        ResponseEmoji::Success,
        ResponseEmoji::Info,
        ResponseEmoji::Warning,
        ResponseEmoji::Danger,
        ResponseEmoji::Loading,
    ];

    pub fn default_glyph(self) -> &'static str {
        match self {
            ResponseEmoji::Success => "✅",
            ResponseEmoji::Info => "ℹ️",
            ResponseEmoji::Warning => "⚠️",
            ResponseEmoji::Danger => "⛔",
            ResponseEmoji::Loading => "⏳",
        }
    }

    /// Name of the botconfig.txt key that overrides this glyph.
    pub fn config_key(self) -> &'static str {
        match self {
            ResponseEmoji::Success => "EMOJI_SUCCESS",
            ResponseEmoji::Info => "EMOJI_INFO",
            ResponseEmoji::Warning => "EMOJI_WARNING",
            ResponseEmoji::Danger => "EMOJI_DANGER",
            ResponseEmoji::Loading => "EMOJI_LOADING",
        }
    }
}

impl fmt::Display for ResponseEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_glyph())
    }
}

/// Glyph table, one entry per tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiSet {
    success: String,
    info: String,
    warning: String,
    danger: String,
    loading: String,
}

impl Default for EmojiSet {
    fn default() -> Self {
        Self {
            success: ResponseEmoji::Success.default_glyph().to_string(),
            info: ResponseEmoji::Info.default_glyph().to_string(),
            warning: ResponseEmoji::Warning.default_glyph().to_string(),
            danger: ResponseEmoji::Danger.default_glyph().to_string(),
            loading: ResponseEmoji::Loading.default_glyph().to_string(),
        }
    }
}

impl EmojiSet {
    pub fn glyph(&self, emoji: ResponseEmoji) -> &str {
        match emoji {
            ResponseEmoji::Success => &self.success,
            ResponseEmoji::Info => &self.info,
            ResponseEmoji::Warning => &self.warning,
            ResponseEmoji::Danger => &self.danger,
            ResponseEmoji::Loading => &self.loading,
        }
    }

    pub fn set(&mut self, emoji: ResponseEmoji, glyph: impl Into<String>) {
        let slot = match emoji {
            ResponseEmoji::Success => &mut self.success,
            ResponseEmoji::Info => &mut self.info,
            ResponseEmoji::Warning => &mut self.warning,
            ResponseEmoji::Danger => &mut self.danger,
            ResponseEmoji::Loading => &mut self.loading,
        };
        *slot = glyph.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_matches_display() {
        let set = EmojiSet::default();
        for emoji in ResponseEmoji::ALL {
            assert_eq!(set.glyph(emoji), emoji.to_string());
        }
    }

    #[test]
    fn test_override_glyph() {
        let mut set = EmojiSet::default();
        set.set(ResponseEmoji::Warning, ":warning:");
        assert_eq!(set.glyph(ResponseEmoji::Warning), ":warning:");
        assert_eq!(set.glyph(ResponseEmoji::Success), "✅");
    }
}
