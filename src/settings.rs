//! Writer configuration.
use bevy::{asset::Asset, reflect::TypePath};
use serde::Deserialize;
use serde_ron::de::from_str;

/// How glyphs that are not revealed yet show up in the rendered markup.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum HiddenGlyphs {
    /// Upcoming glyphs of the current page are wrapped in a transparent color,
    /// so a text widget lays out (and word-wraps) the whole page from the start.
    #[default]
    Transparent,
    /// Upcoming glyphs are left out.
    Omit,
}

/// Settings of a [`Writer`](crate::prelude::Writer).
///
/// They can be loaded as assets from `*.writer.ron` files:
///
/// ```ron
/// (
///     writing_speed: 40.0,
///     punctuation_pause: 0.3,
///     instant_complete: true,
/// )
/// ```
///
/// Missing fields take their default value.
#[derive(Debug, Deserialize, Clone, PartialEq, Asset, TypePath)]
#[serde(default)]
pub struct WriterSettings {
    /// Characters revealed per second. Zero reveals text instantly.
    pub writing_speed: f32,
    /// Extra seconds to wait after punctuation.
    pub punctuation_pause: f32,
    /// Whether player input while text is still being written reveals it at once.
    pub instant_complete: bool,
    /// How not yet revealed glyphs are rendered.
    pub hidden_glyphs: HiddenGlyphs,
    /// The color markup value used for hidden glyphs.
    pub hidden_color: String,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            writing_speed: 60.,
            punctuation_pause: 0.25,
            instant_complete: false,
            hidden_glyphs: HiddenGlyphs::default(),
            hidden_color: String::from("#FFFFFF00"),
        }
    }
}

impl WriterSettings {
    /// Parses settings from a RON string.
    ///
    /// # Examples
    ///
    /// ```
    /// use bevy_scribe::prelude::*;
    ///
    /// let settings = WriterSettings::from_ron("(writing_speed: 0.0)").unwrap();
    /// assert_eq!(settings.writing_speed, 0.0);
    /// assert_eq!(settings.punctuation_pause, 0.25);
    /// ```
    pub fn from_ron(s: &str) -> Result<Self, serde_ron::error::SpannedError> {
        from_str(s)
    }

    /// Settings that reveal everything at once, without punctuation pauses.
    pub fn instant() -> Self {
        Self {
            writing_speed: 0.,
            punctuation_pause: 0.,
            ..Default::default()
        }
    }
}
