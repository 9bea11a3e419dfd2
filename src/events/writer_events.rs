//! Events the plugin emits.
use bevy::prelude::*;

use crate::prelude::Cue;

/// Emitted for every glyph that becomes visible. Typing sounds can be played from it.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct GlyphRevealedEvent {
    /// The writer entity.
    pub writer: Entity,
    /// The revealed character.
    pub character: char,
}

/// Emitted when a writer stops on a `{wi}` or `{wc}` tag. Show a "continue" indicator on it.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WaitingForInputEvent {
    /// The writer entity.
    pub writer: Entity,
    /// Whether the text is cleared once input arrives.
    pub clear: bool,
}

/// Emitted when a writer reaches a `{m=...}` tag.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TextMessageEvent {
    /// The writer entity.
    pub writer: Entity,
    /// The message name.
    pub message: String,
}

/// Emitted when a writer reaches a punch, flash or audio tag. The effect is up to the listener.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TextCueEvent {
    /// The writer entity.
    pub writer: Entity,
    /// The effect asked for.
    pub cue: Cue,
}

/// Emitted when a writer is done with its text.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WritingFinishedEvent {
    /// The writer entity.
    pub writer: Entity,
    /// True if an `{x}` tag ended the writing, false if the text was written to the end.
    pub exited_early: bool,
}
