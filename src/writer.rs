//! The `Writer` component, owner of at most one reveal session.
use bevy::log::debug;
use bevy::prelude::{Bundle, Component};

use crate::prelude::{RenderState, RevealSession, Signal, WriterError, WriterSettings, WriterState};

/// Writes tagged text out over time.
///
/// A writer holds one [`RevealSession`] at a time: calling [`write`](Self::write)
/// while a session is going cancels it outright.
///
/// # Examples
///
/// ```
/// use bevy_scribe::prelude::*;
///
/// let mut writer = Writer::new(WriterSettings::instant());
/// assert_eq!(writer.state(), WriterState::Idle);
///
/// writer.write("First");
/// writer.write("Second");
/// assert_eq!(writer.advance(0.1).visible_text, "Second");
/// ```
#[derive(Component, Debug, Default)]
pub struct Writer {
    /// Settings for new sessions.
    settings: WriterSettings,
    /// The session being written, if any.
    session: Option<RevealSession>,
}

impl Writer {
    /// Creates an idle writer.
    pub fn new(settings: WriterSettings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    /// The settings used for new sessions.
    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    /// Replaces the settings. The session in progress keeps the old ones.
    pub fn set_settings(&mut self, settings: WriterSettings) {
        self.settings = settings;
    }

    /// Starts writing `text`, cancelling whatever was being written.
    pub fn write(&mut self, text: impl Into<String>) {
        let session = RevealSession::new(text, self.settings.clone());
        if let Some(old) = self.session.replace(session) {
            if old.state() != WriterState::Complete {
                debug!("Cancelled writing of '{}'", old.source());
            }
        }
    }

    /// Consumes `dt` seconds of writing time.
    pub fn advance(&mut self, dt: f32) -> RenderState {
        match &mut self.session {
            Some(session) => session.advance(dt),
            None => RenderState::default(),
        }
    }

    /// Delivers player input to the session.
    pub fn submit_input(&mut self) -> Result<(), WriterError> {
        self.session
            .as_mut()
            .ok_or(WriterError::NoActiveSession)?
            .submit_input()
    }

    /// Drops the session, going back to idle.
    pub fn clear(&mut self) {
        self.session = None;
    }

    /// Where the writer is in its work.
    pub fn state(&self) -> WriterState {
        self.session
            .as_ref()
            .map_or(WriterState::Idle, RevealSession::state)
    }

    /// Markup for a text widget.
    pub fn render(&self) -> String {
        self.session
            .as_ref()
            .map(RevealSession::render)
            .unwrap_or_default()
    }

    /// The current session.
    pub fn session(&self) -> Option<&RevealSession> {
        self.session.as_ref()
    }

    /// Takes the signals raised since the last call.
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        self.session
            .as_mut()
            .map(|s| s.drain_signals().collect())
            .unwrap_or_default()
    }
}

/// The markup a writer shows, kept up to date every frame. Hook it to a text widget.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct WriterText(pub String);

/// A bundle with what an entity needs to write text.
#[derive(Bundle, Default)]
pub struct WriterBundle {
    /// The writer.
    pub writer: Writer,
    /// The markup it shows.
    pub text: WriterText,
}

impl WriterBundle {
    /// A bundle for a writer with the given settings.
    pub fn new(settings: WriterSettings) -> Self {
        Self {
            writer: Writer::new(settings),
            text: WriterText::default(),
        }
    }
}
