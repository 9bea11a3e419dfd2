//! Events to drive writers and to react to what they write.
use bevy::prelude::*;

use crate::prelude::Signal;

use self::{requests::*, writer_events::*};

pub mod requests;
pub mod writer_events;

/// All the built-in events for `bevy_scribe`.
pub(crate) struct ScribeEventsPlugin;

impl Plugin for ScribeEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WriteRequest>()
            .add_event::<InputRequest>()
            .add_event::<GlyphRevealedEvent>()
            .add_event::<WaitingForInputEvent>()
            .add_event::<TextMessageEvent>()
            .add_event::<TextCueEvent>()
            .add_event::<WritingFinishedEvent>();
    }
}

/// The event writers a writer's signals are relayed to.
#[derive(bevy::ecs::system::SystemParam)]
pub(crate) struct SignalWriters<'w> {
    /// For [`Signal::GlyphRevealed`].
    glyphs: EventWriter<'w, GlyphRevealedEvent>,
    /// For [`Signal::WaitingForInput`].
    waits: EventWriter<'w, WaitingForInputEvent>,
    /// For [`Signal::Message`].
    messages: EventWriter<'w, TextMessageEvent>,
    /// For [`Signal::Cue`].
    cues: EventWriter<'w, TextCueEvent>,
    /// For [`Signal::Finished`].
    finished: EventWriter<'w, WritingFinishedEvent>,
}

impl SignalWriters<'_> {
    /// Sends the event matching a signal of `writer`.
    pub(crate) fn relay(&mut self, writer: Entity, signal: Signal) {
        match signal {
            Signal::GlyphRevealed(character) => {
                self.glyphs.send(GlyphRevealedEvent { writer, character })
            }
            Signal::WaitingForInput { clear } => {
                self.waits.send(WaitingForInputEvent { writer, clear })
            }
            Signal::Message(message) => self.messages.send(TextMessageEvent { writer, message }),
            Signal::Cue(cue) => self.cues.send(TextCueEvent { writer, cue }),
            Signal::Finished { exited_early } => self.finished.send(WritingFinishedEvent {
                writer,
                exited_early,
            }),
        }
    }
}
