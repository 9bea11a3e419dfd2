//! Events the plugin can receive.

use bevy::prelude::*;

/// Event to start writing some text with a writer. It requires an entity with the [`Writer`](crate::prelude::Writer) component.
///
/// Whatever the writer was writing is cancelled.
#[derive(Event)]
pub struct WriteRequest {
    /// The entity with the `Writer` component.
    pub writer: Entity,
    /// The tagged text to write.
    pub text: String,
}

impl WriteRequest {
    /// Creates a new `WriteRequest`.
    pub fn new(writer: Entity, text: impl Into<String>) -> Self {
        Self {
            writer,
            text: text.into(),
        }
    }
}

/// Event to deliver player input to a writer. It requires an entity with the [`Writer`](crate::prelude::Writer) component.
///
/// This event is typically wired to an input from the player, e.g. a mouse click to continue the dialogue.
/// It resumes a writer stopped on a `{wi}` or `{wc}` tag. It fails (and logs an error) when the
/// writer is not waiting for input, unless its settings enable instant complete.
#[derive(Event)]
pub struct InputRequest {
    /// The entity with the `Writer` component.
    pub writer: Entity,
}

impl InputRequest {
    /// Creates a new `InputRequest`.
    pub fn new(writer: Entity) -> Self {
        Self { writer }
    }
}
