//! Prelude for the `bevy_scribe` crate.
pub use super::{ScribePlugin, ScribeSet};
pub use super::{
    errors::*,
    events::{requests::*, writer_events::*},
    glyphs::*,
    markup::render_glyphs,
    registry::WriterRegistry,
    ron_loader::loader::{SettingsLoaderError, WriterSettingsLoader},
    session::*,
    settings::*,
    tags::*,
    writer::*,
};
