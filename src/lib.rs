#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
// Often exceeded by queries
#![allow(clippy::type_complexity)]
// Unhelpful for systems
#![allow(clippy::too_many_arguments)]

//! [`bevy_scribe`] is a Bevy plugin that writes dialogue text out over time.
//!
//! Text is written with inline tags: `{b}`/`{i}`/`{color=red}` for style,
//! `{s=30}` and `{wp=0.5}` for pacing, `{w=1}` to pause, `{wi}`/`{wc}` to wait
//! for the player, `{c}` to clear and `{x}` to stop. The engine types
//! ([`prelude::Writer`], [`prelude::RevealSession`]) work without the ECS; the plugin
//! drives every [`prelude::Writer`] component with the frame time.

use bevy::prelude::*;
use events::{SignalWriters, ScribeEventsPlugin};
use prelude::{InputRequest, WriteRequest, Writer, WriterRegistry, WriterSettings, WriterText};
use ron_loader::loader::WriterSettingsLoader;

pub mod errors;
pub mod events;
pub mod glyphs;
pub mod markup;
pub mod prelude;
pub mod registry;
pub mod ron_loader;
pub mod session;
pub mod settings;
pub mod tags;
pub mod writer;

/// The plugin that writes out text for every [`Writer`] component.
pub struct ScribePlugin;

impl Plugin for ScribePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ScribeEventsPlugin)
            .init_resource::<WriterRegistry>()
            .init_asset::<WriterSettings>()
            .init_asset_loader::<WriterSettingsLoader>()
            .add_systems(
                Update,
                (
                    registry::track_writers,
                    write_request_handler,
                    input_request_handler,
                    advance_writers,
                )
                    .chain()
                    .in_set(ScribeSet),
            );
    }
}

/// The [`SystemSet`] for the `bevy_scribe` systems. Order text widget updates after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScribeSet;

/// Handles the requests to start writing.
fn write_request_handler(
    mut requests: EventReader<WriteRequest>,
    mut writers: Query<&mut Writer>,
) {
    for req in requests.read() {
        match writers.get_mut(req.writer) {
            Ok(mut writer) => {
                writer.write(req.text.as_str());
                debug!("Writer {:?} started writing", req.writer);
            }
            Err(err) => error!("Write request for {:?} failed: {}", req.writer, err),
        }
    }
}

/// Handles the player input requests.
fn input_request_handler(
    mut requests: EventReader<InputRequest>,
    mut writers: Query<&mut Writer>,
    mut signals: SignalWriters,
) {
    for req in requests.read() {
        let Ok(mut writer) = writers.get_mut(req.writer) else {
            error!("Input request for {:?} failed: no writer", req.writer);
            continue;
        };
        match writer.submit_input() {
            Ok(()) => {
                for signal in writer.drain_signals() {
                    signals.relay(req.writer, signal);
                }
            }
            Err(err) => error!("Input request for {:?} failed: {}", req.writer, err),
        }
    }
}

/// Advances every writer by the frame time and refreshes its text.
fn advance_writers(
    time: Res<Time>,
    mut writers: Query<(Entity, &mut Writer, Option<&mut WriterText>)>,
    mut signals: SignalWriters,
) {
    let dt = time.delta_seconds();
    for (e, mut writer, text) in &mut writers {
        writer.advance(dt);
        for signal in writer.drain_signals() {
            signals.relay(e, signal);
        }
        if let Some(mut text) = text {
            let markup = writer.render();
            if text.0 != markup {
                text.0 = markup;
            }
        }
    }
}
