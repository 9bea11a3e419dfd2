//! A simple example that writes tagged text and prints what is visible to the console.

use bevy::prelude::*;
use bevy_scribe::prelude::*;

const STORY: &str = "Hello {b}stranger{/b}... {w=0.5}welcome to the {color=red}tavern{/color}!{wi}
{audio=Door}{s=10}Take a seat,{/s} the {i}stew{/i} is almost ready.{wc}
Press space to hurry me up.{m=Done}";

fn main() {
    App::new()
        .add_plugins((DefaultPlugins, ScribePlugin))
        .add_systems(Startup, setup_writer)
        .add_systems(
            Update,
            (interact, print_text, print_events, bevy::window::close_on_esc).after(ScribeSet),
        )
        .run();
}

fn setup_writer(mut commands: Commands, mut requests: EventWriter<WriteRequest>) {
    let settings = WriterSettings {
        hidden_glyphs: HiddenGlyphs::Omit,
        instant_complete: true,
        ..default()
    };
    let e = commands
        .spawn((WriterBundle::new(settings), Name::new("narrator")))
        .id();
    requests.send(WriteRequest::new(e, STORY));

    println!("-----------------------------------------");
    println!("Press space to continue.");
    println!("-----------------------------------------");
}

/// Send input to the narrator when the space key is pressed.
fn interact(
    input: Res<Input<KeyCode>>,
    registry: Res<WriterRegistry>,
    mut input_events: EventWriter<InputRequest>,
) {
    if input.just_pressed(KeyCode::Space) {
        if let Some(e) = registry.get("narrator") {
            input_events.send(InputRequest::new(e));
        }
    }
}

fn print_text(texts: Query<&WriterText, Changed<WriterText>>) {
    for text in &texts {
        println!("{}", text.0);
    }
}

fn print_events(
    mut waits: EventReader<WaitingForInputEvent>,
    mut messages: EventReader<TextMessageEvent>,
    mut cues: EventReader<TextCueEvent>,
    mut finished: EventReader<WritingFinishedEvent>,
) {
    for _ in waits.read() {
        println!("--- (space to continue)");
    }
    for msg in messages.read() {
        println!("--- message: {}", msg.message);
    }
    for ev in cues.read() {
        println!("--- cue: {:?}", ev.cue);
    }
    for ev in finished.read() {
        println!("--- finished (exited early: {})", ev.exited_early);
    }
}
