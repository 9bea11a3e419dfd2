//! Builds the timed glyph sequence from tokenized text.
use bevy::log::warn;

use crate::prelude::{Tag, TagKind, Token, WriterSettings};

/// Characters followed by a punctuation pause.
const PUNCTUATION: [char; 7] = ['.', '?', '!', ',', ':', ';', ')'];

/// Seconds a `{w}` tag waits when it has no usable parameter.
const DEFAULT_WAIT: f32 = 1.;

/// Default intensity and time of the punch tags.
const DEFAULT_PUNCH: [f32; 2] = [10., 0.5];

/// Default seconds of a `{flash}` tag.
const DEFAULT_FLASH: f32 = 0.2;

/// Returns true if `c` triggers a punctuation pause.
pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Inline style active on a glyph.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Style {
    /// Inside `{b}`.
    pub bold: bool,
    /// Inside `{i}`.
    pub italic: bool,
    /// Inside `{color=...}`, with its value.
    pub color: Option<String>,
    /// Inside `{size=...}`, with its value.
    pub size: Option<String>,
}

/// One revealable character.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// The character to display.
    pub character: char,
    /// Style snapshot taken when the glyph was built.
    pub style: Style,
    /// Seconds before the glyph becomes visible, counted from the previous entry.
    pub delay: f32,
    /// Whether a punctuation pause is part of the delay.
    pub punctuation_pause: bool,
    /// Seconds left before the glyph is revealed.
    pub(crate) remaining: f32,
}

impl Glyph {
    /// Creates a glyph that is revealed after `delay` seconds.
    pub fn new(character: char, style: Style, delay: f32) -> Self {
        Self {
            character,
            style,
            delay,
            punctuation_pause: false,
            remaining: delay,
        }
    }
}

/// A screen or audio effect asked for by the text.
///
/// The writer does not play them: it hands them to whoever listens.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    /// `{vpunch=intensity,time}`
    VerticalPunch {
        /// How far to punch.
        intensity: f32,
        /// Seconds the punch lasts.
        time: f32,
    },
    /// `{hpunch=intensity,time}`
    HorizontalPunch {
        /// How far to punch.
        intensity: f32,
        /// Seconds the punch lasts.
        time: f32,
    },
    /// `{punch=intensity,time}`, both directions.
    Punch {
        /// How far to punch.
        intensity: f32,
        /// Seconds the punch lasts.
        time: f32,
    },
    /// `{flash=duration}`
    Flash {
        /// Seconds the flash lasts.
        duration: f32,
    },
    /// `{audio=Name}`: play a sound once.
    Audio(String),
    /// `{audioloop=Name}`: play a sound in a loop.
    AudioLoop(String),
    /// `{audiopause=Name}`
    AudioPause(String),
    /// `{audiostop=Name}`
    AudioStop(String),
}

/// A control point in the glyph sequence, acted on by the reveal engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Block for some seconds.
    Wait {
        /// Seconds left.
        remaining: f32,
    },
    /// Block until the player gives input, optionally clearing the text afterwards.
    WaitForInput {
        /// Whether to clear the text once input arrives.
        clear: bool,
    },
    /// Clear the visible text.
    Clear,
    /// Stop writing right away.
    Exit,
    /// Tell listeners about a named message.
    Message(String),
    /// Tell listeners to play an effect.
    Cue(Cue),
}

impl Control {
    /// A wait of `duration` seconds.
    pub fn wait(duration: f32) -> Self {
        Control::Wait {
            remaining: duration,
        }
    }
}

/// An item of the glyph sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A character to reveal.
    Glyph(Glyph),
    /// A control point.
    Control(Control),
}

impl Entry {
    /// The glyph, if this entry is one.
    pub fn glyph(&self) -> Option<&Glyph> {
        match self {
            Entry::Glyph(g) => Some(g),
            Entry::Control(_) => None,
        }
    }
}

/// Parses one number, falling back to `default` when it is malformed.
fn parse_number(text: &str, kind: TagKind, default: f32) -> f32 {
    match text.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            warn!(
                "Malformed number '{}' in {:?} tag, using {}",
                text, kind, default
            );
            default
        }
    }
}

/// Parses a numeric tag parameter, falling back to `default` when it is missing or malformed.
fn numeric_param(tag: &Tag, default: f32) -> f32 {
    match &tag.param {
        Some(param) => parse_number(param, tag.kind, default),
        None => default,
    }
}

/// Parses a comma separated list like `10,0.5`. Missing or malformed values take their default.
fn numeric_params<const N: usize>(tag: &Tag, defaults: [f32; N]) -> [f32; N] {
    let mut values = defaults;
    if let Some(param) = &tag.param {
        for (value, part) in values.iter_mut().zip(param.split(',')) {
            *value = parse_number(part, tag.kind, *value);
        }
    }
    values
}

/// Checks a writing speed, turning speeds too small to give a finite delay into 0.
fn usable_speed(speed: f32) -> f32 {
    if speed > 0. && !(1. / speed).is_finite() {
        warn!("Writing speed {} is too small, writing instantly", speed);
        return 0.;
    }
    speed
}

/// The cue a tag asks for, if it is a cue tag.
fn cue(tag: &Tag) -> Option<Cue> {
    let name = || tag.param.clone().unwrap_or_default();
    let cue = match tag.kind {
        TagKind::VerticalPunch => {
            let [intensity, time] = numeric_params(tag, DEFAULT_PUNCH);
            Cue::VerticalPunch { intensity, time }
        }
        TagKind::HorizontalPunch => {
            let [intensity, time] = numeric_params(tag, DEFAULT_PUNCH);
            Cue::HorizontalPunch { intensity, time }
        }
        TagKind::Punch => {
            let [intensity, time] = numeric_params(tag, DEFAULT_PUNCH);
            Cue::Punch { intensity, time }
        }
        TagKind::Flash => Cue::Flash {
            duration: numeric_param(tag, DEFAULT_FLASH),
        },
        TagKind::Audio => Cue::Audio(name()),
        TagKind::AudioLoop => Cue::AudioLoop(name()),
        TagKind::AudioPause => Cue::AudioPause(name()),
        TagKind::AudioStop => Cue::AudioStop(name()),
        _ => return None,
    };
    Some(cue)
}

/// Running state while building glyphs.
struct Builder<'a> {
    /// Where the base speed and pause come from.
    settings: &'a WriterSettings,
    /// The entries built so far.
    entries: Vec<Entry>,
    /// Current style.
    style: Style,
    /// Current characters per second.
    speed: f32,
    /// Current punctuation pause.
    pause: f32,
    /// A punctuation pause waiting for the next non-punctuation glyph.
    pending_pause: bool,
    /// No glyph has been emitted since the start or the last clear.
    page_empty: bool,
    /// Skip whitespace because a clear just happened.
    trim_leading: bool,
}

impl<'a> Builder<'a> {
    /// A builder starting from the settings' base speed and pause.
    fn new(settings: &'a WriterSettings, capacity: usize) -> Self {
        Self {
            settings,
            entries: Vec::with_capacity(capacity),
            style: Style::default(),
            speed: usable_speed(settings.writing_speed),
            pause: settings.punctuation_pause,
            pending_pause: false,
            page_empty: true,
            trim_leading: false,
        }
    }

    /// Whether punctuation pauses apply at the current speed and pause.
    fn pauses(&self) -> bool {
        self.pause > 0. && self.speed > 0.
    }

    /// Adds one character.
    fn push_char(&mut self, c: char) {
        if self.trim_leading && matches!(c, ' ' | '\t' | '\r' | '\n') {
            return;
        }
        self.trim_leading = false;

        if self.page_empty && c == '\n' {
            return;
        }

        // An opening parenthesis inside the text is paced like a punctuation mark
        if c == '(' && !self.page_empty && self.pauses() {
            self.pending_pause = true;
        }

        let mut glyph = Glyph::new(c, self.style.clone(), self.char_delay());
        let punctuation = is_punctuation(c);
        if self.pending_pause && !punctuation {
            glyph.delay += self.pause;
            glyph.remaining = glyph.delay;
            glyph.punctuation_pause = true;
            self.pending_pause = false;
        }
        if punctuation && self.pauses() {
            self.pending_pause = true;
        }

        self.entries.push(Entry::Glyph(glyph));
        self.page_empty = false;
    }

    /// Seconds between two characters at the current speed.
    fn char_delay(&self) -> f32 {
        if self.speed > 0. {
            1. / self.speed
        } else {
            0.
        }
    }

    /// Adds a pacing control entry, which drops any pending punctuation pause.
    fn push_control(&mut self, control: Control) {
        self.pending_pause = false;
        self.entries.push(Entry::Control(control));
    }

    /// Adds a control entry that does not change pacing (messages and cues).
    fn push_signal(&mut self, control: Control) {
        self.entries.push(Entry::Control(control));
    }

    /// Applies one tag.
    fn push_tag(&mut self, tag: &Tag) {
        let clears = matches!(tag.kind, TagKind::Clear | TagKind::WaitForInputAndClear);
        self.trim_leading = false;

        match tag.kind {
            TagKind::BoldStart => self.style.bold = true,
            TagKind::BoldEnd => self.style.bold = false,
            TagKind::ItalicStart => self.style.italic = true,
            TagKind::ItalicEnd => self.style.italic = false,
            TagKind::ColorStart => self.style.color = tag.param.clone(),
            TagKind::ColorEnd => self.style.color = None,
            TagKind::SizeStart => self.style.size = tag.param.clone(),
            TagKind::SizeEnd => self.style.size = None,
            TagKind::SpeedStart => self.speed = usable_speed(numeric_param(tag, 0.)),
            TagKind::SpeedEnd => self.speed = usable_speed(self.settings.writing_speed),
            TagKind::WaitOnPunctuationStart => self.pause = numeric_param(tag, 0.),
            TagKind::WaitOnPunctuationEnd => self.pause = self.settings.punctuation_pause,
            TagKind::Wait => {
                let duration = numeric_param(tag, DEFAULT_WAIT).max(0.);
                self.push_control(Control::wait(duration));
            }
            TagKind::WaitForInputNoClear => {
                self.push_control(Control::WaitForInput { clear: false })
            }
            TagKind::WaitForInputAndClear => {
                self.push_control(Control::WaitForInput { clear: true })
            }
            TagKind::Clear => self.push_control(Control::Clear),
            TagKind::Exit => self.push_control(Control::Exit),
            TagKind::Message => {
                if let Some(message) = &tag.param {
                    self.push_signal(Control::Message(message.clone()));
                }
            }
            TagKind::VerticalPunch
            | TagKind::HorizontalPunch
            | TagKind::Punch
            | TagKind::Flash
            | TagKind::Audio
            | TagKind::AudioLoop
            | TagKind::AudioPause
            | TagKind::AudioStop => {
                if let Some(cue) = cue(tag) {
                    self.push_signal(Control::Cue(cue));
                }
            }
        }

        if clears {
            self.page_empty = true;
            self.trim_leading = true;
        }
    }
}

/// Builds the glyph sequence for some tokens.
///
/// Characters become [`Glyph`]s with the style and timing active at their position;
/// style, speed and pause tags change that state; wait, clear, exit, message and cue
/// tags become [`Control`] entries in the same order they appear in the text.
///
/// # Examples
///
/// ```
/// use bevy_scribe::prelude::*;
///
/// let entries = build_entries(&tokenize("a{b}b"), &WriterSettings::default());
/// let glyphs: Vec<&Glyph> = entries.iter().filter_map(Entry::glyph).collect();
/// assert!(!glyphs[0].style.bold);
/// assert!(glyphs[1].style.bold);
/// ```
pub fn build_entries(tokens: &[Token], settings: &WriterSettings) -> Vec<Entry> {
    let mut builder = Builder::new(settings, tokens.len());
    for token in tokens {
        match token {
            Token::Char(c) => builder.push_char(*c),
            Token::Tag(tag) => builder.push_tag(tag),
        }
    }
    builder.entries
}
