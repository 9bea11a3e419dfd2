//! The reveal engine: writes a glyph sequence out over time.
use crate::markup::push_glyphs;
use crate::prelude::{
    build_entries, tokenize, Control, Cue, Entry, HiddenGlyphs, WriterError, WriterSettings,
};

/// Where a writer is in its work.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Nothing to write.
    #[default]
    Idle,
    /// Glyphs are being revealed as time passes.
    Revealing,
    /// Stopped on a `{wi}` or `{wc}` tag until input arrives.
    WaitingForInput,
    /// Everything was written, or an `{x}` tag ended the writing.
    Complete,
}

/// Something that happened while revealing, for the caller to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// A glyph became visible.
    GlyphRevealed(char),
    /// Writing stopped to wait for input.
    WaitingForInput {
        /// Whether the text will be cleared once input arrives.
        clear: bool,
    },
    /// A `{m=...}` tag was reached.
    Message(String),
    /// A punch, flash or audio tag was reached.
    Cue(Cue),
    /// The session completed.
    Finished {
        /// Whether an `{x}` tag ended the session before the end of the text.
        exited_early: bool,
    },
}

/// What a host needs after each tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderState {
    /// Markup of the revealed glyphs on the current page.
    pub visible_text: String,
    /// Whether writing is blocked until [`RevealSession::submit_input`] is called.
    pub is_waiting_for_input: bool,
    /// Whether the session completed.
    pub is_complete: bool,
    /// Whether an `{x}` tag completed the session.
    pub exited_early: bool,
}

/// One "write this text out over time" operation.
///
/// The session is driven from outside: [`advance`](Self::advance) is called once per
/// frame with the elapsed seconds, [`submit_input`](Self::submit_input) when the
/// player asks to continue.
///
/// # Examples
///
/// ```
/// use bevy_scribe::prelude::*;
///
/// let mut session = RevealSession::new("Hi{wi}!", WriterSettings::instant());
/// let state = session.advance(0.016);
/// assert!(state.is_waiting_for_input);
/// assert_eq!(state.visible_text, "Hi");
///
/// session.submit_input().unwrap();
/// let state = session.advance(0.016);
/// assert!(state.is_complete);
/// assert_eq!(state.visible_text, "Hi!");
/// ```
#[derive(Debug, Clone)]
pub struct RevealSession {
    /// The tagged text being written.
    source: String,
    /// The glyph sequence built from the source.
    entries: Vec<Entry>,
    /// Index of the first entry not consumed yet.
    cursor: usize,
    /// Index of the first entry of the current page (moved by clears).
    page_start: usize,
    /// Seconds of reveal time consumed so far.
    elapsed: f32,
    /// Current state.
    state: WriterState,
    /// Set when an `{x}` tag ended the session.
    exited_early: bool,
    /// Signals not yet drained by the caller.
    signals: Vec<Signal>,
    /// Settings the session was built with.
    settings: WriterSettings,
}

impl RevealSession {
    /// Parses `text` and starts revealing it.
    ///
    /// Text that produces nothing to reveal completes right away.
    pub fn new(text: impl Into<String>, settings: WriterSettings) -> Self {
        let source = text.into();
        let entries = build_entries(&tokenize(&source), &settings);

        let mut session = Self {
            source,
            entries,
            cursor: 0,
            page_start: 0,
            elapsed: 0.,
            state: WriterState::Revealing,
            exited_early: false,
            signals: Vec::new(),
            settings,
        };
        if session.entries.is_empty() {
            session.finish(false);
        }
        session
    }

    /// Consumes `dt` seconds of reveal time and reports what is visible.
    pub fn advance(&mut self, dt: f32) -> RenderState {
        if self.state == WriterState::Revealing {
            let dt = dt.max(0.);
            self.elapsed += dt;
            self.step(dt);
        }
        self.render_state()
    }

    /// Delivers player input.
    ///
    /// Resumes a session waiting on `{wi}` or `{wc}` (the latter also clears the text).
    /// With `instant_complete` on, input while revealing shows everything up to the
    /// next input wait or exit at once.
    pub fn submit_input(&mut self) -> Result<(), WriterError> {
        match self.state {
            WriterState::WaitingForInput => {
                if let Some(Entry::Control(Control::WaitForInput { clear: true })) =
                    self.entries.get(self.cursor)
                {
                    self.page_start = self.cursor + 1;
                }
                self.cursor += 1;
                self.state = WriterState::Revealing;
                self.step(0.);
                Ok(())
            }
            WriterState::Revealing if self.settings.instant_complete => {
                self.skip_to_stop();
                self.step(0.);
                Ok(())
            }
            _ => Err(WriterError::NotWaitingForInput),
        }
    }

    /// Current state.
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// The tagged text of this session.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The glyph sequence of this session.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries consumed so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Seconds of reveal time consumed so far (time spent waiting for input excluded).
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether an `{x}` tag ended the session.
    pub fn exited_early(&self) -> bool {
        self.exited_early
    }

    /// Takes the signals raised since the last call.
    pub fn drain_signals(&mut self) -> std::vec::Drain<'_, Signal> {
        self.signals.drain(..)
    }

    /// The state for the host, with only revealed glyphs in the text.
    pub fn render_state(&self) -> RenderState {
        RenderState {
            visible_text: self.render_with(HiddenGlyphs::Omit),
            is_waiting_for_input: self.state == WriterState::WaitingForInput,
            is_complete: self.state == WriterState::Complete,
            exited_early: self.exited_early,
        }
    }

    /// Markup for a text widget, hiding upcoming glyphs as the settings say.
    pub fn render(&self) -> String {
        self.render_with(self.settings.hidden_glyphs)
    }

    /// Renders the current page.
    ///
    /// Hidden glyphs run until the next entry that would end the page.
    fn render_with(&self, hidden: HiddenGlyphs) -> String {
        let mut out = String::new();
        let visible = self.entries[self.page_start..self.cursor]
            .iter()
            .filter_map(Entry::glyph);
        push_glyphs(&mut out, visible, true);

        if hidden == HiddenGlyphs::Transparent && self.state != WriterState::Complete {
            let upcoming: Vec<_> = self.entries[self.cursor..]
                .iter()
                .take_while(|e| !ends_page(e))
                .filter_map(Entry::glyph)
                .collect();
            if !upcoming.is_empty() {
                out.push_str("<color=");
                out.push_str(&self.settings.hidden_color);
                out.push('>');
                push_glyphs(&mut out, upcoming, false);
                out.push_str("</color>");
            }
        }
        out
    }

    /// Consumes entries with `budget` seconds until something blocks.
    fn step(&mut self, mut budget: f32) {
        while self.state == WriterState::Revealing {
            if self.cursor >= self.entries.len() {
                self.finish(false);
                break;
            }

            match &mut self.entries[self.cursor] {
                Entry::Glyph(glyph) => {
                    if !consume(&mut glyph.remaining, &mut budget) {
                        break;
                    }
                    self.signals.push(Signal::GlyphRevealed(glyph.character));
                }
                Entry::Control(Control::Wait { remaining }) => {
                    if !consume(remaining, &mut budget) {
                        break;
                    }
                }
                Entry::Control(Control::WaitForInput { clear }) => {
                    self.signals.push(Signal::WaitingForInput { clear: *clear });
                    self.state = WriterState::WaitingForInput;
                    break;
                }
                Entry::Control(Control::Clear) => {
                    self.page_start = self.cursor + 1;
                }
                Entry::Control(Control::Exit) => {
                    self.exited_early = true;
                    self.state = WriterState::Complete;
                    self.signals.push(Signal::Finished { exited_early: true });
                    break;
                }
                Entry::Control(Control::Message(message)) => {
                    self.signals.push(Signal::Message(message.clone()));
                }
                Entry::Control(Control::Cue(cue)) => {
                    self.signals.push(Signal::Cue(cue.clone()));
                }
            }
            self.cursor += 1;
        }
    }

    /// Zeroes every delay up to the next input wait or exit.
    fn skip_to_stop(&mut self) {
        for entry in &mut self.entries[self.cursor..] {
            match entry {
                Entry::Glyph(glyph) => glyph.remaining = 0.,
                Entry::Control(Control::Wait { remaining }) => *remaining = 0.,
                Entry::Control(Control::WaitForInput { .. } | Control::Exit) => break,
                Entry::Control(_) => {}
            }
        }
    }

    /// Completes the session.
    fn finish(&mut self, exited_early: bool) {
        self.exited_early = exited_early;
        self.state = WriterState::Complete;
        self.signals.push(Signal::Finished { exited_early });
    }
}

/// Whether an entry starts a new page (or ends writing).
fn ends_page(entry: &Entry) -> bool {
    matches!(
        entry,
        Entry::Control(Control::Clear | Control::WaitForInput { clear: true } | Control::Exit)
    )
}

/// Takes time from `budget` to count down `remaining`. Returns true if it reached zero.
fn consume(remaining: &mut f32, budget: &mut f32) -> bool {
    if *remaining <= *budget {
        *budget -= *remaining;
        *remaining = 0.;
        true
    } else {
        *remaining -= *budget;
        *budget = 0.;
        false
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn settings(speed: f32, pause: f32) -> WriterSettings {
        WriterSettings {
            writing_speed: speed,
            punctuation_pause: pause,
            ..Default::default()
        }
    }

    /// Advances in small steps until `f` holds, returning the time it took.
    fn run_until(
        session: &mut RevealSession,
        dt: f32,
        max_steps: usize,
        f: impl Fn(&RenderState) -> bool,
    ) -> Option<f32> {
        let mut t = 0.;
        for _ in 0..max_steps {
            let state = session.advance(dt);
            t += dt;
            if f(&state) {
                return Some(t);
            }
        }
        None
    }

    #[test]
    fn instant_reveal_at_speed_zero() {
        let mut session = RevealSession::new("Hello {b}World{/b}!", settings(0., 0.25));
        let state = session.advance(0.0001);
        assert!(state.is_complete);
        assert!(!state.exited_early);
        assert_eq!(state.visible_text, "Hello <b>World</b>!");
    }

    #[test]
    fn reveals_one_glyph_per_tick_of_char_time() {
        let mut session = RevealSession::new("abc", settings(10., 0.));
        assert_eq!(session.advance(0.15).visible_text, "a");
        assert_eq!(session.advance(0.1).visible_text, "ab");
        let state = session.advance(0.1);
        assert_eq!(state.visible_text, "abc");
        assert!(state.is_complete);
    }

    #[test]
    fn leftover_time_carries_to_next_glyph() {
        let mut session = RevealSession::new("abcd", settings(10., 0.));
        assert_eq!(session.advance(0.25).visible_text, "ab");
        // 0.05 left on c from the previous tick
        assert_eq!(session.advance(0.06).visible_text, "abc");
    }

    #[rstest]
    #[case(0.5)]
    #[case(1.0)]
    #[case(2.5)]
    fn wait_tag_blocks_for_its_duration(#[case] secs: f32) {
        let text = format!("a{{w={secs}}}b");
        let mut session = RevealSession::new(text, settings(0., 0.));
        let state = session.advance(0.);
        assert_eq!(state.visible_text, "a");

        let t = run_until(&mut session, 0.01, 1000, |s| s.visible_text == "ab").unwrap();
        assert!(t >= secs - 1e-3);
    }

    #[test]
    fn wait_without_param_is_one_second() {
        let mut session = RevealSession::new("a{w}b", settings(0., 0.));
        assert_eq!(session.advance(0.9).visible_text, "a");
        assert_eq!(session.advance(0.2).visible_text, "ab");
    }

    #[test]
    fn wait_for_input_then_go() {
        let mut session = RevealSession::new("Wait...{wi}Go", settings(10., 0.5));
        let state = session.advance(1.0);
        assert!(state.is_waiting_for_input);
        assert_eq!(state.visible_text, "Wait...");

        // time alone does not resume
        let state = session.advance(10.);
        assert!(state.is_waiting_for_input);
        assert_eq!(state.visible_text, "Wait...");

        session.submit_input().unwrap();
        let state = session.advance(1.0);
        assert!(!state.is_waiting_for_input);
        assert!(state.is_complete);
        assert_eq!(state.visible_text, "Wait...Go");
    }

    #[test]
    fn wait_and_clear() {
        let mut session = RevealSession::new("One{wc}Two", settings(0., 0.));
        assert_eq!(session.advance(0.).visible_text, "One");
        session.submit_input().unwrap();
        let state = session.advance(0.);
        assert_eq!(state.visible_text, "Two");
        assert!(state.is_complete);
    }

    #[test]
    fn clear_tag_resets_visible_text() {
        let mut session = RevealSession::new("One{w=1}{c}Two", settings(0., 0.));
        assert_eq!(session.advance(0.5).visible_text, "One");
        assert_eq!(session.advance(1.).visible_text, "Two");
    }

    #[test]
    fn exit_stops_early() {
        let mut session = RevealSession::new("Bye{x}never shown", settings(10., 0.));
        let t = run_until(&mut session, 0.05, 1000, |s| s.is_complete).unwrap();
        assert!(t < 1.);
        let state = session.advance(100.);
        assert!(state.is_complete);
        assert!(state.exited_early);
        assert_eq!(state.visible_text, "Bye");
        assert_eq!(session.render(), "Bye");
    }

    #[test]
    fn natural_end_is_not_exited_early() {
        let mut session = RevealSession::new("Hi", settings(0., 0.));
        let state = session.advance(0.);
        assert!(state.is_complete);
        assert!(!state.exited_early);
    }

    #[test]
    fn empty_text_is_complete_right_away() {
        let mut session = RevealSession::new("{b}{/b}", settings(60., 0.));
        assert_eq!(session.state(), WriterState::Complete);
        assert_eq!(
            session.drain_signals().collect::<Vec<_>>(),
            vec![Signal::Finished {
                exited_early: false
            }]
        );
    }

    #[test]
    fn input_when_not_waiting_errors() {
        let mut session = RevealSession::new("abc", settings(1., 0.));
        assert_eq!(
            session.submit_input().err(),
            Some(WriterError::NotWaitingForInput)
        );
    }

    #[test]
    fn instant_complete_skips_to_next_stop() {
        let mut session = RevealSession::new(
            "Long text{w=5} here{wi}more",
            WriterSettings {
                writing_speed: 1.,
                instant_complete: true,
                ..Default::default()
            },
        );
        session.advance(0.);
        session.submit_input().unwrap();
        let state = session.advance(0.);
        assert!(state.is_waiting_for_input);
        assert_eq!(state.visible_text, "Long text here");
    }

    #[test]
    fn signals_in_order() {
        let mut session = RevealSession::new("a{m=Ping}b{wi}", settings(0., 0.));
        session.advance(0.);
        let signals: Vec<Signal> = session.drain_signals().collect();
        assert_eq!(
            signals,
            vec![
                Signal::GlyphRevealed('a'),
                Signal::Message("Ping".to_string()),
                Signal::GlyphRevealed('b'),
                Signal::WaitingForInput { clear: false },
            ]
        );

        session.submit_input().unwrap();
        let signals: Vec<Signal> = session.drain_signals().collect();
        assert_eq!(
            signals,
            vec![Signal::Finished {
                exited_early: false
            }]
        );
    }

    #[test]
    fn cues_are_signalled_in_order() {
        let mut session =
            RevealSession::new("a{audio=Bell}b{vpunch=5,1}{flash}", settings(0., 0.));
        session.advance(0.);
        let signals: Vec<Signal> = session.drain_signals().collect();
        assert_eq!(
            signals,
            vec![
                Signal::GlyphRevealed('a'),
                Signal::Cue(Cue::Audio("Bell".to_string())),
                Signal::GlyphRevealed('b'),
                Signal::Cue(Cue::VerticalPunch {
                    intensity: 5.,
                    time: 1.
                }),
                Signal::Cue(Cue::Flash { duration: 0.2 }),
                Signal::Finished {
                    exited_early: false
                },
            ]
        );
    }

    #[test]
    fn speed_too_small_for_a_delay_completes() {
        let mut session = RevealSession::new("{s=1e-39}slow", settings(10., 0.));
        let state = session.advance(0.);
        assert!(state.is_complete);
        assert_eq!(state.visible_text, "slow");
    }

    #[test]
    fn transparent_render_keeps_page_layout() {
        let mut session = RevealSession::new("ab{b}cd{/b}{c}ef", settings(10., 0.));
        session.advance(0.15);
        assert_eq!(
            session.render(),
            "a<color=#FFFFFF00>b<b>cd</b></color>"
        );
        assert_eq!(session.render_state().visible_text, "a");
    }

    #[test]
    fn transparent_render_hides_color() {
        let mut session = RevealSession::new("{color=red}ab", settings(10., 0.));
        session.advance(0.15);
        assert_eq!(
            session.render(),
            "<color=red>a</color><color=#FFFFFF00>b</color>"
        );
    }

    #[test]
    fn omit_render() {
        let mut session = RevealSession::new(
            "abc",
            WriterSettings {
                writing_speed: 10.,
                hidden_glyphs: HiddenGlyphs::Omit,
                ..Default::default()
            },
        );
        session.advance(0.15);
        assert_eq!(session.render(), "a");
    }

    #[test]
    fn cursor_never_goes_back() {
        let mut session = RevealSession::new("ab{c}cd{wc}ef", settings(20., 0.));
        let mut last = 0;
        for _ in 0..100 {
            let state = session.advance(0.02);
            assert!(session.cursor() >= last);
            last = session.cursor();
            if state.is_waiting_for_input {
                session.submit_input().unwrap();
            }
        }
        assert_eq!(session.state(), WriterState::Complete);
        assert_eq!(session.render_state().visible_text, "ef");
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut session = RevealSession::new("ab", settings(10., 0.));
        session.advance(-5.);
        assert_eq!(session.elapsed(), 0.);
        assert_eq!(session.cursor(), 0);
    }
}
