//! Tokenizer for tagged dialogue text.
//!
//! Text like `"Hello {b}World{/b}!{wi}"` is split into single characters and
//! tags. Tags are bracket regions whose keyword is found in [`TAG_TABLE`],
//! anything else between braces is dropped.
use bevy::log::warn;

/// The kind of a recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `{b}`
    BoldStart,
    /// `{/b}`
    BoldEnd,
    /// `{i}`
    ItalicStart,
    /// `{/i}`
    ItalicEnd,
    /// `{color=red}`
    ColorStart,
    /// `{/color}`
    ColorEnd,
    /// `{w}`, `{w=0.5}`
    Wait,
    /// `{wi}`
    WaitForInputNoClear,
    /// `{wc}`
    WaitForInputAndClear,
    /// `{wp}`, `{wp=0.5}`
    WaitOnPunctuationStart,
    /// `{/wp}`
    WaitOnPunctuationEnd,
    /// `{c}`
    Clear,
    /// `{s}`, `{s=60}`
    SpeedStart,
    /// `{/s}`
    SpeedEnd,
    /// `{x}`
    Exit,
    /// `{m=MessageName}`
    Message,
    /// `{size=30}`
    SizeStart,
    /// `{/size}`
    SizeEnd,
    /// `{vpunch}`, `{vpunch=10,0.5}`
    VerticalPunch,
    /// `{hpunch}`, `{hpunch=10,0.5}`
    HorizontalPunch,
    /// `{punch}`, `{punch=10,0.5}`
    Punch,
    /// `{flash}`, `{flash=0.2}`
    Flash,
    /// `{audio=Name}`
    Audio,
    /// `{audioloop=Name}`
    AudioLoop,
    /// `{audiopause=Name}`
    AudioPause,
    /// `{audiostop=Name}`
    AudioStop,
}

/// Whether a tag keyword takes a parameter after `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    /// The tag must not have a parameter.
    None,
    /// The parameter can be omitted.
    Optional,
    /// The tag needs a non-empty parameter.
    Required,
}

/// Keyword => (kind, parameter policy).
///
/// The keyword is the tag content before the first `=`, matched exactly.
const TAG_TABLE: &[(&str, TagKind, Param)] = &[
    ("b", TagKind::BoldStart, Param::None),
    ("/b", TagKind::BoldEnd, Param::None),
    ("i", TagKind::ItalicStart, Param::None),
    ("/i", TagKind::ItalicEnd, Param::None),
    ("color", TagKind::ColorStart, Param::Required),
    ("/color", TagKind::ColorEnd, Param::None),
    ("w", TagKind::Wait, Param::Optional),
    ("wi", TagKind::WaitForInputNoClear, Param::None),
    ("wc", TagKind::WaitForInputAndClear, Param::None),
    ("wp", TagKind::WaitOnPunctuationStart, Param::Optional),
    ("/wp", TagKind::WaitOnPunctuationEnd, Param::None),
    ("c", TagKind::Clear, Param::None),
    ("s", TagKind::SpeedStart, Param::Optional),
    ("/s", TagKind::SpeedEnd, Param::None),
    ("x", TagKind::Exit, Param::None),
    ("m", TagKind::Message, Param::Required),
    ("size", TagKind::SizeStart, Param::Required),
    ("/size", TagKind::SizeEnd, Param::None),
    ("vpunch", TagKind::VerticalPunch, Param::Optional),
    ("hpunch", TagKind::HorizontalPunch, Param::Optional),
    ("punch", TagKind::Punch, Param::Optional),
    ("flash", TagKind::Flash, Param::Optional),
    ("audio", TagKind::Audio, Param::Required),
    ("audioloop", TagKind::AudioLoop, Param::Required),
    ("audiopause", TagKind::AudioPause, Param::Required),
    ("audiostop", TagKind::AudioStop, Param::Required),
];

/// A tag parsed from the text, with its optional trimmed parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// What the tag does.
    pub kind: TagKind,
    /// The text after `=`, trimmed.
    pub param: Option<String>,
}

impl Tag {
    /// Creates a tag without parameter.
    pub fn new(kind: TagKind) -> Self {
        Self { kind, param: None }
    }

    /// Creates a tag with a parameter.
    pub fn with_param(kind: TagKind, param: impl Into<String>) -> Self {
        Self {
            kind,
            param: Some(param.into()),
        }
    }

    /// Looks up the content of a bracket region (without the braces).
    ///
    /// Returns `None` if the keyword is unknown or the parameter does not fit the keyword.
    ///
    /// # Examples
    ///
    /// ```
    /// use bevy_scribe::prelude::*;
    ///
    /// assert_eq!(Tag::lookup("w=0.5"), Some(Tag::with_param(TagKind::Wait, "0.5")));
    /// assert_eq!(Tag::lookup("wi"), Some(Tag::new(TagKind::WaitForInputNoClear)));
    /// assert_eq!(Tag::lookup("B"), None);
    /// ```
    pub fn lookup(content: &str) -> Option<Tag> {
        let (keyword, param) = match content.split_once('=') {
            Some((k, p)) => (k, Some(p.trim())),
            None => (content, None),
        };

        let (_, kind, policy) = TAG_TABLE.iter().find(|(k, _, _)| *k == keyword)?;

        match (policy, param) {
            (Param::None, None) | (Param::Optional, None) => Some(Tag::new(*kind)),
            (Param::Optional, Some(p)) => Some(Tag::with_param(*kind, p)),
            (Param::Required, Some(p)) if !p.is_empty() => Some(Tag::with_param(*kind, p)),
            _ => None,
        }
    }
}

/// One item of tokenized text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A literal character.
    Char(char),
    /// A recognized tag.
    Tag(Tag),
}

/// Splits `text` into characters and tags, preserving order.
///
/// A bracket region runs from `{` to the first `}` on the same line. Regions shorter
/// than 3 characters and regions with unknown content are dropped.
///
/// # Examples
///
/// ```
/// use bevy_scribe::prelude::*;
///
/// let tokens = tokenize("a{b}c{nope}");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Char('a'),
///         Token::Tag(Tag::new(TagKind::BoldStart)),
///         Token::Char('c'),
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        tokens.extend(rest[..open].chars().map(Token::Char));

        let after_open = &rest[open + 1..];
        let line_end = after_open.find('\n').unwrap_or(after_open.len());
        match after_open[..line_end].find('}') {
            Some(close) => {
                let content = &after_open[..close];
                if let Some(tag) = bracket_tag(content) {
                    tokens.push(Token::Tag(tag));
                }
                rest = &after_open[close + 1..];
            }
            None => {
                // No closing brace on this line, so the brace is plain text
                tokens.push(Token::Char('{'));
                rest = after_open;
            }
        }
    }
    tokens.extend(rest.chars().map(Token::Char));

    tokens
}

/// Turns the content of a bracket region into a tag, logging what gets dropped.
fn bracket_tag(content: &str) -> Option<Tag> {
    if content.is_empty() {
        warn!("Dropped empty tag");
        return None;
    }
    let tag = Tag::lookup(content);
    if tag.is_none() {
        warn!("Dropped unknown tag {{{}}}", content);
    }
    tag
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("b", Some(Tag::new(TagKind::BoldStart)))]
    #[case("/b", Some(Tag::new(TagKind::BoldEnd)))]
    #[case("i", Some(Tag::new(TagKind::ItalicStart)))]
    #[case("/i", Some(Tag::new(TagKind::ItalicEnd)))]
    #[case("color=red", Some(Tag::with_param(TagKind::ColorStart, "red")))]
    #[case("color= #ff0000 ", Some(Tag::with_param(TagKind::ColorStart, "#ff0000")))]
    #[case("/color", Some(Tag::new(TagKind::ColorEnd)))]
    #[case("w", Some(Tag::new(TagKind::Wait)))]
    #[case("w=0.5", Some(Tag::with_param(TagKind::Wait, "0.5")))]
    #[case("wi", Some(Tag::new(TagKind::WaitForInputNoClear)))]
    #[case("wc", Some(Tag::new(TagKind::WaitForInputAndClear)))]
    #[case("wp", Some(Tag::new(TagKind::WaitOnPunctuationStart)))]
    #[case("wp=1", Some(Tag::with_param(TagKind::WaitOnPunctuationStart, "1")))]
    #[case("/wp", Some(Tag::new(TagKind::WaitOnPunctuationEnd)))]
    #[case("c", Some(Tag::new(TagKind::Clear)))]
    #[case("s", Some(Tag::new(TagKind::SpeedStart)))]
    #[case("s=60", Some(Tag::with_param(TagKind::SpeedStart, "60")))]
    #[case("/s", Some(Tag::new(TagKind::SpeedEnd)))]
    #[case("x", Some(Tag::new(TagKind::Exit)))]
    #[case("m=Boom", Some(Tag::with_param(TagKind::Message, "Boom")))]
    #[case("size=30", Some(Tag::with_param(TagKind::SizeStart, "30")))]
    #[case("/size", Some(Tag::new(TagKind::SizeEnd)))]
    #[case("vpunch", Some(Tag::new(TagKind::VerticalPunch)))]
    #[case("vpunch=0.5", Some(Tag::with_param(TagKind::VerticalPunch, "0.5")))]
    #[case("hpunch=10,1", Some(Tag::with_param(TagKind::HorizontalPunch, "10,1")))]
    #[case("punch", Some(Tag::new(TagKind::Punch)))]
    #[case("flash=0.3", Some(Tag::with_param(TagKind::Flash, "0.3")))]
    #[case("audio=Bell", Some(Tag::with_param(TagKind::Audio, "Bell")))]
    #[case("audioloop=Rain", Some(Tag::with_param(TagKind::AudioLoop, "Rain")))]
    #[case("audiopause=Rain", Some(Tag::with_param(TagKind::AudioPause, "Rain")))]
    #[case("audiostop=Rain", Some(Tag::with_param(TagKind::AudioStop, "Rain")))]
    fn lookup_known_tags(#[case] content: &str, #[case] expected: Option<Tag>) {
        assert_eq!(Tag::lookup(content), expected);
    }

    #[rstest]
    #[case("B")]
    #[case(" b")]
    #[case("bold")]
    #[case("b=1")]
    #[case("x=2")]
    #[case("color")]
    #[case("color=")]
    #[case("m=  ")]
    #[case("size")]
    #[case("/size=2")]
    #[case("audio")]
    #[case("audiostop=")]
    #[case("shake")]
    fn lookup_rejects(#[case] content: &str) {
        assert_eq!(Tag::lookup(content), None);
    }

    #[test]
    fn plain_text_is_all_chars() {
        let tokens = tokenize("Hi there!");
        assert_eq!(tokens.len(), 9);
        assert!(tokens.iter().all(|t| matches!(t, Token::Char(_))));
    }

    #[test]
    fn tags_keep_their_position() {
        let tokens = tokenize("Hello {b}World{/b}!");
        assert_eq!(tokens[6], Token::Tag(Tag::new(TagKind::BoldStart)));
        assert_eq!(tokens[12], Token::Tag(Tag::new(TagKind::BoldEnd)));
        assert_eq!(tokens[13], Token::Char('!'));
        assert_eq!(tokens.len(), 14);
    }

    #[test]
    fn unknown_and_empty_regions_are_dropped() {
        let tokens = tokenize("a{}b{what}c");
        assert_eq!(
            tokens,
            vec![Token::Char('a'), Token::Char('b'), Token::Char('c')]
        );
    }

    #[test]
    fn unclosed_brace_is_text() {
        let tokens = tokenize("a{b");
        assert_eq!(
            tokens,
            vec![Token::Char('a'), Token::Char('{'), Token::Char('b')]
        );
    }

    #[test]
    fn brace_closed_on_next_line_is_text() {
        let tokens = tokenize("{b\n}");
        assert_eq!(
            tokens,
            vec![
                Token::Char('{'),
                Token::Char('b'),
                Token::Char('\n'),
                Token::Char('}')
            ]
        );
    }

    #[test]
    fn region_ends_at_first_closing_brace() {
        // "{w}" is the region, the trailing "}" is text
        let tokens = tokenize("{w}}");
        assert_eq!(
            tokens,
            vec![Token::Tag(Tag::new(TagKind::Wait)), Token::Char('}')]
        );
    }

    #[test]
    fn multibyte_text_around_tags() {
        let tokens = tokenize("é{i}ü");
        assert_eq!(
            tokens,
            vec![
                Token::Char('é'),
                Token::Tag(Tag::new(TagKind::ItalicStart)),
                Token::Char('ü')
            ]
        );
    }
}
