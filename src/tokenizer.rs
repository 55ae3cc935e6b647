//! Lexical analysis for calculator expressions.
//!
//! This module exposes [`tokenize`] and [`tokenize_with`], which convert raw
//! text into a sequence of [`Token`]s. Terminals are described by a
//! [`Catalog`] of anchored regular expressions. At every position the lexer
//! keeps the longest match; ties go to the terminal registered first, so the
//! registration order of [`Catalog::standard`] is significant.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::trace;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::TokenKind;
use crate::error::window;

/// Byte range for a token within the source.
pub type Span = std::ops::Range<usize>;

/// A lexed terminal together with its named captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    fields: BTreeMap<String, String>,
    span: Span,
}

impl Token {
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Source text the token was matched from.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// Value of a named capture, if the group participated in the match.
    ///
    /// Group names ending in `_<digit>` are folded onto their base name, so
    /// alternative branches of one pattern may populate the same field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Iterate over the names of all captured fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Raised when no terminal matches at some position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized token at byte {position}: {context}")]
pub struct LexError {
    position: usize,
    context: String,
}

impl LexError {
    fn new(src: &str, position: usize) -> Self {
        let (context, _) = window(src, position);
        Self { position, context }
    }

    /// Byte offset of the first unrecognized character.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Surrounding source text, elided with `...` when long.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }
}

#[derive(Debug)]
struct Terminal {
    kind: TokenKind,
    pattern: Regex,
    ignore: bool,
}

/// Immutable, ordered set of terminal patterns.
#[derive(Debug, Default)]
pub struct Catalog {
    terminals: Vec<Terminal>,
}

const NUMBER: &str = r"(?P<number>-?[0-9]+(?:\.[0-9]*)?)";

const UNIT: &str = concat!(
    r"(?P<milliseconds>milliseconds?|ms)",
    r"|(?P<seconds>seconds?|secs?|s)",
    r"|(?P<minutes>minutes?|mins?)",
    r"|(?P<hours>hours?|hrs?)",
    r"|(?P<days>days?|d)",
    r"|(?P<weeks>weeks?|wks?|w)",
    r"|(?P<months>months?|mons?)",
    r"|(?P<years>years?|yrs?|y)",
);

const ISO8601: &str = r"(?x)
    (?:
        (?P<year>[0-9]{4})-
        (?:
            (?P<month>[0-9]{2})-(?P<day>[0-9]{2})
            | (?P<yearday>[0-9]{3})
            | W(?P<week>[0-9]{2})-(?P<weekday>[0-9])
        )
        | (?P<year_2>[0-9]{4})
        (?:
            (?P<month_2>[0-9]{2})(?P<day_2>[0-9]{2})
            | (?P<yearday_2>[0-9]{3})
            | W(?P<week_2>[0-9]{2})(?P<weekday_2>[0-9])
        )
    )
    (?:
        (?:\s+|T)
        (?:
            (?P<hour>[0-9]{2}):(?P<minute>[0-9]{2})(?::(?P<second>[0-9]{2}))?
            | (?P<hour_2>[0-9]{2})(?P<minute_2>[0-9]{2})(?P<second_2>[0-9]{2})?
        )
    )?";

const DATE: &str = r"(?x)
    (?P<year>[0-9]{2,4})/(?P<month>[0-9]{1,2})/(?P<day>[0-9]{1,2})
    | (?P<year_2>[0-9]{2,4})-(?P<month_2>[0-9]{1,2})-(?P<day_2>[0-9]{1,2})
    | (?P<year_3>[0-9]{2,4})(?P<month_3>[0-9]{1,2})(?P<day_3>[0-9]{1,2})";

const TIME: &str = r"(?x)
    (?P<hour>[0-9]{1,2}):(?P<minute>[0-9]{2})(?::(?P<second>[0-9]{2}))?
        (?:\s*(?P<ampm>am|pm))?
    | (?P<hour_2>[0-9]{1,2})\.(?P<minute_2>[0-9]{2})(?:\.(?P<second_2>[0-9]{2}))?
        (?:\s*(?P<ampm_2>am|pm))?
    | (?P<hour_3>[0-9]{1,2})\s*(?P<ampm_3>am|pm)";

impl Catalog {
    /// An empty catalog, to be filled with [`Catalog::register`].
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catalog of calculator terminals.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn standard() -> Result<Self, regex::Error> {
        Self::empty()
            .register(TokenKind::T_NUMBER, NUMBER)?
            .register(TokenKind::T_UNIT, UNIT)?
            .register(TokenKind::T_DATETIME_LITERAL, r"(?P<lit>now|epoch)")?
            .register(TokenKind::T_DATE_LITERAL, r"(?P<lit>today)")?
            .register(TokenKind::T_ISO8601, ISO8601)?
            .register(TokenKind::T_DATE, DATE)?
            .register(TokenKind::T_TIME, TIME)?
            .register(TokenKind::T_COMMA, ",")?
            .register(TokenKind::T_LPAREN, r"\(")?
            .register(TokenKind::T_RPAREN, r"\)")?
            .register(TokenKind::T_MINUS, "-")?
            .register(TokenKind::T_PLUS, r"\+")?
            .register(TokenKind::T_STAR, r"\*")?
            .register(TokenKind::T_SLASH, "/")?
            .register_ignored(TokenKind::T_WHITESPACE, r"\s+")
    }

    /// Append a terminal. Earlier registrations win ties.
    ///
    /// # Errors
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn register(self, kind: TokenKind, pattern: &str) -> Result<Self, regex::Error> {
        self.push(kind, pattern, false)
    }

    /// Append a terminal whose tokens are dropped after matching.
    ///
    /// # Errors
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn register_ignored(self, kind: TokenKind, pattern: &str) -> Result<Self, regex::Error> {
        self.push(kind, pattern, true)
    }

    fn push(mut self, kind: TokenKind, pattern: &str, ignore: bool) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"\A(?:{pattern})"))?;
        self.terminals.push(Terminal {
            kind,
            pattern,
            ignore,
        });
        Ok(self)
    }

    /// Find the longest non-empty match at the start of `rest`.
    fn longest_match<'c, 'h>(&'c self, rest: &'h str) -> Option<(&'c Terminal, Captures<'h>)> {
        let mut best: Option<(&Terminal, Captures<'h>, usize)> = None;
        for terminal in &self.terminals {
            let Some(caps) = terminal.pattern.captures(rest) else {
                continue;
            };
            let len = caps.get(0).map_or(0, |m| m.end());
            if len > best.as_ref().map_or(0, |(_, _, l)| *l) {
                best = Some((terminal, caps, len));
            }
        }
        best.map(|(terminal, caps, _)| (terminal, caps))
    }
}

fn base_name(group: &str) -> &str {
    match group.rsplit_once('_') {
        Some((base, suffix))
            if suffix.len() == 1 && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => group,
    }
}

fn build_token(terminal: &Terminal, caps: &Captures<'_>, start: usize) -> Token {
    let mut fields = BTreeMap::new();
    for (idx, name) in terminal.pattern.capture_names().enumerate() {
        let (Some(name), Some(m)) = (name, caps.get(idx)) else {
            continue;
        };
        fields
            .entry(base_name(name).to_owned())
            .or_insert_with(|| m.as_str().to_owned());
    }
    let text = caps.get(0).map_or("", |m| m.as_str());
    Token {
        kind: terminal.kind,
        text: text.to_owned(),
        fields,
        span: start..start + text.len(),
    }
}

#[expect(clippy::expect_used, reason = "built-in patterns are known to compile")]
fn build_standard() -> Catalog {
    Catalog::standard().expect("standard catalog patterns must compile")
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(build_standard);

/// The shared standard catalog.
#[must_use]
pub fn standard_catalog() -> &'static Catalog {
    &STANDARD
}

/// Tokenise `src` with a caller-supplied catalog.
///
/// Ignored terminals advance the scan position without producing tokens.
///
/// # Errors
/// Returns a [`LexError`] at the first position where no terminal matches.
pub fn tokenize_with(catalog: &Catalog, src: &str) -> Result<Vec<Token>, LexError> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(rest) = src.get(pos..).filter(|r| !r.is_empty()) {
        let Some((terminal, caps)) = catalog.longest_match(rest) else {
            return Err(LexError::new(src, pos));
        };
        let token = build_token(terminal, &caps, pos);
        pos = token.span.end;
        if terminal.ignore {
            continue;
        }
        trace!("token {:?} {:?} at {:?}", token.kind, token.text, token.span);
        out.push(token);
    }
    Ok(out)
}

/// Tokenise `src` with the standard catalog.
///
/// # Examples
///
/// ```rust
/// use timecalc::{TokenKind, tokenize};
///
/// let tokens = tokenize("2015/07/31 + 1 day").unwrap_or_default();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::T_DATE, TokenKind::T_PLUS, TokenKind::T_NUMBER, TokenKind::T_UNIT],
/// );
/// ```
///
/// # Errors
/// Returns a [`LexError`] when the input contains unrecognized text.
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with(standard_catalog(), src)
}
