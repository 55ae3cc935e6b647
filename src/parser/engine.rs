//! Generic backtracking recursive-descent engine.
//!
//! A [`Grammar`] is a registry of named nonterminals, each holding an ordered
//! list of alternative [`Rule`]s. A rule is a sequence of [`Symbol`]s plus a
//! builder that turns the matched parts into a node of type `N`.
//!
//! Alternatives are tried in declaration order. A rule that fails before
//! matching any symbol lets the engine rewind and try the next alternative;
//! a rule that fails after matching at least one symbol is a hard syntax
//! error. Nonterminal references are plain names resolved through the
//! registry when the parser reaches them, so rules may refer to themselves
//! or to nonterminals registered later.

use std::collections::HashMap;

use log::{debug, trace};
use thiserror::Error;

use crate::TokenKind;
use crate::tokenizer::{Span, Token};

/// Nonterminals that may be open at once before parsing gives up.
///
/// Each level costs two stack frames, so the limit keeps deeply nested input
/// well inside a 2 MiB thread stack.
pub const DEFAULT_DEPTH_LIMIT: usize = 256;

/// Failures produced by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A rule matched partially, then met a token it could not accept.
    #[error("unexpected {found} '{text}'")]
    UnexpectedToken {
        found: &'static str,
        text: String,
        span: Span,
    },
    /// A rule matched partially, then ran out of input.
    #[error("unexpected end of input")]
    UnexpectedEnd { span: Span },
    /// No alternative of the entry nonterminal matched.
    #[error("expected {symbol}")]
    UnresolvedSymbol { symbol: String, span: Span },
    /// The entry nonterminal matched but tokens were left over.
    #[error("unexpected data after expression: '{text}'")]
    ExtraData { text: String, span: Span },
    /// Nonterminals nested past the grammar's depth limit.
    #[error("expression nests too deeply")]
    TooDeep { span: Span },
    /// A rule references a nonterminal missing from the registry.
    #[error("unknown nonterminal '{name}'")]
    UnknownNonterminal { name: String },
    /// A builder asked for a part the rule does not provide.
    #[error("rule for '{symbol}' is malformed")]
    MalformedRule { symbol: String },
}

impl SyntaxError {
    /// Byte range of the offending input, when the error has one.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEnd { span }
            | Self::UnresolvedSymbol { span, .. }
            | Self::ExtraData { span, .. }
            | Self::TooDeep { span } => span.clone(),
            Self::UnknownNonterminal { .. } | Self::MalformedRule { .. } => 0..0,
        }
    }
}

/// A grammar symbol: a terminal matched by kind or a nonterminal by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Terminal(TokenKind),
    NonTerminal(&'static str),
}

/// Shorthand for [`Symbol::Terminal`].
#[must_use]
pub const fn t(kind: TokenKind) -> Symbol {
    Symbol::Terminal(kind)
}

/// Shorthand for [`Symbol::NonTerminal`].
#[must_use]
pub const fn nt(name: &'static str) -> Symbol {
    Symbol::NonTerminal(name)
}

/// One matched symbol handed to a builder.
#[derive(Debug)]
pub enum Part<N> {
    Token(Token),
    Node(N),
}

/// The parts matched by a rule, consumed in order by its builder.
#[derive(Debug)]
pub struct Parts<N> {
    symbol: &'static str,
    inner: std::vec::IntoIter<Part<N>>,
}

impl<N> Parts<N> {
    fn malformed(&self) -> SyntaxError {
        SyntaxError::MalformedRule {
            symbol: self.symbol.to_string(),
        }
    }

    /// Take the next part, which must be a token.
    ///
    /// # Errors
    /// Returns [`SyntaxError::MalformedRule`] if the next part is missing or
    /// is a node.
    pub fn token(&mut self) -> Result<Token, SyntaxError> {
        match self.inner.next() {
            Some(Part::Token(token)) => Ok(token),
            _ => Err(self.malformed()),
        }
    }

    /// Take the next part, which must be a node.
    ///
    /// # Errors
    /// Returns [`SyntaxError::MalformedRule`] if the next part is missing or
    /// is a token.
    pub fn node(&mut self) -> Result<N, SyntaxError> {
        match self.inner.next() {
            Some(Part::Node(node)) => Ok(node),
            _ => Err(self.malformed()),
        }
    }

    /// Discard the next part.
    ///
    /// # Errors
    /// Returns [`SyntaxError::MalformedRule`] if no part is left.
    pub fn skip(&mut self) -> Result<(), SyntaxError> {
        self.inner.next().map(|_| ()).ok_or_else(|| self.malformed())
    }
}

/// Builds a node from the parts matched by a rule.
pub type Builder<N, E> = fn(Parts<N>) -> Result<N, E>;

/// One alternative of a nonterminal.
pub struct Rule<N, E> {
    symbols: Vec<Symbol>,
    build: Builder<N, E>,
}

impl<N, E> Rule<N, E> {
    #[must_use]
    pub fn new(symbols: &[Symbol], build: Builder<N, E>) -> Self {
        Self {
            symbols: symbols.to_vec(),
            build,
        }
    }
}

enum Failure<E> {
    /// The rule did not match and consumed nothing.
    NoMatch,
    /// A hard error; no further alternatives are tried.
    Hard(E),
}

/// Registry of nonterminals.
pub struct Grammar<N, E> {
    nonterminals: HashMap<&'static str, Vec<Rule<N, E>>>,
    depth_limit: usize,
}

impl<N, E> Default for Grammar<N, E> {
    fn default() -> Self {
        Self {
            nonterminals: HashMap::new(),
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl<N, E> Grammar<N, E>
where
    E: From<SyntaxError>,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register alternatives for `name`, appending to any already present.
    #[must_use]
    pub fn define(mut self, name: &'static str, rules: Vec<Rule<N, E>>) -> Self {
        self.nonterminals.entry(name).or_default().extend(rules);
        self
    }

    /// Replace [`DEFAULT_DEPTH_LIMIT`].
    #[must_use]
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Check that every nonterminal reference resolves.
    ///
    /// # Errors
    /// Returns [`SyntaxError::UnknownNonterminal`] naming the first missing
    /// nonterminal found.
    pub fn validate(&self) -> Result<(), SyntaxError> {
        let missing = self
            .nonterminals
            .values()
            .flatten()
            .flat_map(|rule| &rule.symbols)
            .find_map(|symbol| match symbol {
                Symbol::NonTerminal(name) if !self.nonterminals.contains_key(name) => Some(*name),
                _ => None,
            });
        match missing {
            Some(name) => Err(SyntaxError::UnknownNonterminal {
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Parse `tokens` as a complete `entry`.
    ///
    /// # Errors
    /// Returns the first hard error raised by a rule or builder,
    /// [`SyntaxError::UnresolvedSymbol`] if `entry` does not match at all, or
    /// [`SyntaxError::ExtraData`] if tokens remain after `entry`, or
    /// [`SyntaxError::TooDeep`] if nesting exceeds the depth limit.
    pub fn parse(&self, entry: &'static str, tokens: &[Token]) -> Result<N, E> {
        match self.parse_nonterminal(entry, tokens, 0, 0) {
            Ok((end, node)) => match (tokens.get(end), tokens.last()) {
                (Some(first), Some(last)) => Err(SyntaxError::ExtraData {
                    text: first.text().to_string(),
                    span: first.span().start..last.span().end,
                }
                .into()),
                _ => Ok(node),
            },
            Err(Failure::NoMatch) => Err(SyntaxError::UnresolvedSymbol {
                symbol: entry.to_string(),
                span: tokens.first().map_or(0..0, Token::span),
            }
            .into()),
            Err(Failure::Hard(err)) => Err(err),
        }
    }

    fn rules(&self, name: &'static str) -> Result<&[Rule<N, E>], SyntaxError> {
        self.nonterminals
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SyntaxError::UnknownNonterminal {
                name: name.to_string(),
            })
    }

    fn parse_nonterminal(
        &self,
        name: &'static str,
        tokens: &[Token],
        start: usize,
        depth: usize,
    ) -> Result<(usize, N), Failure<E>> {
        if depth > self.depth_limit {
            let span = tokens.get(start).map_or_else(|| end_of(tokens), Token::span);
            debug!("{name} at token {start} exceeds depth {}", self.depth_limit);
            return Err(Failure::Hard(SyntaxError::TooDeep { span }.into()));
        }
        let rules = self.rules(name).map_err(|e| Failure::Hard(e.into()))?;
        for (idx, rule) in rules.iter().enumerate() {
            match self.parse_rule(rule, tokens, start, depth) {
                Ok((end, parts)) => {
                    trace!("{name} alternative {idx} matched tokens {start}..{end}");
                    let parts = Parts {
                        symbol: name,
                        inner: parts.into_iter(),
                    };
                    let node = (rule.build)(parts).map_err(Failure::Hard)?;
                    return Ok((end, node));
                }
                Err(Failure::NoMatch) => {}
                Err(hard) => return Err(hard),
            }
        }
        Err(Failure::NoMatch)
    }

    fn parse_rule(
        &self,
        rule: &Rule<N, E>,
        tokens: &[Token],
        start: usize,
        depth: usize,
    ) -> Result<(usize, Vec<Part<N>>), Failure<E>> {
        let mut pos = start;
        let mut parts = Vec::with_capacity(rule.symbols.len());
        for symbol in &rule.symbols {
            let matched = match *symbol {
                Symbol::Terminal(kind) => match tokens.get(pos) {
                    Some(token) if token.kind() == kind => {
                        pos += 1;
                        Ok(Part::Token(token.clone()))
                    }
                    _ => Err(Failure::NoMatch),
                },
                Symbol::NonTerminal(name) => self
                    .parse_nonterminal(name, tokens, pos, depth + 1)
                    .map(|(end, node)| {
                        pos = end;
                        Part::Node(node)
                    }),
            };
            match matched {
                Ok(part) => parts.push(part),
                Err(Failure::NoMatch) if parts.is_empty() => return Err(Failure::NoMatch),
                Err(Failure::NoMatch) => {
                    let err = stuck_at(tokens, pos);
                    debug!("rule failed after partial match: {err}");
                    return Err(Failure::Hard(err.into()));
                }
                Err(hard) => return Err(hard),
            }
        }
        Ok((pos, parts))
    }
}

fn stuck_at(tokens: &[Token], pos: usize) -> SyntaxError {
    match tokens.get(pos) {
        Some(token) => SyntaxError::UnexpectedToken {
            found: token.kind().describe(),
            text: token.text().to_string(),
            span: token.span(),
        },
        None => SyntaxError::UnexpectedEnd {
            span: end_of(tokens),
        },
    }
}

fn end_of(tokens: &[Token]) -> Span {
    let end = tokens.last().map_or(0, |t| t.span().end);
    end..end
}
