//! Parser combinator functions for building the unit grammar.
//!
//! Every grammar piece produces a *fragment*: the ordered nodes it matched.
//! Terminals produce one leaf, rules produce one rule node wrapping the
//! fragment of their body, and sequences concatenate fragments. This keeps
//! match order intact without any per-rule tuple juggling.

use chumsky::prelude::*;
use std::ops::Range;
use std::sync::Arc;

use crate::delphi::ast::{Node, Rule};
use crate::delphi::lexer::Token;

/// Type alias for parser error
pub(crate) type ParserError = Simple<Token>;

/// The nodes matched by a grammar piece, in match order
pub(crate) type Fragment = Vec<Node>;

/// A boxed grammar rule; rules are boxed to keep parser types small
pub(crate) type RuleParser = BoxedParser<'static, Token, Fragment, ParserError>;

/// Match a specific token type and turn it into a leaf.
///
/// Tokens with a fixed spelling use it, so reserved words come out
/// upper-case whatever case the source used. Identifiers and literals
/// keep their source text.
pub(crate) fn token(
    expected: Token,
    source: &Arc<str>,
) -> impl Parser<Token, Fragment, Error = ParserError> + Clone {
    let source = Arc::clone(source);
    just(expected).map_with_span(move |token: Token, span: Range<usize>| {
        let text = match token.fixed_text() {
            Some(text) => text.to_string(),
            None => source.get(span).unwrap_or_default().to_string(),
        };
        vec![Node::leaf(text)]
    })
}

/// Match any one of `tokens`, reporting all of them as expected on failure
pub(crate) fn any_of(tokens: &[Token], source: &Arc<str>) -> RuleParser {
    match tokens.split_first() {
        Some((first, rest)) => rest
            .iter()
            .fold(token(*first, source).boxed(), |acc, next| {
                acc.or(token(*next, source)).boxed()
            }),
        None => filter(|_: &Token| false).map(|_| Fragment::new()).boxed(),
    }
}

/// Wrap the fragment matched by `body` into a single `rule` node
pub(crate) fn rule<P>(rule: Rule, body: P) -> RuleParser
where
    P: Parser<Token, Fragment, Error = ParserError> + 'static,
{
    body.map(move |children| vec![Node::rule(rule, children)])
        .boxed()
}

/// Match `first` then `second`, concatenating their fragments
pub(crate) fn concat<A, B>(
    first: A,
    second: B,
) -> impl Parser<Token, Fragment, Error = ParserError> + Clone
where
    A: Parser<Token, Fragment, Error = ParserError> + Clone,
    B: Parser<Token, Fragment, Error = ParserError> + Clone,
{
    first.then(second).map(|(mut head, tail)| {
        head.extend(tail);
        head
    })
}

/// Zero or one occurrence; an absent piece contributes nothing
pub(crate) fn opt<P>(piece: P) -> impl Parser<Token, Fragment, Error = ParserError> + Clone
where
    P: Parser<Token, Fragment, Error = ParserError> + Clone,
{
    piece.or_not().map(Option::unwrap_or_default)
}

/// Zero or more occurrences
pub(crate) fn many<P>(piece: P) -> impl Parser<Token, Fragment, Error = ParserError> + Clone
where
    P: Parser<Token, Fragment, Error = ParserError> + Clone,
{
    piece.repeated().map(flatten)
}

/// One or more occurrences
pub(crate) fn many1<P>(piece: P) -> impl Parser<Token, Fragment, Error = ParserError> + Clone
where
    P: Parser<Token, Fragment, Error = ParserError> + Clone,
{
    piece.repeated().at_least(1).map(flatten)
}

fn flatten(groups: Vec<Fragment>) -> Fragment {
    groups.into_iter().flatten().collect()
}

/// Sequence any number of fragment parsers left to right
macro_rules! sequence {
    ($first:expr $(, $rest:expr)+) => {{
        let parser = $first;
        $( let parser = $crate::delphi::parser::combinators::concat(parser, $rest); )+
        parser
    }};
}

pub(crate) use sequence;
