use std::ops::Range;

use chumsky::prelude::*;

use crate::error::{Error, Result};
use crate::log::targets::PARSE as LOG_PARSE;
use crate::tree::{Connective, Node, Token};

type Span = Range<usize>;
type ParseError = Simple<char, Span>;

fn negation() -> impl Parser<char, Token, Error = ParseError> + Clone {
	just('~')
		.map_with_span(|_, span: Span| Token::negation(span.start))
		.padded()
}

fn letter() -> impl Parser<char, Token, Error = ParseError> + Clone {
	filter(|c: &char| c.is_alphabetic())
		.map_with_span(|c, span: Span| Token::letter(c, span.start))
		.padded()
}

fn connective() -> impl Parser<char, Token, Error = ParseError> + Clone {
	choice((
		just('&').to(Connective::Conjunction),
		just('|').to(Connective::Disjunction),
		just('>').to(Connective::Implication),
		just('=').to(Connective::Equivalence),
	))
	.map_with_span(|connective, span: Span| Token::connective(connective, span.start))
	.padded()
}

fn parser() -> impl Parser<char, Node, Error = ParseError> {
	let formula = recursive(|formula| {
		let proposition = negation()
			.or_not()
			.then(letter())
			.map(|(negation, letter)| Node::proposition(negation, letter));

		// Parentheses leave no token behind; a lone proposition inside them is kept
		// as a bare unary so the grouping survives.
		let group = formula
			.delimited_by(just('(').padded(), just(')').padded())
			.map(|node| match node {
				proposition @ Node::Proposition { .. } => Node::bare(proposition),
				other => other,
			});

		let operand = recursive(|operand| {
			choice((
				proposition.clone(),
				negation()
					.then(group.clone().or(operand))
					.map(|(negation, operand)| Node::negated(negation, operand)),
				group.clone(),
			))
		});

		operand
			.clone()
			.then(connective())
			.then(operand.clone())
			.map(|((left, operator), right)| Node::composite(left, operator, right))
			.or(operand)
	});

	formula.map(Node::formula).then_ignore(end())
}

/// Parses `expression` into a tree rooted at a [`Node::Formula`].
pub fn parse(expression: &str) -> Result<Node> {
	let tree = parser().parse(expression).map_err(|errors| Error::Parse {
		expression: expression.to_owned(),
		errors,
	})?;
	log::debug!(target: LOG_PARSE, "Parsed `{expression}` as `{tree}`.");
	Ok(tree)
}
