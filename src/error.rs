use chumsky::error::Simple;
use thiserror::Error;

use crate::tree::Token;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("failed to parse `{expression}`: {}", describe(.errors))]
	Parse {
		expression: String,
		errors: Vec<Simple<char>>,
	},

	#[error("no value given for proposition `{0}`")]
	MissingValuation(char),

	#[error("`{value}` is not a truth value for `{letter}`, expected 0 or 1")]
	InvalidValuationValue { letter: char, value: String },

	#[error("`{0}` is not an assignment, expected <letter>=<0|1>")]
	MalformedAssignment(String),

	#[error("unknown logical connective {0}")]
	UnknownConnective(Token),

	#[error("cannot apply {rule}: {reason}")]
	InapplicableRule { rule: &'static str, reason: String },
}

fn describe(errors: &[Simple<char>]) -> String {
	errors
		.iter()
		.map(|error| format!("{error} at {}", error.span().start))
		.collect::<Vec<_>>()
		.join("; ")
}
