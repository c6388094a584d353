use crate::error::{Error, Result};
use crate::log::targets::EVALUATION as LOG_EVALUATION;
use crate::tree::{Node, Token, TokenKind, Unary};
use crate::valuation::{complement, Valuation};

/// The outcome of evaluating a tree under one valuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
	pub value: u8,
	/// One slot per column of the source text. Columns holding a letter,
	/// connective or negation carry the value computed there.
	pub entries: Vec<Option<u8>>,
	/// The value of every subtree, in post-order.
	pub annotations: Vec<u8>,
}

/// Evaluates `tree` under `valuation`, laying the per-token values out over
/// `width` columns. Every letter in the tree must be assigned.
pub fn evaluate(tree: &Node, valuation: &Valuation, width: usize) -> Result<Evaluation> {
	let mut evaluator = Evaluator {
		valuation,
		entries: vec![None; width],
		annotations: Vec::new(),
	};
	let value = evaluator.visit(tree)?;
	log::trace!(target: LOG_EVALUATION, "F({valuation}) = {value}");

	Ok(Evaluation {
		value,
		entries: evaluator.entries,
		annotations: evaluator.annotations,
	})
}

#[must_use]
pub fn render_entries(entries: &[Option<u8>]) -> String {
	entries
		.iter()
		.map(|entry| match entry {
			Some(0) => '0',
			Some(_) => '1',
			None => ' ',
		})
		.collect()
}

struct Evaluator<'v> {
	valuation: &'v Valuation,
	entries: Vec<Option<u8>>,
	annotations: Vec<u8>,
}

impl Evaluator<'_> {
	fn record(&mut self, token: &Token, value: u8) {
		if let Some(slot) = self.entries.get_mut(token.position) {
			*slot = Some(value);
		}
	}

	fn visit(&mut self, node: &Node) -> Result<u8> {
		let value = match node {
			Node::Proposition { negation, letter } => {
				let assigned = self.valuation.get(letter.text())?;
				// the letter keeps its own value, the negation is shown at the `~`
				self.record(letter, assigned);
				match negation {
					Some(negation) => {
						let negated = complement(assigned);
						self.record(negation, negated);
						negated
					}
					None => assigned,
				}
			}

			Node::Unary(Unary::Negated { negation, operand }) => {
				let negated = complement(self.visit(operand)?);
				self.record(negation, negated);
				negated
			}

			Node::Unary(Unary::Bare(child)) | Node::Formula(child) => self.visit(child)?,

			Node::Composite { left, operator, right } => {
				let left = self.visit(left)?;
				let right = self.visit(right)?;
				let TokenKind::Connective(connective) = operator.kind else {
					return Err(Error::UnknownConnective(*operator));
				};
				let value = connective.apply(left, right);
				self.record(operator, value);
				value
			}
		};

		self.annotations.push(value);
		Ok(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parse::parse;

	fn run(expression: &str, pairs: &[(char, u8)]) -> Evaluation {
		let tree = parse(expression).unwrap();
		let valuation = Valuation::from_pairs(pairs.iter().copied()).unwrap();
		evaluate(&tree, &valuation, expression.chars().count()).unwrap()
	}

	#[test]
	fn conjunction() {
		assert_eq!(run("p & q", &[('p', 1), ('q', 1)]).value, 1);
		assert_eq!(run("p & q", &[('p', 0), ('q', 1)]).value, 0);
	}

	#[test]
	fn entries_line_up_with_source() {
		let evaluation = run("~p & (q > p)", &[('p', 0), ('q', 1)]);
		assert_eq!(render_entries(&evaluation.entries), "10 0  1 0 0 ");
		assert_eq!(evaluation.value, 0);
	}

	#[test]
	fn negated_composite_records_at_negation() {
		let evaluation = run("~(p | q)", &[('p', 0), ('q', 0)]);
		assert_eq!(render_entries(&evaluation.entries), "1 0 0 0 ");
		assert_eq!(evaluation.value, 1);
	}

	#[test]
	fn equivalence_is_xnor() {
		for (p, q, expected) in [(0, 0, 1), (0, 1, 0), (1, 0, 0), (1, 1, 1)] {
			assert_eq!(run("p = q", &[('p', p), ('q', q)]).value, expected);
		}
	}

	#[test]
	fn bare_unary_passes_value_through() {
		assert_eq!(run("(p) | q", &[('p', 1), ('q', 0)]).value, 1);
		assert_eq!(run("~(~p)", &[('p', 1)]).value, 1);
	}

	#[test]
	fn annotations_are_post_order() {
		let evaluation = run("p > ~q", &[('p', 1), ('q', 1)]);
		// p, ~q, the composite, the formula root
		assert_eq!(evaluation.annotations, [1, 0, 0, 0]);
	}

	#[test]
	fn repeated_evaluation_is_identical() {
		let first = run("(p = q) > ~p", &[('p', 1), ('q', 0)]);
		let second = run("(p = q) > ~p", &[('p', 1), ('q', 0)]);
		assert_eq!(first, second);
	}

	#[test]
	fn missing_letter() {
		let tree = parse("p | q").unwrap();
		let valuation = Valuation::from_pairs([('p', 1)]).unwrap();
		assert!(matches!(evaluate(&tree, &valuation, 5), Err(Error::MissingValuation('q'))));
	}

	#[test]
	fn unknown_connective() {
		let tree = Node::composite(
			Node::proposition(None, Token::letter('p', 0)),
			Token::negation(2),
			Node::proposition(None, Token::letter('q', 4)),
		);
		let valuation = Valuation::from_pairs([('p', 1), ('q', 1)]).unwrap();
		assert!(matches!(
			evaluate(&tree, &valuation, 5),
			Err(Error::UnknownConnective(token)) if token.position == 2
		));
	}

	#[test]
	fn shared_tree_across_threads() {
		let tree = parse("~(p & q) = (~p | ~q)").unwrap();
		std::thread::scope(|scope| {
			for index in 0..4 {
				let tree = &tree;
				scope.spawn(move || {
					let valuation = Valuation::nth(&['p', 'q'], index);
					for _ in 0..100 {
						assert_eq!(evaluate(tree, &valuation, 20).unwrap().value, 1);
					}
				});
			}
		});
	}
}
