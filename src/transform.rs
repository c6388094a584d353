use crate::error::{Error, Result};
use crate::log::targets::TRANSFORMATION as LOG_TRANSFORMATION;
use crate::tree::{Connective, Node, Token, TokenKind, Unary};

pub const DE_MORGAN: &str = "De Morgan's law";
pub const IMPLICATION_ELIMINATION: &str = "implication elimination";

fn inapplicable(rule: &'static str, reason: String) -> Error {
	Error::InapplicableRule { rule, reason }
}

fn connective(token: &Token) -> Option<Connective> {
	match token.kind {
		TokenKind::Connective(connective) => Some(connective),
		TokenKind::Letter(_) | TokenKind::Negation => None,
	}
}

/// The negation of `node`, cancelling a negation already in place.
/// A new `~` takes the position of the node's leftmost token.
fn negate(node: Node) -> Node {
	match node {
		Node::Proposition { negation: Some(_), letter } => Node::proposition(None, letter),
		Node::Proposition { negation: None, letter } => {
			Node::proposition(Some(Token::negation(letter.position)), letter)
		}
		Node::Unary(Unary::Negated { operand, .. }) => *operand,
		Node::Unary(Unary::Bare(child)) => negate(*child),
		other @ (Node::Composite { .. } | Node::Formula(_)) => {
			let position = other.leading_position();
			Node::negated(Token::negation(position), other)
		}
	}
}

/// Rewrites `~(A & B)` as `~A | ~B` and `~(A | B)` as `~A & ~B`.
pub fn de_morgan(node: Node) -> Result<Node> {
	let operand = match node {
		Node::Unary(Unary::Negated { operand, .. }) => *operand,
		other => {
			return Err(inapplicable(
				DE_MORGAN,
				format!("`{other}` is a {} without a leading negation", other.kind()),
			))
		}
	};

	match operand {
		Node::Composite { left, operator, right } => {
			let dual = connective(&operator).and_then(Connective::dual).ok_or_else(|| {
				inapplicable(
					DE_MORGAN,
					format!("{operator} is neither a conjunction nor a disjunction"),
				)
			})?;
			Ok(Node::composite(
				negate(*left),
				Token::connective(dual, operator.position),
				negate(*right),
			))
		}
		other => Err(inapplicable(
			DE_MORGAN,
			format!("the negated `{other}` is a {}, not a composite", other.kind()),
		)),
	}
}

/// Rewrites `A > B` as `~A | B`.
pub fn eliminate_implication(node: Node) -> Result<Node> {
	match node {
		Node::Composite { left, operator, right }
			if connective(&operator) == Some(Connective::Implication) =>
		{
			Ok(Node::composite(
				negate(*left),
				Token::connective(Connective::Disjunction, operator.position),
				*right,
			))
		}
		other => Err(inapplicable(
			IMPLICATION_ELIMINATION,
			format!("`{other}` is not an implication"),
		)),
	}
}

fn admits_de_morgan(node: &Node) -> bool {
	match node {
		Node::Unary(Unary::Negated { operand, .. }) => match operand.as_ref() {
			Node::Composite { operator, .. } => connective(operator).and_then(Connective::dual).is_some(),
			_ => false,
		},
		_ => false,
	}
}

/// Pushes negations inward, one layer per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transformer {
	pub eliminate_implications: bool,
}

impl Transformer {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn eliminating_implications(mut self, eliminate: bool) -> Self {
		self.eliminate_implications = eliminate;
		self
	}

	/// A single bottom-up pass. Operands a rewrite wraps in a fresh negation are
	/// not revisited until the next pass.
	pub fn transform(&self, tree: &Node) -> Result<Node> {
		match tree {
			Node::Proposition { .. } => Ok(tree.clone()),

			Node::Unary(Unary::Negated { negation, operand }) => {
				let rebuilt = Node::negated(*negation, self.transform(operand)?);
				if admits_de_morgan(&rebuilt) {
					de_morgan(rebuilt)
				} else {
					Ok(rebuilt)
				}
			}

			Node::Unary(Unary::Bare(child)) => Ok(Node::bare(self.transform(child)?)),

			Node::Composite { left, operator, right } => {
				let rebuilt = Node::composite(self.transform(left)?, *operator, self.transform(right)?);
				if self.eliminate_implications && connective(operator) == Some(Connective::Implication) {
					eliminate_implication(rebuilt)
				} else {
					Ok(rebuilt)
				}
			}

			Node::Formula(child) => Ok(Node::formula(self.transform(child)?)),
		}
	}

	/// Repeats [`Transformer::transform`] until a pass leaves the tree unchanged.
	pub fn normalize(&self, tree: &Node) -> Result<Node> {
		let mut current = tree.clone();
		let mut passes = 1;
		loop {
			let next = self.transform(&current)?;
			if next == current {
				log::debug!(target: LOG_TRANSFORMATION, "Fixed point `{next}` after {passes} passes.");
				return Ok(next);
			}
			log::debug!(target: LOG_TRANSFORMATION, "Pass {passes}: `{next}`.");
			current = next;
			passes += 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::evaluate::evaluate;
	use crate::parse::parse;
	use crate::valuation::Valuation;

	fn value(tree: &Node, p: u8, q: u8) -> u8 {
		let valuation = Valuation::from_pairs([('p', p), ('q', q)]).unwrap();
		evaluate(tree, &valuation, tree.width()).unwrap().value
	}

	#[test]
	fn negated_conjunction() {
		let tree = parse("~(p & q)").unwrap();
		let transformed = Transformer::new().transform(&tree).unwrap();
		assert_eq!(transformed.to_string(), "~p | ~q");
		assert_eq!(value(&transformed, 0, 0), 1);
		assert_eq!(value(&transformed, 1, 1), 0);
		assert_eq!(transformed.projection(), "  ~p | ~q");
	}

	#[test]
	fn negated_disjunction_cancels_existing_negation() {
		let tree = parse("~(~p | q)").unwrap();
		let transformed = Transformer::new().transform(&tree).unwrap();
		assert_eq!(transformed.to_string(), "p & ~q");
	}

	#[test]
	fn untouched_shapes_pass_through() {
		let transformer = Transformer::new();
		for expression in ["(p) & q", "~(p > q)", "~(~p = q)", "~~p", "p | ~q"] {
			let tree = parse(expression).unwrap();
			assert_eq!(transformer.transform(&tree).unwrap(), tree, "{expression}");
		}
	}

	#[test]
	fn nested_negations_need_more_passes() {
		let tree = parse("~(~(p & q) | r)").unwrap();
		let transformer = Transformer::new();

		let once = transformer.transform(&tree).unwrap();
		assert_eq!(once.to_string(), "~(~p | ~q) & ~r");

		let normal = transformer.normalize(&tree).unwrap();
		assert_eq!(normal.to_string(), "(p & q) & ~r");
		assert_eq!(transformer.transform(&normal).unwrap(), normal);
	}

	#[test]
	fn implications() {
		let tree = parse("~(~p > ~q)").unwrap();
		let plain = Transformer::new().normalize(&tree).unwrap();
		assert_eq!(plain, tree);

		let eliminating = Transformer::new().eliminating_implications(true);
		assert_eq!(eliminating.normalize(&tree).unwrap().to_string(), "~p & q");
		for (p, q) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
			assert_eq!(value(&tree, p, q), value(&eliminating.normalize(&tree).unwrap(), p, q));
		}
	}

	#[test]
	fn inapplicable_rules() {
		let proposition = parse("p").unwrap();
		assert!(matches!(
			de_morgan(proposition.clone()),
			Err(Error::InapplicableRule { rule: DE_MORGAN, .. })
		));

		let Node::Formula(negated_letter) = parse("~(p)").unwrap() else { panic!("missing root") };
		assert!(matches!(
			de_morgan(*negated_letter),
			Err(Error::InapplicableRule { rule: DE_MORGAN, .. })
		));

		let Node::Formula(negated_implication) = parse("~(p > q)").unwrap() else { panic!("missing root") };
		assert!(matches!(
			de_morgan(*negated_implication),
			Err(Error::InapplicableRule { rule: DE_MORGAN, .. })
		));

		assert!(matches!(
			eliminate_implication(proposition),
			Err(Error::InapplicableRule { rule: IMPLICATION_ELIMINATION, .. })
		));
	}
}
