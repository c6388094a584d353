use std::fmt::{self, Write as _};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Connective {
	Conjunction,
	Disjunction,
	Implication,
	Equivalence,
}

impl Connective {
	/// Applies the connective to two values over {0, 1}.
	#[must_use]
	pub fn apply(self, a: u8, b: u8) -> u8 {
		match self {
			Self::Conjunction => a & b,
			Self::Disjunction => a | b,
			Self::Implication => crate::complement(a) | b,
			Self::Equivalence => (a & b) | (crate::complement(a) & crate::complement(b)),
		}
	}

	#[must_use]
	pub fn symbol(self) -> char {
		match self {
			Self::Conjunction => '&',
			Self::Disjunction => '|',
			Self::Implication => '>',
			Self::Equivalence => '=',
		}
	}

	/// The connective De Morgan's law swaps this one for, if any.
	#[must_use]
	pub fn dual(self) -> Option<Self> {
		match self {
			Self::Conjunction => Some(Self::Disjunction),
			Self::Disjunction => Some(Self::Conjunction),
			Self::Implication | Self::Equivalence => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	Letter(char),
	Negation,
	Connective(Connective),
}

/// A leaf of the parse tree. Positions are char offsets into the source
/// expression and take no part in equality, so structurally identical trees
/// compare equal wherever their tokens sit.
#[derive(Debug, Clone, Copy, derivative::Derivative)]
#[derivative(PartialEq, Eq, Hash)]
pub struct Token {
	pub kind: TokenKind,
	#[derivative(PartialEq = "ignore", Hash = "ignore")]
	pub position: usize,
}

impl Token {
	#[must_use]
	pub fn letter(letter: char, position: usize) -> Self {
		Self { kind: TokenKind::Letter(letter), position }
	}

	#[must_use]
	pub fn negation(position: usize) -> Self {
		Self { kind: TokenKind::Negation, position }
	}

	#[must_use]
	pub fn connective(connective: Connective, position: usize) -> Self {
		Self { kind: TokenKind::Connective(connective), position }
	}

	#[must_use]
	pub fn text(&self) -> char {
		match self.kind {
			TokenKind::Letter(letter) => letter,
			TokenKind::Negation => '~',
			TokenKind::Connective(connective) => connective.symbol(),
		}
	}

	#[must_use]
	pub fn is_negation(&self) -> bool {
		self.kind == TokenKind::Negation
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "`{}` at {}", self.text(), self.position)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Proposition,
	Unary,
	Composite,
	Formula,
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Proposition => "proposition",
			Self::Unary => "unary",
			Self::Composite => "composite",
			Self::Formula => "formula",
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unary {
	/// `~X`
	Negated { negation: Token, operand: Box<Node> },
	/// A parenthesised proposition, carried through unchanged.
	Bare(Box<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
	Proposition {
		negation: Option<Token>,
		letter: Token,
	},
	Unary(Unary),
	Composite {
		left: Box<Node>,
		operator: Token,
		right: Box<Node>,
	},
	/// Root wrapper, transparent to evaluation.
	Formula(Box<Node>),
}

impl Node {
	#[must_use]
	pub fn proposition(negation: Option<Token>, letter: Token) -> Self {
		Self::Proposition { negation, letter }
	}

	#[must_use]
	pub fn negated(negation: Token, operand: Self) -> Self {
		Self::Unary(Unary::Negated { negation, operand: Box::new(operand) })
	}

	#[must_use]
	pub fn bare(proposition: Self) -> Self {
		Self::Unary(Unary::Bare(Box::new(proposition)))
	}

	#[must_use]
	pub fn composite(left: Self, operator: Token, right: Self) -> Self {
		Self::Composite { left: Box::new(left), operator, right: Box::new(right) }
	}

	#[must_use]
	pub fn formula(child: Self) -> Self {
		Self::Formula(Box::new(child))
	}

	#[must_use]
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Proposition { .. } => NodeKind::Proposition,
			Self::Unary(_) => NodeKind::Unary,
			Self::Composite { .. } => NodeKind::Composite,
			Self::Formula(_) => NodeKind::Formula,
		}
	}

	/// All tokens of the tree in source order.
	#[must_use]
	pub fn tokens(&self) -> Vec<&Token> {
		fn go<'a>(node: &'a Node, tokens: &mut Vec<&'a Token>) {
			match node {
				Node::Proposition { negation, letter } => {
					tokens.extend(negation);
					tokens.push(letter);
				}
				Node::Unary(Unary::Negated { negation, operand }) => {
					tokens.push(negation);
					go(operand, tokens);
				}
				Node::Unary(Unary::Bare(child)) | Node::Formula(child) => go(child, tokens),
				Node::Composite { left, operator, right } => {
					go(left, tokens);
					tokens.push(operator);
					go(right, tokens);
				}
			}
		}
		let mut tokens = Vec::new();
		go(self, &mut tokens);
		tokens
	}

	/// Position of the leftmost token.
	#[must_use]
	pub fn leading_position(&self) -> usize {
		self.tokens().first().map_or(0, |token| token.position)
	}

	/// One past the rightmost token position.
	#[must_use]
	pub fn width(&self) -> usize {
		self.tokens()
			.iter()
			.map(|token| token.position + 1)
			.max()
			.unwrap_or(0)
	}

	/// Places each token's text back at its source column. Tokens inserted by a
	/// rewrite share a column with their neighbour, so later text is pushed right
	/// to make room.
	#[must_use]
	pub fn projection(&self) -> String {
		let mut columns: Vec<char> = Vec::new();
		let mut shift = 0;
		for token in self.tokens() {
			let column = (token.position + shift).max(columns.len());
			shift = column - token.position;
			columns.resize(column, ' ');
			columns.push(token.text());
		}
		columns.into_iter().collect()
	}

	/// Indented rendering with one node or token per line.
	#[must_use]
	pub fn pretty(&self) -> String {
		fn go(node: &Node, depth: usize, out: &mut String) {
			let _ = writeln!(out, "{:indent$}{}", "", node.kind(), indent = depth * 2);
			let leaf = |token: &Token, out: &mut String| {
				let _ = writeln!(out, "{:indent$}{}", "", token.text(), indent = (depth + 1) * 2);
			};
			match node {
				Node::Proposition { negation, letter } => {
					if let Some(negation) = negation {
						leaf(negation, out);
					}
					leaf(letter, out);
				}
				Node::Unary(Unary::Negated { negation, operand }) => {
					leaf(negation, out);
					go(operand, depth + 1, out);
				}
				Node::Unary(Unary::Bare(child)) | Node::Formula(child) => go(child, depth + 1, out),
				Node::Composite { left, operator, right } => {
					go(left, depth + 1, out);
					leaf(operator, out);
					go(right, depth + 1, out);
				}
			}
		}
		let mut out = String::new();
		go(self, 0, &mut out);
		out
	}
}

fn needs_parentheses(node: &Node) -> bool {
	match node {
		Node::Composite { .. } => true,
		Node::Formula(child) => needs_parentheses(child),
		Node::Proposition { .. } | Node::Unary(_) => false,
	}
}

fn write_operand(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
	if needs_parentheses(node) {
		write!(f, "({node})")
	} else {
		write!(f, "{node}")
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Proposition { negation, letter } => {
				if let Some(negation) = negation {
					f.write_char(negation.text())?;
				}
				f.write_char(letter.text())
			}
			Self::Unary(Unary::Negated { negation, operand }) => {
				f.write_char(negation.text())?;
				write_operand(f, operand)
			}
			Self::Unary(Unary::Bare(child)) => write!(f, "({child})"),
			Self::Composite { left, operator, right } => {
				write_operand(f, left)?;
				write!(f, " {} ", operator.text())?;
				write_operand(f, right)
			}
			Self::Formula(child) => write!(f, "{child}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn p_and_not_q() -> Node {
		Node::formula(Node::composite(
			Node::proposition(None, Token::letter('p', 0)),
			Token::connective(Connective::Conjunction, 2),
			Node::proposition(Some(Token::negation(4)), Token::letter('q', 5)),
		))
	}

	#[test]
	fn connectives() {
		let table = |c: Connective| {
			[(0, 0), (0, 1), (1, 0), (1, 1)].map(|(a, b)| c.apply(a, b))
		};
		assert_eq!(table(Connective::Conjunction), [0, 0, 0, 1]);
		assert_eq!(table(Connective::Disjunction), [0, 1, 1, 1]);
		assert_eq!(table(Connective::Implication), [1, 1, 0, 1]);
		assert_eq!(table(Connective::Equivalence), [1, 0, 0, 1]);
	}

	#[test]
	fn equality_ignores_positions() {
		assert_eq!(Token::letter('p', 0), Token::letter('p', 7));
		assert_ne!(Token::letter('p', 0), Token::letter('q', 0));
	}

	#[test]
	fn tokens_in_source_order() {
		let positions: Vec<_> = p_and_not_q().tokens().iter().map(|t| t.position).collect();
		assert_eq!(positions, [0, 2, 4, 5]);
		assert_eq!(p_and_not_q().width(), 6);
	}

	#[test]
	fn renderings() {
		let tree = p_and_not_q();
		assert_eq!(tree.to_string(), "p & ~q");
		assert_eq!(tree.projection(), "p & ~q");
		assert_eq!(
			tree.pretty(),
			"formula\n  composite\n    proposition\n      p\n    &\n    proposition\n      ~\n      q\n"
		);
	}

	#[test]
	fn projection_makes_room_for_inserted_tokens() {
		let tree = Node::composite(
			Node::proposition(Some(Token::negation(2)), Token::letter('p', 2)),
			Token::connective(Connective::Disjunction, 4),
			Node::proposition(Some(Token::negation(6)), Token::letter('q', 6)),
		);
		assert_eq!(tree.projection(), "  ~p | ~q");
	}
}
