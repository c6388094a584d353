use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;

use crate::error::Result;
use crate::evaluate::{evaluate, render_entries};
use crate::log::targets::TRUTH_TABLE as LOG_TRUTH_TABLE;
use crate::parse::parse;
use crate::tree::Node;
use crate::valuation::{Key, Valuation};

const CONNECTIVE_SYMBOLS: [char; 5] = ['&', '|', '>', '=', '~'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
	pub value: u8,
	pub entries: Vec<Option<u8>>,
}

impl fmt::Display for Row {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&render_entries(&self.entries))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
	pub tautology: bool,
	pub contradiction: bool,
}

impl Classification {
	fn of(values: impl Iterator<Item = u8>) -> Self {
		let mut classification = Self { tautology: true, contradiction: true };
		for value in values {
			classification.tautology &= value == 1;
			classification.contradiction &= value == 0;
		}
		classification
	}

	#[must_use]
	pub fn contingency(self) -> bool {
		!self.tautology && !self.contradiction
	}
}

impl fmt::Display for Classification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(if self.tautology {
			"tautology"
		} else if self.contradiction {
			"contradiction"
		} else {
			"contingency"
		})
	}
}

#[derive(Debug, Clone)]
struct Scan {
	propositions: BTreeSet<char>,
	subformulas: usize,
}

impl Scan {
	fn of(expression: &str) -> Self {
		let mut propositions = BTreeSet::new();
		let mut subformulas = 0;
		for c in expression.chars() {
			if c.is_alphabetic() {
				propositions.insert(c);
				subformulas += 1;
			}
			if CONNECTIVE_SYMBOLS.contains(&c) {
				subformulas += 1;
			}
		}
		Self { propositions, subformulas }
	}

	fn rows(&self) -> usize {
		u32::try_from(self.propositions.len())
			.ok()
			.and_then(|count| 1usize.checked_shl(count))
			.unwrap_or(usize::MAX)
	}
}

/// The truth table of a single expression, filled one valuation at a time.
///
/// Parsing, the dimensions and the classification are each computed on first
/// use and kept for the life of the table.
#[derive(Debug, Clone)]
pub struct TruthTable {
	expression: String,
	tree: Option<Node>,
	scan: Option<Scan>,
	rows: IndexMap<Key, Row>,
	classification: Option<Classification>,
}

impl TruthTable {
	pub fn new(expression: impl Into<String>) -> Self {
		Self {
			expression: expression.into(),
			tree: None,
			scan: None,
			rows: IndexMap::new(),
			classification: None,
		}
	}

	#[must_use]
	pub fn expression(&self) -> &str {
		&self.expression
	}

	pub fn parse_tree(&mut self) -> Result<&Node> {
		let tree = match self.tree.take() {
			Some(tree) => tree,
			None => parse(&self.expression)?,
		};
		Ok(self.tree.insert(tree))
	}

	fn scan(&mut self) -> &Scan {
		let expression = &self.expression;
		self.scan.get_or_insert_with(|| Scan::of(expression))
	}

	/// Rows by columns: one row per valuation of the propositions, one column
	/// per letter, connective or negation in the text.
	pub fn dimensions(&mut self) -> (usize, usize) {
		let scan = self.scan();
		(scan.rows(), scan.subformulas)
	}

	pub fn propositions(&mut self) -> &BTreeSet<char> {
		&self.scan().propositions
	}

	pub fn subformula_count(&mut self) -> usize {
		self.scan().subformulas
	}

	pub fn is_complete(&mut self) -> bool {
		self.rows.len() == self.scan().rows()
	}

	/// Evaluates the expression under `valuation` and stores the row.
	pub fn evaluate(&mut self, valuation: &Valuation) -> Result<u8> {
		let key = {
			let propositions = self.propositions();
			valuation.restrict(propositions)?.key()
		};
		let width = self.expression.chars().count();
		let evaluation = evaluate(self.parse_tree()?, valuation, width)?;

		self.rows.insert(
			key,
			Row {
				value: evaluation.value,
				entries: evaluation.entries,
			},
		);
		Ok(evaluation.value)
	}

	/// The stored value for `valuation`, if that row has been evaluated.
	pub fn get(&mut self, valuation: &Valuation) -> Result<Option<u8>> {
		let key = valuation.restrict(self.propositions())?.key();
		Ok(self.rows.get(&key).map(|row| row.value))
	}

	/// Fills every row not yet evaluated and classifies the expression.
	pub fn construct(&mut self) -> Result<Classification> {
		if let Some(classification) = self.classification {
			return Ok(classification);
		}

		if !self.is_complete() {
			let letters: Vec<char> = self.propositions().iter().copied().collect();
			let (rows, _) = self.dimensions();
			log::debug!(target: LOG_TRUTH_TABLE, "Constructing {rows} rows for `{}`.", self.expression);
			for index in 0..rows {
				self.evaluate(&Valuation::nth(&letters, index))?;
			}
		}
		self.rows.sort_keys();

		let classification = Classification::of(self.rows.values().map(|row| row.value));
		log::debug!(target: LOG_TRUTH_TABLE, "`{}` is a {classification}.", self.expression);
		self.classification = Some(classification);
		Ok(classification)
	}

	pub fn is_tautology(&mut self) -> Result<bool> {
		Ok(self.construct()?.tautology)
	}

	pub fn is_contradiction(&mut self) -> Result<bool> {
		Ok(self.construct()?.contradiction)
	}

	pub fn is_contingency(&mut self) -> Result<bool> {
		Ok(self.construct()?.contingency())
	}

	pub fn rows(&self) -> impl Iterator<Item = (&Key, &Row)> {
		self.rows.iter()
	}

	/// The expression followed by one line per row, each aligned to the
	/// expression's columns.
	pub fn render(&mut self) -> Result<String> {
		self.construct()?;
		let mut lines = vec![self.expression.clone()];
		lines.extend(self.rows.values().map(Row::to_string));
		Ok(lines.join("\n"))
	}
}
