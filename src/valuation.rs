use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Error, Result};

/// Logical complement over {0, 1}.
#[must_use]
pub fn complement(value: u8) -> u8 {
	1 - value
}

/// An assignment of 0 or 1 to proposition letters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Valuation(BTreeMap<char, u8>);

/// A valuation's values ordered by ascending letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Vec<u8>);

impl Key {
	#[must_use]
	pub fn values(&self) -> &[u8] {
		&self.0
	}
}

impl Valuation {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_pairs(pairs: impl IntoIterator<Item = (char, u8)>) -> Result<Self> {
		let mut valuation = Self::new();
		for (letter, value) in pairs {
			valuation.insert(letter, value)?;
		}
		Ok(valuation)
	}

	/// Assigns `value` to `letter`, returning the value it replaces.
	pub fn insert(&mut self, letter: char, value: u8) -> Result<Option<u8>> {
		if value > 1 {
			return Err(Error::InvalidValuationValue { letter, value: value.to_string() });
		}
		Ok(self.0.insert(letter, value))
	}

	pub fn get(&self, letter: char) -> Result<u8> {
		self.0.get(&letter).copied().ok_or(Error::MissingValuation(letter))
	}

	pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
		self.0.keys().copied()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn key(&self) -> Key {
		Key(self.0.values().copied().collect())
	}

	/// The valuation limited to `letters`. Fails if any of them is unassigned.
	pub fn restrict(&self, letters: &BTreeSet<char>) -> Result<Self> {
		letters
			.iter()
			.map(|&letter| Ok((letter, self.get(letter)?)))
			.collect::<Result<BTreeMap<_, _>>>()
			.map(Self)
	}

	/// The assignment numbered `index` when counting in binary over `letters`,
	/// the first letter being the most significant bit.
	#[must_use]
	pub fn nth(letters: &[char], index: usize) -> Self {
		let count = letters.len();
		Self(
			letters
				.iter()
				.enumerate()
				.map(|(idx, &letter)| {
					let offset = count - idx - 1;
					(letter, u8::from(index & (1 << offset) > 0))
				})
				.collect(),
		)
	}
}

/// Parses an assignment of the form `p=1`.
pub fn parse_assignment(text: &str) -> Result<(char, u8)> {
	let malformed = || Error::MalformedAssignment(text.to_owned());
	let (letter, value) = text.split_once('=').ok_or_else(malformed)?;
	let mut letters = letter.trim().chars();
	let letter = match (letters.next(), letters.next()) {
		(Some(letter), None) if letter.is_alphabetic() => letter,
		_ => return Err(malformed()),
	};
	match value.trim() {
		"0" => Ok((letter, 0)),
		"1" => Ok((letter, 1)),
		other => Err(Error::InvalidValuationValue { letter, value: other.to_owned() }),
	}
}

impl fmt::Display for Valuation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, (letter, value)) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{letter}={value}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn key_ignores_insertion_order() {
		let a = Valuation::from_pairs([('q', 0), ('p', 1), ('r', 1)]).unwrap();
		let b = Valuation::from_pairs([('r', 1), ('q', 0), ('p', 1)]).unwrap();
		assert_eq!(a.key(), b.key());
		assert_eq!(a.key().values(), [1, 0, 1]);
	}

	#[test]
	fn rejects_values_other_than_bits() {
		assert!(matches!(
			Valuation::from_pairs([('p', 2)]),
			Err(Error::InvalidValuationValue { letter: 'p', .. })
		));
	}

	#[test]
	fn missing_letter() {
		let valuation = Valuation::from_pairs([('p', 1)]).unwrap();
		assert!(matches!(valuation.get('q'), Err(Error::MissingValuation('q'))));
		let letters = BTreeSet::from(['p', 'q']);
		assert!(matches!(valuation.restrict(&letters), Err(Error::MissingValuation('q'))));
	}

	#[test]
	fn restrict_drops_extra_letters() {
		let valuation = Valuation::from_pairs([('p', 1), ('q', 0), ('z', 1)]).unwrap();
		let restricted = valuation.restrict(&BTreeSet::from(['p', 'q'])).unwrap();
		assert_eq!(restricted.key().values(), [1, 0]);
	}

	#[test]
	fn binary_counting() {
		let letters = ['p', 'q'];
		let keys: Vec<_> = (0..4).map(|i| Valuation::nth(&letters, i).key().values().to_vec()).collect();
		assert_eq!(keys, [[0, 0], [0, 1], [1, 0], [1, 1]]);
	}

	#[test]
	fn assignments() {
		assert_eq!(parse_assignment("p=1").unwrap(), ('p', 1));
		assert_eq!(parse_assignment(" q = 0 ").unwrap(), ('q', 0));
		assert!(matches!(
			parse_assignment("p=2"),
			Err(Error::InvalidValuationValue { letter: 'p', .. })
		));
		assert!(matches!(parse_assignment("p"), Err(Error::MalformedAssignment(_))));
		assert!(matches!(parse_assignment("pq=1"), Err(Error::MalformedAssignment(_))));
		assert!(matches!(parse_assignment("1=1"), Err(Error::MalformedAssignment(_))));
	}

	#[test]
	fn display() {
		let valuation = Valuation::from_pairs([('q', 0), ('p', 1)]).unwrap();
		assert_eq!(valuation.to_string(), "p=1, q=0");
	}
}
