#![deny(
	absolute_paths_not_starting_with_crate,
	future_incompatible,
	keyword_idents,
	macro_use_extern_crate,
	meta_variable_misuse,
	missing_abi,
	missing_copy_implementations,
	non_ascii_idents,
	nonstandard_style,
	noop_method_call,
	rust_2018_idioms,
	unused_qualifications
)]
#![warn(clippy::pedantic)]
#![allow(clippy::let_underscore_drop, clippy::missing_errors_doc)]
#![forbid(unsafe_code)]

//! Propositional formulas over single-letter propositions: parsing, evaluation
//! under valuations, truth tables with classification, and De Morgan rewriting
//! toward a normal form.

pub mod error;
pub mod evaluate;
pub mod log;
pub mod parse;
pub mod table;
pub mod transform;
pub mod tree;
pub mod valuation;

pub use error::{Error, Result};
pub use evaluate::{evaluate, Evaluation};
pub use parse::parse;
pub use table::{Classification, Row, TruthTable};
pub use transform::Transformer;
pub use tree::{Connective, Node, NodeKind, Token, TokenKind, Unary};
pub use valuation::{complement, Key, Valuation};
