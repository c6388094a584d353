pub mod targets {
	pub const PARSE: &str = "parse";
	pub const EVALUATION: &str = "evaluation";
	pub const TRUTH_TABLE: &str = "truth table";
	pub const TRANSFORMATION: &str = "transformation";
}
