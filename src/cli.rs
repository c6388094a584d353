use clap::{Arg, ArgAction, Command};

use proplogic::valuation::parse_assignment;

pub fn cli() -> Command {
	Command::new("proplogic")
		.about("Evaluates, tabulates and rewrites propositional formulas")
		.version(env!("CARGO_PKG_VERSION"))

		.arg(Arg::new("expr")
			.required(true)
			.num_args(1)
			.help("The formula, e.g. '~(p & q) = (~p | ~q)'.")
			.long_help("The formula to work with.
Propositions are single letters, combined with '~' (not), '&' (and), '|' (or), '>' (implies) and '=' (equivalent).
Binary connectives do not chain, so 'p & q & r' must be written '(p & q) & r'."))

		.arg(Arg::new("valuation")
			.short('e')
			.long("eval")
			.value_parser(parse_assignment)
			.num_args(1..)
			.help("Evaluate the expression for the given valuation, e.g. '-e p=1 q=0'."))

		.arg(Arg::new("truth_table")
			.short('t')
			.long("tt")
			.action(ArgAction::SetTrue)
			.help("Output a truth table for the expression."))

		.arg(Arg::new("normal_form")
			.short('d')
			.long("dnf")
			.action(ArgAction::SetTrue)
			.help("Push negations inward with De Morgan's law and output the result."))

		.arg(Arg::new("single_pass")
			.long("single-pass")
			.action(ArgAction::SetTrue)
			.requires("normal_form")
			.help("Rewrite once rather than until nothing changes."))

		.arg(Arg::new("eliminate_implications")
			.long("eliminate-implications")
			.action(ArgAction::SetTrue)
			.requires("normal_form")
			.help("Also rewrite 'p > q' as '~p | q'."))
}
