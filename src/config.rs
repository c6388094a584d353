use clap::ArgMatches;

use proplogic::{Result, Transformer, Valuation};

#[derive(Debug, Clone, Copy)]
pub struct NormalForm {
	pub fixed_point: bool,
	pub transformer: Transformer,
}

#[derive(Debug, Clone)]
pub struct Config {
	pub expression: String,
	pub valuation: Option<Valuation>,
	pub truth_table: bool,
	pub normal_form: Option<NormalForm>,
}

impl Config {
	pub fn from_args(args: &ArgMatches) -> Result<Self> {
		let expression = args.get_one::<String>("expr").cloned().unwrap_or_default();

		let valuation = match args.get_many::<(char, u8)>("valuation") {
			Some(pairs) => Some(Valuation::from_pairs(pairs.copied())?),
			None => None,
		};

		let normal_form = args.get_flag("normal_form").then(|| NormalForm {
			fixed_point: !args.get_flag("single_pass"),
			transformer: Transformer::new()
				.eliminating_implications(args.get_flag("eliminate_implications")),
		});

		Ok(Self {
			expression,
			valuation,
			truth_table: args.get_flag("truth_table"),
			normal_form,
		})
	}
}
