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

use std::process::ExitCode;

use proplogic::{Result, TruthTable};

mod cli;
mod config;

use config::Config;

fn main() -> ExitCode {
	env_logger::init();

	let matches = cli::cli().get_matches();

	match Config::from_args(&matches).and_then(|config| run(&config)) {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			log::error!("{error}");
			eprintln!("error: {error}");
			ExitCode::FAILURE
		}
	}
}

fn run(config: &Config) -> Result<()> {
	let mut table = TruthTable::new(config.expression.as_str());
	// parse early so we fail fast
	table.parse_tree()?;

	if let Some(valuation) = &config.valuation {
		let value = table.evaluate(valuation)?;
		println!("F({valuation}) = {value}");
	}

	if config.truth_table {
		println!("{}", table.render()?);
		println!("This formula is a {}", table.construct()?);
	}

	if let Some(normal_form) = config.normal_form {
		let tree = table.parse_tree()?.clone();
		let transformed = if normal_form.fixed_point {
			normal_form.transformer.normalize(&tree)?
		} else {
			normal_form.transformer.transform(&tree)?
		};
		print!("{}", tree.pretty());
		print!("{}", transformed.pretty());
		println!("{transformed}");
		println!("{}", transformed.projection());
		println!("{}", tree.projection());
	}

	Ok(())
}
