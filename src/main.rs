//! # relay-headers
//!
//! Rewrites the standard header comment of every source file in a package.

use std::process::ExitCode;

use anyhow::Result;
use relay_headers::cli::{Cli, run_update};

fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();
  run_update(cli.update_args)
}
