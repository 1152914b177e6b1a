// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::ExpectedError,
    exit_codes::RerunExitCode,
    output::{OutputContext, OutputOpts},
};
use camino::Utf8PathBuf;
use clap::Parser;
use rerun_runner::{
    config::{DEFAULT_MAX_ATTEMPTS, RerunConfig},
    dotnet_cli::DotnetCli,
    runner::{RerunOutcome, RerunRunner},
};
use std::num::NonZeroUsize;
use tracing::debug;

/// Automatically rerun failed tests from a VSTest-style test run.
///
/// Runs the given test assembly once, reads the TRX result file the run
/// produces, and reruns just the failed tests until they pass or the attempt
/// budget runs out.
#[derive(Debug, Parser)]
#[command(version, bin_name = "trx-rerun")]
pub struct TrxRerunApp {
    /// Path to a test project .dll file.
    #[arg(value_name = "PATH")]
    target: Utf8PathBuf,

    /// Run tests that match the given expression.
    #[arg(long, value_name = "EXPRESSION")]
    filter: String,

    /// The run settings file to use when running tests.
    #[arg(long, short = 's', value_name = "PATH")]
    settings: Utf8PathBuf,

    /// Specifies a logger for test results.
    #[arg(long, short = 'l', default_value = "trx", value_name = "LOGGER")]
    logger: String,

    /// The directory where the test results will be placed.
    #[arg(long, short = 'r', default_value = ".", value_name = "PATH")]
    results_directory: Utf8PathBuf,

    /// Maximum number of attempts, the initial run included.
    #[arg(
        long = "rerunMaxAttempts",
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_name = "N"
    )]
    rerun_max_attempts: NonZeroUsize,

    #[command(flatten)]
    output: OutputOpts,
}

impl TrxRerunApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code.
    pub fn exec(self) -> Result<i32, ExpectedError> {
        let config = RerunConfig {
            target: self.target,
            filter: self.filter,
            settings: self.settings,
            logger: self.logger,
            results_dir: self.results_directory,
            max_attempts: self.rerun_max_attempts,
        };
        debug!("rerun configuration: {config:?}");

        let runner = RerunRunner::new(config, DotnetCli::default());
        match runner.execute()? {
            RerunOutcome::AllPassed { .. } => Ok(RerunExitCode::OK),
            RerunOutcome::TestsOutstanding { .. } => Ok(RerunExitCode::RERUN_TESTS_OUTSTANDING),
        }
    }
}
