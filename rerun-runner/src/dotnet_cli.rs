// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Invoking tests through the `dotnet` CLI.

use crate::{errors::TestExecError, runner::TestExecutor};
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use tracing::debug;

/// A `dotnet test` CLI invocation.
///
/// The real test executor behind [`TestExecutor`]: it shells out to `dotnet
/// test` with the target assembly and lets it stream its own output. The exit
/// status is deliberately ignored; failing tests make `dotnet test` exit
/// non-zero, and the rerun loop learns about them from the result files
/// instead.
#[derive(Clone, Debug)]
pub struct DotnetCli {
    program: Utf8PathBuf,
}

impl DotnetCli {
    /// Creates a CLI invocation for the given `dotnet` program.
    pub fn new(program: impl Into<Utf8PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn test_args<'a>(
        target: &'a Utf8Path,
        filter: &'a str,
        settings: &'a Utf8Path,
        logger: &'a str,
        results_dir: &'a Utf8Path,
    ) -> [&'a str; 10] {
        [
            "test",
            target.as_str(),
            "--filter",
            filter,
            "--settings",
            settings.as_str(),
            "--logger",
            logger,
            "--results-directory",
            results_dir.as_str(),
        ]
    }
}

impl Default for DotnetCli {
    fn default() -> Self {
        Self::new(dotnet_path())
    }
}

impl TestExecutor for DotnetCli {
    fn run(
        &self,
        target: &Utf8Path,
        filter: &str,
        settings: &Utf8Path,
        logger: &str,
        results_dir: &Utf8Path,
    ) -> Result<(), TestExecError> {
        let args = Self::test_args(target, filter, settings, logger, results_dir);
        // unchecked(): a non-zero exit means tests failed, which is not an
        // error at this boundary.
        let expression = duct::cmd(self.program.as_str(), args).unchecked();
        debug!("executing command: {expression:?}");
        expression.run().map(drop).map_err(|error| {
            TestExecError::new(
                std::iter::once(self.program.as_str()).chain(args),
                error,
            )
        })
    }
}

fn dotnet_path() -> Utf8PathBuf {
    match std::env::var_os("DOTNET") {
        Some(dotnet_path) => PathBuf::from(dotnet_path)
            .try_into()
            .expect("DOTNET env var is not valid UTF-8"),
        None => Utf8PathBuf::from("dotnet"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;

    fn run_cli(cli: &DotnetCli) -> Result<(), TestExecError> {
        cli.run(
            Utf8Path::new("FakeTests.dll"),
            "Category=Smoke",
            Utf8Path::new("ci.runsettings"),
            "trx",
            Utf8Path::new("."),
        )
    }

    #[test]
    fn fail_to_spawn_is_an_error() {
        let fake_dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        // No OS will allow executing a directory.
        let cli = DotnetCli::new(fake_dir.path());
        let error = run_cli(&cli).expect_err("executing a directory should fail");
        assert!(
            error.command().contains("FakeTests.dll"),
            "command should be recorded, got: {}",
            error.command()
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_not_an_error() {
        // `false` exits 1 regardless of arguments, like a test run with
        // failing tests does.
        let cli = DotnetCli::new("false");
        run_cli(&cli).expect("a non-zero exit should not be an error");
    }
}
