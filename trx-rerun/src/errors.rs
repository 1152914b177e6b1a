// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{exit_codes::RerunExitCode, output::StderrStyles};
use owo_colors::OwoColorize;
use rerun_runner::errors::{RerunError, ResultDirError, TestExecError, TrxParseError};
use std::error::Error;
use thiserror::Error;
use tracing::error;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print
// out errors is with the display_to_stderr method.

/// An error in something trx-rerun ran or read, not in trx-rerun itself.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("test executor invocation failed")]
    TestExecFailed {
        #[from]
        err: TestExecError,
    },
    #[error("results directory read failed")]
    ResultDirFailed {
        #[from]
        err: ResultDirError,
    },
    #[error("result file parse failed")]
    ResultParseFailed {
        #[from]
        err: TrxParseError,
    },
}

impl From<RerunError> for ExpectedError {
    fn from(err: RerunError) -> Self {
        match err {
            RerunError::TestExec(err) => err.into(),
            RerunError::ResultDir(err) => err.into(),
            RerunError::TrxParse(err) => err.into(),
        }
    }
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::TestExecFailed { .. } => RerunExitCode::SETUP_ERROR,
            Self::ResultDirFailed { .. } | Self::ResultParseFailed { .. } => {
                RerunExitCode::RESULT_READ_FAILED
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::TestExecFailed { err } => {
                error!("failed to execute `{}`", err.command().style(styles.bold));
                err.source()
            }
            Self::ResultDirFailed { err } => {
                error!(
                    "failed to read results directory `{}`",
                    err.dir().style(styles.bold)
                );
                err.source()
            }
            Self::ResultParseFailed { err } => {
                error!("{err}");
                err.source()
            }
        };

        while let Some(err) = next_error {
            error!(target: "trx_rerun::no_heading", "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
