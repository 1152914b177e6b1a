// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for a rerun session.

use camino::Utf8PathBuf;
use std::num::NonZeroUsize;

/// Default number of executor invocations, the baseline run included.
pub const DEFAULT_MAX_ATTEMPTS: NonZeroUsize = NonZeroUsize::new(3).unwrap();

/// Configuration for a rerun session.
///
/// Built once at the CLI boundary and handed to
/// [`RerunRunner`](crate::runner::RerunRunner) by value. The loop never
/// mutates it; the only state that evolves across attempts (the attempt
/// counter and the current filter) is owned by the loop itself.
#[derive(Clone, Debug)]
pub struct RerunConfig {
    /// Path to the compiled test assembly to run.
    pub target: Utf8PathBuf,

    /// Filter expression for the baseline run.
    ///
    /// Only the first invocation uses this; reruns replace it with the
    /// failure filter derived from the previous run's results.
    pub filter: String,

    /// Path to the run settings file passed through to the executor.
    pub settings: Utf8PathBuf,

    /// Result logger passed through to the executor. `trx` produces the
    /// result files this tool knows how to read.
    pub logger: String,

    /// Directory the executor writes result files into.
    pub results_dir: Utf8PathBuf,

    /// Maximum number of executor invocations, the baseline run included.
    pub max_attempts: NonZeroUsize,
}
