// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The rerun loop.

use crate::{
    config::RerunConfig,
    errors::{RerunError, TestExecError},
    filter::failed_tests_filter,
    results::latest_result_file,
    trx::parse_trx,
};
use camino::Utf8Path;
use tracing::{debug, info, warn};

/// The narrow boundary through which the rerun loop drives the test executor.
///
/// The executor is a black box: it is invoked synchronously, its exit status
/// carries no information the loop consumes (failing tests make it exit
/// non-zero), and its only observable product is the result files it writes
/// into the results directory. Tests substitute an executor that drops
/// pre-canned result files.
pub trait TestExecutor {
    /// Runs the executor once against `target`, restricted to `filter`.
    fn run(
        &self,
        target: &Utf8Path,
        filter: &str,
        settings: &Utf8Path,
        logger: &str,
        results_dir: &Utf8Path,
    ) -> Result<(), TestExecError>;
}

/// How a rerun session ended.
///
/// Both variants are normal loop exits; infrastructure failures surface as
/// [`RerunError`] instead. `attempts` counts executor invocations, the
/// baseline run included.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RerunOutcome {
    /// The most recent run left no failed tests to rerun.
    ///
    /// This includes the executor producing no result file at all, which the
    /// loop cannot tell apart from "nothing to rerun".
    AllPassed {
        /// Executor invocations performed.
        attempts: usize,
    },

    /// The attempt budget ran out while tests were still failing.
    TestsOutstanding {
        /// Executor invocations performed.
        attempts: usize,
        /// The last computed failure filter, covering the still-failing
        /// tests.
        filter: String,
    },
}

/// Drives the test executor until all tests pass or attempts run out.
#[derive(Debug)]
pub struct RerunRunner<E> {
    config: RerunConfig,
    executor: E,
}

impl<E: TestExecutor> RerunRunner<E> {
    /// Creates a runner over `config`, driving `executor`.
    pub fn new(config: RerunConfig, executor: E) -> Self {
        Self { config, executor }
    }

    /// Runs the rerun session to completion.
    ///
    /// Performs one unconditional baseline run with the configured filter,
    /// then alternates between inspecting the latest result file and
    /// rerunning the failed tests it names, up to
    /// [`max_attempts`](RerunConfig::max_attempts) executor invocations in
    /// total. From the second invocation on, the configured filter is
    /// replaced by the derived failure filter.
    ///
    /// Each iteration evaluates the most recent result file before deciding
    /// to rerun, so the give-up outcome reflects the final run's results.
    pub fn execute(&self) -> Result<RerunOutcome, RerunError> {
        debug!("baseline run of {}", self.config.target);
        self.run_executor(&self.config.filter)?;

        let mut attempt = 1;
        loop {
            let Some(result_file) = latest_result_file(&self.config.results_dir)? else {
                info!(
                    "no result files in {}, rerun not needed",
                    self.config.results_dir
                );
                return Ok(RerunOutcome::AllPassed { attempts: attempt });
            };
            debug!("reading results from {result_file}");
            let results = parse_trx(&result_file)?;
            let filter = failed_tests_filter(&results);
            if filter.is_empty() {
                info!("rerun attempt {attempt} not needed, all tests passed");
                return Ok(RerunOutcome::AllPassed { attempts: attempt });
            }
            if attempt >= self.config.max_attempts.get() {
                warn!("tests still failing after {attempt} attempts, giving up");
                return Ok(RerunOutcome::TestsOutstanding {
                    attempts: attempt,
                    filter,
                });
            }
            info!("found failed tests, rerun filter: {filter}");
            self.run_executor(&filter)?;
            attempt += 1;
        }
    }

    fn run_executor(&self, filter: &str) -> Result<(), TestExecError> {
        self.executor.run(
            &self.config.target,
            filter,
            &self.config.settings,
            &self.config.logger,
            &self.config.results_dir,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::trx_document;
    use camino_tempfile::Utf8TempDir;
    use pretty_assertions::assert_eq;
    use std::{cell::RefCell, num::NonZeroUsize};

    const BASELINE_FILTER: &str = "Category=Smoke";

    /// Scripted stand-in for the external executor: each invocation records
    /// the filter it was given and drops the next canned TRX file into the
    /// results directory.
    struct ScriptedExecutor {
        result_files: Vec<Option<String>>,
        filters_seen: RefCell<Vec<String>>,
    }

    impl ScriptedExecutor {
        fn new(result_files: Vec<Option<String>>) -> Self {
            Self {
                result_files,
                filters_seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl TestExecutor for ScriptedExecutor {
        fn run(
            &self,
            _target: &Utf8Path,
            filter: &str,
            _settings: &Utf8Path,
            _logger: &str,
            results_dir: &Utf8Path,
        ) -> Result<(), TestExecError> {
            let mut filters_seen = self.filters_seen.borrow_mut();
            let invocation = filters_seen.len();
            filters_seen.push(filter.to_owned());
            if let Some(Some(contents)) = self.result_files.get(invocation) {
                let name = format!("FakeTests-{invocation:02}.trx");
                std::fs::write(results_dir.join(name), contents)
                    .expect("results dir should be writable");
            }
            Ok(())
        }
    }

    fn config(results_dir: &Utf8Path, max_attempts: usize) -> RerunConfig {
        RerunConfig {
            target: "FakeTests/bin/Debug/FakeTests.dll".into(),
            filter: BASELINE_FILTER.to_owned(),
            settings: "ci.runsettings".into(),
            logger: "trx".into(),
            results_dir: results_dir.to_owned(),
            max_attempts: NonZeroUsize::new(max_attempts).expect("max_attempts should be nonzero"),
        }
    }

    fn execute_scripted(
        results_dir: &Utf8Path,
        max_attempts: usize,
        result_files: Vec<Option<String>>,
    ) -> (Result<RerunOutcome, RerunError>, Vec<String>) {
        let runner = RerunRunner::new(
            config(results_dir, max_attempts),
            ScriptedExecutor::new(result_files),
        );
        let outcome = runner.execute();
        let filters_seen = runner.executor.filters_seen.borrow().clone();
        (outcome, filters_seen)
    }

    #[test]
    fn all_passed_on_first_run_invokes_executor_once() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        let (outcome, filters_seen) = execute_scripted(
            dir.path(),
            3,
            vec![Some(trx_document(&[
                ("Suite.Alpha", "Passed"),
                ("Suite.Beta", "Passed"),
            ]))],
        );

        assert_eq!(
            outcome.expect("loop should complete"),
            RerunOutcome::AllPassed { attempts: 1 }
        );
        assert_eq!(filters_seen, vec![BASELINE_FILTER.to_owned()]);
    }

    #[test]
    fn persistent_failures_exhaust_the_attempt_budget() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        let failing = || Some(trx_document(&[("Suite.Alpha", "Failed")]));
        let (outcome, filters_seen) =
            execute_scripted(dir.path(), 3, vec![failing(), failing(), failing()]);

        assert_eq!(
            outcome.expect("loop should complete"),
            RerunOutcome::TestsOutstanding {
                attempts: 3,
                filter: "FullyQualifiedName~Suite.Alpha".to_owned(),
            }
        );
        assert_eq!(
            filters_seen,
            vec![
                BASELINE_FILTER.to_owned(),
                "FullyQualifiedName~Suite.Alpha".to_owned(),
                "FullyQualifiedName~Suite.Alpha".to_owned(),
            ]
        );
    }

    #[test]
    fn rerun_replaces_the_baseline_filter_with_the_failure_filter() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        let (outcome, filters_seen) = execute_scripted(
            dir.path(),
            3,
            vec![
                Some(trx_document(&[
                    ("Suite.Alpha", "Failed"),
                    ("Suite.Beta", "Passed"),
                ])),
                Some(trx_document(&[("Suite.Alpha", "Passed")])),
            ],
        );

        assert_eq!(
            outcome.expect("loop should complete"),
            RerunOutcome::AllPassed { attempts: 2 }
        );
        assert_eq!(
            filters_seen,
            vec![
                BASELINE_FILTER.to_owned(),
                "FullyQualifiedName~Suite.Alpha".to_owned(),
            ]
        );
    }

    #[test]
    fn give_up_reports_the_final_runs_filter() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        let (outcome, filters_seen) = execute_scripted(
            dir.path(),
            2,
            vec![
                Some(trx_document(&[
                    ("Suite.Alpha", "Failed"),
                    ("Suite.Beta", "Failed"),
                ])),
                Some(trx_document(&[
                    ("Suite.Alpha", "Passed"),
                    ("Suite.Beta", "Failed"),
                ])),
            ],
        );

        assert_eq!(
            outcome.expect("loop should complete"),
            RerunOutcome::TestsOutstanding {
                attempts: 2,
                filter: "FullyQualifiedName~Suite.Beta".to_owned(),
            }
        );
        assert_eq!(
            filters_seen,
            vec![
                BASELINE_FILTER.to_owned(),
                "FullyQualifiedName~Suite.Alpha | FullyQualifiedName~Suite.Beta".to_owned(),
            ]
        );
    }

    #[test]
    fn run_without_result_files_is_not_an_error() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        let (outcome, filters_seen) = execute_scripted(dir.path(), 3, vec![None]);

        assert_eq!(
            outcome.expect("loop should complete"),
            RerunOutcome::AllPassed { attempts: 1 }
        );
        assert_eq!(filters_seen.len(), 1);
    }

    #[test]
    fn stale_result_files_are_superseded_by_newer_ones() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        // Sorts before the executor's FakeTests-* names.
        std::fs::write(
            dir.path().join("Earlier-run.trx"),
            trx_document(&[("Suite.Alpha", "Failed")]),
        )
        .expect("results dir should be writable");

        let (outcome, filters_seen) = execute_scripted(
            dir.path(),
            3,
            vec![Some(trx_document(&[("Suite.Alpha", "Passed")]))],
        );

        assert_eq!(
            outcome.expect("loop should complete"),
            RerunOutcome::AllPassed { attempts: 1 }
        );
        assert_eq!(filters_seen.len(), 1);
    }

    #[test]
    fn missing_results_directory_is_fatal() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        let missing = dir.path().join("does-not-exist");
        let (outcome, filters_seen) = execute_scripted(&missing, 3, vec![None]);

        let error = outcome.expect_err("a missing results directory should end the loop");
        assert!(
            matches!(error, RerunError::ResultDir(_)),
            "expected a results directory error, got: {error:?}"
        );
        assert_eq!(filters_seen.len(), 1);
    }

    #[test]
    fn malformed_result_file_is_fatal_not_retried() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        let (outcome, filters_seen) = execute_scripted(
            dir.path(),
            3,
            vec![Some("<TestRun><Results></Wrong></TestRun>".to_owned())],
        );

        let error = outcome.expect_err("an unreadable result file should end the loop");
        assert!(
            matches!(error, RerunError::TrxParse(_)),
            "expected a TRX parse error, got: {error:?}"
        );
        assert_eq!(filters_seen.len(), 1, "parse failures must not be retried");
    }
}
