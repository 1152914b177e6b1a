// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building a rerun filter from failed test results.

use crate::trx::TestResult;
use itertools::Itertools;
use tracing::{debug, warn};

/// Produces a filter expression selecting exactly the failed tests in
/// `results`, or an empty string if nothing failed.
///
/// Each failed record contributes a `FullyQualifiedName~<test name>` clause
/// built from its own name, in record order; clauses are joined with ` | `.
/// The empty string is the rerun loop's "nothing to rerun" sentinel.
pub fn failed_tests_filter(results: &[TestResult]) -> String {
    let mut failed = results
        .iter()
        .filter(|result| result.outcome.is_failed())
        .peekable();
    if failed.peek().is_none() {
        warn!("no tests found with the Failed outcome");
        return String::new();
    }

    let filter = failed
        .map(|result| format!("FullyQualifiedName~{}", result.test_name))
        .join(" | ");
    debug!("{filter}");
    filter
}
