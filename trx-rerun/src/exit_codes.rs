// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for trx-rerun.
///
/// A rerun session may end in several distinct ways that callers (typically
/// CI pipelines) need to tell apart. This structure documents the exit codes
/// produced for each of them.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum RerunExitCode {}

impl RerunExitCode {
    /// The rerun session ended with no failed tests left.
    pub const OK: i32 = 0;

    /// The attempt budget was exhausted while tests were still failing.
    ///
    /// This is a normal loop exit, not an infrastructure failure, but it is
    /// not a success either: the last computed failure filter was non-empty.
    pub const RERUN_TESTS_OUTSTANDING: i32 = 5;

    /// The test executor could not be invoked.
    pub const SETUP_ERROR: i32 = 96;

    /// The results directory or a located result file could not be read.
    pub const RESULT_READ_FAILED: i32 = 104;
}
