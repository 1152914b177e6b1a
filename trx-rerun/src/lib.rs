// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Automatically rerun failed tests from a VSTest-style test run.
//!
//! trx-rerun wraps an external test executor: it runs the configured test
//! assembly once, reads the TRX result file the run writes, and reruns just
//! the failed tests until they pass or the attempt budget runs out.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod exit_codes;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use exit_codes::*;
