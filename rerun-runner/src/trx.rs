// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading TRX result files.
//!
//! TRX is the XML report format VSTest-style executors produce under the
//! `trx` logger. Only the slice of the schema the rerun loop consumes is
//! modeled here: the `UnitTestResult` elements and their `testName` and
//! `outcome` attributes. Everything else in the document is skipped over.

use crate::errors::TrxParseError;
use camino::Utf8Path;
use quick_xml::{Reader, events::Event};

static UNIT_TEST_RESULT_TAG: &str = "UnitTestResult";
static TEST_NAME_ATTR: &str = "testName";
static OUTCOME_ATTR: &str = "outcome";

/// The recorded status of a single test execution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TestOutcome {
    /// The test passed.
    Passed,
    /// The test failed.
    Failed,
    /// Any other recorded status, e.g. `NotExecuted` or `Timeout`.
    Other(String),
}

impl TestOutcome {
    /// Outcome values are matched ASCII case-insensitively: executors differ
    /// on the capitalization they write out.
    fn from_attr(value: &str) -> Self {
        if value.eq_ignore_ascii_case("passed") {
            TestOutcome::Passed
        } else if value.eq_ignore_ascii_case("failed") {
            TestOutcome::Failed
        } else {
            TestOutcome::Other(value.to_owned())
        }
    }

    /// Returns true if this outcome counts as a failure for rerun purposes.
    pub fn is_failed(&self) -> bool {
        matches!(self, TestOutcome::Failed)
    }
}

/// One row of a TRX result file: a single executed test and its outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestResult {
    /// The test name as recorded by the executor.
    pub test_name: String,
    /// The recorded outcome.
    pub outcome: TestOutcome,
}

/// Parses the `UnitTestResult` records out of the TRX file at `path`, in
/// document order.
///
/// A document with no `UnitTestResult` elements parses to an empty list.
/// Malformed XML and records missing a required attribute are errors: an
/// unreadable result file leaves the state of the run unknown, which must not
/// be confused with "no failures".
pub fn parse_trx(path: &Utf8Path) -> Result<Vec<TestResult>, TrxParseError> {
    let mut reader = Reader::from_file(path).map_err(|error| TrxParseError::xml(path, error))?;

    let mut results = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element) | Event::Empty(element))
                if element.local_name().as_ref() == UNIT_TEST_RESULT_TAG.as_bytes() =>
            {
                let mut test_name = None;
                let mut outcome = None;
                for attribute in element.attributes() {
                    let attribute =
                        attribute.map_err(|error| TrxParseError::attribute(path, error))?;
                    let value = || {
                        attribute
                            .unescape_value()
                            .map_err(|error| TrxParseError::xml(path, error))
                    };
                    if attribute.key.local_name().as_ref() == TEST_NAME_ATTR.as_bytes() {
                        test_name = Some(value()?.into_owned());
                    } else if attribute.key.local_name().as_ref() == OUTCOME_ATTR.as_bytes() {
                        outcome = Some(TestOutcome::from_attr(&value()?));
                    }
                }
                let test_name = test_name
                    .ok_or_else(|| TrxParseError::missing_attribute(path, TEST_NAME_ATTR))?;
                let outcome =
                    outcome.ok_or_else(|| TrxParseError::missing_attribute(path, OUTCOME_ATTR))?;
                results.push(TestResult { test_name, outcome });
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => return Err(TrxParseError::xml(path, error)),
        }
        buf.clear();
    }

    Ok(results)
}
