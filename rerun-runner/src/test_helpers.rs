// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use itertools::Itertools;

/// Renders a minimal TRX document with one `UnitTestResult` per
/// `(test name, outcome)` pair, in order.
pub(crate) fn trx_document(results: &[(&str, &str)]) -> String {
    let rows = results
        .iter()
        .map(|(test_name, outcome)| {
            format!(r#"    <UnitTestResult testName="{test_name}" outcome="{outcome}" />"#)
        })
        .join("\n");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<TestRun id="f0e0bd20-47a3-4d4e-97e2-76ab3b2f1af1" xmlns="http://microsoft.com/schemas/VisualStudio/TeamTest/2010">
  <Results>
{rows}
  </Results>
</TestRun>
"#
    )
}
