// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by rerun-runner.

use camino::Utf8PathBuf;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// An error that occurred while listing the results directory.
///
/// A missing or unreadable results directory surfaces here. An empty one does
/// not: that is a normal "nothing to rerun" observation, not an error.
#[derive(Debug, Error)]
#[error("failed to read results directory `{dir}`")]
pub struct ResultDirError {
    dir: Utf8PathBuf,
    #[source]
    error: std::io::Error,
}

impl ResultDirError {
    pub(crate) fn new(dir: impl Into<Utf8PathBuf>, error: std::io::Error) -> Self {
        Self {
            dir: dir.into(),
            error,
        }
    }

    /// Returns the directory that was being listed.
    pub fn dir(&self) -> &Utf8PathBuf {
        &self.dir
    }
}

/// An error that occurred while parsing a TRX result file.
///
/// An unreadable result file means the state of the run is unknown, so none
/// of these are recovered from: they end the rerun loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrxParseError {
    /// The file could not be read, or is not well-formed XML.
    #[error("failed to parse TRX file `{path}`")]
    Xml {
        /// The file being parsed.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        error: quick_xml::Error,
    },

    /// An element's attribute list was malformed.
    #[error("malformed attribute in TRX file `{path}`")]
    Attribute {
        /// The file being parsed.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        error: AttrError,
    },

    /// A `UnitTestResult` element was missing a required attribute.
    #[error("`UnitTestResult` in `{path}` is missing the `{attribute}` attribute")]
    MissingAttribute {
        /// The file being parsed.
        path: Utf8PathBuf,
        /// The attribute that was expected.
        attribute: &'static str,
    },
}

impl TrxParseError {
    pub(crate) fn xml(path: impl Into<Utf8PathBuf>, error: quick_xml::Error) -> Self {
        Self::Xml {
            path: path.into(),
            error,
        }
    }

    pub(crate) fn attribute(path: impl Into<Utf8PathBuf>, error: AttrError) -> Self {
        Self::Attribute {
            path: path.into(),
            error,
        }
    }

    pub(crate) fn missing_attribute(
        path: impl Into<Utf8PathBuf>,
        attribute: &'static str,
    ) -> Self {
        Self::MissingAttribute {
            path: path.into(),
            attribute,
        }
    }
}

/// An error that occurred while invoking the test executor.
///
/// Only a failure to launch the executor is an error at this boundary. A
/// non-zero exit simply means tests failed, which is what the rerun loop is
/// for; that is observed through the result files, not the exit status.
#[derive(Debug, Error)]
#[error("failed to execute `{command}`")]
pub struct TestExecError {
    command: String,
    #[source]
    error: std::io::Error,
}

impl TestExecError {
    pub(crate) fn new(
        command: impl IntoIterator<Item = impl AsRef<str>>,
        error: std::io::Error,
    ) -> Self {
        Self {
            command: shell_words::join(command),
            error,
        }
    }

    /// Returns the command that failed to execute, in shell-quoted form.
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// An error that terminated the rerun loop.
///
/// None of these are retried: retrying is for failing tests, never for
/// infrastructure failures.
#[derive(Debug, Error)]
pub enum RerunError {
    /// The results directory could not be listed.
    #[error(transparent)]
    ResultDir(#[from] ResultDirError),

    /// A located result file could not be parsed.
    #[error(transparent)]
    TrxParse(#[from] TrxParseError),

    /// The test executor could not be invoked.
    #[error(transparent)]
    TestExec(#[from] TestExecError),
}
