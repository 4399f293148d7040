//! Error adapter for converting [`PlanarError`] to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use planar::{PlanarError, host::HostError};

/// Adapter giving every [`PlanarError`] a diagnostic code and, where there is
/// something useful to say, a help line.
pub struct ErrorAdapter<'a>(pub &'a PlanarError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PlanarError::Io(_) => "planar::io",
            PlanarError::Host(_) => "planar::host",
            PlanarError::Transaction(_) => "planar::transaction",
            PlanarError::Config(_) => "planar::config",
            PlanarError::Drawing(_) => "planar::drawing",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            PlanarError::Transaction(failure) => match failure.cause() {
                HostError::MissingContainer(_) => {
                    "a block reference names a container the drawing does not define"
                }
                _ => "the drawing was left unchanged",
            },
            PlanarError::Config(_) => "check the [flatten] section of the configuration file",
            PlanarError::Drawing(_) => {
                "each element needs a known `kind` and its coordinates as [x, y, z] arrays"
            }
            PlanarError::Io(_) | PlanarError::Host(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use planar::{TransactionFailure, TransactionStage, identifier::Id};

    use super::*;

    #[test]
    fn test_codes() {
        let cases = [
            (PlanarError::Config("bad".to_string()), "planar::config"),
            (PlanarError::Drawing("bad".to_string()), "planar::drawing"),
            (
                PlanarError::Host(HostError::MissingLayer(Id::new("walls"))),
                "planar::host",
            ),
            (
                PlanarError::Io(std::io::Error::other("disk")),
                "planar::io",
            ),
        ];

        for (err, expected) in &cases {
            let adapter = ErrorAdapter(err);
            assert_eq!(adapter.code().unwrap().to_string(), *expected);
        }
    }

    #[test]
    fn test_transaction_failure_help() {
        let err = PlanarError::Transaction(TransactionFailure::new(
            TransactionStage::Traverse,
            HostError::MissingContainer(Id::new("ghost")),
        ));

        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "planar::transaction");
        assert!(adapter.help().unwrap().to_string().contains("block reference"));
        assert!(adapter.to_string().contains("traversal"));
    }

    #[test]
    fn test_io_has_no_help() {
        let err = PlanarError::Io(std::io::Error::other("disk"));

        assert!(ErrorAdapter(&err).help().is_none());
    }
}
