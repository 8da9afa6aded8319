//! Error types for the posture summary engine.

use thiserror::Error;

/// Errors that abort a posture summary computation.
///
/// Only structural violations of the grouped-incident contract are fatal;
/// messy individual records degrade the summary locally and are reported
/// through [`DigestDiagnostics`](crate::diagnostics::DigestDiagnostics)
/// instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// The grouped-incident payload carried no `incidents` collection.
    #[error("grouped-incident payload is missing the incidents collection")]
    MissingIncidents,

    /// The grouped-incident payload carried no `groups` collection.
    #[error("grouped-incident payload is missing the groups collection")]
    MissingGroups,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_error_display() {
        assert!(SummaryError::MissingIncidents
            .to_string()
            .contains("incidents"));
        assert!(SummaryError::MissingGroups.to_string().contains("groups"));
    }
}
