//! Error types for the upstream NerdGraph client

use thiserror::Error;

/// Everything that can go wrong while running an NRQL query upstream.
///
/// The `Display` text of each variant is exactly what callers see in
/// `QueryResult.error`.
#[derive(Debug, Error, PartialEq)]
pub enum NrqlError {
    /// Upstream answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Upstream reported GraphQL `errors`
    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("No 'data' field in response")]
    MissingData,

    #[error("No 'actor' field in response")]
    MissingActor,

    #[error("No account data for account ID {account_id}")]
    MissingAccount { account_id: String },

    #[error("No NRQL result in response")]
    MissingNrql,

    /// Transport failures, undecodable bodies and other surprises
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for NrqlError {
    fn from(err: reqwest::Error) -> Self {
        NrqlError::Unexpected(err.to_string())
    }
}

impl From<serde_json::Error> for NrqlError {
    fn from(err: serde_json::Error) -> Self {
        NrqlError::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error() {
        let err = NrqlError::Http {
            status: 403,
            body: "Forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 403: Forbidden");
    }

    #[test]
    fn test_missing_level_messages() {
        assert_eq!(
            NrqlError::MissingData.to_string(),
            "No 'data' field in response"
        );
        assert_eq!(
            NrqlError::MissingActor.to_string(),
            "No 'actor' field in response"
        );
        assert_eq!(
            NrqlError::MissingAccount {
                account_id: "1234".to_string()
            }
            .to_string(),
            "No account data for account ID 1234"
        );
        assert_eq!(
            NrqlError::MissingNrql.to_string(),
            "No NRQL result in response"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: NrqlError = json_err.into();
        assert!(matches!(err, NrqlError::Unexpected(_)));
        assert!(err.to_string().starts_with("Unexpected error: "));
    }
}
