//! NerdGraph query construction

use serde::Serialize;

/// Request body for the NerdGraph endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlPayload {
    pub query: String,
}

/// Build the NerdGraph document that runs `nrql` against `account_id`.
///
/// Both values are interpolated verbatim. A double quote in `nrql` ends the
/// GraphQL string literal early, so callers can alter the document shape;
/// upstream rejects the malformed ones with GraphQL `errors`.
pub fn build_graphql_query(account_id: &str, nrql: &str) -> String {
    format!(
        r#"
        {{
            actor {{
                account(id: {account_id}) {{
                    nrql(query: "{nrql}") {{
                        results
                    }}
                }}
            }}
        }}
        "#
    )
}

impl GraphQlPayload {
    pub fn new(account_id: &str, nrql: &str) -> Self {
        Self {
            query: build_graphql_query(account_id, nrql),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_embeds_account_and_nrql() {
        let query = build_graphql_query("1234567", "SELECT count(*) FROM Transaction");
        assert!(query.contains("account(id: 1234567)"));
        assert!(query.contains(r#"nrql(query: "SELECT count(*) FROM Transaction")"#));
        assert!(query.contains("results"));
    }

    #[test]
    fn test_query_is_not_escaped() {
        let query = build_graphql_query("1", r#"SELECT * FROM Log WHERE message = "x""#);
        assert!(query.contains(r#"nrql(query: "SELECT * FROM Log WHERE message = "x"")"#));
    }

    #[test]
    fn test_payload_serialization() {
        let payload = GraphQlPayload::new("1", "SELECT 1");
        let value = serde_json::to_value(&payload).unwrap();
        let query = value["query"].as_str().unwrap();
        assert!(query.contains("actor"));
        assert!(query.contains("account(id: 1)"));
    }
}
