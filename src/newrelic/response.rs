//! Walking the `data.actor.account.nrql.results` response shape

use serde_json::Value;

use super::error::NrqlError;

/// Look up `key` in `value`, treating null and "empty" values as absent
fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_present(v))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Extract the NRQL result rows from a decoded NerdGraph response body
pub fn extract_results(body: &Value, account_id: &str) -> Result<Vec<Value>, NrqlError> {
    if let Some(errors) = body.get("errors") {
        return Err(NrqlError::GraphQl(errors.to_string()));
    }

    let data = field(body, "data").ok_or(NrqlError::MissingData)?;
    let actor = field(data, "actor").ok_or(NrqlError::MissingActor)?;
    let account = field(actor, "account").ok_or_else(|| NrqlError::MissingAccount {
        account_id: account_id.to_string(),
    })?;
    let nrql = field(account, "nrql").ok_or(NrqlError::MissingNrql)?;

    match nrql.get("results") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(results)) => Ok(results.clone()),
        Some(other) => Err(NrqlError::Unexpected(format!(
            "NRQL results are not a list: {}",
            other
        ))),
    }
}
