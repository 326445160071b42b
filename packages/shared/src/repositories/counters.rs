use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

/// Atomically increments the named counter item and returns the new value.
///
/// Counter items live in a single table keyed by `name`; the first call for a
/// name creates the item and returns 1.
pub async fn next_counter_value(
    client: &Client,
    table_name: &str,
    name: &str,
) -> Result<u64, String> {
    let output = client
        .update_item()
        .table_name(table_name)
        .key("name", AttributeValue::S(name.to_string()))
        .update_expression("ADD next_value :one")
        .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
        .return_values(ReturnValue::UpdatedNew)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    output
        .attributes
        .as_ref()
        .and_then(|attributes| attributes.get("next_value"))
        .and_then(|value| value.as_n().ok())
        .and_then(|n| n.parse::<u64>().ok())
        .ok_or_else(|| format!("Counter '{}' returned no numeric value", name))
}
