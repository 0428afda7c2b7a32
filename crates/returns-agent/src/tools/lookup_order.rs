use std::sync::Arc;

use returns_agent_core::tool::{Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::store::OrderStore;

#[derive(Deserialize, JsonSchema)]
pub struct LookupOrderParameters {
    #[schemars(description = "The order ID to look up (e.g. ORD-001).")]
    order_id: String,
}

/// A tool for looking up order details by order ID.
pub struct LookupOrderTool {
    store: Arc<OrderStore>,
    parameter_schema: Value,
}

impl LookupOrderTool {
    /// Creates a new lookup tool over the given store.
    #[inline]
    pub fn new(store: Arc<OrderStore>) -> Self {
        LookupOrderTool {
            store,
            parameter_schema: schema_for!(LookupOrderParameters).to_value(),
        }
    }
}

impl Tool for LookupOrderTool {
    type Input = LookupOrderParameters;

    fn name(&self) -> &str {
        "lookup_order"
    }

    fn description(&self) -> &str {
        "Looks up order details by order ID. Returns the order record on \
         success, or an error message when the order does not exist."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let store = Arc::clone(&self.store);
        async move {
            let payload = match store.get(&input.order_id) {
                Some(order) => json!({
                    "success": true,
                    "order": order,
                }),
                None => json!({
                    "success": false,
                    "message": format!(
                        "Order {} not found. Please check the order ID.",
                        input.order_id
                    ),
                }),
            };
            Ok(payload.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::Value;

    use super::*;

    fn tool() -> LookupOrderTool {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        LookupOrderTool::new(Arc::new(OrderStore::mock_at(today)))
    }

    #[tokio::test]
    async fn test_known_order_any_case() {
        let tool = tool();
        for id in ["ORD-001", "ord-001"] {
            let content = tool
                .execute(LookupOrderParameters {
                    order_id: id.to_owned(),
                })
                .await
                .unwrap();
            let payload: Value = serde_json::from_str(&content).unwrap();
            assert_eq!(payload["success"], Value::Bool(true));
            assert_eq!(
                payload["order"]["product_name"],
                "Wireless Bluetooth Headphones"
            );
            assert_eq!(payload["order"]["price"], 79.99);
            assert_eq!(payload["order"]["purchase_date"], "2026-08-20");
        }
    }

    #[tokio::test]
    async fn test_unknown_order_message_contains_queried_id() {
        let tool = tool();
        let content = tool
            .execute(LookupOrderParameters {
                order_id: "ORD-999".to_owned(),
            })
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(payload["success"], Value::Bool(false));
        let message = payload["message"].as_str().unwrap();
        assert!(message.contains("ORD-999"));
    }
}
