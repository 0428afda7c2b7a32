use std::sync::Arc;

use returns_agent_core::tool::{Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::store::OrderStore;

/// The flat fee deducted from a refund when the return reason does not
/// qualify for a waiver.
const RESTOCKING_FEE: f64 = 100.0;

/// Return reasons that waive the restocking fee. A whitelist: any other
/// reason string has the fee applied.
const WAIVED_REASONS: [&str; 3] = ["defective", "wrong_item", "damaged"];

#[derive(Deserialize, JsonSchema)]
pub struct CalculateRefundParameters {
    #[schemars(description = "The order ID.")]
    order_id: String,
    #[schemars(
        description = "Reason for return (defective, unwanted, wrong_item, \
                       etc.). Defaults to `general`."
    )]
    return_reason: Option<String>,
}

/// A tool for calculating the refund amount for a return.
pub struct CalculateRefundTool {
    store: Arc<OrderStore>,
    parameter_schema: Value,
}

impl CalculateRefundTool {
    /// Creates a new refund calculator over the given store.
    #[inline]
    pub fn new(store: Arc<OrderStore>) -> Self {
        CalculateRefundTool {
            store,
            parameter_schema: schema_for!(CalculateRefundParameters)
                .to_value(),
        }
    }
}

impl Tool for CalculateRefundTool {
    type Input = CalculateRefundParameters;

    fn name(&self) -> &str {
        "calculate_refund"
    }

    fn description(&self) -> &str {
        "Calculates the refund amount for a return, including any \
         restocking fee."
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
            let Some(order) = store.get(&input.order_id) else {
                let payload = json!({
                    "success": false,
                    "message": "Order not found",
                });
                return Ok(payload.to_string());
            };

            let reason = input
                .return_reason
                .unwrap_or_else(|| "general".to_owned())
                .to_lowercase();
            let restocking_fee = if WAIVED_REASONS.contains(&reason.as_str()) {
                0.0
            } else {
                RESTOCKING_FEE
            };
            let refund_amount = order.price - restocking_fee;

            let payload = json!({
                "success": true,
                "original_price": order.price,
                "restocking_fee": restocking_fee,
                "refund_amount": refund_amount,
                "refund_method": "Original payment method",
                "processing_time": "5-7 business days",
            });
            Ok(payload.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::Value;

    use super::*;

    fn tool() -> CalculateRefundTool {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        CalculateRefundTool::new(Arc::new(OrderStore::mock_at(today)))
    }

    async fn refund_payload(order_id: &str, reason: Option<&str>) -> Value {
        let content = tool()
            .execute(CalculateRefundParameters {
                order_id: order_id.to_owned(),
                return_reason: reason.map(str::to_owned),
            })
            .await
            .unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[tokio::test]
    async fn test_waived_reasons_refund_full_price() {
        for reason in ["defective", "WRONG_ITEM", "Damaged"] {
            let payload = refund_payload("ORD-001", Some(reason)).await;
            assert_eq!(payload["success"], Value::Bool(true));
            assert_eq!(payload["restocking_fee"], 0.0);
            assert_eq!(payload["refund_amount"], payload["original_price"]);
        }
    }

    #[tokio::test]
    async fn test_other_reasons_apply_the_fee() {
        for reason in [Some("unwanted"), Some("general"), None] {
            let payload = refund_payload("ORD-004", reason).await;
            assert_eq!(payload["restocking_fee"], RESTOCKING_FEE);
            assert_eq!(payload["refund_amount"], 49.99 - RESTOCKING_FEE);
            assert_eq!(payload["refund_method"], "Original payment method");
            assert_eq!(payload["processing_time"], "5-7 business days");
        }
    }

    #[tokio::test]
    async fn test_missing_order() {
        let payload = refund_payload("ORD-999", Some("defective")).await;
        assert_eq!(payload["success"], Value::Bool(false));
        assert_eq!(payload["message"], "Order not found");
    }
}
