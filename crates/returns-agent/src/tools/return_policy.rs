use returns_agent_core::tool::{Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::{Value, json};

struct Policy {
    return_window_days: u32,
    condition: &'static str,
    refund_type: &'static str,
}

const ELECTRONICS: Policy = Policy {
    return_window_days: 15,
    condition: "unopened or defective",
    refund_type: "full refund or exchange",
};

const ACCESSORIES: Policy = Policy {
    return_window_days: 45,
    condition: "unused with original packaging",
    refund_type: "full refund or store credit",
};

const DEFAULT: Policy = Policy {
    return_window_days: 30,
    condition: "unused and in original condition",
    refund_type: "full refund",
};

// Unrecognized categories fall back to the default policy; this tool
// has no failure path.
fn policy_for(category: &str) -> &'static Policy {
    match category.to_lowercase().as_str() {
        "electronics" => &ELECTRONICS,
        "accessories" => &ACCESSORIES,
        _ => &DEFAULT,
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct ReturnPolicyParameters {
    #[schemars(
        description = "The category of product (default: electronics)."
    )]
    product_category: Option<String>,
}

/// A tool for fetching the return policy of a product category.
pub struct ReturnPolicyTool {
    parameter_schema: Value,
}

impl ReturnPolicyTool {
    /// Creates a new return policy tool.
    #[inline]
    pub fn new() -> Self {
        ReturnPolicyTool {
            parameter_schema: schema_for!(ReturnPolicyParameters).to_value(),
        }
    }
}

impl Default for ReturnPolicyTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ReturnPolicyTool {
    type Input = ReturnPolicyParameters;

    fn name(&self) -> &str {
        "product_return_policy"
    }

    fn description(&self) -> &str {
        "Gets the return policy for a product category, including the \
         number of days for return eligibility."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        async move {
            let category = input
                .product_category
                .unwrap_or_else(|| "electronics".to_owned());
            let policy = policy_for(&category);
            let payload = json!({
                "return_window_days": policy.return_window_days,
                "condition_required": policy.condition,
                "refund_type": policy.refund_type,
                "restocking_fee": "No restocking fee for defective items",
            });
            Ok(payload.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    async fn policy_payload(category: Option<&str>) -> Value {
        let content = ReturnPolicyTool::new()
            .execute(ReturnPolicyParameters {
                product_category: category.map(str::to_owned),
            })
            .await
            .unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[tokio::test]
    async fn test_known_categories_any_case() {
        let payload = policy_payload(Some("Electronics")).await;
        assert_eq!(payload["return_window_days"], 15);
        assert_eq!(payload["refund_type"], "full refund or exchange");

        let payload = policy_payload(Some("accessories")).await;
        assert_eq!(payload["return_window_days"], 45);
        assert_eq!(
            payload["condition_required"],
            "unused with original packaging"
        );
    }

    #[tokio::test]
    async fn test_category_defaults_to_electronics() {
        let payload = policy_payload(None).await;
        assert_eq!(payload["return_window_days"], 15);
    }

    #[tokio::test]
    async fn test_unrecognized_category_falls_back_to_default() {
        for category in ["furniture", "", "GARDEN"] {
            let payload = policy_payload(Some(category)).await;
            assert_eq!(payload["return_window_days"], 30);
            assert_eq!(payload["refund_type"], "full refund");
        }
    }
}
