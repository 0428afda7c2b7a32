//! The return-support tools that the model can call.

mod calculate_refund;
mod lookup_order;
mod return_policy;

pub use calculate_refund::CalculateRefundTool;
pub use lookup_order::LookupOrderTool;
pub use return_policy::ReturnPolicyTool;
