#[cfg(test)]
#[path = "plans_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;

use crate::domain::models::PaymentGatewayBox;
use crate::domain::models::PricingPlan;

/// Hands a plan to the payment gateway. The plan has to exist in the catalog,
/// nothing else is checked here.
pub async fn select_plan(gateway: &PaymentGatewayBox, plan_id: &str) -> Result<String> {
    let plan = PricingPlan::find(plan_id).ok_or_else(|| {
        return anyhow!(format!("Plano desconhecido: {plan_id}"));
    })?;

    return gateway.checkout(plan).await;
}
