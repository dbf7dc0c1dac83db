#[cfg(test)]
#[path = "log_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::PaymentGateway;
use crate::domain::models::PricingPlan;

/// Stand-in checkout that records the selection. The real payment provider is
/// not wired up yet.
#[derive(Default)]
pub struct LogPayments {}

#[async_trait]
impl PaymentGateway for LogPayments {
    #[allow(clippy::implicit_return)]
    async fn checkout(&self, plan: &'static PricingPlan) -> Result<String> {
        tracing::info!(plan_id = plan.id, price = plan.price, "Plan selected");

        return Ok(format!(
            "Plano {} selecionado! Em breve você será redirecionado para o pagamento.",
            plan.name
        ));
    }
}
