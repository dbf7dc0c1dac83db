use anyhow::Result;
use async_trait::async_trait;

use super::PricingPlan;

#[async_trait]
pub trait PaymentGateway {
    /// Hands the chosen plan over to the payment flow. Returns the notice
    /// shown to the user.
    async fn checkout(&self, plan: &'static PricingPlan) -> Result<String>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway + Send + Sync>;
