pub mod log;

use crate::domain::models::PaymentGatewayBox;

pub struct PaymentsManager {}

impl PaymentsManager {
    pub fn get() -> PaymentGatewayBox {
        return Box::<log::LogPayments>::default();
    }
}
