use serde::Deserialize;
use serde::Serialize;

pub const ANONYMOUS_EMAIL: &str = "anonymous@desabafa.ai";

/// The single user record kept on the client. Anonymous users only ever carry
/// a placeholder email.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub is_anonymous: bool,
    pub free_sessions_remaining: i64,
    pub subscription_active: bool,
}

impl UserRecord {
    pub fn anonymous(id: i64, free_sessions_remaining: i64) -> UserRecord {
        return UserRecord {
            id,
            email: ANONYMOUS_EMAIL.to_string(),
            is_anonymous: true,
            free_sessions_remaining,
            subscription_active: false,
        };
    }

    pub fn display_name(&self) -> String {
        if self.is_anonymous {
            return "Usuário Anônimo".to_string();
        }

        return self.email.to_string();
    }

    pub fn plan_label(&self) -> &'static str {
        if self.subscription_active {
            return "Premium";
        }

        return "Gratuito";
    }

    pub fn sessions_remaining_label(&self) -> String {
        if self.subscription_active {
            return "∞".to_string();
        }

        return self.free_sessions_remaining.to_string();
    }
}
