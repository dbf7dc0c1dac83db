#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;

use crate::domain::models::BackendBox;
use crate::domain::models::Dashboard;
use crate::domain::models::UserRecord;

/// Loads the session history, and reports for subscribers. Each list falls
/// back to empty when its request fails.
pub async fn load_dashboard(backend: &BackendBox, user: &UserRecord) -> Dashboard {
    let sessions = backend.list_sessions(user.id).await.unwrap_or_else(|err| {
        tracing::error!(error = ?err, user_id = user.id, "Failed to load sessions");
        return vec![];
    });

    let mut reports = vec![];
    if user.subscription_active {
        reports = backend.list_reports(user.id).await.unwrap_or_else(|err| {
            tracing::error!(error = ?err, user_id = user.id, "Failed to load reports");
            return vec![];
        });
    }

    return Dashboard { sessions, reports };
}
