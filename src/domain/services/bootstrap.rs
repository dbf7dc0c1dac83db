#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::BackendBox;
use crate::domain::models::Session;
use crate::domain::models::SessionTypeId;
use crate::domain::models::TherapistId;
use crate::domain::models::UserRecord;

/// Provisions a fresh anonymous identity and opens a session for it. Nothing
/// is retried, a failure at either step leaves no session behind.
pub async fn provision(
    backend: &BackendBox,
    session_type: SessionTypeId,
    therapist: TherapistId,
) -> Result<(UserRecord, Session)> {
    let user = backend.create_anonymous_user().await.map_err(|err| {
        tracing::error!(error = ?err, "Failed to create anonymous user");
        return err;
    })?;

    let session = backend
        .create_session(user.id, session_type, therapist)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, user_id = user.id, "Failed to create session");
            return err;
        })?;

    tracing::info!(
        user_id = user.id,
        session_id = session.id,
        session_type = %session_type,
        therapist = %therapist,
        "Session started"
    );

    return Ok((user, session));
}
