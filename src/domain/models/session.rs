use serde::Deserialize;
use serde::Serialize;

use super::SessionTypeId;
use super::TherapistId;

/// A backend-tracked conversation. Created once per chat entry and never
/// changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub session_type: SessionTypeId,
    pub therapist: TherapistId,
}

/// Entry of the dashboard session history. Tags are kept as raw strings since
/// the backend may know profiles this client does not.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: i64,
    #[serde(default)]
    pub session_type: String,
    #[serde(default)]
    pub therapist_profile: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub message_count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub sessions: Vec<SessionSummary>,
    pub reports: Vec<Report>,
}
