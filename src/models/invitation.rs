use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::invitable::Invitable;

/// Invitation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
}

impl InvitationStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InvitationStatus::Pending),
            "accepted" => Some(InvitationStatus::Accepted),
            _ => None,
        }
    }
}

/// One pending invite, as handed to the batch processor.
///
/// Built by the HTTP layer (or a test) before processing. `recipient_id`
/// is resolved once at construction time; whether the invite targets an
/// existing account never changes mid-batch. The raw `token` is emailed
/// to the recipient, only its salted hash reaches the database.
#[derive(Debug, Clone)]
pub struct Invitation {
    pub id: Uuid,
    pub email: String,
    pub invitable: Invitable,
    pub recipient_id: Option<Uuid>,
    pub token: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    pub fn new(
        email: String,
        invitable: Invitable,
        recipient_id: Option<Uuid>,
        token: String,
        expiry_hours: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            invitable,
            recipient_id,
            token,
            status: InvitationStatus::Pending,
            created_at: now,
            expires_at: now + Duration::hours(expiry_hours),
        }
    }

    /// True iff the recipient already has an account.
    pub fn existing_user(&self) -> bool {
        self.recipient_id.is_some()
    }

    /// Record-level validation, checked by the store before insert.
    pub fn validate(&self) -> Result<(), String> {
        if self.email.is_empty() {
            return Err("Email is required".to_string());
        }
        if !self.email.contains('@') {
            return Err("Invalid email format".to_string());
        }
        if self.email.len() > 255 {
            return Err("Email must be at most 255 characters".to_string());
        }
        Ok(())
    }

    pub fn mark_accepted(&mut self) {
        self.status = InvitationStatus::Accepted;
    }
}

/// Invitation row as read back from the database
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct StoredInvitation {
    pub id: Uuid,
    pub email: String,
    pub invitable_type: String,
    pub invitable_id: Uuid,
    pub recipient_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

impl StoredInvitation {
    pub fn is_valid(&self) -> bool {
        self.status == InvitationStatus::Pending.as_db_str() && self.expires_at > Utc::now()
    }
}

/// Request to invite a batch of emails to a resource
#[derive(Debug, Deserialize)]
pub struct CreateInvitesRequest {
    pub invitable_type: String,
    pub invitable_id: Uuid,
    pub emails: Vec<String>,
}

/// Response after processing an invite batch
#[derive(Debug, Serialize)]
pub struct InviteBatchResponse {
    pub invited: u32,
    pub failed: Vec<String>,
}

/// Invitation details for the invite landing page
#[derive(Debug, Serialize)]
pub struct InvitationInfo {
    pub email: String,
    pub invitable_type: String,
    pub invitable_name: String,
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub is_valid: bool,
}
