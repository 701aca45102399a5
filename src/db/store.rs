use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Invitable, InvitableKind, Invitation, StoredInvitation, User};

/// Outcome of a single-record save attempt.
///
/// Validation failures and uniqueness conflicts are reported here and the
/// batch keeps going; infrastructure problems surface as errors and abort
/// the surrounding transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Rejected(String),
}

/// One open transaction against the invite store.
///
/// Dropping an uncommitted transaction rolls it back.
#[async_trait]
pub trait InviteTx: Send {
    /// Attempt to persist one invitation record.
    async fn save_invite(&mut self, invite: &Invitation) -> Result<SaveOutcome>;

    /// Re-persist an invitation whose state changed after the initial save.
    async fn update_invite(&mut self, invite: &Invitation) -> Result<SaveOutcome>;

    /// Grant the recipient access to the invitable resource.
    /// Idempotent: repeated grants for the same recipient are no-ops.
    async fn add_invited_user(&mut self, invitable: &Invitable, user_id: Uuid) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Persistence capability backing the invitation workflow
#[async_trait]
pub trait InviteStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn InviteTx>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_invitable(&self, kind: InvitableKind, id: Uuid) -> Result<Option<Invitable>>;

    async fn find_invitation_by_token(&self, token: &str) -> Result<Option<StoredInvitation>>;

    async fn list_invitations(
        &self,
        kind: InvitableKind,
        id: Uuid,
    ) -> Result<Vec<StoredInvitation>>;

    async fn health_check(&self) -> Result<bool>;
}
