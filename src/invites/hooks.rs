use async_trait::async_trait;

use crate::db::InviteTx;
use crate::error::Result;
use crate::models::Invitation;

/// Per-invite-type side effects, swappable without touching the batch loop.
///
/// Supply a custom implementation to `InviteBatchProcessor::with_hooks`
/// when granting access means more than a plain membership row.
#[async_trait]
pub trait InviteHooks: Send + Sync {
    /// Runs after the notification to an existing account holder.
    /// Default: grant the recipient access to the invitable resource.
    async fn after_invite_existing_user(
        &self,
        tx: &mut dyn InviteTx,
        invite: &Invitation,
    ) -> Result<()> {
        if let Some(recipient_id) = invite.recipient_id {
            tx.add_invited_user(&invite.invitable, recipient_id).await?;
        }
        Ok(())
    }

    /// Runs after the notification to a recipient without an account.
    /// Default: nothing.
    async fn after_invite_new_user(
        &self,
        _tx: &mut dyn InviteTx,
        _invite: &Invitation,
    ) -> Result<()> {
        Ok(())
    }
}

/// Default hook set
pub struct DefaultHooks;

#[async_trait]
impl InviteHooks for DefaultHooks {}
