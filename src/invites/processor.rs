use std::sync::Arc;

use crate::db::{InviteStore, InviteTx, SaveOutcome};
use crate::error::Result;
use crate::invites::hooks::{DefaultHooks, InviteHooks};
use crate::mail::{DeliveryMode, InviteMailer, OutgoingEmail};
use crate::models::Invitation;

/// Processes a batch of invitations: persists each record, dispatches the
/// notification matching the recipient's account situation, and grants
/// resource access to existing users.
///
/// The whole batch runs inside one store transaction. Invites that fail
/// to persist (validation, duplicate) are collected and returned; an
/// infrastructure error aborts the batch and rolls the transaction back.
/// Already-dispatched emails and access grants are not undone by a
/// rollback. Treat a processor as single-use: a second `send_invites`
/// call re-runs every side effect.
pub struct InviteBatchProcessor {
    invites: Vec<Invitation>,
    mailer: Arc<dyn InviteMailer>,
    hooks: Arc<dyn InviteHooks>,
    failures: Vec<String>,
}

impl InviteBatchProcessor {
    pub fn new(invites: Vec<Invitation>, mailer: Arc<dyn InviteMailer>) -> Self {
        Self {
            invites,
            mailer,
            hooks: Arc::new(DefaultHooks),
            failures: Vec::new(),
        }
    }

    /// Replace the default per-invite-type hooks.
    pub fn with_hooks(mut self, hooks: Arc<dyn InviteHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Process the batch in input order. Returns the recipient emails of
    /// invites that could not be persisted.
    pub async fn send_invites(&mut self, store: &dyn InviteStore) -> Result<Vec<String>> {
        self.failures.clear();

        let mut tx = store.begin().await?;
        let mut invites = std::mem::take(&mut self.invites);
        let outcome = self.process_batch(tx.as_mut(), &mut invites).await;
        self.invites = invites;
        outcome?;
        tx.commit().await?;

        Ok(self.failures.clone())
    }

    async fn process_batch(
        &mut self,
        tx: &mut dyn InviteTx,
        invites: &mut [Invitation],
    ) -> Result<()> {
        for invite in invites.iter_mut() {
            match tx.save_invite(invite).await? {
                SaveOutcome::Saved => self.dispatch(tx, invite).await?,
                SaveOutcome::Rejected(reason) => {
                    tracing::debug!(email = %invite.email, %reason, "Invite not persisted");
                    self.failures.push(invite.email.clone());
                }
            }
        }
        Ok(())
    }

    /// Send the notification and run the per-type side effects for one
    /// saved invite.
    async fn dispatch(&self, tx: &mut dyn InviteTx, invite: &mut Invitation) -> Result<()> {
        if invite.existing_user() {
            self.deliver_email(self.mailer.existing_user(invite)).await;
            self.hooks.after_invite_existing_user(tx, invite).await?;
            invite.mark_accepted();
            // Not added to the failure list; the access grant has already
            // happened.
            if let SaveOutcome::Rejected(reason) = tx.update_invite(invite).await? {
                tracing::warn!(
                    email = %invite.email,
                    %reason,
                    "Invite accepted but record not updated"
                );
            }
        } else {
            self.deliver_email(self.mailer.new_user(invite)).await;
            self.hooks.after_invite_new_user(tx, invite).await?;
        }
        Ok(())
    }

    /// Issue delivery for a composed message. Transport outcomes are not
    /// part of the workflow: failures are logged and otherwise invisible.
    async fn deliver_email(&self, email: OutgoingEmail) {
        match email.delivery {
            DeliveryMode::Deferred => {
                let mailer = Arc::clone(&self.mailer);
                tokio::spawn(async move {
                    if let Err(e) = mailer.deliver_now(email).await {
                        tracing::warn!(error = %e, "Deferred invite email failed");
                    }
                });
            }
            DeliveryMode::Immediate => {
                if let Err(e) = self.mailer.deliver_now(email).await {
                    tracing::warn!(error = %e, "Invite email failed");
                }
            }
        }
    }
}
