use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::store::{InviteStore, InviteTx, SaveOutcome};
use crate::error::Result;
use crate::models::{Invitable, InvitableKind, Invitation, InvitationStatus, StoredInvitation, User};
use crate::security;

/// Postgres-backed invite store
#[derive(Clone)]
pub struct PgInviteStore {
    pool: PgPool,
    token_salt: String,
}

impl PgInviteStore {
    pub fn new(pool: PgPool, token_salt: String) -> Self {
        Self { pool, token_salt }
    }
}

pub struct PgInviteTx {
    tx: Transaction<'static, Postgres>,
    token_salt: String,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[async_trait]
impl InviteTx for PgInviteTx {
    async fn save_invite(&mut self, invite: &Invitation) -> Result<SaveOutcome> {
        if let Err(reason) = invite.validate() {
            return Ok(SaveOutcome::Rejected(reason));
        }

        let token_hash = security::hash_secret_sha256_hex(&invite.token, &self.token_salt);

        let result = sqlx::query(
            r"
            INSERT INTO invitations
                (id, email, invitable_type, invitable_id, recipient_id,
                 token_hash, status, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(invite.id)
        .bind(&invite.email)
        .bind(invite.invitable.kind.as_db_str())
        .bind(invite.invitable.id)
        .bind(invite.recipient_id)
        .bind(&token_hash)
        .bind(invite.status.as_db_str())
        .bind(invite.created_at)
        .bind(invite.expires_at)
        .execute(&mut *self.tx)
        .await;

        match result {
            Ok(_) => Ok(SaveOutcome::Saved),
            // Duplicate invite for the same email + resource
            Err(e) if is_unique_violation(&e) => {
                Ok(SaveOutcome::Rejected("Already invited".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_invite(&mut self, invite: &Invitation) -> Result<SaveOutcome> {
        let accepted_at = match invite.status {
            InvitationStatus::Accepted => Some(Utc::now()),
            InvitationStatus::Pending => None,
        };

        let result = sqlx::query(
            "UPDATE invitations SET status = $1, accepted_at = $2 WHERE id = $3",
        )
        .bind(invite.status.as_db_str())
        .bind(accepted_at)
        .bind(invite.id)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(SaveOutcome::Rejected(
                "Invitation record no longer exists".to_string(),
            ));
        }
        Ok(SaveOutcome::Saved)
    }

    async fn add_invited_user(&mut self, invitable: &Invitable, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO memberships (invitable_type, invitable_id, user_id, added_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(invitable.kind.as_db_str())
        .bind(invitable.id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut *self.tx)
        .await?;

        tracing::info!(
            invitable_type = %invitable.kind.as_db_str(),
            invitable_id = %invitable.id,
            user_id = %user_id,
            "Membership granted"
        );
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl InviteStore for PgInviteStore {
    async fn begin(&self) -> Result<Box<dyn InviteTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgInviteTx {
            tx,
            token_salt: self.token_salt.clone(),
        }))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, display_name, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_invitable(&self, kind: InvitableKind, id: Uuid) -> Result<Option<Invitable>> {
        let name: Option<String> = match kind {
            InvitableKind::Organization => {
                sqlx::query_scalar("SELECT name FROM organizations WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        Ok(name.map(|name| Invitable::new(kind, id, name)))
    }

    async fn find_invitation_by_token(&self, token: &str) -> Result<Option<StoredInvitation>> {
        let token_hash = security::hash_secret_sha256_hex(token, &self.token_salt);
        let invitation = sqlx::query_as::<_, StoredInvitation>(
            r"
            SELECT id, email, invitable_type, invitable_id, recipient_id,
                   status, created_at, accepted_at, expires_at
            FROM invitations
            WHERE token_hash = $1
            ",
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(invitation)
    }

    async fn list_invitations(
        &self,
        kind: InvitableKind,
        id: Uuid,
    ) -> Result<Vec<StoredInvitation>> {
        let invitations = sqlx::query_as::<_, StoredInvitation>(
            r"
            SELECT id, email, invitable_type, invitable_id, recipient_id,
                   status, created_at, accepted_at, expires_at
            FROM invitations
            WHERE invitable_type = $1 AND invitable_id = $2
            ORDER BY created_at DESC
            ",
        )
        .bind(kind.as_db_str())
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(invitations)
    }

    async fn health_check(&self) -> Result<bool> {
        let _: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(true)
    }
}
