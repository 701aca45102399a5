use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::{AppError, Result};
use crate::invites::InviteBatchProcessor;
use crate::models::{
    CreateInvitesRequest, InvitableKind, Invitation, InvitationInfo, InviteBatchResponse,
    StoredInvitation,
};
use crate::security;
use crate::state::AppState;

/// Invite routes
pub fn invite_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_invites).get(list_invites))
        .route("/{token}", get(get_invitation))
}

/// Normalized form of a recipient email: trimmed, lowercased.
fn normalize_email(input: &str) -> String {
    input.trim().to_lowercase()
}

fn parse_invitable_kind(raw: &str) -> Result<InvitableKind> {
    InvitableKind::from_db_str(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown invitable type: {}", raw)))
}

/// POST /api/v1/invites - Invite a batch of emails to a resource
async fn create_invites(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateInvitesRequest>,
) -> Result<Json<InviteBatchResponse>> {
    if request.emails.is_empty() {
        return Err(AppError::BadRequest(
            "At least one email is required".to_string(),
        ));
    }
    if request.emails.len() > state.config.max_invite_batch {
        return Err(AppError::BadRequest(format!(
            "At most {} invites per request",
            state.config.max_invite_batch
        )));
    }

    let kind = parse_invitable_kind(&request.invitable_type)?;
    let invitable = state
        .store
        .find_invitable(kind, request.invitable_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "{} {} not found",
                request.invitable_type, request.invitable_id
            ))
        })?;

    // Resolve recipients up front; whether an invite targets an existing
    // account is fixed before the batch starts.
    let mut invitations = Vec::with_capacity(request.emails.len());
    for raw in &request.emails {
        let email = normalize_email(raw);
        let recipient = state.store.find_user_by_email(&email).await?;
        invitations.push(Invitation::new(
            email,
            invitable.clone(),
            recipient.map(|u| u.id),
            security::generate_invite_token(),
            state.config.invite_expiry_hours,
        ));
    }

    let total = invitations.len();
    let failed = InviteBatchProcessor::new(invitations, state.mailer.clone())
        .send_invites(state.store.as_ref())
        .await?;

    tracing::info!(
        invitable_type = %request.invitable_type,
        invitable_id = %invitable.id,
        invited_by = %user.id,
        invited = total - failed.len(),
        failed = failed.len(),
        "Invite batch processed"
    );

    Ok(Json(InviteBatchResponse {
        invited: (total - failed.len()) as u32,
        failed,
    }))
}

#[derive(serde::Deserialize)]
struct ListInvitesQuery {
    invitable_type: String,
    invitable_id: Uuid,
}

/// GET /api/v1/invites - List invitations for a resource
async fn list_invites(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ListInvitesQuery>,
) -> Result<Json<Vec<StoredInvitation>>> {
    let kind = parse_invitable_kind(&query.invitable_type)?;

    state
        .store
        .find_invitable(kind, query.invitable_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "{} {} not found",
                query.invitable_type, query.invitable_id
            ))
        })?;

    let invitations = state.store.list_invitations(kind, query.invitable_id).await?;
    Ok(Json(invitations))
}

/// GET /api/v1/invites/:token - Invitation details for the landing page
async fn get_invitation(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InvitationInfo>> {
    let invitation = state
        .store
        .find_invitation_by_token(&token)
        .await?
        .ok_or_else(|| AppError::NotFound("Invitation not found".to_string()))?;

    let kind = parse_invitable_kind(&invitation.invitable_type)?;
    let invitable = state
        .store
        .find_invitable(kind, invitation.invitable_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resource no longer exists".to_string()))?;

    let is_valid = invitation.is_valid();

    Ok(Json(InvitationInfo {
        email: invitation.email,
        invitable_type: invitation.invitable_type,
        invitable_name: invitable.name,
        status: invitation.status,
        expires_at: invitation.expires_at,
        is_valid,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("bob@x.com"), "bob@x.com");
    }

    #[test]
    fn test_parse_invitable_kind() {
        assert!(parse_invitable_kind("organization").is_ok());
        assert!(parse_invitable_kind("spaceship").is_err());
    }
}
