use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::mail::{DeliveryMode, InviteMailer, OutgoingEmail};
use crate::models::Invitation;

/// Production mailer backed by the Resend HTTP API.
///
/// Messages are marked `Deferred`: transport runs on a background task
/// and its outcome never reaches the invite workflow.
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
    frontend_host: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String, frontend_host: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
            frontend_host,
        }
    }

    /// Create mailer from env (RESEND_API_KEY, MAIL_FROM) plus the
    /// configured frontend host for invite links.
    pub fn new_from_env(frontend_host: Option<&str>) -> Result<Self> {
        let api_key = std::env::var("RESEND_API_KEY")
            .map_err(|_| AppError::BadRequest("RESEND_API_KEY missing in env".to_string()))?;

        let from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "InviteFlow <onboarding@resend.dev>".to_string());

        Ok(Self::new(
            api_key,
            from,
            frontend_host.unwrap_or("http://localhost:3000").to_string(),
        ))
    }

    fn signup_url(&self, invite: &Invitation) -> String {
        format!(
            "{}/invite/{}",
            self.frontend_host.trim_end_matches('/'),
            invite.token
        )
    }

    fn login_url(&self) -> String {
        format!("{}/login", self.frontend_host.trim_end_matches('/'))
    }
}

#[async_trait]
impl InviteMailer for ResendMailer {
    fn existing_user(&self, invite: &Invitation) -> OutgoingEmail {
        let subject = format!("You now have access to {}", invite.invitable.name);
        let text = format!(
            "You have been given access to {}.\n\nSign in to get started:\n{}\n",
            invite.invitable.name,
            self.login_url()
        );

        OutgoingEmail {
            to: invite.email.clone(),
            subject,
            text,
            delivery: DeliveryMode::Deferred,
        }
    }

    fn new_user(&self, invite: &Invitation) -> OutgoingEmail {
        let subject = format!("You're invited to join {}", invite.invitable.name);
        let text = format!(
            "You have been invited to join {}.\n\nAccept the invitation and create your account:\n{}\n",
            invite.invitable.name,
            self.signup_url(invite)
        );

        OutgoingEmail {
            to: invite.email.clone(),
            subject,
            text,
            delivery: DeliveryMode::Deferred,
        }
    }

    async fn deliver_now(&self, email: OutgoingEmail) -> Result<()> {
        #[derive(Serialize)]
        struct Payload {
            from: String,
            to: Vec<String>,
            subject: String,
            text: String,
        }

        let payload = Payload {
            from: self.from.clone(),
            to: vec![email.to],
            subject: email.subject,
            text: email.text,
        };

        let res = self
            .client
            .post("https://api.resend.com/emails")
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::MailError(format!("Mail send failed: {}", e)))?;

        if !res.status().is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::MailError(format!("Resend API error: {}", body)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Invitable, InvitableKind, Invitation};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn mailer() -> ResendMailer {
        ResendMailer::new(
            "test-key".to_string(),
            "Test <noreply@example.com>".to_string(),
            "https://app.example.com/".to_string(),
        )
    }

    fn invite(recipient_id: Option<Uuid>) -> Invitation {
        Invitation::new(
            "a@x.com".to_string(),
            Invitable::new(InvitableKind::Organization, Uuid::new_v4(), "Acme".to_string()),
            recipient_id,
            "tok123".to_string(),
            168,
        )
    }

    #[test]
    fn test_existing_user_message_links_to_login() {
        let email = mailer().existing_user(&invite(Some(Uuid::new_v4())));

        assert_eq!(email.to, "a@x.com");
        assert_eq!(email.subject, "You now have access to Acme");
        assert!(email.text.contains("https://app.example.com/login"));
        assert_eq!(email.delivery, DeliveryMode::Deferred);
    }

    #[test]
    fn test_new_user_message_carries_invite_token() {
        let email = mailer().new_user(&invite(None));

        assert_eq!(email.subject, "You're invited to join Acme");
        assert!(email.text.contains("https://app.example.com/invite/tok123"));
        assert_eq!(email.delivery, DeliveryMode::Deferred);
    }
}
