pub mod resend;

pub use resend::ResendMailer;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Invitation;

/// How a composed message should leave the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Hand off to a background task and return immediately.
    Deferred,
    /// Send in-line before returning.
    Immediate,
}

/// A composed notification, ready for delivery
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub delivery: DeliveryMode,
}

/// Mailer capability used by the invite processor.
///
/// `existing_user` / `new_user` compose the notification for the two
/// recipient situations; `deliver_now` performs the transport call. Each
/// implementation resolves the `DeliveryMode` once per message.
#[async_trait]
pub trait InviteMailer: Send + Sync {
    /// Notification for a recipient who already has an account.
    fn existing_user(&self, invite: &Invitation) -> OutgoingEmail;

    /// Notification for a recipient without an account yet.
    fn new_user(&self, invite: &Invitation) -> OutgoingEmail;

    /// Perform the transport call for one message.
    async fn deliver_now(&self, email: OutgoingEmail) -> Result<()>;
}
