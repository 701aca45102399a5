pub mod invitable;
pub mod invitation;
pub mod user;

pub use invitable::{Invitable, InvitableKind};
pub use invitation::{
    CreateInvitesRequest, Invitation, InvitationInfo, InvitationStatus, InviteBatchResponse,
    StoredInvitation,
};
pub use user::{Claims, User};
