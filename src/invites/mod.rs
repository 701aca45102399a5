pub mod hooks;
pub mod processor;

pub use hooks::{DefaultHooks, InviteHooks};
pub use processor::InviteBatchProcessor;
