// Host module
// Outbound message boundary to the host design application

pub mod messages;
pub mod notifier;

pub use messages::HostMessage;
pub use notifier::{log_outbound, HostNotifier};
