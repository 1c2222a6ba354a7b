pub mod channel;
pub mod content;
pub mod coordinator;
pub mod message;
pub mod popup;
