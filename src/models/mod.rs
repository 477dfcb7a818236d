pub mod downtime;
pub mod error_event;
pub mod event_kind;
pub mod message;
pub mod record;
