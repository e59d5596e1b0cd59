pub mod message;
pub mod patient;
