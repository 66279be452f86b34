pub mod message;
pub mod ready;
