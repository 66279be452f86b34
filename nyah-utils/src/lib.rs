/// Shared embed value type and its serenity conversion.
pub mod embed;
/// Bot invite URL builder.
pub mod invite;
/// Pure parser helpers for message content.
pub mod parse;
/// Permission and role hierarchy helpers.
pub mod permissions;
/// Default message-command prefix when `PREFIX` is unset.
pub const DEFAULT_COMMAND_PREFIX: &str = "!";
