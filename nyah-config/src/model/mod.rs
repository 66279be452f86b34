//! Typed views over config document entries.
//!
//! Parsing is lenient: scalars are coerced to strings where that is unambiguous, and an
//! entry missing a required field is dropped without an error.

pub mod grant;
pub mod keyword;
pub mod role_trigger;
mod value;

pub use grant::{GrantCommand, parse_grant_commands};
pub use keyword::{KeywordEmbedConfig, KeywordField, KeywordIndex, resolve_color};
pub use role_trigger::{RoleTrigger, parse_role_triggers};
