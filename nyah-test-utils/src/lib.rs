//! Nyah Test Utils
//!
//! In-memory stand-ins for the chat platform and the LLM backend, plus a message builder,
//! so feature behavior can be asserted without a gateway connection.
//!
//! ```rust,ignore
//! let platform = MockPlatform::new().with_role(1, "Fan", 2);
//! let message = MessageBuilder::new("say miwa now").build();
//! feature.on_message(&platform, &message).await?;
//! assert_eq!(platform.calls(), vec![...]);
//! ```

pub mod backend;
pub mod message;
pub mod platform;

pub use backend::ScriptedBackend;
pub use message::{AUTHOR_ID, BOT_ID, CHANNEL_ID, GUILD_ID, MESSAGE_ID, MessageBuilder};
pub use platform::{Call, MockPlatform, Op};
