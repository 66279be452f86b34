pub mod features;
pub mod moderation;
pub mod roles;

use nyah_core::{Data, Error};

pub use features::default_registry;

/// Help-page entry for a slash command.
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    moderation::ban::META,
    moderation::kick::META,
    moderation::timeout::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        moderation::ban::ban(),
        moderation::kick::kick(),
        moderation::timeout::timeout(),
    ]
}

#[cfg(test)]
mod tests {
    use super::{COMMANDS, commands};

    #[test]
    fn slash_commands_match_their_metadata() {
        let registered = commands();

        assert_eq!(registered.len(), COMMANDS.len());
        for (command, meta) in registered.iter().zip(COMMANDS) {
            assert_eq!(command.name, meta.name);
            assert_eq!(command.description.as_deref(), Some(meta.desc));
            assert_eq!(command.category.as_deref(), Some(meta.category));
            assert!(command.slash_action.is_some());
            assert!(command.prefix_action.is_none());
        }
    }
}
