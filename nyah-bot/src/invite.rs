use nyah_config::Env;
use nyah_utils::invite::{DEFAULT_SCOPES, build_invite_url, default_invite_permissions};

#[derive(Debug, PartialEq, Eq)]
pub struct InviteLink {
    pub url: String,
    /// Set when `INVITE_PERMISSIONS` was present but not an integer.
    pub ignored_permissions: Option<String>,
}

/// `None` when neither `APPLICATION_CLIENT_ID` nor `CLIENT_ID` is set.
pub fn invite_from_env(env: &Env) -> Option<InviteLink> {
    let client_id = env
        .non_empty("APPLICATION_CLIENT_ID")
        .or_else(|| env.non_empty("CLIENT_ID"))?;

    let default_permissions = default_invite_permissions().bits();
    let (permissions, ignored_permissions) = match env.non_empty("INVITE_PERMISSIONS") {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(permissions) => (permissions, None),
            Err(_) => (default_permissions, Some(raw.to_owned())),
        },
        None => (default_permissions, None),
    };

    Some(InviteLink {
        url: build_invite_url(client_id.trim(), permissions, DEFAULT_SCOPES),
        ignored_permissions,
    })
}

#[cfg(test)]
mod tests {
    use nyah_config::Env;

    use super::invite_from_env;

    #[test]
    fn requires_a_client_id() {
        assert_eq!(invite_from_env(&Env::default()), None);
    }

    #[test]
    fn client_id_fallback_and_default_permissions() {
        let link = invite_from_env(&Env::from_pairs([("CLIENT_ID", "123")])).expect("link");

        assert_eq!(
            link.url,
            "https://discord.com/api/oauth2/authorize?client_id=123&permissions=2415987776&scope=bot%20applications.commands"
        );
        assert_eq!(link.ignored_permissions, None);
    }

    #[test]
    fn invalid_permissions_fall_back() {
        let env = Env::from_pairs([("APPLICATION_CLIENT_ID", "9"), ("INVITE_PERMISSIONS", "all")]);
        let link = invite_from_env(&env).expect("link");

        assert!(link.url.contains("permissions=2415987776"));
        assert_eq!(link.ignored_permissions.as_deref(), Some("all"));
    }

    #[test]
    fn explicit_permissions_win() {
        let env = Env::from_pairs([("APPLICATION_CLIENT_ID", "9"), ("INVITE_PERMISSIONS", "8")]);

        assert!(invite_from_env(&env).expect("link").url.contains("permissions=8&"));
    }
}
