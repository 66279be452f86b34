use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value::{field, loose_u64, optional_string_field, string_field};
use crate::env::Env;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantCommand {
    pub name: String,
    pub allowed_user_ids: Vec<u64>,
    pub role_name: String,
    pub gif_path: Option<String>,
}

impl GrantCommand {
    pub fn from_value(value: &Value) -> Option<Self> {
        let item = value.as_object()?;

        let name = string_field(item, "name").trim().to_lowercase();
        let role_name = string_field(item, "role_name").trim().to_owned();
        let gif_path = optional_string_field(item, "gif_path").filter(|path| !path.is_empty());

        let mut allowed_user_ids = Vec::new();
        if let Some(Value::Array(raw_ids)) = field(item, "allowed_user_ids") {
            for id in raw_ids.iter().filter_map(loose_u64) {
                if !allowed_user_ids.contains(&id) {
                    allowed_user_ids.push(id);
                }
            }
        }

        if name.is_empty() || role_name.is_empty() || allowed_user_ids.is_empty() {
            return None;
        }

        Some(Self {
            name,
            allowed_user_ids,
            role_name,
            gif_path,
        })
    }

    /// Single command from `GRANT_CMD_NAME`, `GRANT_ROLE_NAME`, `GRANT_GIF_PATH` and
    /// `GRANT_ALLOWED_USER_IDS` (or `GRANT_USER_ID`). One bad id discards the fallback.
    pub fn from_env_fallback(env: &Env) -> Option<Self> {
        let name = env.get("GRANT_CMD_NAME").filter(|raw| !raw.is_empty())?;
        let role_name = env.get("GRANT_ROLE_NAME").filter(|raw| !raw.is_empty())?;
        let raw_ids = env
            .get("GRANT_ALLOWED_USER_IDS")
            .filter(|raw| !raw.is_empty())
            .or_else(|| env.get("GRANT_USER_ID").filter(|raw| !raw.is_empty()))?;

        let allowed_user_ids = raw_ids
            .split(',')
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        if allowed_user_ids.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_lowercase(),
            allowed_user_ids,
            role_name: role_name.to_owned(),
            gif_path: env
                .get("GRANT_GIF_PATH")
                .filter(|raw| !raw.is_empty())
                .map(str::to_owned),
        })
    }

    pub fn allows(&self, user_id: u64) -> bool {
        self.allowed_user_ids.contains(&user_id)
    }
}

pub fn parse_grant_commands(entries: &[Value]) -> Vec<GrantCommand> {
    entries.iter().filter_map(GrantCommand::from_value).collect()
}
