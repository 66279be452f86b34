use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value::{field, string_field, truthy};
use crate::env::Env;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTrigger {
    pub trigger: String,
    pub role_name: String,
    pub remove_trigger: Option<String>,
}

impl RoleTrigger {
    /// Lowercases both trigger strings; `None` when `trigger` or `role_name` is empty.
    pub fn from_value(value: &Value) -> Option<Self> {
        let item = value.as_object()?;

        let trigger = string_field(item, "trigger").to_lowercase();
        let role_name = string_field(item, "role_name").trim().to_owned();
        let remove_trigger = field(item, "remove_trigger")
            .filter(|raw| truthy(raw))
            .map(|_| string_field(item, "remove_trigger").to_lowercase())
            .filter(|raw| !raw.is_empty());

        if trigger.is_empty() || role_name.is_empty() {
            return None;
        }

        Some(Self {
            trigger,
            role_name,
            remove_trigger,
        })
    }

    /// Single trigger built from `TRIGGER_WORD`, `ROLE_NAME` and `REMOVE_TRIGGER`.
    pub fn from_env_fallback(env: &Env) -> Option<Self> {
        let trigger = env.get("TRIGGER_WORD").filter(|raw| !raw.is_empty())?;
        let role_name = env.get("ROLE_NAME").filter(|raw| !raw.is_empty())?;
        let remove_trigger = env
            .get("REMOVE_TRIGGER")
            .filter(|raw| !raw.is_empty())
            .map(str::to_lowercase);

        Some(Self {
            trigger: trigger.to_lowercase(),
            role_name: role_name.to_owned(),
            remove_trigger,
        })
    }
}

pub fn parse_role_triggers(entries: &[Value]) -> Vec<RoleTrigger> {
    entries.iter().filter_map(RoleTrigger::from_value).collect()
}
