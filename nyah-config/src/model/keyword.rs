use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value::{field, loose_string, optional_string_field, string_field, truthy};

/// Color used when a config names no color or an unknown one.
pub const DEFAULT_KEYWORD_COLOR: u32 = 0;

const NAMED_COLORS: &[(&str, u32)] = &[
    ("red", 0xE7_4C_3C),
    ("blue", 0x34_98_DB),
    ("green", 0x2E_CC_71),
    ("yellow", 0xFE_E7_5C),
    ("purple", 0x9B_59_B6),
    ("gold", 0xF1_C4_0F),
    ("orange", 0xE6_7E_22),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEmbedConfig {
    pub triggers: Vec<String>,
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<KeywordField>,
    pub footer: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl KeywordEmbedConfig {
    /// `None` unless at least one non-blank trigger and a non-blank title are present.
    pub fn from_value(value: &Value) -> Option<Self> {
        let item = value.as_object()?;

        let mut triggers: Vec<String> = Vec::new();
        if let Some(Value::Array(raw_triggers)) = field(item, "triggers") {
            for raw in raw_triggers {
                let Some(text) = loose_string(raw) else {
                    continue;
                };
                let trigger = text.trim().to_lowercase();
                if !trigger.is_empty() && !triggers.contains(&trigger) {
                    triggers.push(trigger);
                }
            }
        }

        let title = string_field(item, "title").trim().to_owned();
        if triggers.is_empty() || title.is_empty() {
            return None;
        }

        let fields = match field(item, "fields") {
            Some(Value::Array(raw_fields)) => raw_fields
                .iter()
                .filter_map(Value::as_object)
                .map(|raw| KeywordField {
                    name: string_field(raw, "name"),
                    value: string_field(raw, "value"),
                    inline: field(raw, "inline").is_some_and(truthy),
                })
                .collect(),
            _ => Vec::new(),
        };

        Some(Self {
            triggers,
            title,
            description: string_field(item, "description").trim().to_owned(),
            color: resolve_color(field(item, "color")),
            fields,
            footer: optional_string_field(item, "footer"),
            image_url: optional_string_field(item, "image_url"),
            thumbnail_url: optional_string_field(item, "thumbnail_url"),
        })
    }
}

/// Resolve a config color: a 24-bit integer, a named color, or a hex string.
pub fn resolve_color(raw: Option<&Value>) -> u32 {
    match raw {
        Some(Value::Number(number)) => number
            .as_u64()
            .filter(|value| *value <= 0xFF_FF_FF)
            .map_or(DEFAULT_KEYWORD_COLOR, |value| value as u32),
        Some(Value::String(text)) => {
            let named = text.trim().to_lowercase();
            if named.is_empty() {
                return DEFAULT_KEYWORD_COLOR;
            }

            if let Some((_, value)) = NAMED_COLORS.iter().find(|(name, _)| *name == named) {
                return *value;
            }

            let hex = named.trim_start_matches('#');
            let hex = hex.strip_prefix("0x").unwrap_or(hex);
            u32::from_str_radix(hex, 16)
                .ok()
                .filter(|value| *value <= 0xFF_FF_FF)
                .unwrap_or(DEFAULT_KEYWORD_COLOR)
        }
        _ => DEFAULT_KEYWORD_COLOR,
    }
}

/// Trigger → config lookup preserving first-insertion order.
///
/// A trigger string shared by several configs points at the last one loaded, but keeps the
/// position where it was first seen.
#[derive(Clone, Debug, Default)]
pub struct KeywordIndex {
    configs: Vec<KeywordEmbedConfig>,
    triggers: Vec<(String, usize)>,
}

impl KeywordIndex {
    pub fn build(configs: Vec<KeywordEmbedConfig>) -> Self {
        let mut triggers: Vec<(String, usize)> = Vec::new();

        for (position, config) in configs.iter().enumerate() {
            for trigger in &config.triggers {
                match triggers.iter_mut().find(|(existing, _)| existing == trigger) {
                    Some(slot) => slot.1 = position,
                    None => triggers.push((trigger.clone(), position)),
                }
            }
        }

        Self { configs, triggers }
    }

    pub fn from_entries(entries: &[Value]) -> Self {
        Self::build(
            entries
                .iter()
                .filter_map(KeywordEmbedConfig::from_value)
                .collect(),
        )
    }

    pub fn config_count(&self) -> usize {
        self.configs.len()
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// First trigger (in index order) contained in the already-lowercased content.
    pub fn first_match(&self, content_lower: &str) -> Option<(&str, &KeywordEmbedConfig)> {
        self.triggers
            .iter()
            .find(|(trigger, _)| content_lower.contains(trigger.as_str()))
            .map(|(trigger, position)| (trigger.as_str(), &self.configs[*position]))
    }
}
