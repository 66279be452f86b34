use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0xF4_8F_B1;

pub const COLOR_RED: u32 = 0xE7_4C_3C;
pub const COLOR_ORANGE: u32 = 0xE6_7E_22;
pub const COLOR_BLURPLE: u32 = 0x58_65_F2;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-neutral embed description.
///
/// Features build these so their output can be inspected in tests; the gateway adapter turns
/// them into `CreateEmbed` at send time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmbedSpec {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl EmbedSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn to_create_embed(&self) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::new();

        if let Some(title) = &self.title {
            embed = embed.title(title);
        }
        if let Some(description) = &self.description {
            embed = embed.description(description);
        }
        if let Some(color) = self.color {
            embed = embed.color(color);
        }
        for field in &self.fields {
            embed = embed.field(&field.name, &field.value, field.inline);
        }
        if let Some(footer) = &self.footer {
            embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
        }
        if let Some(url) = &self.image_url {
            embed = embed.image(url);
        }
        if let Some(url) = &self.thumbnail_url {
            embed = embed.thumbnail(url);
        }

        embed
    }
}
