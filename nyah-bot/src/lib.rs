pub mod events;
pub mod invite;
pub mod logging;
pub mod platform;

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};

use rustls::crypto::ring::default_provider;

use nyah_config::Env;
use nyah_core::{BotConfig, Context, Data, Error, FeatureRegistry};

const PRIVILEGED_INTENTS_HINT: &str = "Intents privilégiés manquants.\n\
Activez dans le portail développeur Discord (Application -> Bot -> Privileged Gateway Intents):\n \
- Server Members Intent (si USE_MEMBERS_INTENT=1)\n \
- Message Content Intent (obligatoire pour détecter le mot déclencheur)\n\
Ou définissez USE_MEMBERS_INTENT=0 dans votre .env pour désactiver l'intent Members si vous n'en avez pas strictement besoin.";

/// Load `.env`, start logging and install the TLS provider. Returns the environment snapshot
/// every component reads its configuration from.
pub fn bootstrap() -> anyhow::Result<Env> {
    dotenvy::dotenv().ok();
    let env = Env::from_process();

    logging::init(env.get_or("LOG_LEVEL", "info"));

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    Ok(env)
}

pub fn gateway_intents(use_members_intent: bool) -> serenity::GatewayIntents {
    let mut intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;
    if use_members_intent {
        intents |= serenity::GatewayIntents::GUILD_MEMBERS;
    }
    intents
}

/// Connect and run until the gateway closes. `registry` must already be set up.
///
/// A missing token or refused privileged intents are reported and end the bot without an
/// error, so a co-hosted admin panel keeps running.
pub async fn run_bot(env: &Env, registry: Arc<FeatureRegistry>) -> anyhow::Result<()> {
    let config = BotConfig::from_env(env);
    let Some(token) = config.token.clone() else {
        error!("DISCORD_TOKEN missing: add it to .env or export it before starting the bot");
        return Ok(());
    };

    let intents = gateway_intents(config.use_members_intent);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: nyah_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: None,
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |_ctx, _ready, _framework| {
            Box::pin(async move {
                info!("Nyah-Chan est prête !");

                Ok(Data { registry, config })
            })
        })
        .build();

    info!(
        members_intent = intents.contains(serenity::GatewayIntents::GUILD_MEMBERS),
        "connecting to discord"
    );

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    match client.start().await {
        Ok(()) => Ok(()),
        Err(serenity::Error::Gateway(serenity::GatewayError::DisallowedGatewayIntents)) => {
            error!("{PRIVILEGED_INTENTS_HINT}");
            Ok(())
        }
        Err(source) => Err(source.into()),
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Erreur de commande")
                .description("Une erreur est survenue pendant l'exécution de cette commande.")
                .color(nyah_utils::embed::DEFAULT_EMBED_COLOR);

            reply_ephemeral(ctx, poise::CreateReply::default().embed(embed)).await;
        }
        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
            let reply = poise::CreateReply::default()
                .content("Tu n'as pas la permission d'utiliser cette commande.");
            reply_ephemeral(ctx, reply).await;
        }
        poise::FrameworkError::GuildOnly { ctx, .. } => {
            let reply = poise::CreateReply::default()
                .content("Cette commande ne peut être utilisée que sur un serveur.");
            reply_ephemeral(ctx, reply).await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!("Usage: `/{}`", ctx.command().qualified_name);
            let description = match input {
                Some(input) => format!("Argument invalide: `{input}`\n{usage}"),
                None => format!("Argument manquant.\n{usage}"),
            };

            reply_ephemeral(ctx, poise::CreateReply::default().content(description)).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(error = %other, "framework error");
        }
    }
}

async fn reply_ephemeral(ctx: Context<'_>, reply: poise::CreateReply) {
    if let Err(source) = ctx.send(reply.ephemeral(true)).await {
        warn!(?source, command = %ctx.command().qualified_name, "failed to send error reply");
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            events::ready::handle_ready(ctx, data_about_bot, framework).await;
        }
        serenity::FullEvent::Message { new_message } => {
            events::message::handle_message(ctx, data, new_message).await;
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::gateway_intents;

    #[test]
    fn members_intent_is_optional() {
        let with_members = gateway_intents(true);
        let without = gateway_intents(false);

        assert!(with_members.contains(serenity::GatewayIntents::GUILD_MEMBERS));
        assert!(!without.contains(serenity::GatewayIntents::GUILD_MEMBERS));
        assert!(without.contains(
            serenity::GatewayIntents::GUILDS
                | serenity::GatewayIntents::GUILD_MESSAGES
                | serenity::GatewayIntents::MESSAGE_CONTENT
        ));
    }
}
