use nyah_config::Env;

fn main() {
    dotenvy::dotenv().ok();
    let env = Env::from_process();

    let Some(link) = nyah_bot::invite::invite_from_env(&env) else {
        eprintln!(
            "[ERREUR] APPLICATION_CLIENT_ID manquant. Ajoutez-le dans .env (ex: APPLICATION_CLIENT_ID=123456789012345678)"
        );
        std::process::exit(1);
    };

    if link.ignored_permissions.is_some() {
        eprintln!("INVITE_PERMISSIONS invalide, utilisation du set par défaut.");
    }
    println!("URL d'invitation :");
    println!("{}", link.url);
}
