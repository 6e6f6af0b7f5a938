use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, web, App, HttpServer};
use clap::Parser;
use convoview::api::middleware::SessionGate;
use convoview::api::{routes, routes_api, templates};
use convoview::cli::{
    commands::{Cli, Commands},
    run_cli,
};
use convoview::config::{AppConfig, AuthConfig};
use sha2::{Digest, Sha512};
use tracing::{error, info, warn};

fn session_key(auth: &AuthConfig) -> Key {
    if auth.session_secret.is_empty() {
        warn!("auth.session_secret is empty, sessions will not survive a restart");
        Key::generate()
    } else {
        // Stretch the configured secret to the 64 bytes the cookie key needs
        Key::derive_from(Sha512::digest(auth.session_secret.as_bytes()).as_slice())
    }
}

// CLI commands run the synchronous query layer directly, so they must stay
// off the actix runtime; only `serve` enters it.
fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Serve) {
        run_cli(cli.command, cli.config);
        return Ok(());
    }

    serve(cli.config)
}

#[actix_web::main]
async fn serve(config_path: String) -> std::io::Result<()> {
    info!("Starting Convoview server...");

    let config = match AppConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let env = match templates::environment() {
        Ok(env) => env,
        Err(e) => {
            error!("Failed to build template environment: {}", e);
            std::process::exit(1);
        }
    };

    let key = session_key(&config.auth);
    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        // TLS terminates at the hosting panel's reverse proxy, so the
        // session cookie cannot be marked secure.
        let sessions = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_http_only(true)
            .cookie_secure(false)
            .build();

        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(env.clone()))
            .wrap(SessionGate)
            .wrap(sessions)
            .configure(routes::configure)
            .configure(routes_api::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
