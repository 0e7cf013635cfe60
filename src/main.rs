use clap::Parser;
use dialoguer::Password;
use geogenie::api::ApiClient;
use geogenie::cli::{Cli, Commands};
use geogenie::config::Config;
use geogenie::error::{GeoError, Result};
use geogenie::flows::ScreenScope;
use geogenie::screens::{self, FeedbackArgs};
use geogenie::store::GeoStore;
use geogenie_common::{beautify_name, format_confidence, Coordinates};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Time a blocking prompt gets to notice Ctrl-C before the process exits.
const INTERRUPT_GRACE: Duration = Duration::from_millis(500);

fn init_tracing(verbose: bool) {
    let default = if verbose { "geogenie=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| GeoError::Prompt(e.to_string())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?.with_base_url(cli.api_url.clone());
    let api = ApiClient::new(&config)?;
    tracing::debug!(base_url = api.base_url(), "backend");

    // Ctrl-C cancels the running command. A prompt blocked on stdin cannot
    // observe that, so the process exits after a short grace period.
    let root = ScreenScope::new();
    let token = root.token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
            tokio::time::sleep(INTERRUPT_GRACE).await;
            eprintln!("Interrupted");
            std::process::exit(130);
        }
    });

    root.run(run(cli.command, &api, &config, &root)).await?;
    Ok(())
}

async fn run(command: Commands, api: &ApiClient, config: &Config, root: &ScreenScope) -> Result<()> {
    // Settings edits go to the file as stored, without env or flag overrides.
    let mut stored = Config::load_from(&Config::config_path()?)?;
    let mut store = GeoStore::new();

    match command {
        Commands::Login { username, password } => {
            let password = password_or_prompt(password)?;
            let payload = api.login(&username, &password).await?;
            if stored.apply_login(&payload) {
                stored.save()?;
                println!("✔ Logged in as {}", username);
            } else {
                tracing::warn!("login response carried no access token");
                println!("✔ Login accepted for {} (no session token returned)", username);
                println!("{}", serde_json::to_string_pretty(&payload)?);
            }
        }

        Commands::Register { username, password } => {
            let password = password_or_prompt(password)?;
            api.register(&username, &password).await?;
            println!("✔ Account created: {}", username);
            println!("  Log in with `geogenie login -u {}`", username);
        }

        Commands::Me => {
            let payload = api.me().await?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }

        Commands::Recognize { image, lat, lng, use_photo_location, no_prompt } => {
            println!("📷 GeoGenie - Recognize\n");
            let given = lat.zip(lng).map(|(lat, lng)| Coordinates::new(lat, lng));
            let location = screens::resolve_location(&image, given, use_photo_location)?;
            screens::recognize(api, &mut store, root, &image, location, !no_prompt).await?;
        }

        Commands::Landmarks { names } => {
            if names {
                for name in api.list_landmark_folders().await? {
                    println!("{}", name);
                }
            } else {
                let landmarks = api.list_landmarks().await?;
                println!("{} landmarks", landmarks.len());
                for landmark in &landmarks {
                    let confidence = if landmark.confidence > 0.0 {
                        format!(" ({})", format_confidence(landmark.confidence / 100.0))
                    } else {
                        String::new()
                    };
                    println!("  {}{}", beautify_name(&landmark.name), confidence);
                    if !landmark.description.is_empty() {
                        println!("      {}", landmark.description);
                    }
                }
            }
        }

        Commands::AddLandmark { name } => {
            api.add_landmark(&name).await?;
            println!("✔ Landmark added: {}", name);
        }

        Commands::Feedback { image, landmark, description, lat, lng, image_id } => {
            let args = FeedbackArgs {
                image,
                landmark,
                description,
                latitude: lat,
                longitude: lng,
                image_id,
            };
            screens::feedback(api, root, args).await?;
        }

        Commands::Chat { place, message } => {
            screens::chat(api, &mut store, root, place, message).await?;
        }

        Commands::Config { set_base_url, set_timeout, logout, show } => {
            if let Some(url) = set_base_url {
                stored.set_base_url(url)?;
                println!("✔ Base URL set to {}", stored.base_url);
            }

            if let Some(seconds) = set_timeout {
                stored.set_timeout(seconds)?;
                println!("✔ Timeout set to {}s", seconds);
            }

            if logout {
                stored.set_access_token(None)?;
                println!("✔ Logged out");
            }

            if show {
                println!("Settings:");
                println!("  Base URL: {}", stored.base_url);
                if config.base_url != stored.base_url {
                    println!("  Active override: {}", config.base_url);
                }
                println!("  Timeout: {}s", stored.timeout_seconds);
                println!("  Session: {}", if stored.access_token.is_some() { "logged in" } else { "none" });
                println!("  File: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
