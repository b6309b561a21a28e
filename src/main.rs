use anyhow::Result;
use clap::{Parser, Subcommand};
use dream_service::app::App;
use dream_service::client::http::DEFAULT_SERVICE_URL;
use dream_service::client::{DreamClient, DreamSession, SubmitState};
use dream_service::models::Config;
use dream_service::ui;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "dream-service")]
#[command(about = "Prompt in, image out: a thin proxy to an image-generation provider")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the Dream Service (`POST /dream`).
    Serve {
        /// Port to listen on. Overrides PORT.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Serve the browser form.
    Ui {
        #[arg(long, default_value_t = ui::DEFAULT_UI_PORT)]
        port: u16,
        #[arg(long, default_value = DEFAULT_SERVICE_URL, value_parser = parse_service_url)]
        service_url: String,
    },
    /// Send one prompt and print the rendered result.
    Submit {
        prompt: String,
        #[arg(long, default_value = DEFAULT_SERVICE_URL, value_parser = parse_service_url)]
        service_url: String,
    },
}

fn parse_service_url(input: &str) -> std::result::Result<String, String> {
    let trimmed = input.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!(
            "Invalid service URL '{}'. Expected http:// or https://",
            input
        ));
    }
    if let Some(c) = trimmed
        .chars()
        .find(|&c| matches!(c, '\'' | '"' | '\\' | '<' | '>') || c.is_whitespace())
    {
        return Err(format!(
            "Invalid service URL '{}': character {:?} is not allowed",
            input, c
        ));
    }
    Ok(trimmed.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dream_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    match args.command {
        Command::Serve { port } => {
            let mut config = match Config::from_env() {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to load configuration: {}", e);
                    std::process::exit(1);
                }
            };
            if let Some(port) = port {
                config.port = port;
            }

            let app = match App::from_config(config) {
                Ok(app) => app,
                Err(e) => {
                    error!("Failed to initialize application: {}", e);
                    std::process::exit(1);
                }
            };

            info!("Starting dream service");
            app.run().await?;
        }
        Command::Ui { port, service_url } => {
            ui::run(port, &service_url).await?;
        }
        Command::Submit {
            prompt,
            service_url,
        } => {
            let mut session = DreamSession::new(DreamClient::new(service_url));
            let state = session.submit(&prompt).await.clone();
            match state {
                SubmitState::Failed(message) => {
                    error!("Dream failed: {}", message);
                    std::process::exit(1);
                }
                _ => println!("{}", session.form().result_html()),
            }
        }
    }

    Ok(())
}
