use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fitrun::api::{ApiClient, PlanId, PlanProvider, SessionStore};
use fitrun::audio::player_from_config;
use fitrun::config::{save_api_token, API_URL_ENV};
use fitrun::session::SystemClock;
use fitrun::ui::install_panic_hook;
use fitrun::{report, util, App, AppServices, Config};

#[derive(Parser)]
#[command(
    name = "fitrun",
    version,
    about = "Run workout sessions from your fitness plans in the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API server URL (without /api/v1)
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Data directory (default: ~/.fitrun)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Disable audio cues
    #[arg(long, global = true)]
    no_sound: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run a workout session for a plan
    Run {
        /// Plan id
        plan_id: PlanId,
    },

    /// List saved plans
    Plans,

    /// Show a suggested plan generated from your profile
    Suggest {
        /// Save the suggestion to your plans
        #[arg(long)]
        save: bool,
    },

    /// Show session history grouped by day
    History,

    /// Store the API token in the config file
    Login {
        /// API token
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    util::init_data_dir(cli.data_dir.clone());
    init_logging()?;

    let mut config = Config::load();
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if cli.no_sound {
        config = config.with_audio_enabled(false);
    }

    match cli.command {
        Command::Run { plan_id } => run_session(config, plan_id).await,
        Command::Plans => {
            let plans = client(&config)?.list_plans().await?;
            print!("{}", report::plan_list(&plans));
            Ok(())
        }
        Command::Suggest { save } => {
            let client = client(&config)?;
            let plan = client.suggest_plan().await?;
            print!("{}", report::plan_detail(&plan));
            if save {
                let saved = client.save_plan(&plan).await?;
                match saved.id {
                    Some(id) => println!("\nSaved as plan #{}", id),
                    None => println!("\nPlan saved"),
                }
            }
            Ok(())
        }
        Command::History => {
            let sessions = client(&config)?.list_sessions().await?;
            print!("{}", report::history(&sessions));
            Ok(())
        }
        Command::Login { token } => {
            save_api_token(token.trim()).context("Failed to write config file")?;
            println!("Token saved to {}", util::config_path().display());
            Ok(())
        }
    }
}

/// Initialize logging to file (~/.fitrun/logs/fitrun.log)
fn init_logging() -> Result<()> {
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    Ok(())
}

fn client(config: &Config) -> Result<ApiClient> {
    let client = ApiClient::with_timeout(&config.api.url, config.api_timeout())?
        .with_token(config.api.token.clone());
    Ok(client)
}

async fn run_session(config: Config, plan_id: PlanId) -> Result<()> {
    let client = Arc::new(client(&config)?);
    let services = AppServices {
        plans: client.clone(),
        sessions: client,
        player: player_from_config(&config.audio),
        clock: Arc::new(SystemClock),
    };

    install_panic_hook();
    let mut app = App::new(config, plan_id, services);
    app.run().await
}
