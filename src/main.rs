//! ClawHealth CLI
//!
//! Command-line front end of the dashboard:
//! - Show a tab
//! - Sync watch data
//! - Add and delete food entries
//! - Update goals

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clawhealth::config::{generate_default_config, Config, LoggingConfig};
use clawhealth::view::ids;
use clawhealth::{HttpHealthApi, Tab, TerminalSurface, ViewController, ViewResult};

type View = ViewController<HttpHealthApi, TerminalSurface>;

#[derive(Parser)]
#[command(name = "clawhealth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Health dashboard for watch sync, food logging and goals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Switch to a tab and print it
    Show {
        /// dashboard, watch, food or goals
        tab: Tab,
        /// Dashboard range in days
        #[arg(long)]
        days: Option<u32>,
        /// Food day (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Upload a watch record
    Sync {
        /// When the data was recorded (YYYY-MM-DDTHH:MM, default: now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        steps: Option<i64>,
        #[arg(long)]
        heart_rate: Option<f64>,
        #[arg(long)]
        calories: Option<i64>,
        #[arg(long)]
        active_minutes: Option<i64>,
        #[arg(long)]
        sleep_hours: Option<f64>,
        #[arg(long)]
        blood_oxygen: Option<f64>,
        /// Workout type (e.g. Running)
        #[arg(long)]
        workout: Option<String>,
        /// Workout duration in minutes
        #[arg(long)]
        workout_duration: Option<i64>,
        /// Start from random demo readings; explicit flags still win
        #[arg(long)]
        demo: bool,
    },

    /// Food log
    Food {
        #[command(subcommand)]
        action: FoodCommand,
    },

    /// Daily goals
    Goals {
        #[command(subcommand)]
        action: GoalsCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum FoodCommand {
    /// Log a food entry
    Add {
        #[arg(long)]
        name: String,
        /// breakfast, lunch, dinner or snack
        #[arg(long, default_value = "breakfast")]
        meal: String,
        /// Amount in grams (default: 100)
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        calories: Option<f64>,
        #[arg(long)]
        protein: Option<f64>,
        #[arg(long)]
        carbs: Option<f64>,
        #[arg(long)]
        fat: Option<f64>,
        #[arg(long)]
        fiber: Option<f64>,
        /// Day of the entry (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a food entry by id
    Delete {
        id: i64,
        /// Day to show afterwards (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GoalsCommand {
    /// Change some goals, keeping the rest
    Set {
        #[arg(long)]
        steps: Option<i64>,
        #[arg(long)]
        calories_intake: Option<i64>,
        #[arg(long)]
        calories_burn: Option<i64>,
        #[arg(long)]
        sleep_hours: Option<f64>,
        #[arg(long)]
        active_minutes: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", config),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }

    init_logging(&config.logging);
    tracing::debug!(api = %config.api.base_url, "ClawHealth v{}", env!("CARGO_PKG_VERSION"));

    let api = HttpHealthApi::new(config.api.client_config())
        .context("failed to build HTTP client")?;
    let view = ViewController::new(api, TerminalSurface::new(), config.view.settings());

    let (tab, outcome) = run(cli.command, &view).await;
    println!("{}", view.with_surface(|s| s.render(tab)).await);

    outcome.with_context(|| format!("{} failed against {}", tab, config.api.base_url))?;
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("clawhealth={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Run a command; returns the tab to print and how the operation went
async fn run(command: Commands, view: &View) -> (Tab, ViewResult<()>) {
    match command {
        Commands::Show { tab, days, date } => {
            if let Some(days) = days {
                view.set_input(ids::DASH_DAYS, &days.to_string()).await;
            }
            if let Some(date) = date {
                view.set_input(ids::FOOD_DATE, &date).await;
            }
            (tab, view.show_tab(tab).await.map(|_| ()))
        }

        Commands::Sync {
            at,
            steps,
            heart_rate,
            calories,
            active_minutes,
            sleep_hours,
            blood_oxygen,
            workout,
            workout_duration,
            demo,
        } => {
            if demo {
                view.fill_demo_watch_form().await;
            }
            let fields = [
                (ids::SW_DATETIME, at),
                (ids::SW_STEPS, steps.map(|v| v.to_string())),
                (ids::SW_HEART_RATE, heart_rate.map(|v| v.to_string())),
                (ids::SW_CALORIES, calories.map(|v| v.to_string())),
                (ids::SW_ACTIVE, active_minutes.map(|v| v.to_string())),
                (ids::SW_SLEEP, sleep_hours.map(|v| v.to_string())),
                (ids::SW_SPO2, blood_oxygen.map(|v| v.to_string())),
                (ids::SW_WORKOUT, workout),
                (ids::SW_WORKOUT_DURATION, workout_duration.map(|v| v.to_string())),
            ];
            fill_inputs(view, fields).await;
            (Tab::Watch, view.sync_watch_data().await)
        }

        Commands::Food {
            action:
                FoodCommand::Add {
                    name,
                    meal,
                    amount,
                    calories,
                    protein,
                    carbs,
                    fat,
                    fiber,
                    date,
                },
        } => {
            let fields = [
                (ids::FOOD_NAME, Some(name)),
                (ids::FOOD_MEAL, Some(meal)),
                (ids::FOOD_AMOUNT, amount.map(|v| v.to_string())),
                (ids::FOOD_CALORIES, calories.map(|v| v.to_string())),
                (ids::FOOD_PROTEIN, protein.map(|v| v.to_string())),
                (ids::FOOD_CARBS, carbs.map(|v| v.to_string())),
                (ids::FOOD_FAT, fat.map(|v| v.to_string())),
                (ids::FOOD_FIBER, fiber.map(|v| v.to_string())),
                (ids::FOOD_DATE, date),
            ];
            fill_inputs(view, fields).await;
            (Tab::Food, view.add_food_entry().await)
        }

        Commands::Food {
            action: FoodCommand::Delete { id, date },
        } => {
            if let Some(date) = date {
                view.set_input(ids::FOOD_DATE, &date).await;
            }
            (Tab::Food, view.delete_food_entry(id).await)
        }

        Commands::Goals {
            action:
                GoalsCommand::Set {
                    steps,
                    calories_intake,
                    calories_burn,
                    sleep_hours,
                    active_minutes,
                },
        } => {
            // Current goals first, so unset flags keep their values
            if let Err(err) = view.show_tab(Tab::Goals).await {
                return (Tab::Goals, Err(err));
            }
            let fields = [
                (ids::GOAL_STEPS, steps.map(|v| v.to_string())),
                (ids::GOAL_CALORIES_IN, calories_intake.map(|v| v.to_string())),
                (ids::GOAL_CALORIES_BURN, calories_burn.map(|v| v.to_string())),
                (ids::GOAL_SLEEP, sleep_hours.map(|v| v.to_string())),
                (ids::GOAL_ACTIVE, active_minutes.map(|v| v.to_string())),
            ];
            fill_inputs(view, fields).await;
            (Tab::Goals, view.save_goals().await)
        }

        Commands::Config { .. } => (Tab::default(), Ok(())),
    }
}

async fn fill_inputs<const N: usize>(view: &View, fields: [(&str, Option<String>); N]) {
    for (id, value) in fields {
        if let Some(value) = value {
            view.set_input(id, &value).await;
        }
    }
}
