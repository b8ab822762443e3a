//! Command-line front end: the page server plus one subcommand per backend call.
//!
//! Every API command restores the session from the configured storage, runs
//! through the authenticated pipeline and prints its result as JSON on stdout.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};

use crate::client::{ApiClient, ApiError, LogNavigator};
use crate::config::{ConfigV1, print_schema};
use crate::metrics::Metrics;
use crate::models::{
    ChatContext, DateRange, FoodParseRequest, IngredientAnalysisRequest, NewBodyLog, NewFoodLog,
    NewWorkoutLog, ProfileData,
};
use crate::session::SessionStore;
use crate::startup;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("server failed: {0}")]
    Server(String),
}

#[derive(Parser, Debug)]
#[command(name = "fitlog", about = "Health tracking client and page server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the guarded pages on `bind_address`.
    Serve,
    /// Print the configuration JSON schema.
    Schema,
    /// Show the stored session without calling the backend.
    Status,
    #[command(flatten)]
    Api(ApiCommand),
}

/// Commands that go through the authenticated pipeline.
#[derive(Subcommand, Debug)]
pub enum ApiCommand {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FITLOG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FITLOG_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: String,
    },
    Logout,
    /// Fetch the current user and cache it in the session.
    Whoami,
    Profile(ProfileArgs),
    Food(FoodCommand),
    Body(BodyCommand),
    Workout(WorkoutCommand),
    Ingredient(IngredientCommand),
    Insight(InsightCommand),
    Chat {
        message: String,
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    Dashboard {
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Profile as JSON: name, age, gender, height, weight, goal, target_calories.
    #[arg(long)]
    pub data: String,
    /// Update an existing profile instead of creating one.
    #[arg(long, default_value_t = false)]
    pub update: bool,
}

#[derive(Args, Debug)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FoodSubcommand {
    Logs {
        /// Day to list, defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    Parse {
        text: String,
        #[arg(long)]
        meal_type: Option<String>,
    },
    Add {
        /// Log as JSON: date, food_items.
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct BodyCommand {
    #[command(subcommand)]
    pub command: BodySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BodySubcommand {
    Logs(RangeArgs),
    Add {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        weight_kg: f64,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WorkoutSubcommand {
    Logs(RangeArgs),
    Add {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        workout_type: String,
        #[arg(long)]
        duration_minutes: u32,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct RangeArgs {
    #[arg(long)]
    pub from: String,
    /// Defaults to today.
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Args, Debug)]
pub struct IngredientCommand {
    #[command(subcommand)]
    pub command: IngredientSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IngredientSubcommand {
    Analyze {
        text: String,
        #[arg(long)]
        goal: Option<String>,
    },
    Checks,
}

#[derive(Args, Debug)]
pub struct InsightCommand {
    #[command(subcommand)]
    pub command: InsightSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum InsightSubcommand {
    Daily {
        #[arg(long)]
        date: Option<String>,
    },
    Generate {
        #[arg(long)]
        date: Option<String>,
    },
}

/// Runs one parsed command against `config`.
pub async fn run(cli: Cli, config: ConfigV1) -> Result<(), CliError> {
    match cli.command {
        Command::Serve => startup::run(Arc::new(config))
            .await
            .map_err(|e| CliError::Server(e.to_string())),
        Command::Schema => Ok(print_schema()?),
        Command::Status => {
            let session = SessionStore::from_config(&config.session);
            let state = session.snapshot();
            print_json(&json!({
                "status": format!("{:?}", session.status()),
                "cookie": session.mirrored_cookie(),
                "user": state.user,
            }))
        }
        Command::Api(command) => {
            let client = build_client(&config)?;
            run_api(&client, command).await
        }
    }
}

fn build_client(config: &ConfigV1) -> Result<ApiClient, CliError> {
    let session = Arc::new(SessionStore::from_config(&config.session));
    Ok(ApiClient::new(
        config,
        session,
        Arc::new(LogNavigator),
        Metrics::new(),
    )?)
}

async fn run_api(client: &ApiClient, command: ApiCommand) -> Result<(), CliError> {
    match command {
        ApiCommand::Login { email, password } => {
            let destination = client.login(&email, &password).await?;
            print_json(&json!({ "destination": destination }))
        }
        ApiCommand::Register {
            email,
            password,
            name,
        } => {
            let destination = client.register(&email, &password, &name).await?;
            print_json(&json!({ "destination": destination }))
        }
        ApiCommand::Logout => {
            client.logout();
            print_json(&json!({ "status": "signed out" }))
        }
        ApiCommand::Whoami => print_json(&client.refresh_user().await?),
        ApiCommand::Profile(args) => {
            let profile: ProfileData = serde_json::from_str(&args.data)?;
            let user = if args.update {
                client.update_profile(&profile).await?
            } else {
                client.create_profile(&profile).await?
            };
            print_json(&user)
        }
        ApiCommand::Food(food) => run_food(client, food.command).await,
        ApiCommand::Body(body) => match body.command {
            BodySubcommand::Logs(range) => print_json(&client.body_logs(&range.into()).await?),
            BodySubcommand::Add {
                date,
                weight_kg,
                notes,
            } => {
                let log = NewBodyLog {
                    date: date.unwrap_or_else(today),
                    weight_kg,
                    notes,
                };
                print_json(&client.add_body_log(&log).await?)
            }
        },
        ApiCommand::Workout(workout) => match workout.command {
            WorkoutSubcommand::Logs(range) => {
                print_json(&client.workout_logs(&range.into()).await?)
            }
            WorkoutSubcommand::Add {
                date,
                workout_type,
                duration_minutes,
                notes,
            } => {
                let log = NewWorkoutLog {
                    date: date.unwrap_or_else(today),
                    workout_type,
                    duration_minutes,
                    notes,
                };
                print_json(&client.add_workout_log(&log).await?)
            }
        },
        ApiCommand::Ingredient(ingredient) => match ingredient.command {
            IngredientSubcommand::Analyze { text, goal } => {
                let request = IngredientAnalysisRequest {
                    text,
                    user_goal: goal,
                };
                print_json(&client.analyze_ingredients(&request).await?)
            }
            IngredientSubcommand::Checks => print_json(&client.ingredient_history().await?),
        },
        ApiCommand::Insight(insight) => match insight.command {
            InsightSubcommand::Daily { date } => {
                let date = date.unwrap_or_else(today);
                print_json(&client.daily_insight(&date).await?)
            }
            InsightSubcommand::Generate { date } => {
                let date = date.unwrap_or_else(today);
                print_json(&client.generate_insight(&date).await?)
            }
        },
        ApiCommand::Chat {
            message,
            page,
            date,
        } => {
            let context = (page.is_some() || date.is_some()).then_some(ChatContext { page, date });
            let mut conversation = crate::api::ChatConversation::new();
            conversation.send(client, &message, context).await?;
            print_json(&conversation.messages())
        }
        ApiCommand::Dashboard { days } => print_json(&client.dashboard(days).await?),
    }
}

async fn run_food(client: &ApiClient, command: FoodSubcommand) -> Result<(), CliError> {
    match command {
        FoodSubcommand::Logs { date } => {
            let date = date.unwrap_or_else(today);
            print_json(&client.food_logs(&date).await?)
        }
        FoodSubcommand::Parse { text, meal_type } => {
            let meal_type = meal_type
                .map(|m| serde_json::from_value(Value::String(m)))
                .transpose()?;
            let request = FoodParseRequest { text, meal_type };
            print_json(&client.parse_food(&request).await?)
        }
        FoodSubcommand::Add { data } => {
            let log: NewFoodLog = serde_json::from_str(&data)?;
            print_json(&client.add_food_log(&log).await?)
        }
        FoodSubcommand::Delete { id } => {
            client.delete_food_log(&id).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}

impl From<RangeArgs> for DateRange {
    fn from(args: RangeArgs) -> Self {
        DateRange::new(args.from, args.to.unwrap_or_else(today))
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_nested_subcommands() {
        let cli = Cli::try_parse_from(["fitlog", "body", "logs", "--from", "2024-05-01"]).unwrap();
        match cli.command {
            Command::Api(ApiCommand::Body(BodyCommand {
                command: BodySubcommand::Logs(range),
            })) => {
                let range = DateRange::from(range);
                assert_eq!(range.from, "2024-05-01");
                assert_eq!(range.to, today());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_dashboard_days_is_optional() {
        let cli = Cli::try_parse_from(["fitlog", "dashboard"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Api(ApiCommand::Dashboard { days: None })
        ));
        let cli = Cli::try_parse_from(["fitlog", "dashboard", "--days", "30"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Api(ApiCommand::Dashboard { days: Some(30) })
        ));
    }

    #[test]
    fn test_local_commands_are_not_api_commands() {
        for name in ["serve", "schema", "status"] {
            let cli = Cli::try_parse_from(["fitlog", name]).unwrap();
            assert!(!matches!(cli.command, Command::Api(_)), "{}", name);
        }
        let cli = Cli::try_parse_from(["fitlog", "logout"]).unwrap();
        assert!(matches!(cli.command, Command::Api(ApiCommand::Logout)));
    }

    #[test]
    fn test_login_requires_email() {
        assert!(Cli::try_parse_from(["fitlog", "login", "--password", "x"]).is_err());
    }
}
