//! Terminal front-end for the recipe generator.
//!
//! Flags play the part of the preference form: they are fed through
//! `PreferenceForm` exactly as a user would fill it in, so blank and
//! duplicate ingredients are dropped and missing fields are reported per
//! field before anything is sent.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use recipe_core::config::{parse_base_url, parse_timeout};
use recipe_core::render::{format_minutes, render_response};
use recipe_core::{
    ClientConfig, ClientError, ConfigError, CookingTime, Cuisine, DietaryRestriction, MealType, PreferenceForm,
    RecipeService, RecipeSession, SpiceLevel,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recipe")]
#[command(about = "Generate recipes from your preferences and pantry", long_about = None)]
struct Cli {
    /// Recipe API base URL (overrides RECIPE_API_URL)
    #[arg(long, global = true, value_parser = parse_base_url_arg)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides RECIPE_API_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = parse_timeout_arg)]
    timeout_secs: Option<Duration>,

    /// Print raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a recipe
    Generate(GenerateArgs),
    /// Save a recipe to a user's favorites
    Save {
        #[arg(long)]
        recipe_id: String,
        #[arg(long)]
        user_id: String,
    },
    /// List a user's saved recipes
    Saved {
        #[arg(long)]
        user_id: String,
    },
    /// Show a recipe by id
    Show {
        #[arg(long)]
        recipe_id: String,
    },
    /// Check that the backend is up
    Health,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long)]
    cuisine: Option<Cuisine>,
    #[arg(long)]
    spice_level: Option<SpiceLevel>,
    /// Repeat for several meal types
    #[arg(long = "meal-type")]
    meal_types: Vec<MealType>,
    /// One of "15 mins", "30 mins", "45 mins", "60+ mins"
    #[arg(long)]
    max_cooking_time: Option<CookingTime>,
    /// Repeat for several restrictions
    #[arg(long = "diet")]
    dietary_restrictions: Vec<DietaryRestriction>,
    /// Repeat for each ingredient you have
    #[arg(long = "ingredient")]
    ingredients: Vec<String>,
    /// Opaque user id for personalization
    #[arg(long)]
    user_id: Option<String>,
}

impl GenerateArgs {
    fn to_form(&self) -> PreferenceForm {
        let mut form = PreferenceForm::new();
        form.set_cuisine(self.cuisine);
        form.set_spice_level(self.spice_level);
        form.set_max_cooking_time(self.max_cooking_time);
        for meal_type in &self.meal_types {
            form.set_meal_type(*meal_type, true);
        }
        for restriction in &self.dietary_restrictions {
            form.set_dietary_restriction(*restriction, true);
        }
        for ingredient in &self.ingredients {
            if !form.add_ingredient(ingredient) {
                debug!(%ingredient, "skipping blank or duplicate ingredient");
            }
        }
        form
    }
}

fn parse_timeout_arg(raw: &str) -> Result<Duration, String> {
    parse_timeout(raw).map_err(|e| e.to_string())
}

fn parse_base_url_arg(raw: &str) -> Result<String, String> {
    parse_base_url(raw).map_err(|e| e.to_string())
}

/// Flags win; a variable is only read when its flag is absent.
fn load_config(
    cli: &Cli,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, ConfigError> {
    ClientConfig::with_overrides(cli.base_url.as_deref(), cli.timeout_secs, lookup)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Validation errors are listed per field; everything else is one line.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Validation(validation)) => {
            for (field, message) in validation.field_messages() {
                eprintln!("{field}: {message}");
            }
        }
        _ => eprintln!("error: {err}"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli, |name| std::env::var(name).ok())?;
    debug!(base_url = %config.base_url, timeout = ?config.timeout, "client configured");

    let service = RecipeService::from_config(&config);

    match cli.command {
        Commands::Generate(args) => {
            let mut session = RecipeSession::new();
            if let Some(user_id) = &args.user_id {
                session = session.with_user_id(user_id.clone());
            }
            let response = session.generate(&service, &args.to_form())?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(response)?);
            } else {
                print!("{}", render_response(response));
            }
        }
        Commands::Save { recipe_id, user_id } => {
            service.save_recipe(&recipe_id, &user_id)?;
            println!("Saved {recipe_id}");
        }
        Commands::Saved { user_id } => {
            let recipes = service.saved_recipes(&user_id)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&recipes)?);
            } else if recipes.is_empty() {
                println!("No saved recipes");
            } else {
                for recipe in &recipes {
                    let id = recipe.id.as_deref().unwrap_or("-");
                    println!("{id}  {} ({})", recipe.title, format_minutes(recipe.cooking_time));
                }
            }
        }
        Commands::Show { recipe_id } => {
            let response = service.get_recipe(&recipe_id)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", render_response(&response));
            }
        }
        Commands::Health => {
            service.health_check()?;
            println!("ok");
        }
    }

    Ok(())
}
