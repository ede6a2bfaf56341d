use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const SERVICE_NAME: &str = "Recipe Generator API";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub cuisine: String,
    pub spice_level: String,
    pub meal_type: Vec<String>,
    pub max_cooking_time: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub available_ingredients: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GenerateRequest {
    pub preferences: Preferences,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub recipe_id: String,
    pub user_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Instruction {
    pub step_number: u32,
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<u32>,
}

/// Recipes are emitted with the backend's snake-case field names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub cooking_time: u32,
    pub difficulty: String,
    pub cuisine: String,
    pub spice_level: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub user_id: Option<String>,
}

/// How the `/api` routes respond. `/health` always answers normally.
#[derive(Clone, Debug, Default)]
pub enum Behavior {
    #[default]
    Normal,
    /// Answer every `/api` route with this status and raw body.
    Fail { status: u16, body: String },
    /// Sleep before answering generate requests.
    Stall(Duration),
}

#[derive(Clone, Default)]
pub struct AppState {
    behavior: Arc<RwLock<Behavior>>,
    /// Generated recipes in creation order.
    recipes: Arc<RwLock<Vec<Recipe>>>,
    generated: Arc<RwLock<Vec<GenerateRequest>>>,
    saved: Arc<RwLock<Vec<SaveRequest>>>,
}

impl AppState {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior: Arc::new(RwLock::new(behavior)),
            ..Self::default()
        }
    }

    pub async fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.write().await = behavior;
    }

    /// Every generate request received, in arrival order.
    pub async fn generate_requests(&self) -> Vec<GenerateRequest> {
        self.generated.read().await.clone()
    }

    pub async fn saves(&self) -> Vec<SaveRequest> {
        self.saved.read().await.clone()
    }
}

pub fn app() -> Router {
    app_with_state(AppState::default())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate-recipe", post(generate_recipe))
        .route("/api/save-recipe", post(save_recipe))
        .route("/api/user/{user_id}/recipes", get(user_recipes))
        .route("/api/recipes/{recipe_id}", get(get_recipe))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, AppState::default()).await
}

pub async fn run_with_state(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

/// Short-circuit with the configured failure, if any.
async fn injected_failure(state: &AppState) -> Option<Response> {
    match &*state.behavior.read().await {
        Behavior::Fail { status, body } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Some((status, body.clone()).into_response())
        }
        _ => None,
    }
}

async fn generate_recipe(State(state): State<AppState>, Json(input): Json<GenerateRequest>) -> Response {
    info!(cuisine = %input.preferences.cuisine, "generate-recipe");
    state.generated.write().await.push(input.clone());

    let stall = match &*state.behavior.read().await {
        Behavior::Stall(delay) => Some(*delay),
        _ => None,
    };
    if let Some(delay) = stall {
        tokio::time::sleep(delay).await;
    }
    if let Some(failure) = injected_failure(&state).await {
        return failure;
    }

    let recipe = build_recipe(&input.preferences, input.user_id.clone());
    state.recipes.write().await.push(recipe.clone());

    let recommendations = recommendations(&input.preferences);
    let nlp_insights = nlp_insights(&input.preferences);
    Json(json!({
        "recipe": recipe,
        "recommendations": recommendations,
        "nlp_insights": nlp_insights,
    }))
    .into_response()
}

async fn save_recipe(State(state): State<AppState>, Json(input): Json<SaveRequest>) -> Response {
    if let Some(failure) = injected_failure(&state).await {
        return failure;
    }
    state.saved.write().await.push(input);
    Json(json!({ "status": "saved" })).into_response()
}

async fn user_recipes(State(state): State<AppState>, Path(user_id): Path<String>) -> Response {
    if let Some(failure) = injected_failure(&state).await {
        return failure;
    }
    let saved_ids: Vec<String> = state
        .saved
        .read()
        .await
        .iter()
        .filter(|s| s.user_id == user_id)
        .map(|s| s.recipe_id.clone())
        .collect();
    let recipes: Vec<Recipe> = state
        .recipes
        .read()
        .await
        .iter()
        .filter(|r| r.user_id.as_deref() == Some(user_id.as_str()) || saved_ids.contains(&r.id))
        .cloned()
        .collect();
    Json(json!({ "recipes": recipes, "user_id": user_id })).into_response()
}

async fn get_recipe(State(state): State<AppState>, Path(recipe_id): Path<String>) -> Response {
    if let Some(failure) = injected_failure(&state).await {
        return failure;
    }
    match state.recipes.read().await.iter().find(|r| r.id == recipe_id) {
        Some(recipe) => Json(json!({ "recipe": recipe })).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Recipe not found" }))).into_response(),
    }
}

/// Deterministic recipe derived from the preferences.
pub fn build_recipe(preferences: &Preferences, user_id: Option<String>) -> Recipe {
    let lead = preferences
        .available_ingredients
        .first()
        .cloned()
        .unwrap_or_else(|| "Pantry".to_string());
    let ingredients = preferences
        .available_ingredients
        .iter()
        .map(|name| Ingredient {
            name: name.clone(),
            quantity: "1 cup".to_string(),
            notes: None,
        })
        .collect();
    let steps = [
        ("Prepare all ingredients.", Some(5)),
        ("Cook everything together.", Some(cooking_minutes(&preferences.max_cooking_time) - 10)),
        ("Season to taste and serve.", None),
    ];
    let instructions = steps
        .iter()
        .enumerate()
        .map(|(i, (text, minutes))| Instruction {
            step_number: i as u32 + 1,
            instruction: text.to_string(),
            time_minutes: *minutes,
        })
        .collect();
    let mut tags = preferences.meal_type.clone();
    tags.extend(preferences.dietary_restrictions.iter().cloned());

    Recipe {
        id: Uuid::new_v4().to_string(),
        title: format!("{} {} Bowl", preferences.cuisine, capitalize(&lead)),
        description: Some(format!(
            "A {} {} dish built around {}.",
            preferences.spice_level.to_lowercase(),
            preferences.cuisine,
            preferences.available_ingredients.join(", ")
        )),
        ingredients,
        instructions,
        cooking_time: cooking_minutes(&preferences.max_cooking_time),
        difficulty: "Medium".to_string(),
        cuisine: preferences.cuisine.clone(),
        spice_level: preferences.spice_level.clone(),
        image_url: None,
        tags,
        user_id,
    }
}

fn cooking_minutes(max_cooking_time: &str) -> u32 {
    match max_cooking_time {
        "15 mins" => 15,
        "30 mins" => 30,
        "45 mins" => 45,
        _ => 60,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn recommendations(preferences: &Preferences) -> serde_json::Value {
    json!([
        {
            "title": format!("Classic {} Noodles", preferences.cuisine),
            "description": "A quick weeknight favourite.",
            "cuisine": preferences.cuisine,
            "cooking_time": 20,
        },
        {
            "title": format!("{} Street Snack", preferences.cuisine),
            "cuisine": preferences.cuisine,
            "cooking_time": 75,
        },
    ])
}

fn nlp_insights(preferences: &Preferences) -> serde_json::Value {
    let entities: Vec<serde_json::Value> = preferences
        .available_ingredients
        .iter()
        .map(|name| json!({ "text": name, "category": "Food" }))
        .collect();
    json!({
        "entities": entities,
        "key_phrases": [format!("{} cuisine", preferences.cuisine)],
        "sentiment": "positive",
    })
}
