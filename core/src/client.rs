//! Stateless HTTP request builder and response parser for the recipe API.
//!
//! # Design
//! `RecipeClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `RecipeService` runs the exchange in between; this type
//! never does I/O.
//!
//! Every `parse_*` method maps its response onto the normalized
//! `ClientError` taxonomy: non-2xx becomes `Server` with the backend's
//! `detail`/`message` when present, and a 2xx body that does not match the
//! expected schema becomes `Unexpected`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ClientError, SERVER_ERROR_MESSAGE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{PreferenceRequest, Recipe, RecipeResponse, SaveRecipeRequest};

/// Synchronous, stateless client for the recipe API.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    base_url: String,
}

/// Borrowed form of `GenerateRecipeRequest`, so building a request does not
/// clone the preferences.
#[derive(Serialize)]
struct GenerateBody<'a> {
    preferences: &'a PreferenceRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

/// The saved-recipes route answers with either a bare array or an envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedRecipes {
    List(Vec<Recipe>),
    Envelope { recipes: Vec<Recipe> },
}

impl RecipeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_generate_recipe(
        &self,
        preferences: &PreferenceRequest,
        user_id: Option<&str>,
    ) -> Result<HttpRequest, ClientError> {
        let body = GenerateBody {
            preferences,
            user_id,
        };
        Ok(self.post("/api/generate-recipe", encode(&body)?))
    }

    pub fn build_save_recipe(
        &self,
        recipe_id: &str,
        user_id: &str,
    ) -> Result<HttpRequest, ClientError> {
        let body = SaveRecipeRequest {
            recipe_id: recipe_id.to_string(),
            user_id: user_id.to_string(),
        };
        Ok(self.post("/api/save-recipe", encode(&body)?))
    }

    pub fn build_saved_recipes(&self, user_id: &str) -> HttpRequest {
        self.get(&format!("/api/user/{}/recipes", urlencoding::encode(user_id)))
    }

    pub fn build_get_recipe(&self, recipe_id: &str) -> HttpRequest {
        self.get(&format!("/api/recipes/{}", urlencoding::encode(recipe_id)))
    }

    pub fn build_health_check(&self) -> HttpRequest {
        self.get("/health")
    }

    pub fn parse_generate_recipe(&self, response: HttpResponse) -> Result<RecipeResponse, ClientError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_save_recipe(&self, response: HttpResponse) -> Result<(), ClientError> {
        check_status(&response)
    }

    pub fn parse_saved_recipes(&self, response: HttpResponse) -> Result<Vec<Recipe>, ClientError> {
        check_status(&response)?;
        match decode(&response.body)? {
            SavedRecipes::List(recipes) | SavedRecipes::Envelope { recipes } => Ok(recipes),
        }
    }

    pub fn parse_get_recipe(&self, response: HttpResponse) -> Result<RecipeResponse, ClientError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Liveness only: any 2xx is healthy, the body is ignored.
    pub fn parse_health_check(&self, response: HttpResponse) -> Result<(), ClientError> {
        check_status(&response)
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{path}", self.base_url),
            headers: json_headers(),
            body: None,
        }
    }

    fn post(&self, path: &str, body: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{path}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        }
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode<T: Serialize>(body: &T) -> Result<String, ClientError> {
    serde_json::to_string(body).map_err(|e| {
        warn!(error = %e, "failed to serialize request body");
        ClientError::Unexpected
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "malformed response payload");
        ClientError::Unexpected
    })
}

/// Map any non-2xx status to `ClientError::Server`.
fn check_status(response: &HttpResponse) -> Result<(), ClientError> {
    if response.is_success() {
        return Ok(());
    }
    let message = server_message(&response.body);
    warn!(status = response.status, %message, "backend returned an error status");
    Err(ClientError::Server {
        status: response.status,
        message,
    })
}

/// The backend's `detail`, else its `message`, else the generic fallback.
/// Blank and non-string values are skipped.
fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "message"]
                .into_iter()
                .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
                .find(|message| !message.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string())
}
