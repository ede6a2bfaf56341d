//! One round-trip per call: build, execute, parse.
//!
//! # Design
//! `RecipeService` pairs the pure `RecipeClient` with a `Transport`. Each
//! method makes exactly one attempt; whatever goes wrong comes back as a
//! single normalized `ClientError`. Concurrent calls are independent: there
//! is no lock, queue or coalescing, so callers that want one request at a
//! time must enforce that themselves (see `RecipeSession`).

use tracing::{debug, warn};

use crate::client::RecipeClient;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{PreferenceRequest, Recipe, RecipeResponse};

#[derive(Debug, Clone)]
pub struct RecipeService<T = UreqTransport> {
    client: RecipeClient,
    transport: T,
}

impl RecipeService<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            RecipeClient::new(&config.base_url),
            UreqTransport::new(config.timeout),
        )
    }
}

impl<T: Transport> RecipeService<T> {
    pub fn new(client: RecipeClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &RecipeClient {
        &self.client
    }

    pub fn generate_recipe(&self, request: &PreferenceRequest) -> Result<RecipeResponse, ClientError> {
        self.generate_recipe_for(request, None)
    }

    /// Generate a recipe, passing an opaque user id for personalization.
    pub fn generate_recipe_for(
        &self,
        request: &PreferenceRequest,
        user_id: Option<&str>,
    ) -> Result<RecipeResponse, ClientError> {
        let http_request = self.client.build_generate_recipe(request, user_id)?;
        let response = self.exchange(http_request)?;
        self.client.parse_generate_recipe(response)
    }

    pub fn save_recipe(&self, recipe_id: &str, user_id: &str) -> Result<(), ClientError> {
        let http_request = self.client.build_save_recipe(recipe_id, user_id)?;
        let response = self.exchange(http_request)?;
        self.client.parse_save_recipe(response)
    }

    pub fn saved_recipes(&self, user_id: &str) -> Result<Vec<Recipe>, ClientError> {
        let response = self.exchange(self.client.build_saved_recipes(user_id))?;
        self.client.parse_saved_recipes(response)
    }

    pub fn get_recipe(&self, recipe_id: &str) -> Result<RecipeResponse, ClientError> {
        let response = self.exchange(self.client.build_get_recipe(recipe_id))?;
        self.client.parse_get_recipe(response)
    }

    pub fn health_check(&self) -> Result<(), ClientError> {
        let response = self.exchange(self.client.build_health_check())?;
        self.client.parse_health_check(response)
    }

    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        match self.transport.execute(&request) {
            Ok(response) => {
                debug!(status = response.status, url = %request.url, "received response");
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, url = %request.url, "request failed");
                Err(e.into())
            }
        }
    }
}
