//! The submit-and-display workflow around a single recipe view.
//!
//! # Design
//! A session owns the recipe currently on screen and the state of the most
//! recent request. A failed request never clears the recipe already being
//! displayed; only a new success or an explicit `reset` replaces it.
//! Validation failures are resolved before anything is sent.

use tracing::{debug, info};

use crate::error::ClientError;
use crate::preferences::PreferenceForm;
use crate::service::RecipeService;
use crate::transport::Transport;
use crate::types::RecipeResponse;

/// Lifecycle of one generate request.
///
/// `InFlight` only holds for the duration of `RecipeSession::generate`,
/// which borrows the session mutably, so a second submission cannot start
/// while one is running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed(ClientError),
}

#[derive(Debug, Default)]
pub struct RecipeSession {
    state: RequestState,
    current: Option<RecipeResponse>,
    user_id: Option<String>,
}

impl RecipeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an opaque user id that is sent with every generate request.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// The recipe on display, if any.
    pub fn current(&self) -> Option<&RecipeResponse> {
        self.current.as_ref()
    }

    /// Submit `form` and, if it validates, request a recipe through
    /// `service`.
    ///
    /// Validation errors are returned without changing the request state.
    /// On success the new recipe replaces the displayed one; on failure the
    /// displayed recipe is kept and the state records the error.
    pub fn generate<T: Transport>(
        &mut self,
        service: &RecipeService<T>,
        form: &PreferenceForm,
    ) -> Result<&RecipeResponse, ClientError> {
        let request = form.submit()?;

        self.state = RequestState::InFlight;
        debug!(cuisine = %request.cuisine, ingredients = request.available_ingredients.len(), "generating recipe");

        match service.generate_recipe_for(&request, self.user_id.as_deref()) {
            Ok(response) => {
                info!(title = %response.recipe.title, "recipe generated");
                self.state = RequestState::Succeeded;
                Ok(self.current.insert(response))
            }
            Err(e) => {
                self.state = RequestState::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Drop the displayed recipe and return to `Idle`.
    pub fn reset(&mut self) {
        self.state = RequestState::Idle;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::client::RecipeClient;
    use crate::http::{HttpRequest, HttpResponse};
    use crate::preferences::Constraint;
    use crate::transport::TransportError;
    use crate::types::{CookingTime, Cuisine, MealType, SpiceLevel};

    const RECIPE: &str = r#"{"recipe":{"title":"Miso Soup","cooking_time":15,"difficulty":"Easy",
        "cuisine":"Japanese","spice_level":"Mild","ingredients":[],"instructions":[]}}"#;

    /// Answers with `responses` in order and counts calls.
    struct Canned {
        responses: Vec<Result<(u16, &'static str), ()>>,
        calls: Cell<usize>,
    }

    impl Canned {
        fn new(responses: Vec<Result<(u16, &'static str), ()>>) -> Self {
            Self {
                responses,
                calls: Cell::new(0),
            }
        }
    }

    impl Transport for Canned {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let index = self.calls.get();
            self.calls.set(index + 1);
            match self.responses[index] {
                Ok((status, body)) => Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                }),
                Err(()) => Err(TransportError::NoResponse("timed out".to_string())),
            }
        }
    }

    fn form() -> PreferenceForm {
        let mut form = PreferenceForm::new();
        form.set_cuisine(Some(Cuisine::Japanese));
        form.set_spice_level(Some(SpiceLevel::Mild));
        form.set_meal_type(MealType::Lunch, true);
        form.set_max_cooking_time(Some(CookingTime::Minutes15));
        form.add_ingredient("tofu");
        form
    }

    #[test]
    fn starts_idle_and_empty() {
        let session = RecipeSession::new();
        assert_eq!(session.state(), &RequestState::Idle);
        assert!(session.current().is_none());
    }

    #[test]
    fn invalid_form_never_reaches_transport() {
        let transport = Canned::new(Vec::new());
        let service = RecipeService::new(RecipeClient::new("http://backend"), &transport);
        let mut session = RecipeSession::new();

        let mut form = form();
        form.remove_ingredient(0);
        let err = session.generate(&service, &form).unwrap_err();

        match err {
            ClientError::Validation(v) => assert!(v.contains(Constraint::IngredientsRequired)),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(transport.calls.get(), 0);
        assert_eq!(session.state(), &RequestState::Idle);
    }

    #[test]
    fn success_stores_recipe() {
        let transport = Canned::new(vec![Ok((200, RECIPE))]);
        let service = RecipeService::new(RecipeClient::new("http://backend"), &transport);
        let mut session = RecipeSession::new();

        let title = session.generate(&service, &form()).unwrap().recipe.title.clone();
        assert_eq!(title, "Miso Soup");
        assert_eq!(session.state(), &RequestState::Succeeded);
        assert!(session.current().is_some());
    }

    #[test]
    fn failure_keeps_previous_recipe() {
        let transport = Canned::new(vec![Ok((200, RECIPE)), Err(()), Ok((500, r#"{"detail":"down"}"#))]);
        let service = RecipeService::new(RecipeClient::new("http://backend"), &transport);
        let mut session = RecipeSession::new();

        session.generate(&service, &form()).unwrap();

        let err = session.generate(&service, &form()).unwrap_err();
        assert_eq!(err, ClientError::Connectivity);
        assert_eq!(session.state(), &RequestState::Failed(ClientError::Connectivity));
        assert_eq!(session.current().unwrap().recipe.title, "Miso Soup");

        let err = session.generate(&service, &form()).unwrap_err();
        assert_eq!(err.to_string(), "down");
        assert_eq!(session.current().unwrap().recipe.title, "Miso Soup");
        assert_eq!(transport.calls.get(), 3);
    }

    #[test]
    fn reset_discards_recipe() {
        let transport = Canned::new(vec![Ok((200, RECIPE))]);
        let service = RecipeService::new(RecipeClient::new("http://backend"), &transport);
        let mut session = RecipeSession::new();

        session.generate(&service, &form()).unwrap();
        session.reset();
        assert_eq!(session.state(), &RequestState::Idle);
        assert!(session.current().is_none());
    }
}
