//! Client core for the recipe generation service.
//!
//! # Overview
//! Collects recipe preferences into a validated request, sends it to the
//! recipe backend, and hands back a typed recipe or one normalized error.
//!
//! # Design
//! - `PreferenceForm` owns form state and produces a `PreferenceRequest`;
//!   it never touches the network.
//! - `RecipeClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`, so the I/O boundary is explicit.
//! - `Transport` executes the exchange; `UreqTransport` is the blocking
//!   production implementation with a global per-request timeout.
//! - `RecipeService` runs build, execute, parse once per call.
//! - `RecipeSession` is the calling workflow: it keeps the displayed recipe
//!   across failed attempts.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod preferences;
pub mod render;
pub mod service;
pub mod session;
pub mod transport;
pub mod types;

pub use client::RecipeClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use preferences::{Constraint, PreferenceForm};
pub use service::RecipeService;
pub use session::{RecipeSession, RequestState};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{
    CookingTime, Cuisine, DietaryRestriction, Entity, GenerateRecipeRequest, Ingredient,
    Instruction, MealType, NlpInsights, PreferenceRequest, Recipe, RecipeResponse, RecipeSummary,
    SaveRecipeRequest, SpiceLevel, UnknownLabel,
};
