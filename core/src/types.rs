//! Domain DTOs for the recipe generation API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate. Integration tests catch any schema drift between
//! the two.
//!
//! Preference values are closed enumerations that serialize to the exact
//! label strings the backend expects. Recipe payloads are parsed strictly:
//! a missing required field or a `step_number` of zero fails
//! deserialization instead of producing a half-filled recipe.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned by `FromStr` when a string matches none of an enum's labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in the order the form presents them.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire and display label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            /// Matches a label case-insensitively, ignoring surrounding whitespace.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownLabel {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

label_enum! {
    /// Preferred cuisine.
    Cuisine("cuisine") {
        Indian => "Indian",
        Italian => "Italian",
        Asian => "Asian",
        Mexican => "Mexican",
        Mediterranean => "Mediterranean",
        American => "American",
        Thai => "Thai",
        Chinese => "Chinese",
        Japanese => "Japanese",
        Korean => "Korean",
    }
}

label_enum! {
    SpiceLevel("spice level") {
        Mild => "Mild",
        Medium => "Medium",
        Spicy => "Spicy",
        ExtraSpicy => "Extra Spicy",
    }
}

label_enum! {
    MealType("meal type") {
        Breakfast => "Breakfast",
        Lunch => "Lunch",
        Dinner => "Dinner",
        Snack => "Snack",
    }
}

label_enum! {
    /// Upper bound on total cooking time.
    CookingTime("cooking time") {
        Minutes15 => "15 mins",
        Minutes30 => "30 mins",
        Minutes45 => "45 mins",
        Minutes60Plus => "60+ mins",
    }
}

label_enum! {
    DietaryRestriction("dietary restriction") {
        Vegetarian => "Vegetarian",
        Vegan => "Vegan",
        GlutenFree => "Gluten-Free",
        DairyFree => "Dairy-Free",
        NutFree => "Nut-Free",
        Halal => "Halal",
        Kosher => "Kosher",
    }
}

/// A validated set of recipe constraints, produced by
/// `PreferenceForm::submit` and sent as the `preferences` member of the
/// generate-recipe body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRequest {
    pub cuisine: Cuisine,
    pub spice_level: SpiceLevel,
    pub meal_type: Vec<MealType>,
    pub max_cooking_time: CookingTime,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub available_ingredients: Vec<String>,
}

/// Wire body of `POST /api/generate-recipe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRecipeRequest {
    pub preferences: PreferenceRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Wire body of `POST /api/save-recipe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecipeRequest {
    pub recipe_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One cooking step. Steps are kept in the order the backend sent them;
/// `step_number` is displayed as received and never renumbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub step_number: NonZeroU32,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<u32>,
}

/// A generated recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Opaque backend identifier, used when saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "imageUrl",
        alias = "image_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    /// Total time in minutes.
    pub cooking_time: u32,
    pub difficulty: String,
    pub cuisine: String,
    pub spice_level: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_info: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Lightweight view of a recommended recipe. The backend sends full
/// recipes here; only the displayed fields are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cuisine: String,
    pub cooking_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NlpInsights {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub key_phrases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
}

/// Successful payload of `POST /api/generate-recipe` and
/// `GET /api/recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipe: Recipe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<RecipeSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nlp_insights: Option<NlpInsights>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_serialize_verbatim() {
        assert_eq!(serde_json::to_value(SpiceLevel::ExtraSpicy).unwrap(), "Extra Spicy");
        assert_eq!(serde_json::to_value(CookingTime::Minutes60Plus).unwrap(), "60+ mins");
        assert_eq!(serde_json::to_value(DietaryRestriction::GlutenFree).unwrap(), "Gluten-Free");
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("extra spicy".parse::<SpiceLevel>().unwrap(), SpiceLevel::ExtraSpicy);
        assert_eq!(" ITALIAN ".parse::<Cuisine>().unwrap(), Cuisine::Italian);
        assert_eq!("30 mins".parse::<CookingTime>().unwrap(), CookingTime::Minutes30);
    }

    #[test]
    fn from_str_rejects_unknown_label() {
        let err = "French".parse::<Cuisine>().unwrap_err();
        assert_eq!(err.kind, "cuisine");
        assert_eq!(err.to_string(), r#"unknown cuisine: "French""#);
    }

    #[test]
    fn all_lists_every_label_once() {
        assert_eq!(Cuisine::ALL.len(), 10);
        assert_eq!(SpiceLevel::ALL.len(), 4);
        assert_eq!(MealType::ALL.len(), 4);
        assert_eq!(CookingTime::ALL.len(), 4);
        assert_eq!(DietaryRestriction::ALL.len(), 7);
        for value in DietaryRestriction::ALL {
            assert_eq!(value.label().parse::<DietaryRestriction>().unwrap(), *value);
        }
    }

    #[test]
    fn preference_request_uses_camel_case_names() {
        let request = PreferenceRequest {
            cuisine: Cuisine::Thai,
            spice_level: SpiceLevel::Spicy,
            meal_type: vec![MealType::Lunch],
            max_cooking_time: CookingTime::Minutes15,
            dietary_restrictions: vec![DietaryRestriction::Vegan],
            available_ingredients: vec!["tofu".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["spiceLevel"], "Spicy");
        assert_eq!(json["mealType"][0], "Lunch");
        assert_eq!(json["maxCookingTime"], "15 mins");
        assert_eq!(json["dietaryRestrictions"][0], "Vegan");
        assert_eq!(json["availableIngredients"][0], "tofu");
    }

    #[test]
    fn user_id_is_omitted_when_absent() {
        let body = GenerateRecipeRequest {
            preferences: PreferenceRequest {
                cuisine: Cuisine::Korean,
                spice_level: SpiceLevel::Mild,
                meal_type: vec![MealType::Dinner],
                max_cooking_time: CookingTime::Minutes45,
                dietary_restrictions: Vec::new(),
                available_ingredients: vec!["rice".to_string()],
            },
            user_id: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("user_id").is_none());
        assert_eq!(json["preferences"]["cuisine"], "Korean");
    }

    const MINIMAL_RECIPE: &str = r#"{
        "title": "Pasta",
        "cooking_time": 20,
        "difficulty": "Easy",
        "cuisine": "Italian",
        "spice_level": "Mild",
        "ingredients": [{"name": "pasta", "quantity": "200 g"}],
        "instructions": [{"step_number": 1, "instruction": "Boil."}]
    }"#;

    #[test]
    fn recipe_optional_fields_default() {
        let recipe: Recipe = serde_json::from_str(MINIMAL_RECIPE).unwrap();
        assert!(recipe.tags.is_empty());
        assert!(recipe.description.is_none());
        assert!(recipe.image_url.is_none());
        assert!(recipe.ingredients[0].notes.is_none());
        assert!(recipe.instructions[0].time_minutes.is_none());
    }

    #[test]
    fn image_url_accepts_both_spellings() {
        let mut json: serde_json::Value = serde_json::from_str(MINIMAL_RECIPE).unwrap();
        json["image_url"] = "https://img/a.png".into();
        let recipe: Recipe = serde_json::from_value(json).unwrap();
        assert_eq!(recipe.image_url.as_deref(), Some("https://img/a.png"));

        let out = serde_json::to_value(&recipe).unwrap();
        assert_eq!(out["imageUrl"], "https://img/a.png");
        assert!(out.get("image_url").is_none());

        let mut json: serde_json::Value = serde_json::from_str(MINIMAL_RECIPE).unwrap();
        json["imageUrl"] = "https://img/b.png".into();
        let recipe: Recipe = serde_json::from_value(json).unwrap();
        assert_eq!(recipe.image_url.as_deref(), Some("https://img/b.png"));
    }

    #[test]
    fn recipe_rejects_zero_step_number() {
        let json = MINIMAL_RECIPE.replace(r#""step_number": 1"#, r#""step_number": 0"#);
        assert!(serde_json::from_str::<Recipe>(&json).is_err());
    }

    #[test]
    fn recipe_rejects_missing_title() {
        let json = MINIMAL_RECIPE.replace(r#""title": "Pasta","#, "");
        assert!(serde_json::from_str::<Recipe>(&json).is_err());
    }

    #[test]
    fn nlp_insights_members_default() {
        let insights: NlpInsights = serde_json::from_str(r#"{"sentiment":"positive"}"#).unwrap();
        assert!(insights.entities.is_empty());
        assert!(insights.key_phrases.is_empty());
        assert_eq!(insights.sentiment.as_deref(), Some("positive"));
    }
}
