//! Preference collection: form state, ingredient list, validation.
//!
//! # Design
//! `PreferenceForm` is the whole form as one serializable value. Every
//! change goes through a method on it, so the invariants that matter for
//! submission (no duplicate ingredients, no blank ingredients, set-valued
//! fields without repeats) hold no matter how the caller drives it. The form
//! never touches the network; `submit` only produces a `PreferenceRequest`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{
    CookingTime, Cuisine, DietaryRestriction, MealType, PreferenceRequest, SpiceLevel,
};

/// A required-field rule the form does not yet satisfy. Ordered as the
/// fields appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Constraint {
    CuisineRequired,
    SpiceLevelRequired,
    MealTypeRequired,
    MaxCookingTimeRequired,
    IngredientsRequired,
}

impl Constraint {
    /// Wire name of the offending field.
    pub fn field(self) -> &'static str {
        match self {
            Constraint::CuisineRequired => "cuisine",
            Constraint::SpiceLevelRequired => "spiceLevel",
            Constraint::MealTypeRequired => "mealType",
            Constraint::MaxCookingTimeRequired => "maxCookingTime",
            Constraint::IngredientsRequired => "availableIngredients",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Constraint::CuisineRequired => "Please select a cuisine preference",
            Constraint::SpiceLevelRequired => "Please select a spice level",
            Constraint::MealTypeRequired => "Please select at least one meal type",
            Constraint::MaxCookingTimeRequired => "Please select maximum cooking time",
            Constraint::IngredientsRequired => "Please enter your available ingredients",
        }
    }
}

/// In-progress recipe preferences.
///
/// Deserialized state is replayed through the setters and `add_ingredient`,
/// so a stored form obeys the same list rules as one filled in by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredForm")]
pub struct PreferenceForm {
    cuisine: Option<Cuisine>,
    spice_level: Option<SpiceLevel>,
    meal_type: Vec<MealType>,
    max_cooking_time: Option<CookingTime>,
    dietary_restrictions: Vec<DietaryRestriction>,
    available_ingredients: Vec<String>,
}

impl PreferenceForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cuisine(&self) -> Option<Cuisine> {
        self.cuisine
    }

    pub fn set_cuisine(&mut self, cuisine: Option<Cuisine>) {
        self.cuisine = cuisine;
    }

    pub fn spice_level(&self) -> Option<SpiceLevel> {
        self.spice_level
    }

    pub fn set_spice_level(&mut self, spice_level: Option<SpiceLevel>) {
        self.spice_level = spice_level;
    }

    pub fn max_cooking_time(&self) -> Option<CookingTime> {
        self.max_cooking_time
    }

    pub fn set_max_cooking_time(&mut self, max_cooking_time: Option<CookingTime>) {
        self.max_cooking_time = max_cooking_time;
    }

    /// Selected meal types, in selection order.
    pub fn meal_types(&self) -> &[MealType] {
        &self.meal_type
    }

    /// Checkbox semantics: selects or deselects one meal type.
    pub fn set_meal_type(&mut self, meal_type: MealType, selected: bool) {
        toggle(&mut self.meal_type, meal_type, selected);
    }

    pub fn dietary_restrictions(&self) -> &[DietaryRestriction] {
        &self.dietary_restrictions
    }

    pub fn set_dietary_restriction(&mut self, restriction: DietaryRestriction, selected: bool) {
        toggle(&mut self.dietary_restrictions, restriction, selected);
    }

    /// Ingredients in entry order.
    pub fn ingredients(&self) -> &[String] {
        &self.available_ingredients
    }

    /// Append a trimmed ingredient. Returns `false` and leaves the list
    /// untouched when the trimmed text is empty or already present
    /// (case-sensitive).
    pub fn add_ingredient(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.available_ingredients.iter().any(|i| i == trimmed) {
            return false;
        }
        self.available_ingredients.push(trimmed.to_string());
        true
    }

    /// Remove the ingredient at `index`. Out-of-bounds indices are ignored.
    pub fn remove_ingredient(&mut self, index: usize) -> Option<String> {
        if index < self.available_ingredients.len() {
            Some(self.available_ingredients.remove(index))
        } else {
            None
        }
    }

    /// Unmet required-field constraints. Empty means the form can be
    /// submitted.
    pub fn validate(&self) -> BTreeSet<Constraint> {
        let mut unmet = BTreeSet::new();
        if self.cuisine.is_none() {
            unmet.insert(Constraint::CuisineRequired);
        }
        if self.spice_level.is_none() {
            unmet.insert(Constraint::SpiceLevelRequired);
        }
        if self.meal_type.is_empty() {
            unmet.insert(Constraint::MealTypeRequired);
        }
        if self.max_cooking_time.is_none() {
            unmet.insert(Constraint::MaxCookingTimeRequired);
        }
        if self.available_ingredients.is_empty() {
            unmet.insert(Constraint::IngredientsRequired);
        }
        unmet
    }

    /// Build the request to send, or report every unmet constraint.
    pub fn submit(&self) -> Result<PreferenceRequest, ValidationError> {
        match (self.cuisine, self.spice_level, self.max_cooking_time) {
            (Some(cuisine), Some(spice_level), Some(max_cooking_time))
                if !self.meal_type.is_empty() && !self.available_ingredients.is_empty() =>
            {
                Ok(PreferenceRequest {
                    cuisine,
                    spice_level,
                    meal_type: self.meal_type.clone(),
                    max_cooking_time,
                    dietary_restrictions: self.dietary_restrictions.clone(),
                    available_ingredients: self.available_ingredients.clone(),
                })
            }
            _ => Err(ValidationError::new(self.validate())),
        }
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Wire shape of a stored form, before the list rules are applied.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StoredForm {
    cuisine: Option<Cuisine>,
    spice_level: Option<SpiceLevel>,
    meal_type: Vec<MealType>,
    max_cooking_time: Option<CookingTime>,
    dietary_restrictions: Vec<DietaryRestriction>,
    available_ingredients: Vec<String>,
}

impl From<StoredForm> for PreferenceForm {
    fn from(stored: StoredForm) -> Self {
        let mut form = PreferenceForm::new();
        form.set_cuisine(stored.cuisine);
        form.set_spice_level(stored.spice_level);
        form.set_max_cooking_time(stored.max_cooking_time);
        for meal_type in stored.meal_type {
            form.set_meal_type(meal_type, true);
        }
        for restriction in stored.dietary_restrictions {
            form.set_dietary_restriction(restriction, true);
        }
        for ingredient in &stored.available_ingredients {
            form.add_ingredient(ingredient);
        }
        form
    }
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T, selected: bool) {
    let position = values.iter().position(|v| *v == value);
    match (selected, position) {
        (true, None) => values.push(value),
        (false, Some(index)) => {
            values.remove(index);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn italian_dinner() -> PreferenceForm {
        let mut form = PreferenceForm::new();
        form.set_cuisine(Some(Cuisine::Italian));
        form.set_spice_level(Some(SpiceLevel::Mild));
        form.set_meal_type(MealType::Dinner, true);
        form.set_max_cooking_time(Some(CookingTime::Minutes30));
        form.add_ingredient("tomato");
        form.add_ingredient("basil");
        form
    }

    #[test]
    fn add_ingredient_trims_whitespace() {
        let mut form = PreferenceForm::new();
        assert!(form.add_ingredient("  garlic \t"));
        assert_eq!(form.ingredients(), ["garlic"]);
    }

    #[test]
    fn add_ingredient_ignores_blank_text() {
        let mut form = PreferenceForm::new();
        assert!(!form.add_ingredient(""));
        assert!(!form.add_ingredient("   "));
        assert!(form.ingredients().is_empty());
    }

    #[test]
    fn add_ingredient_suppresses_duplicates_after_trimming() {
        let mut form = PreferenceForm::new();
        form.add_ingredient("onion");
        assert!(!form.add_ingredient(" onion "));
        assert_eq!(form.ingredients().len(), 1);
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let mut form = PreferenceForm::new();
        form.add_ingredient("Onion");
        assert!(form.add_ingredient("onion"));
        assert_eq!(form.ingredients(), ["Onion", "onion"]);
    }

    #[test]
    fn add_ingredient_preserves_entry_order() {
        let mut form = PreferenceForm::new();
        for name in ["rice", "egg", "scallion"] {
            form.add_ingredient(name);
        }
        assert_eq!(form.ingredients(), ["rice", "egg", "scallion"]);
    }

    #[test]
    fn remove_ingredient_by_index() {
        let mut form = italian_dinner();
        assert_eq!(form.remove_ingredient(0).as_deref(), Some("tomato"));
        assert_eq!(form.ingredients(), ["basil"]);
    }

    #[test]
    fn remove_ingredient_out_of_bounds_is_noop() {
        let mut form = italian_dinner();
        assert!(form.remove_ingredient(2).is_none());
        assert!(form.remove_ingredient(usize::MAX).is_none());
        assert_eq!(form.ingredients(), ["tomato", "basil"]);
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let unmet = PreferenceForm::new().validate();
        assert_eq!(
            unmet.into_iter().collect::<Vec<_>>(),
            vec![
                Constraint::CuisineRequired,
                Constraint::SpiceLevelRequired,
                Constraint::MealTypeRequired,
                Constraint::MaxCookingTimeRequired,
                Constraint::IngredientsRequired,
            ]
        );
    }

    #[test]
    fn dietary_restrictions_are_optional() {
        let form = italian_dinner();
        assert!(form.dietary_restrictions().is_empty());
        assert!(form.validate().is_empty());
    }

    #[test]
    fn submit_produces_exact_request() {
        let request = italian_dinner().submit().unwrap();
        assert_eq!(
            request,
            PreferenceRequest {
                cuisine: Cuisine::Italian,
                spice_level: SpiceLevel::Mild,
                meal_type: vec![MealType::Dinner],
                max_cooking_time: CookingTime::Minutes30,
                dietary_restrictions: Vec::new(),
                available_ingredients: vec!["tomato".to_string(), "basil".to_string()],
            }
        );
    }

    #[test]
    fn submit_without_ingredients_reports_only_that_constraint() {
        let mut form = italian_dinner();
        form.remove_ingredient(1);
        form.remove_ingredient(0);
        let err = form.submit().unwrap_err();
        assert!(err.contains(Constraint::IngredientsRequired));
        assert_eq!(err.unmet().len(), 1);
    }

    #[test]
    fn validate_is_empty_iff_submit_succeeds() {
        fn agrees(form: &PreferenceForm) -> bool {
            form.validate().is_empty() == form.submit().is_ok()
        }

        let mut form = PreferenceForm::new();
        assert!(agrees(&form));
        form.set_cuisine(Some(Cuisine::Mexican));
        assert!(agrees(&form));
        form.add_ingredient("beans");
        assert!(agrees(&form));
        form.set_meal_type(MealType::Lunch, true);
        assert!(agrees(&form));
        form.set_spice_level(Some(SpiceLevel::Spicy));
        assert!(agrees(&form));
        form.set_max_cooking_time(Some(CookingTime::Minutes45));
        assert!(agrees(&form));
        assert!(form.submit().is_ok());

        form.set_meal_type(MealType::Lunch, false);
        assert!(agrees(&form));
        assert!(form.submit().is_err());
        form.set_meal_type(MealType::Snack, true);
        assert!(agrees(&form));
        assert!(form.submit().is_ok());
    }

    #[test]
    fn set_valued_fields_have_checkbox_semantics() {
        let mut form = PreferenceForm::new();
        form.set_meal_type(MealType::Lunch, true);
        form.set_meal_type(MealType::Breakfast, true);
        form.set_meal_type(MealType::Lunch, true);
        assert_eq!(form.meal_types(), [MealType::Lunch, MealType::Breakfast]);
        form.set_meal_type(MealType::Dinner, false);
        form.set_meal_type(MealType::Lunch, false);
        assert_eq!(form.meal_types(), [MealType::Breakfast]);

        form.set_dietary_restriction(DietaryRestriction::Halal, true);
        form.set_dietary_restriction(DietaryRestriction::Halal, true);
        assert_eq!(form.dietary_restrictions(), [DietaryRestriction::Halal]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut form = italian_dinner();
        form.reset();
        assert_eq!(form, PreferenceForm::default());
    }

    #[test]
    fn form_state_serializes() {
        let form = italian_dinner();
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["cuisine"], "Italian");
        assert_eq!(json["availableIngredients"][1], "basil");
        let back: PreferenceForm = serde_json::from_value(json).unwrap();
        assert_eq!(back, form);
    }

    #[test]
    fn stored_form_obeys_list_rules() {
        let form: PreferenceForm = serde_json::from_str(
            r#"{"cuisine":"Thai","spiceLevel":"Mild","mealType":["Dinner","Dinner","Lunch"],
                "maxCookingTime":"15 mins","dietaryRestrictions":["Vegan","Vegan"],
                "availableIngredients":["tomato"," tomato ","   ",""]}"#,
        )
        .unwrap();
        let request = form.submit().unwrap();
        assert_eq!(request.meal_type, vec![MealType::Dinner, MealType::Lunch]);
        assert_eq!(request.dietary_restrictions, vec![DietaryRestriction::Vegan]);
        assert_eq!(request.available_ingredients, vec!["tomato"]);
    }

    #[test]
    fn stored_form_with_only_blank_ingredients_does_not_submit() {
        let form: PreferenceForm = serde_json::from_str(
            r#"{"cuisine":"Thai","spiceLevel":"Mild","mealType":["Dinner"],
                "maxCookingTime":"15 mins","availableIngredients":["  "]}"#,
        )
        .unwrap();
        assert!(form.ingredients().is_empty());
        let err = form.submit().unwrap_err();
        assert!(err.contains(Constraint::IngredientsRequired));
        assert_eq!(err.unmet().len(), 1);
    }
}
