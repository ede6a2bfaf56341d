//! Plain-text rendering of a recipe response.

use crate::types::{NlpInsights, Recipe, RecipeResponse, RecipeSummary};

/// `45 min`, `1h`, `1h 30m`.
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{hours}h")
    }
}

/// Render the full response: recipe, then recommendations and insights
/// when present.
pub fn render_response(response: &RecipeResponse) -> String {
    let mut out = render_recipe(&response.recipe);
    if let Some(recommendations) = response.recommendations.as_deref().filter(|r| !r.is_empty()) {
        out.push('\n');
        out.push_str(&render_recommendations(recommendations));
    }
    if let Some(insights) = &response.nlp_insights {
        out.push('\n');
        out.push_str(&render_insights(insights));
    }
    out
}

pub fn render_recipe(recipe: &Recipe) -> String {
    let mut lines = vec![recipe.title.clone()];
    lines.extend(recipe.description.clone());
    lines.push(format!(
        "{} | {} | {} | {}",
        format_minutes(recipe.cooking_time),
        recipe.difficulty,
        recipe.cuisine,
        recipe.spice_level
    ));
    if !recipe.tags.is_empty() {
        lines.push(format!("Tags: {}", recipe.tags.join(", ")));
    }
    if let Some(url) = &recipe.image_url {
        lines.push(format!("Image: {url}"));
    }

    lines.push("\nIngredients".to_string());
    for ingredient in &recipe.ingredients {
        lines.push(format!("  - {} - {}", ingredient.name, ingredient.quantity));
        if let Some(notes) = &ingredient.notes {
            lines.push(format!("      {notes}"));
        }
    }

    lines.push("\nInstructions".to_string());
    for step in &recipe.instructions {
        lines.push(format!("  {}. {}", step.step_number, step.instruction));
        if let Some(minutes) = step.time_minutes {
            lines.push(format!("     Time: {minutes} minutes"));
        }
    }
    join_lines(lines)
}

fn render_recommendations(recommendations: &[RecipeSummary]) -> String {
    let mut lines = vec!["Recommended Recipes".to_string()];
    for summary in recommendations {
        lines.push(format!(
            "  * {} ({}, {})",
            summary.title,
            summary.cuisine,
            format_minutes(summary.cooking_time)
        ));
        if let Some(description) = &summary.description {
            lines.push(format!("    {description}"));
        }
    }
    join_lines(lines)
}

fn render_insights(insights: &NlpInsights) -> String {
    let mut lines = vec!["AI Analysis".to_string()];
    if !insights.entities.is_empty() {
        let entities: Vec<String> = insights
            .entities
            .iter()
            .map(|e| format!("{} ({})", e.text, e.category))
            .collect();
        lines.push(format!("  Recognized ingredients: {}", entities.join(", ")));
    }
    if !insights.key_phrases.is_empty() {
        lines.push(format!("  Key phrases: {}", insights.key_phrases.join(", ")));
    }
    if let Some(sentiment) = &insights.sentiment {
        lines.push(format!("  Sentiment: {sentiment}"));
    }
    join_lines(lines)
}

/// Every line newline-terminated.
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
