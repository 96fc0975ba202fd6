//! Prompt templates for the image-generation provider.
//!
//! The photographic template is constant across requests; the animal and the
//! phrase are the only substitution points.

use crate::models::Animal;

pub const TSHIRT_PHOTO: &str = include_str!("../data/prompts/tshirt_photo.txt");
pub const NEGATIVE: &str = include_str!("../data/prompts/negative.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Render the photographic template for one (animal, phrase) pair.
pub fn tshirt_photo(animal: Animal, phrase: &str) -> String {
    render(
        TSHIRT_PHOTO.trim_end(),
        &[("animal", animal.as_str()), ("phrase", phrase)],
    )
}

/// The fixed negative prompt sent with every generation.
pub fn negative() -> &'static str {
    NEGATIVE.trim_end()
}
