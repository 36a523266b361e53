//! Cover illustration style selection.

/// Pick an illustration style for a topic by keyword match.
///
/// Later matches win, so a topic like "theory of biology" gets the
/// conceptual style rather than the scientific one.
pub fn style_hint(topic: &str) -> &'static str {
    let lower = topic.to_lowercase();
    let mut hint = "Professional academic 3D illustration, cinematic lighting";
    if lower.contains("histor") {
        hint = "Epic historical painting style, dramatic cinematic lighting";
    }
    if lower.contains("scien") || lower.contains("bio") {
        hint = "Microscopic 3D render, bioluminescent details";
    }
    if lower.contains("theor") || lower.contains("philo") {
        hint = "Abstract conceptual art, ethereal lighting";
    }
    hint
}

/// Full prompt for the cover-image request.
pub fn image_prompt(topic: &str) -> String {
    format!(
        "{} about \"{}\". High resolution, 16:9.",
        style_hint(topic),
        topic
    )
}
