use crate::models::StoryResult;

/// Download name for a story: every character outside `[A-Za-z0-9]` becomes
/// `_`, the result is lowercased, and `_story.json` is appended.
pub fn export_filename(film_title: &str) -> String {
    let stem: String = film_title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{stem}_story.json")
}

/// The story as 2-space indented JSON.
pub fn export_json(story: &StoryResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(story)
}
