// src/commentary/prompt.rs
// Persona prompt and canned fallback lines

use crate::tasks::EventType;

pub const SYSTEM_PROMPT: &str = "Role: antagonist and skeptic. Tone: dry irony. 1-2 sentences. \
Talk to the user informally, second person. No pleasantries, no emoji, no explanations. \
Output: only the text of the comment.";

const CREATED_FALLBACKS: [&str; 3] = [
    "Noted. Will you actually do it? Doubtful.",
    "Another task. As if there weren't enough.",
    "Great. One more line on the list.",
];

const COMPLETED_FALLBACKS: [&str; 3] = [
    "Finally. The world didn't end.",
    "Marked. Could have been faster.",
    "Done. Was there a point?",
];

/// The user turn sent to the model
pub fn user_prompt(event_type: EventType, task_text: &str) -> String {
    let prefix = match event_type {
        EventType::Created => "Task created: ",
        EventType::Completed => "Task completed: ",
    };
    format!("{}{}", prefix, task_text)
}

/// Title plus the description on its own line, when there is one
pub fn task_text(title: &str, description: Option<&str>) -> String {
    match description.map(str::trim).filter(|d| !d.is_empty()) {
        Some(description) => format!("{}\n{}", title, description),
        None => title.to_string(),
    }
}

pub fn fallbacks(event_type: EventType) -> &'static [&'static str] {
    match event_type {
        EventType::Created => &CREATED_FALLBACKS,
        EventType::Completed => &COMPLETED_FALLBACKS,
    }
}
