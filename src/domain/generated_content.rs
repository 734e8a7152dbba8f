use serde::Serialize;

const OUTLINE_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedContent {
    pub outline: String,
    pub content: String,
}

impl GeneratedContent {
    pub fn new(outline: String, content: String) -> Self {
        Self { outline, content }
    }

    /// Builds a pair when the upstream service returned only one half.
    pub fn from_partial(outline: Option<String>, content: Option<String>) -> Option<Self> {
        match (outline, content) {
            (Some(outline), Some(content)) => Some(Self::new(outline, content)),
            (None, Some(content)) => Some(Self::new(outline_preview(&content), content)),
            (Some(outline), None) => Some(Self::new(outline.clone(), outline)),
            (None, None) => None,
        }
    }

    /// Deterministic stand-in used whenever the content service is
    /// unavailable; the same input always yields the same text.
    pub fn placeholder(user_input: &str) -> Self {
        let outline = placeholder_outline(user_input);
        let content = format!(
            "{outline}\n\n\
             You have everything you need already within you. With every breath \
             your mind becomes clearer and calmer, and your attention settles on \
             what matters right now.\n\n\
             Each day you grow steadier and more capable. Distractions drift past \
             without pulling you along, and you return to your intention with ease.\n\n\
             Let these words settle deeply. You are calm, you are focused, and you \
             are ready."
        );
        Self::new(outline_preview(&content), content)
    }
}

fn outline_preview(content: &str) -> String {
    if content.chars().count() > OUTLINE_PREVIEW_CHARS {
        let head: String = content.chars().take(OUTLINE_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

fn placeholder_outline(user_input: &str) -> String {
    let topic = user_input.to_lowercase();
    let points: [&str; 5] = if topic.contains("focus") {
        [
            "How attention works",
            "Shaping a focused environment",
            "Training deep concentration",
            "Letting distractions pass",
            "Sustaining focus over time",
        ]
    } else if topic.contains("relax") {
        [
            "Why deep relaxation matters",
            "Releasing tension in the body",
            "Breathing and stillness",
            "Letting go of stress",
            "Building calm habits",
        ]
    } else if topic.contains("sleep") {
        [
            "The foundations of restful sleep",
            "Winding down before bed",
            "Quieting the mind",
            "Healthy sleep routines",
            "Drifting into deep sleep",
        ]
    } else {
        [
            "Why this matters to you",
            "Core ideas and principles",
            "Practical techniques",
            "Positive self-suggestion",
            "Summary and next steps",
        ]
    };

    let mut outline = format!("Outline: {}\n", user_input.trim());
    for (i, point) in points.iter().enumerate() {
        outline.push_str(&format!("{}. {}\n", i + 1, point));
    }
    outline
}
