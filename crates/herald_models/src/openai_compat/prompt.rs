//! Prompt assembly and structured-output parsing.

use herald_core::{ContentBrief, GeneratedContent};
use herald_error::{GenerationError, GenerationErrorKind};
use serde::Deserialize;

/// Instructions that pin the model to the JSON shape we parse.
pub const SYSTEM_PROMPT: &str = "You are a senior social media copywriter. \
Answer with exactly one JSON object and nothing else. The object must have these keys: \
\"title\" (string, at most 90 characters), \
\"summary\" (string, one or two sentences), \
\"keywords\" (array of 3 to 8 short strings), \
\"body\" (string, a long-form article of 400 to 700 words in plain text paragraphs), \
\"instagramCaption\" (string, under 2000 characters, may include hashtags), \
\"linkedinCaption\" (string, under 2500 characters, professional, no hashtags spam).";

/// Renders the brief as the user message.
pub fn user_prompt(brief: &ContentBrief) -> String {
    let keywords = if brief.keywords().is_empty() {
        "(choose relevant keywords)".to_string()
    } else {
        brief.keywords().join(", ")
    };

    let mut prompt = format!("Topic: {}\nKeywords: {}\n", brief.topic(), keywords);
    if !brief.audience().is_empty() {
        prompt.push_str(&format!("Target audience: {}\n", brief.audience()));
    }
    if !brief.tone().is_empty() {
        prompt.push_str(&format!("Tone: {}\n", brief.tone()));
    }
    if !brief.call_to_action().is_empty() {
        prompt.push_str(&format!(
            "End both captions with this call to action: {}\n",
            brief.call_to_action()
        ));
    }
    prompt
}

/// Shape the model is asked to produce.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Draft {
    title: String,
    summary: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(alias = "longForm", alias = "article")]
    body: String,
    instagram_caption: String,
    linkedin_caption: String,
}

/// Removes a surrounding Markdown code fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses the model's answer into [`GeneratedContent`].
///
/// # Errors
///
/// Returns [`GenerationErrorKind::MalformedOutput`] when the answer is not the
/// expected JSON object or a required field is blank.
pub fn parse_generated(raw: &str) -> Result<GeneratedContent, GenerationError> {
    let draft: Draft = serde_json::from_str(strip_code_fence(raw)).map_err(|e| {
        GenerationError::new(GenerationErrorKind::MalformedOutput(e.to_string()))
    })?;

    let required = [
        ("title", &draft.title),
        ("summary", &draft.summary),
        ("body", &draft.body),
        ("instagramCaption", &draft.instagram_caption),
        ("linkedinCaption", &draft.linkedin_caption),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(GenerationError::new(GenerationErrorKind::MalformedOutput(
            format!("field '{}' is empty", field),
        )));
    }

    GeneratedContent::builder()
        .title(draft.title.trim())
        .summary(draft.summary.trim())
        .keywords(
            draft
                .keywords
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect::<Vec<_>>(),
        )
        .body(draft.body.trim())
        .instagram_caption(draft.instagram_caption.trim())
        .linkedin_caption(draft.linkedin_caption.trim())
        .build()
        .map_err(|e| GenerationError::new(GenerationErrorKind::MalformedOutput(e.to_string())))
}
