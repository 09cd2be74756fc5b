/// Article text beyond this many characters is cut before prompting.
pub const MAX_PROMPT_CHARS: usize = 120_000;

/// Appended whenever the article had to be cut to fit the prompt.
pub const TRUNCATION_MARKER: &str = "\n\n[Article truncated.]";

const SUMMARY_SYSTEM: &str = "You are a concise news summarizer. Write a plain factual summary of the article (topic, key events, people involved) in 2–4 short paragraphs. Use neutral language. Do NOT discuss bias or framing.";

const BIAS_SYSTEM: &str = r#"You are a media bias analyst. Identify the top 5 most significant words or phrases in the article that show bias.
For each flagged item return:
- "text": the exact word or phrase from the article
- "type": one of ["loaded_language", "opinion_as_fact", "unverified_claim", "framing_bias"]
- "explanation": one sentence explaining why it is biased
Also return a "score" from 0–100 (100 = fully neutral, 0 = highly biased).

Return ONLY valid JSON with no markdown formatting:
{ "score": <number>, "flagged": [{ "text": "...", "type": "...", "explanation": "..." }] }"#;

const KEY_FACTS_SYSTEM: &str = r#"You are a news summarizer. Extract 3–5 key factual claims from the article (who, what, when, where). Facts only — no opinions. Return ONLY a JSON array of strings with no markdown formatting: ["fact 1", "fact 2"]"#;

const REFLECTION_SYSTEM: &str = "You are a critical thinking educator. Generate exactly 4 thought-provoking questions about this specific article. Every question must reference specific details, people, or events from the article. Do NOT write generic questions. Return ONLY a JSON array of 4 strings with no markdown formatting.";

const DIFFICULT_WORDS_SYSTEM: &str = r#"You are an ESL vocabulary assistant. Find 4–6 difficult words or phrases that actually appear in the article and that ESL learners might struggle with. Do NOT include everyday words.
Return ONLY a JSON array with no markdown formatting:
[{ "word": "...", "pronunciation": "...", "definition": "...", "example": "...", "category": "Commonly Confused" | "Irregular Verbs" | "Phrasal Verbs" | "Idioms" }]"#;

/// One fully-built model call: system prompt, user message, token cap.
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
    pub max_tokens: u32,
}

pub fn summary(article: &str) -> Prompt {
    Prompt {
        system: SUMMARY_SYSTEM,
        user: format!("Summarize this article:\n\n{}", clip(article)),
        max_tokens: 1024,
    }
}

pub fn bias(article: &str) -> Prompt {
    Prompt {
        system: BIAS_SYSTEM,
        user: format!("Analyze bias in this article:\n\n{}", clip(article)),
        max_tokens: 4096,
    }
}

pub fn key_facts(article: &str) -> Prompt {
    Prompt {
        system: KEY_FACTS_SYSTEM,
        user: format!("Extract key facts:\n\n{}", clip(article)),
        max_tokens: 512,
    }
}

pub fn reflection_questions(article: &str) -> Prompt {
    Prompt {
        system: REFLECTION_SYSTEM,
        user: format!("Generate 4 critical thinking questions:\n\n{}", clip(article)),
        max_tokens: 512,
    }
}

pub fn difficult_words(article: &str) -> Prompt {
    Prompt {
        system: DIFFICULT_WORDS_SYSTEM,
        user: format!("Find difficult words in this article:\n\n{}", clip(article)),
        max_tokens: 1024,
    }
}

/// Cut the article down to the prompt budget, marking the cut so the
/// model knows the text is incomplete.
fn clip(article: &str) -> String {
    match article.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((idx, _)) => format!("{}{}", &article[..idx], TRUNCATION_MARKER),
        None => article.to_string(),
    }
}
