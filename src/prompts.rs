//! Prompt templates for the generation and curation stages.

/// The template bundle used by the pipeline stages.
///
/// Defaults are embedded; callers can swap any template at construction
/// as long as the replacement keeps the same placeholders.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    /// System prompt for per-chunk and consolidated summaries
    pub summary: String,

    /// QA generation template with `{num_pairs}`, `{summary}`, `{text}`
    pub qa_generation: String,

    /// Rating template with `{pairs}`
    pub qa_rating: String,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self {
            summary: SUMMARY_PROMPT.to_string(),
            qa_generation: QA_GENERATION_PROMPT.to_string(),
            qa_rating: QA_RATING_PROMPT.to_string(),
        }
    }
}

impl PromptLibrary {
    /// System prompt for summary calls.
    pub fn summary_prompt(&self) -> &str {
        &self.summary
    }

    /// QA generation prompt with the pair budget, document summary, and
    /// chunk text substituted.
    pub fn qa_generation_prompt(&self, num_pairs: usize, summary: &str, text: &str) -> String {
        self.qa_generation
            .replace("{num_pairs}", &num_pairs.to_string())
            .replace("{summary}", summary)
            .replace("{text}", text)
    }

    /// Rating prompt with the serialized pairs substituted.
    pub fn qa_rating_prompt(&self, pairs_json: &str) -> String {
        self.qa_rating.replace("{pairs}", pairs_json)
    }
}

const SUMMARY_PROMPT: &str = "Summarize this document as a concise overview \
of its main topic, key entities, and essential facts in 3-5 sentences.";

const QA_GENERATION_PROMPT: &str = r#"Create {num_pairs} question-answer pairs from this text for LLM training.

Rules:
1. Questions must be about important facts in the text
2. Answers must be directly supported by the text
3. Return JSON format only:

[
  {
    "question": "Question 1?",
    "answer": "Answer 1."
  },
  {
    "question": "Question 2?",
    "answer": "Answer 2."
  }
]

Document summary: {summary}

Text:
{text}"#;

const QA_RATING_PROMPT: &str = r#"Rate each question-answer pair on a scale of 1-10 based on accuracy, relevance, and clarity.

Return ONLY a JSON array of the same pairs, each with an added "rating" field:

[
  {
    "question": "...",
    "answer": "...",
    "rating": 8
  }
]

QA pairs to rate:
{pairs}"#;
