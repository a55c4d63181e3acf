use serde::{Deserialize, Serialize};

/// Fixed sampling parameters applied to every prompt.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub max_tokens: u32,
    pub temperature: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub top_p: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_tokens: 450,
            temperature: 0.0,
            frequency_penalty: 0.2,
            presence_penalty: 0.0,
            top_p: 1.0,
        }
    }
}

/// One prompt plus its sampling parameters. Built once at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub top_p: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, tuning: Tuning) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: tuning.max_tokens,
            temperature: tuning.temperature,
            frequency_penalty: tuning.frequency_penalty,
            presence_penalty: tuning.presence_penalty,
            top_p: tuning.top_p,
        }
    }
}

/// A single candidate text returned for a prompt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub text: String,
}

/// A successful completion: never empty, choices kept in service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    choices: Vec<Choice>,
}

impl Completion {
    /// Returns `None` when the service sent back no choices.
    pub fn new(choices: Vec<Choice>) -> Option<Self> {
        if choices.is_empty() {
            None
        } else {
            Some(Self { choices })
        }
    }

    /// Convenience for building a completion from plain strings.
    pub fn from_texts<I, S>(texts: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(|t| Choice { text: t.into() }).collect())
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// All choices joined with a newline, in order.
    pub fn joined_text(&self) -> String {
        self.choices
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
