//! Question provider: asks the model for a question and, when that fails
//! for any reason, serves one from the built-in bank.
//!
//! `next_question` never fails. A run always has something to render.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::llm_client::{prompts::QUESTION_PROMPT, LlmClient, LlmError};
use crate::models::QuestionRecord;

pub mod fallback;
pub mod parser;

pub use fallback::random_fallback;
pub use parser::{parse_question, ParseError};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("model request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model reply rejected: {0}")]
    Parse(#[from] ParseError),
}

/// Something that can produce a fully validated question.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch(&self) -> Result<QuestionRecord, ProviderError>;
}

/// Chat-completions backed source: one request, one parse.
pub struct LlmQuestionSource {
    llm: LlmClient,
}

impl LlmQuestionSource {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl QuestionSource for LlmQuestionSource {
    async fn fetch(&self) -> Result<QuestionRecord, ProviderError> {
        let text = self.llm.call_text(QUESTION_PROMPT).await?;
        Ok(parse_question(&text)?)
    }
}

pub struct QuestionProvider {
    source: Option<Arc<dyn QuestionSource>>,
}

impl QuestionProvider {
    pub fn new(source: Option<Arc<dyn QuestionSource>>) -> Self {
        Self { source }
    }

    /// Uses the model when an API key is configured, the bank otherwise.
    pub fn from_config(config: &Config) -> Self {
        let Some(api_key) = config.openai_api_key.clone() else {
            info!("OPENAI_API_KEY not set, questions come from the built-in bank");
            return Self::new(None);
        };

        match LlmClient::new(
            api_key,
            config.openai_base_url.clone(),
            config.openai_model.clone(),
        ) {
            Ok(llm) => {
                info!("LLM client initialized (model: {})", llm.model());
                Self::new(Some(Arc::new(LlmQuestionSource::new(llm))))
            }
            Err(e) => {
                warn!("Could not build LLM client, using built-in bank: {e}");
                Self::new(None)
            }
        }
    }

    pub async fn next_question(&self) -> QuestionRecord {
        let Some(source) = &self.source else {
            return random_fallback();
        };

        match source.fetch().await {
            Ok(record) => {
                info!(
                    difficulty = record.difficulty.as_str(),
                    "Question generated by model"
                );
                record
            }
            Err(e) => {
                warn!("Question generation failed, using fallback: {e}");
                random_fallback()
            }
        }
    }
}
