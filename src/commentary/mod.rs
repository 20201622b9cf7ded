//! Sardonic task commentary
//!
//! Every task creation and completion gets one comment row. The text comes
//! from Gemini when a key is configured; any failure (no key, network,
//! timeout, empty answer) falls back to a canned line for the event.

pub mod gemini;
pub mod picker;
pub mod prompt;

pub use gemini::{GeminiClient, GeminiError};
pub use picker::{FallbackPicker, FixedPicker, SeededPicker, ThreadRngPicker};

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::GeminiConfig;
use crate::tasks::{EventType, TaskStore};

/// Produces comment text from a system instruction and a user prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String>;
}

pub struct CommentGenerator {
    store: TaskStore,
    generator: Option<Arc<dyn TextGenerator>>,
    picker: Arc<dyn FallbackPicker>,
    timeout: Duration,
}

impl CommentGenerator {
    pub fn new(
        store: TaskStore,
        generator: Option<Arc<dyn TextGenerator>>,
        picker: Arc<dyn FallbackPicker>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            generator,
            picker,
            timeout,
        }
    }

    /// Gemini-backed generator, or fallback-only when no key is configured
    pub fn from_config(store: TaskStore, config: &GeminiConfig) -> Result<Self> {
        let generator: Option<Arc<dyn TextGenerator>> = if config.is_enabled() {
            let client = GeminiClient::new(config)?;
            info!("Gemini commentary enabled ({})", config.model);
            Some(Arc::new(client))
        } else {
            info!("Gemini commentary disabled (no API key), using fallback lines");
            None
        };

        Ok(Self::new(store, generator, Arc::new(ThreadRngPicker), config.timeout))
    }

    pub fn is_live(&self) -> bool {
        self.generator.is_some()
    }

    /// Generate, persist and return the comment for one event.
    ///
    /// Generator failures never escape; only a failed insert is an error.
    pub async fn generate(
        &self,
        task_id: i64,
        event_type: EventType,
        title: &str,
        description: Option<&str>,
    ) -> Result<String> {
        let task_text = prompt::task_text(title, description);

        let text = match self.ask_model(event_type, &task_text).await {
            Some(text) => text,
            None => self.fallback_text(event_type).to_string(),
        };

        self.store.insert_comment(task_id, event_type, &text).await?;
        debug!(task_id, event = %event_type, "Stored AI comment");

        Ok(text)
    }

    pub fn fallback_text(&self, event_type: EventType) -> &'static str {
        let lines = prompt::fallbacks(event_type);
        lines[self.picker.pick(lines.len())]
    }

    async fn ask_model(&self, event_type: EventType, task_text: &str) -> Option<String> {
        let generator = self.generator.as_ref()?;
        let user_prompt = prompt::user_prompt(event_type, task_text);

        match tokio::time::timeout(
            self.timeout,
            generator.generate(prompt::SYSTEM_PROMPT, &user_prompt),
        )
        .await
        {
            Ok(Ok(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    warn!(event = %event_type, "Empty comment from generator, using fallback");
                    None
                } else {
                    Some(text.to_string())
                }
            }
            Ok(Err(e)) => {
                warn!(event = %event_type, "Comment generation failed: {}", e);
                None
            }
            Err(_) => {
                warn!(event = %event_type, "Comment generation timed out ({:?})", self.timeout);
                None
            }
        }
    }
}
