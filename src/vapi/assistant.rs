//! Assistant wire types and the fixed configuration sent on create/update.

use serde::{Deserialize, Serialize};

use crate::config::AssistantDefaults;

/// Assistant as returned by the provider. Fields we do not use are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_message: Option<String>,
    #[serde(default)]
    pub max_duration_seconds: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Request body for `POST /assistant` and `PATCH /assistant/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub voice: VoiceConfig,
    pub first_message: String,
    pub model: ModelConfig,
    pub transcriber: TranscriberConfig,
    pub server: ServerConfig,
    pub end_call_function_enabled: bool,
    pub end_call_message: String,
    pub max_duration_seconds: u32,
    pub server_messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub provider: String,
    pub voice_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub model: String,
    pub provider: String,
    pub messages: Vec<ModelMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriberConfig {
    pub provider: String,
    pub model: String,
    pub keywords: Vec<String>,
}

/// Where the provider posts call lifecycle events.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub url: String,
}

/// Builds assistant configurations from the configured defaults.
#[derive(Debug, Clone)]
pub struct AssistantTemplate {
    defaults: AssistantDefaults,
    webhook_url: String,
}

impl AssistantTemplate {
    pub fn new(defaults: AssistantDefaults, webhook_url: impl Into<String>) -> Self {
        Self {
            defaults,
            webhook_url: webhook_url.into(),
        }
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Configuration for a new assistant.
    pub fn for_create(&self, name: &str) -> AssistantConfig {
        self.build(Some(name.to_string()), None, None)
    }

    /// Configuration for an update. Blank overrides fall back to the defaults.
    pub fn for_update(
        &self,
        custom_first_message: Option<&str>,
        custom_system_prompt: Option<&str>,
    ) -> AssistantConfig {
        self.build(None, custom_first_message, custom_system_prompt)
    }

    fn build(
        &self,
        name: Option<String>,
        first_message: Option<&str>,
        system_prompt: Option<&str>,
    ) -> AssistantConfig {
        let d = &self.defaults;
        let first_message = non_blank(first_message).unwrap_or(d.first_message.as_str());
        let system_prompt = non_blank(system_prompt).unwrap_or(d.system_prompt.as_str());

        AssistantConfig {
            name,
            voice: VoiceConfig {
                provider: d.voice_provider.clone(),
                voice_id: d.voice_id.clone(),
            },
            first_message: first_message.to_string(),
            model: ModelConfig {
                model: d.model.clone(),
                provider: d.model_provider.clone(),
                messages: vec![ModelMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                }],
                temperature: d.temperature,
            },
            transcriber: TranscriberConfig {
                provider: d.transcriber_provider.clone(),
                model: d.transcriber_model.clone(),
                keywords: d.keywords.clone(),
            },
            server: ServerConfig {
                url: self.webhook_url.clone(),
            },
            end_call_function_enabled: true,
            end_call_message: d.end_call_message.clone(),
            max_duration_seconds: d.max_duration_seconds,
            server_messages: Vec::new(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
