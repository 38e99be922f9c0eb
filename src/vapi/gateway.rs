use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::Arc;
use tracing::{error, info};

use super::assistant::{Assistant, AssistantTemplate};
use super::client::AssistantProvider;
use super::error::{GatewayError, Operation};

/// Outcome of a gateway operation.
///
/// Serializes as `{"success": true, "status": 200, "data": ...}` or
/// `{"success": false, "status": <code>, "message": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResult<T> {
    Success(T),
    Failure {
        error: GatewayError,
        message: &'static str,
    },
}

impl<T> GatewayResult<T> {
    fn failure(error: GatewayError, operation: Operation) -> Self {
        GatewayResult::Failure {
            error,
            message: error.message(operation),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GatewayResult::Success(_))
    }

    pub fn status(&self) -> u16 {
        match self {
            GatewayResult::Success(_) => 200,
            GatewayResult::Failure { error, .. } => error.status(),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            GatewayResult::Success(data) => Some(data),
            GatewayResult::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            GatewayResult::Success(_) => None,
            GatewayResult::Failure { message, .. } => Some(*message),
        }
    }

    pub fn error(&self) -> Option<GatewayError> {
        match self {
            GatewayResult::Success(_) => None,
            GatewayResult::Failure { error, .. } => Some(*error),
        }
    }
}

impl<T: Serialize> Serialize for GatewayResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GatewayResult", 3)?;
        state.serialize_field("success", &self.is_success())?;
        state.serialize_field("status", &self.status())?;
        match self {
            GatewayResult::Success(data) => state.serialize_field("data", data)?,
            GatewayResult::Failure { message, .. } => state.serialize_field("message", message)?,
        }
        state.end()
    }
}

/// Creates, updates and lists voice assistants. Never returns an error: every
/// provider failure is logged and folded into a [`GatewayResult`].
#[derive(Clone)]
pub struct AssistantGateway {
    provider: Arc<dyn AssistantProvider>,
    template: AssistantTemplate,
}

impl AssistantGateway {
    pub fn new(provider: Arc<dyn AssistantProvider>, template: AssistantTemplate) -> Self {
        Self { provider, template }
    }

    pub fn template(&self) -> &AssistantTemplate {
        &self.template
    }

    pub async fn list(&self) -> GatewayResult<Vec<Assistant>> {
        match self.provider.list().await {
            Ok(assistants) => {
                info!("Fetched {} assistants from {}", assistants.len(), self.provider.name());
                GatewayResult::Success(assistants)
            }
            Err(err) => {
                error!("Error fetching agents: {}", err);
                GatewayResult::failure(GatewayError::classify(&err, Operation::List), Operation::List)
            }
        }
    }

    pub async fn create(&self, name: &str) -> GatewayResult<Assistant> {
        let name = name.trim();
        if name.is_empty() {
            error!("Refusing to create an assistant without a name");
            return GatewayResult::failure(GatewayError::InvalidConfig, Operation::Create);
        }

        let config = self.template.for_create(name);
        match self.provider.create(&config).await {
            Ok(assistant) => {
                info!("Assistant created: {} ({})", name, assistant.id);
                GatewayResult::Success(assistant)
            }
            Err(err) => {
                error!("Error creating assistant: {}", err);
                GatewayResult::failure(
                    GatewayError::classify(&err, Operation::Create),
                    Operation::Create,
                )
            }
        }
    }

    pub async fn update(
        &self,
        assistant_id: &str,
        custom_first_message: Option<&str>,
        custom_system_prompt: Option<&str>,
    ) -> GatewayResult<Assistant> {
        let config = self
            .template
            .for_update(custom_first_message, custom_system_prompt);
        match self.provider.update(assistant_id, &config).await {
            Ok(assistant) => {
                info!("Assistant updated: {}", assistant.id);
                GatewayResult::Success(assistant)
            }
            Err(err) => {
                error!("Error updating assistant {}: {}", assistant_id, err);
                GatewayResult::failure(
                    GatewayError::classify(&err, Operation::Update),
                    Operation::Update,
                )
            }
        }
    }
}
