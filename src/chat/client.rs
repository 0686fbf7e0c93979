//! Conversation client for the hosted model
//!
//! Stateless on the wire: every call resends the prior transcript, flattened
//! into the prompt, rather than relying on a server-side session.

use super::credential::Credential;
use super::error::{ChatError, ConfigError};
use super::gemini::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use super::message::ChatMessage;
use super::persona;
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::Settings;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub model: String,
    pub api_base: String,
    pub system_instruction: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            system_instruction: persona::SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            model: settings.model.clone(),
            api_base: settings.api_base.clone(),
            ..Self::default()
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

/// Sends one user turn and returns the model's reply text
#[derive(Debug)]
pub struct ConversationClient<T> {
    credential: Option<Credential>,
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> ConversationClient<T> {
    pub fn new(credential: Option<Credential>, transport: T, config: ClientConfig) -> Self {
        Self {
            credential,
            transport,
            config,
        }
    }

    /// Client using the `API_KEY` credential, if one is configured
    pub fn from_env(transport: T, config: ClientConfig) -> Self {
        let credential = match Credential::from_env() {
            Ok(credential) => Some(credential),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };
        Self::new(credential, transport, config)
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ask the model to answer `new_message` given the prior `history`.
    ///
    /// Without a credential this fails with [`ChatError::Auth`] and no
    /// request is made.
    pub async fn send(&self, history: &[ChatMessage], new_message: &str) -> Result<String, ChatError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(ConfigError::MissingCredential {
                var: super::credential::API_KEY_VAR,
            })?;

        let request = self.build_request(credential, history, new_message)?;
        log::debug!(
            "Sending {} history messages to {}",
            history.len(),
            self.config.model
        );
        let response = self.transport.post(request).await?;
        interpret_response(response)
    }

    fn build_request(
        &self,
        credential: &Credential,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<HttpRequest, ChatError> {
        let prompt = persona::build_prompt(history, new_message);
        let body = GenerateContentRequest::single_turn(&self.config.system_instruction, &prompt);
        Ok(HttpRequest {
            url: self.config.endpoint(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (API_KEY_HEADER.to_string(), credential.expose().to_string()),
            ],
            body: serde_json::to_string(&body)?,
        })
    }
}

/// Map an HTTP response to reply text or a typed failure
fn interpret_response(response: HttpResponse) -> Result<String, ChatError> {
    if !response.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&response.body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| response.body.chars().take(200).collect());
        return Err(match response.status {
            401 | 403 => ChatError::Auth(message),
            status => ChatError::Service { status, message },
        });
    }

    let parsed: GenerateContentResponse = serde_json::from_str(&response.body)?;
    Ok(parsed
        .text()
        .unwrap_or_else(|| persona::SILENT_REPLY.to_string()))
}
