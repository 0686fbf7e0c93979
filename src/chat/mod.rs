//! In-character chat with a hosted text-generation model
//!
//! The session owns an append-only transcript and allows at most one request
//! in flight. Every remote failure degrades to a fixed in-character reply;
//! nothing is retried.

pub mod client;
pub mod credential;
pub mod error;
pub mod gemini;
pub mod message;
pub mod persona;
pub mod session;
pub mod transport;

pub use client::{ClientConfig, ConversationClient};
pub use credential::Credential;
pub use error::{ChatError, ConfigError};
pub use message::{ChatMessage, Role, Transcript};
pub use session::{ChatSession, PendingTurn, submit};
pub use transport::{HttpRequest, HttpResponse, Transport};

#[cfg(target_arch = "wasm32")]
pub use transport::FetchTransport;

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for exercising the client without a network

    use std::cell::{Cell, RefCell};

    use super::error::ChatError;
    use super::transport::{HttpRequest, HttpResponse, Transport};

    pub struct ScriptedTransport {
        reply: Result<HttpResponse, ChatError>,
        pub calls: Cell<usize>,
        pub last_request: RefCell<Option<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn new(reply: Result<HttpResponse, ChatError>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }

        /// Successful response carrying `text` as the model reply
        pub fn replying(text: &str) -> Self {
            let body = serde_json::json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
            });
            Self::new(Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            }))
        }
    }

    impl Transport for ScriptedTransport {
        async fn post(&self, request: HttpRequest) -> Result<HttpResponse, ChatError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_request.borrow_mut() = Some(request);
            self.reply.clone()
        }
    }
}
