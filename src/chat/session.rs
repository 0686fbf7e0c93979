//! Chat session: transcript plus the single in-flight turn
//!
//! A turn is split in two so the transcript is never borrowed across the
//! remote call: [`ChatSession::begin_turn`] records the user message and
//! hands back what to send, [`ChatSession::finish_turn`] records the answer.
//! While a turn is pending new submissions are ignored.

use std::cell::RefCell;

use super::client::ConversationClient;
use super::error::ChatError;
use super::message::{ChatMessage, Transcript};
use super::persona;
use super::transport::Transport;

/// What to send for an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    /// Transcript before this turn's user message
    pub history: Vec<ChatMessage>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    pending: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// New session opening with the greeting
    pub fn new() -> Self {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::model(persona::GREETING));
        Self {
            transcript,
            pending: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True while a request is in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Accept `input` as the next user turn.
    ///
    /// Returns None (and changes nothing) for blank input or while another
    /// turn is still pending.
    pub fn begin_turn(&mut self, input: &str) -> Option<PendingTurn> {
        if input.trim().is_empty() {
            return None;
        }
        if self.pending {
            log::debug!("Ignoring submission while a reply is pending");
            return None;
        }

        let history = self.transcript.messages().to_vec();
        self.transcript.push(ChatMessage::user(input));
        self.pending = true;
        Some(PendingTurn {
            history,
            message: input.to_string(),
        })
    }

    /// Record the outcome of the pending turn. Failures become the fallback
    /// reply. Returns the appended message, or None if no turn was pending.
    pub fn finish_turn(&mut self, outcome: Result<String, ChatError>) -> Option<&ChatMessage> {
        if !self.pending {
            log::warn!("Reply arrived with no pending turn; dropped");
            return None;
        }

        let text = match outcome {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Error communicating with the void: {}", e);
                persona::FALLBACK_REPLY.to_string()
            }
        };
        self.transcript.push(ChatMessage::model(text));
        self.pending = false;
        self.transcript.last()
    }
}

/// Run one full turn. Returns false when the submission was ignored.
///
/// The session is only borrowed around `begin_turn` and `finish_turn`, so the
/// host can keep reading it (or reject further input) while the request runs.
pub async fn submit<T: Transport>(
    session: &RefCell<ChatSession>,
    client: &ConversationClient<T>,
    input: &str,
) -> bool {
    let turn = session.borrow_mut().begin_turn(input);
    let Some(turn) = turn else {
        return false;
    };

    let outcome = client.send(&turn.history, &turn.message).await;
    session.borrow_mut().finish_turn(outcome);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::client::ClientConfig;
    use crate::chat::credential::Credential;
    use crate::chat::testing::ScriptedTransport;
    use crate::chat::transport::{HttpRequest, HttpResponse};
    use pollster::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    fn client(transport: ScriptedTransport) -> ConversationClient<ScriptedTransport> {
        ConversationClient::new(
            Some(Credential::new("test-key").unwrap()),
            transport,
            ClientConfig::default(),
        )
    }

    #[test]
    fn test_new_session_greets() {
        let session = ChatSession::new();
        assert_eq!(session.transcript().messages(), &[ChatMessage::model(persona::GREETING)]);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_successful_turn() {
        let session = RefCell::new(ChatSession::new());
        let client = client(ScriptedTransport::replying("hi"));

        assert!(block_on(submit(&session, &client, "hello")));
        let session = session.into_inner();
        assert_eq!(
            session.transcript().messages(),
            &[
                ChatMessage::model(persona::GREETING),
                ChatMessage::user("hello"),
                ChatMessage::model("hi"),
            ]
        );
        assert!(!session.is_pending());
    }

    #[test]
    fn test_missing_credential_appends_fallback() {
        let session = RefCell::new(ChatSession::new());
        let client = ConversationClient::new(
            None,
            ScriptedTransport::replying("unreachable"),
            ClientConfig::default(),
        );

        assert!(block_on(submit(&session, &client, "hello")));
        assert_eq!(client.transport().calls.get(), 0);
        let session = session.into_inner();
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(
            session.transcript().last(),
            Some(&ChatMessage::model(persona::FALLBACK_REPLY))
        );
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut session = ChatSession::new();
        assert!(session.begin_turn("   ").is_none());
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_second_submission_ignored_while_pending() {
        let mut session = ChatSession::new();
        let first = session.begin_turn("first").unwrap();
        assert_eq!(first.history, vec![ChatMessage::model(persona::GREETING)]);
        assert!(session.is_pending());

        assert!(session.begin_turn("second").is_none());
        assert_eq!(session.transcript().len(), 2);

        session.finish_turn(Ok("reply one".to_string()));
        assert!(!session.is_pending());

        let second = session.begin_turn("second").unwrap();
        assert_eq!(second.history.len(), 3);
        session.finish_turn(Err(ChatError::Transport("timeout".to_string())));

        let texts: Vec<_> = session
            .transcript()
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(
            texts,
            [persona::GREETING, "first", "reply one", "second", persona::FALLBACK_REPLY]
        );
    }

    #[test]
    fn test_stray_reply_dropped() {
        let mut session = ChatSession::new();
        assert!(session.finish_turn(Ok("ghost".to_string())).is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    /// Transport that tries to submit again while its own request is in flight
    struct ReentrantTransport {
        session: Rc<RefCell<ChatSession>>,
        reentry_accepted: Cell<Option<bool>>,
    }

    impl Transport for ReentrantTransport {
        async fn post(&self, _request: HttpRequest) -> Result<HttpResponse, ChatError> {
            let accepted = self.session.borrow_mut().begin_turn("second").is_some();
            self.reentry_accepted.set(Some(accepted));
            let body = serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "first reply" }] } }]
            });
            Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            })
        }
    }

    #[test]
    fn test_overlapping_submit_ignored() {
        let session = Rc::new(RefCell::new(ChatSession::new()));
        let client = ConversationClient::new(
            Some(Credential::new("test-key").unwrap()),
            ReentrantTransport {
                session: Rc::clone(&session),
                reentry_accepted: Cell::new(None),
            },
            ClientConfig::default(),
        );

        assert!(block_on(submit(&session, &client, "first")));
        assert_eq!(client.transport().reentry_accepted.get(), Some(false));
        assert_eq!(
            session.borrow().transcript().messages(),
            &[
                ChatMessage::model(persona::GREETING),
                ChatMessage::user("first"),
                ChatMessage::model("first reply"),
            ]
        );
    }
}
