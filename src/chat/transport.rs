//! HTTP seam between the chat client and the network
//!
//! The browser build posts through `fetch`. Tests plug in scripted
//! transports. Timeouts are whatever the underlying transport enforces.

use std::future::Future;

use super::error::ChatError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON POST and returns whatever came back.
///
/// Only failures to get a response at all are errors here; HTTP error
/// statuses are returned as responses.
pub trait Transport {
    fn post(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ChatError>>;
}

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;

#[cfg(target_arch = "wasm32")]
mod fetch {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    use super::{ChatError, HttpRequest, HttpResponse, Transport};

    /// `window.fetch` transport
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FetchTransport;

    fn js_error(e: JsValue) -> ChatError {
        ChatError::Transport(
            e.as_string()
                .unwrap_or_else(|| format!("{:?}", e)),
        )
    }

    impl Transport for FetchTransport {
        async fn post(&self, request: HttpRequest) -> Result<HttpResponse, ChatError> {
            let window = web_sys::window()
                .ok_or_else(|| ChatError::Transport("no window available".to_string()))?;

            let init = RequestInit::new();
            init.set_method("POST");
            init.set_mode(RequestMode::Cors);
            init.set_body(&JsValue::from_str(&request.body));

            let req = Request::new_with_str_and_init(&request.url, &init).map_err(js_error)?;
            for (name, value) in &request.headers {
                req.headers().set(name, value).map_err(js_error)?;
            }

            let value = JsFuture::from(window.fetch_with_request(&req))
                .await
                .map_err(js_error)?;
            let response: Response = value.dyn_into().map_err(js_error)?;
            let status = response.status();
            let body = JsFuture::from(response.text().map_err(js_error)?)
                .await
                .map_err(js_error)?
                .as_string()
                .unwrap_or_default();

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = |status| HttpResponse {
            status,
            body: String::new(),
        };
        assert!(ok(200).is_success());
        assert!(ok(204).is_success());
        assert!(!ok(301).is_success());
        assert!(!ok(500).is_success());
    }
}
