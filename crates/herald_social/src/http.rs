//! Request plumbing shared by the publishers.

use herald_error::{PublishError, PublishErrorKind, PublishResult};
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

/// A successful response: parsed body plus the response headers we care about.
#[derive(Debug)]
pub(crate) struct ApiReply {
    pub body: Value,
    pub restli_id: Option<String>,
}

impl ApiReply {
    /// String `id` from the body.
    pub fn id(&self) -> Option<String> {
        match self.body.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Pulls a human-readable message out of a platform error body.
///
/// Graph API errors look like `{"error": {"message": ...}}`; LinkedIn errors
/// carry a top-level `message`. Anything else falls back to the raw text.
pub(crate) fn error_message(raw: &str) -> String {
    let Ok(body) = serde_json::from_str::<Value>(raw) else {
        return raw.trim().to_string();
    };
    body.pointer("/error/message")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| raw.trim().to_string())
}

async fn read(response: Response) -> PublishResult<ApiReply> {
    let status = response.status();
    let restli_id = response
        .headers()
        .get("x-restli-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let text = response
        .text()
        .await
        .map_err(|e| PublishError::new(PublishErrorKind::Http(e.to_string())))?;

    if !status.is_success() {
        let message = error_message(&text);
        warn!(status = %status, error = %message, "Platform API error");
        return Err(PublishError::new(PublishErrorKind::Api {
            status: status.as_u16(),
            message,
        }));
    }

    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };
    debug!(status = %status, "Platform API call succeeded");
    Ok(ApiReply { body, restli_id })
}

/// Sends a request and maps transport and status failures into [`PublishError`].
pub(crate) async fn send(request: RequestBuilder) -> PublishResult<ApiReply> {
    let response = request
        .send()
        .await
        .map_err(|e| PublishError::new(PublishErrorKind::Http(e.to_string())))?;
    read(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error":{"message":"Invalid OAuth access token.","code":190}}"#),
            "Invalid OAuth access token."
        );
        assert_eq!(
            error_message(r#"{"message":"Not enough permissions","status":403}"#),
            "Not enough permissions"
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_reply_id_accepts_strings_and_numbers() {
        let reply = ApiReply {
            body: serde_json::json!({"id": 17895695668004550u64}),
            restli_id: None,
        };
        assert_eq!(reply.id().as_deref(), Some("17895695668004550"));
        let empty = ApiReply {
            body: serde_json::json!({"id": ""}),
            restli_id: None,
        };
        assert!(empty.id().is_none());
    }
}
