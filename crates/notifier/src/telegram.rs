use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use herald_common::error::NotifyError;

use crate::Notifier;

/// Telegram Bot API `sendMessage` delivery.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope shared by every Bot API response.
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client for Telegram");
                reqwest::Client::new()
            });

        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

/// Interpret a Bot API reply. `ok: false` is a rejection even under HTTP 200.
fn check_reply(status: u16, body: &str) -> Result<(), NotifyError> {
    let reply: Option<BotApiResponse> = serde_json::from_str(body).ok();

    match reply {
        Some(reply) if reply.ok && (200..300).contains(&status) => Ok(()),
        Some(reply) => Err(NotifyError::Rejected {
            status,
            description: reply
                .description
                .unwrap_or_else(|| "no description".to_string()),
        }),
        None if (200..300).contains(&status) => Err(NotifyError::Transport(
            "unreadable Bot API response".to_string(),
        )),
        None => Err(NotifyError::Rejected {
            status,
            description: "no description".to_string(),
        }),
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            // The request URL embeds the bot token.
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        check_reply(status, &body)?;

        tracing::debug!(chat_id, "Telegram message delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_url() {
        let notifier = TelegramNotifier::new(
            "https://api.telegram.org/",
            "123:abc",
            Duration::from_secs(5),
        );
        assert_eq!(
            notifier.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(SendMessageRequest {
            chat_id: "42",
            text: "hello",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"chat_id": "42", "text": "hello"}));
    }

    #[test]
    fn test_ok_reply_accepted() {
        assert!(check_reply(200, r#"{"ok":true,"result":{"message_id":1}}"#).is_ok());
    }

    #[test]
    fn test_error_reply_carries_description() {
        let err = check_reply(
            400,
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap_err();
        match err {
            NotifyError::Rejected {
                status,
                description,
            } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_false_under_http_200_is_rejected() {
        assert!(matches!(
            check_reply(200, r#"{"ok":false}"#),
            Err(NotifyError::Rejected { status: 200, .. })
        ));
    }

    #[test]
    fn test_garbage_body() {
        assert!(matches!(
            check_reply(502, "<html>Bad Gateway</html>"),
            Err(NotifyError::Rejected { status: 502, .. })
        ));
        assert!(matches!(
            check_reply(200, "not json"),
            Err(NotifyError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_transport_error_without_token() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let notifier =
            TelegramNotifier::new("http://127.0.0.1:9", "secret-token", Duration::from_secs(2));
        let err = notifier.send("42", "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
        assert!(!err.to_string().contains("secret-token"));
    }
}
