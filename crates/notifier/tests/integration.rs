//! TelegramNotifier against a local stand-in for the Bot API.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use herald_common::error::NotifyError;
use herald_notifier::{Notifier, TelegramNotifier};

/// Captured request: head (lowercased) and body.
struct Captured {
    head: String,
    body: String,
}

/// Accept one request, reply with `status_line` + `body`, return what was received.
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];

        let head_end = loop {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before request head");
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&raw[..head_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while raw.len() < head_end + content_length {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        Captured {
            head,
            body: String::from_utf8_lossy(&raw[head_end..]).into_owned(),
        }
    });

    (format!("http://{addr}"), handle)
}

#[tokio::test]
async fn test_send_posts_chat_and_text() {
    let (api_url, captured) =
        serve_once("200 OK", r#"{"ok":true,"result":{"message_id":7}}"#).await;
    let notifier = TelegramNotifier::new(api_url, "123:abc", Duration::from_secs(5));

    notifier
        .send("100500", "Changed review status for \"lab1\".")
        .await
        .unwrap();

    let captured = captured.await.unwrap();
    assert!(
        captured.head.starts_with("post /bot123:abc/sendmessage "),
        "{}",
        captured.head
    );
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "chat_id": "100500",
            "text": "Changed review status for \"lab1\"."
        })
    );
}

#[tokio::test]
async fn test_rejected_message_surfaces_description() {
    let (api_url, _captured) = serve_once(
        "403 Forbidden",
        r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was blocked by the user"}"#,
    )
    .await;
    let notifier = TelegramNotifier::new(api_url, "123:abc", Duration::from_secs(5));

    let err = notifier.send("100500", "hi").await.unwrap_err();

    match err {
        NotifyError::Rejected {
            status,
            description,
        } => {
            assert_eq!(status, 403);
            assert_eq!(description, "Forbidden: bot was blocked by the user");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}
