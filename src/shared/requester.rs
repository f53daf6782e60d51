use crate::model::{InteractionFollowupUrlData, InteractionResponse, Message};
use crate::request::WebhookMessageRequest;
use crate::shared::discord::create_interaction_callback_url;
use crate::shared::HTTP_CLIENT;

/// Dispatches a finalized webhook message request and materializes the
/// returned message entity.
///
/// `finalize_data` is invoked exactly once per call, at the point the request
/// is actually sent; whether the request goes out as JSON or multipart is
/// decided by the body the builder produced.
pub async fn execute_webhook_message(
    url: &str,
    mut request: WebhookMessageRequest,
) -> anyhow::Result<Message> {
    let body = request.finalize_data()?;
    tracing::debug!(
        "Executing webhook message against {} as {}",
        url,
        body.content_type()
    );

    let response = body.apply_to(HTTP_CLIENT.post(url))?.send().await?;
    let status = response.status();
    if status.is_success() {
        let payload = response.json::<serde_json::Value>().await?;
        request.handle_success(payload)
    } else {
        let text = response.text().await.unwrap_or_default();
        tracing::error!("Failed to execute webhook message: {} - {}", status, text);
        anyhow::bail!("Discord API returned {}: {}", status, text)
    }
}

/// Sends a followup message for a deferred interaction.
pub async fn execute_followup_message(
    followup: &InteractionFollowupUrlData,
    request: WebhookMessageRequest,
) -> anyhow::Result<Message> {
    execute_webhook_message(&followup.followup_url(), request).await
}

/// Posts an interaction acknowledgement to the callback endpoint.
pub async fn create_interaction_response(
    interaction_id: u64,
    token: &str,
    response: InteractionResponse,
) -> anyhow::Result<()> {
    let url = create_interaction_callback_url(interaction_id, token);
    let api_response = HTTP_CLIENT.post(&url).json(&response).send().await?;
    let status = api_response.status();
    if status.is_success() {
        Ok(())
    } else {
        let text = api_response.text().await.unwrap_or_default();
        tracing::error!("Failed to create interaction response: {} - {}", status, text);
        anyhow::bail!("Discord API returned {}: {}", status, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            if let Some(position) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buffer[..position]).to_string();
                let content_length = headers
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                let total = position + 4 + content_length;
                while buffer.len() < total {
                    let read = socket.read(&mut chunk).await.unwrap();
                    buffer.extend_from_slice(&chunk[..read]);
                }
                return String::from_utf8_lossy(&buffer[..total]).into_owned();
            }
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                return String::from_utf8_lossy(&buffer).into_owned();
            }
            buffer.extend_from_slice(&chunk[..read]);
        }
    }

    /// Accepts a single connection, records the full request and answers it
    /// with the given canned response.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let recorded = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            recorded
        });
        (format!("http://{}", address), handle)
    }

    #[tokio::test]
    async fn execute_sends_json_and_returns_the_created_message() {
        let (url, server) = serve_once("200 OK", r#"{"id":"77","content":"hello"}"#).await;
        let mut request = WebhookMessageRequest::new(1234);
        request.set_content(Some("hello"));

        let message = execute_webhook_message(&url, request).await.unwrap();
        assert_eq!(message.id, "77");
        assert_eq!(message.channel_id, "1234");
        assert!(!message.cache_backed);

        let recorded = server.await.unwrap();
        assert!(recorded
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        assert!(recorded.contains(r#""content":"hello""#));
        assert!(recorded.contains(r#""allowed_mentions""#));
    }

    #[tokio::test]
    async fn execute_sends_multipart_when_attachments_are_pending() {
        let (url, server) = serve_once("200 OK", r#"{"id":"78"}"#).await;
        let mut request = WebhookMessageRequest::new(1234);
        request.set_content(Some("with file"));
        request.add_file("notes.txt", vec![110, 111], &[]).unwrap();

        let message = execute_webhook_message(&url, request).await.unwrap();
        assert_eq!(message.id, "78");

        let recorded = server.await.unwrap();
        assert!(recorded
            .to_ascii_lowercase()
            .contains("content-type: multipart/form-data; boundary="));
        assert!(recorded.contains(r#"name="file0""#));
        assert!(recorded.contains(r#"filename="notes.txt""#));
        assert!(recorded.contains(r#"name="payload_json""#));
    }

    #[tokio::test]
    async fn execute_surfaces_api_errors() {
        let (url, server) = serve_once("403 Forbidden", r#"{"message":"Missing Access"}"#).await;
        let request = WebhookMessageRequest::new(1);

        let error = execute_webhook_message(&url, request).await.unwrap_err();
        assert!(error.to_string().contains("403"));
        server.await.unwrap();
    }
}
