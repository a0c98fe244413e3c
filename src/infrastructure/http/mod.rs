//! HTTP fetching for media sent from URLs

use once_cell::sync::Lazy;
use reqwest::Client;

use crate::application::errors::BotError;

/// Attempts made by `get_file_and_save`
pub const DEFAULT_ATTEMPTS: u32 = 3;

static CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Fetch a URL into memory. Non-2xx responses are errors.
pub async fn get_buffer(url: &str) -> Result<Vec<u8>, BotError> {
    let response = CLIENT.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(BotError::Network(format!("GET {} returned {}", url, status)));
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(BotError::Network("Failed to get buffer".to_string()));
    }
    Ok(bytes.to_vec())
}

/// Fetch a URL, retrying up to `attempts` times. `None` once all attempts fail.
pub async fn get_file_and_save(url: &str, attempts: u32) -> Option<Vec<u8>> {
    for attempt in 1..=attempts.max(1) {
        match get_buffer(url).await {
            Ok(data) => return Some(data),
            Err(e) => tracing::warn!("Fetch attempt {}/{} for {} failed: {}", attempt, attempts, url, e),
        }
    }
    None
}

/// Minimal HTTP server for tests
#[cfg(test)]
pub(crate) mod testing {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer every request with `status` and `body`. Returns the base URL.
    pub(crate) async fn serve(status: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut request = [0u8; 2048];
                let _ = stream.read(&mut request).await;
                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes()).await;
                let _ = stream.write_all(body).await;
                let _ = stream.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }
}
