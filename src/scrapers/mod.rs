//! News site scrapers.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Indexing**: discover article URLs from the site's daily archive pages
//! 2. **Fetching**: download each article and parse it into an
//!    [`Article`](crate::models::Article) plus its comments
//!
//! Parsing is kept in pure functions over an HTML string so that it can be
//! tested offline; only the `fetch_*`/`index_*` methods touch the network.
//! Pages are requested one at a time. A page that keeps failing is given up
//! on after the configured number of attempts, logged, and skipped.

pub mod siol;

use crate::error::ToolError;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, instrument, warn};

/// GET `url` and return its body, trying up to `attempts` times.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `url` - Absolute page URL
/// * `attempts` - How many requests are made before giving up
///
/// # Returns
///
/// The response body of the first successful attempt.
///
/// # Errors
///
/// When every attempt fails, the last failure decides the error:
/// - [`ToolError::Unreachable`] if the server answered with an error status
///   (the page is gone, see [`is_unreachable`])
/// - [`ToolError::Network`] if no response arrived at all, e.g. a refused
///   connection, a DNS failure or a timeout
#[instrument(level = "info", skip_all, fields(%url, attempts))]
pub async fn fetch_page(
    client: &Client,
    url: &str,
    attempts: usize,
) -> Result<String, Box<dyn Error>> {
    let mut last_status: Option<u16> = None;
    let mut last_reason = String::new();

    for attempt in 1..=attempts {
        let result: Result<String, reqwest::Error> = async {
            client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        }
        .await;

        match result {
            Ok(body) => {
                debug!(attempt, bytes = body.len(), "Fetched page");
                return Ok(body);
            }
            Err(e) => {
                warn!(attempt, max = attempts, error = %e, "Failed to open page");
                last_status = e.status().map(|status| status.as_u16());
                last_reason = e.to_string();
            }
        }
    }

    let error = match last_status {
        Some(status) => ToolError::Unreachable {
            url: url.to_string(),
            status,
            attempts,
        },
        None => ToolError::Network {
            url: url.to_string(),
            attempts,
            reason: last_reason,
        },
    };
    Err(Box::new(error))
}

/// Whether an error from [`fetch_page`] means the page is gone. Network
/// failures do not count.
pub fn is_unreachable(e: &(dyn Error + 'static)) -> bool {
    matches!(e.downcast_ref::<ToolError>(), Some(ToolError::Unreachable { .. }))
}

#[cfg(test)]
pub(crate) mod testing {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Start a local server answering every request with `status` and an
    /// empty body. Returns its base URL.
    pub(crate) async fn serve_status(status: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut request = [0u8; 4096];
                    let _ = socket.read(&mut request).await;
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        format!("http://{addr}")
    }
}

#[cfg(test)]
mod tests {
    use super::testing::serve_status;
    use super::*;

    #[test]
    fn test_is_unreachable() {
        let e: Box<dyn Error> = Box::new(ToolError::Unreachable {
            url: "http://siol.net/x-1".to_string(),
            status: 404,
            attempts: 5,
        });
        assert!(is_unreachable(e.as_ref()));

        let offline: Box<dyn Error> = Box::new(ToolError::Network {
            url: "http://siol.net/x-1".to_string(),
            attempts: 5,
            reason: "connection refused".to_string(),
        });
        assert!(!is_unreachable(offline.as_ref()));

        let other: Box<dyn Error> = Box::new(ToolError::MissingId("x".to_string()));
        assert!(!is_unreachable(other.as_ref()));
    }

    #[tokio::test]
    async fn test_refused_connection_is_not_a_gone_page() {
        let client = Client::new();
        // Nothing listens on port 9 of localhost.
        let err = fetch_page(&client, "http://127.0.0.1:9/", 2).await.unwrap_err();
        assert!(!is_unreachable(err.as_ref()));
        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::Network { attempts: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_error_status_is_a_gone_page() {
        let base = serve_status("404 Not Found").await;
        let client = Client::new();
        let err = fetch_page(&client, &format!("{base}/novice/x-1"), 2)
            .await
            .unwrap_err();
        assert!(is_unreachable(err.as_ref()));
        assert!(err.to_string().contains("HTTP 404 after 2 attempts"));
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let base = serve_status("200 OK").await;
        let body = fetch_page(&Client::new(), &base, 1).await.unwrap();
        assert!(body.is_empty());
    }
}
