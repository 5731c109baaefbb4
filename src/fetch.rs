//! HTTP page fetching shared by the orchestrator and the resolver.

use crate::error::ContentError;
use reqwest::Client;
use tracing::{debug, info, instrument};

const USER_AGENT: &str = concat!("paywall_reader/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for every outbound request.
///
/// No request timeout is configured: a hung upstream blocks only the
/// request that issued it, and callers impose their own deadline.
pub fn build_client() -> Result<Client, ContentError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ContentError::Config(format!("cannot build http client: {e}")))
}

/// Fetch `url` and return its body as text.
///
/// # Errors
///
/// [`ContentError::Fetch`] on transport failure or a non-2xx status.
#[instrument(level = "info", skip(client))]
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, ContentError> {
    let fetch_err = |reason: String| ContentError::Fetch {
        url: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_err(e.to_string()))?;
    let status = response.status();
    debug!(%status, "Received response");
    if !status.is_success() {
        return Err(fetch_err(format!("HTTP {status}")));
    }

    let body = response.text().await.map_err(|e| fetch_err(e.to_string()))?;
    info!(bytes = body.len(), "Fetched page");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_html_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let body = fetch_html(&client, &format!("{}/page", server.uri())).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_html_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let err = fetch_html(&client, &format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Fetch { ref reason, .. } if reason.contains("404")));
    }
}
