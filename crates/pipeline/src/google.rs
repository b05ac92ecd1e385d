//! Shared helpers for Google Cloud REST calls

use patio_config::GoogleAuth;

/// Attach credentials to a request
pub(crate) fn authorize(
    builder: reqwest::RequestBuilder,
    auth: Option<&GoogleAuth>,
) -> reqwest::RequestBuilder {
    let Some(auth) = auth else {
        return builder;
    };

    let builder = match auth.query_param() {
        Some(param) => builder.query(&[param]),
        None => builder,
    };

    match auth.bearer_token() {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Read an error response into `HTTP <status>: <body>`
pub(crate) async fn http_error(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    format!("HTTP {}: {}", status, body)
}

pub(crate) fn client(timeout: std::time::Duration) -> patio_core::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| patio_core::Error::Config(format!("Failed to create HTTP client: {}", e)))
}
