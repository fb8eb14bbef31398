use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Client used for best-effort probes such as robots.txt.
pub fn create_probe_client(timeout_secs: u64) -> anyhow::Result<Client> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .use_rustls_tls()
        .https_only(false)
        .redirect(reqwest::redirect::Policy::limited(5))
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        // Targets are frequently self-signed
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(create_probe_client(5).is_ok());
    }
}
