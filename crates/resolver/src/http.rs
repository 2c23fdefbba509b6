use reqwest::Client;
use rustls::{ClientConfig, crypto::ring};
use rustls_platform_verifier::BuilderVerifierExt;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn default_client() -> Client {
    client_with_timeout(DEFAULT_TIMEOUT)
}

/// Builds the HTTP client used for manifest and alternate-URL fetches.
///
/// Every request carries an explicit timeout so a stalled remote cannot hang
/// resolution indefinitely.
pub fn client_with_timeout(timeout: Duration) -> Client {
    let provider = Arc::new(ring::default_provider());
    let tls_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .expect("Failed to configure default TLS protocol versions")
        .with_platform_verifier()
        .unwrap()
        .with_no_client_auth();

    Client::builder()
        .use_preconfigured_tls(tls_config)
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}
