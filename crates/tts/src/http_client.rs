use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Upper bound for a single synthesis request, including the audio download
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client shared by all providers so connections are reused across lines
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .user_agent(concat!("parley/", env!("CARGO_PKG_VERSION")))
                .timeout(REQUEST_TIMEOUT)
                .pool_idle_timeout(Some(Duration::from_secs(30)))
                .tcp_nodelay(true)
                .build()
                .expect("Failed to build default HTTP client")
        })
        .clone()
}
