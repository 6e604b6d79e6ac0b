use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

// Upstream calls set their own per-request timeouts; this is the floor for
// everything else (audit collector, etc).
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client")
});

pub fn get_http_client() -> &'static Client {
    &HTTP_CLIENT
}
