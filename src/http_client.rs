use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

const DEFAULT_TIMEOUT_SECS: u64 = 20;

static CLIENT: OnceCell<Client> = OnceCell::new();
static TIMEOUT_SECS: OnceCell<u64> = OnceCell::new();

/// Sets the request timeout. Only effective before the first request.
pub fn configure_timeout(secs: u64) {
    let _ = TIMEOUT_SECS.set(secs);
}

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let secs = TIMEOUT_SECS.get().copied().unwrap_or(DEFAULT_TIMEOUT_SECS);
        Client::builder()
            .timeout(Duration::from_secs(secs))
            .build()
            .context("failed to build http client")
    })
}

pub fn fetch_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client
        .get(url)
        .header(USER_AGENT, concat!("euro24_terminal/", env!("CARGO_PKG_VERSION")))
        .send()
        .with_context(|| format!("request failed: {url}"))?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {} for {}", status, url));
    }
    Ok(body)
}
