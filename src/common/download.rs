use std::io::Read;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

/// Fetch a small resource fully into memory.
pub(crate) fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let client = Client::builder()
        .user_agent(concat!("votomap/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("[download] failed to build HTTP client")?;

    let mut resp = client.get(url).send()
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url} returned error status"))?;

    let mut out = Vec::new();
    resp.read_to_end(&mut out).with_context(|| format!("read body of {url}"))?;
    Ok(out)
}
