//! HEAD reachability probes for link destinations.

use std::time::Duration;

use anyhow::Result;

/// Issues HEAD requests to classify destinations as reachable or not.
///
/// A destination is reachable iff the probe completes with a status in
/// `[200, 400)`. Transport errors, timeouts, malformed URLs, and any other
/// status classify as unreachable; none of these are error conditions, they
/// are the "down" signal itself. Redirects are not followed, so a `3xx`
/// response counts as a completed, reachable probe without transferring a
/// body.
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    /// Builds a prober whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }

    /// Probes a single destination URL.
    pub async fn is_reachable(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                (200..400).contains(&status)
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "probe failed");
                false
            }
        }
    }
}
