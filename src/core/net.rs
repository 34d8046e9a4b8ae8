// src/core/net.rs
//! Page Fetcher: the one stateful session a run talks to the outside world through.

use std::{fs, path::PathBuf, time::Duration};

use tracing::debug;

use crate::config::consts::USER_AGENT;
use crate::error::FetchError;

pub trait PageFetcher {
    /// Navigate to `url` and return the page source.
    fn fetch(&mut self, url: &str) -> Result<String, FetchError>;

    /// Page-load probe for the last navigation.
    fn ready(&mut self) -> bool { true }

    /// Close and relaunch the session.
    fn reset(&mut self) -> Result<(), FetchError> { Ok(()) }

    /// Whether pages come from a remote site that wants a pause between periods.
    fn is_remote(&self) -> bool { true }
}

impl<F: PageFetcher + ?Sized> PageFetcher for &mut F {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError> { (**self).fetch(url) }
    fn ready(&mut self) -> bool { (**self).ready() }
    fn reset(&mut self) -> Result<(), FetchError> { (**self).reset() }
    fn is_remote(&self) -> bool { (**self).is_remote() }
}

/* ---------------- live ---------------- */

/// Plain HTTP session. It never shows a window, so it has no headed mode.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    timeout: Duration,
    loaded: bool,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self { client: build_client(timeout)?, timeout, loaded: false })
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client, FetchError> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Reset(e.to_string()))
}

impl PageFetcher for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        self.loaded = false;
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout { url: url.to_string(), timeout: self.timeout }
            } else {
                FetchError::Navigation { url: url.to_string(), reason: e.to_string() }
            }
        };

        let resp = self.client.get(url).send().map_err(classify)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }
        let body = resp.text().map_err(classify)?;

        debug!(url, bytes = body.len(), "page fetched");
        self.loaded = !body.is_empty();
        Ok(body)
    }

    fn ready(&mut self) -> bool { self.loaded }

    fn reset(&mut self) -> Result<(), FetchError> {
        debug!("recycling http session");
        self.client = build_client(self.timeout)?;
        self.loaded = false;
        Ok(())
    }
}

/* ---------------- offline ---------------- */

/// Serves saved pages from a directory: `https://host/a/b/1998.shtml` → `<dir>/1998.shtml`.
pub struct FileFetcher {
    dir: PathBuf,
}

impl FileFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    pub fn path_for(&self, url: &str) -> PathBuf {
        let trimmed = url.split(['?', '#']).next().unwrap_or(url).trim_end_matches('/');
        let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
        self.dir.join(name)
    }
}

impl PageFetcher for FileFetcher {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let path = self.path_for(url);
        debug!(url, path = %path.display(), "serving saved page");
        fs::read_to_string(&path).map_err(|source| FetchError::Io { path, source })
    }

    fn is_remote(&self) -> bool { false }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_fetcher_maps_last_segment() {
        let f = FileFetcher::new("/tmp/pages");
        assert_eq!(
            f.path_for("https://www.baseball-reference.com/leagues/majors/1998.shtml"),
            PathBuf::from("/tmp/pages/1998.shtml")
        );
        assert_eq!(
            f.path_for("https://www.stevetheump.com/Payrolls.htm?x=1"),
            PathBuf::from("/tmp/pages/Payrolls.htm")
        );
    }

    #[test]
    fn only_the_http_session_is_remote() {
        let mut local = FileFetcher::new("/tmp/pages");
        assert!(!local.is_remote());
        assert!(!(&mut local).is_remote());

        let http = HttpFetcher::new(Duration::from_secs(5)).unwrap();
        assert!(http.is_remote());
    }

    #[test]
    fn missing_fixture_is_a_fetch_error() {
        let mut f = FileFetcher::new(std::env::temp_dir().join("mlb_scrape_no_such_dir"));
        assert!(matches!(f.fetch("https://x/1998.shtml"), Err(FetchError::Io { .. })));
    }
}
