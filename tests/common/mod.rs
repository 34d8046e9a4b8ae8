// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mlb_scrape::config::{RunOptions, Source};
use mlb_scrape::core::net::PageFetcher;
use mlb_scrape::error::FetchError;

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("mlb_it_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

pub fn opts(sources: &[Source]) -> RunOptions {
    RunOptions { sources: sources.to_vec(), pause_between_periods_ms: 0, ..RunOptions::default() }
}

/// Pages keyed by last URL segment, with knobs for the awkward cases.
#[derive(Default)]
pub struct ScriptedFetcher {
    pub pages: HashMap<String, String>,
    pub fetched: Vec<String>,
    pub resets: usize,
    /// 1-based reset calls that fail.
    pub failing_resets: Vec<usize>,
    /// Named pages that 404 this many times before they are served.
    pub failing_fetches: HashMap<String, usize>,
    pub never_ready: bool,
    pub delay: Duration,
    /// Raise this flag when the named page is fetched.
    pub cancel_on: Option<(String, Arc<AtomicBool>)>,
}

impl ScriptedFetcher {
    pub fn with_page(mut self, name: &str, html: impl Into<String>) -> Self {
        self.pages.insert(name.to_string(), html.into());
        self
    }
}

impl PageFetcher for ScriptedFetcher {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let name = url.rsplit('/').next().unwrap_or(url).to_string();
        self.fetched.push(name.clone());
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if let Some((page, flag)) = &self.cancel_on {
            if *page == name {
                flag.store(true, Ordering::Relaxed);
            }
        }
        if let Some(left) = self.failing_fetches.get_mut(&name).filter(|n| **n > 0) {
            *left -= 1;
            return Err(FetchError::Navigation { url: url.to_string(), reason: "503".to_string() });
        }
        self.pages.get(&name).cloned().ok_or_else(|| FetchError::Navigation {
            url: url.to_string(),
            reason: "404".to_string(),
        })
    }

    fn ready(&mut self) -> bool { !self.never_ready }

    fn reset(&mut self) -> Result<(), FetchError> {
        self.resets += 1;
        if self.failing_resets.contains(&self.resets) {
            return Err(FetchError::Reset(format!("browser did not come back (#{})", self.resets)));
        }
        Ok(())
    }
}

/* ---------------- page builders ---------------- */

pub const ALL_STATS_IDS: [&str; 5] = [
    "teams_standard_batting",
    "teams_standard_pitching",
    "teams_standard_fielding",
    "team_output",
    "postseason",
];

fn team_table(id: &str) -> String {
    format!(
        r#"<table id="{id}">
<thead><tr><th>Tm</th><th>G</th><th>Note</th></tr></thead>
<tbody>
<tr><td>Montreal Expos</td><td>162</td><td>MON12.5</td></tr>
<tr><td>Oakland Athletics</td><td>162</td><td>OAK4.0</td></tr>
<tr><td>New York Yankees</td><td>162</td><td>-</td></tr>
<tr><td>League Average</td><td>162</td><td></td></tr>
</tbody></table>"#
    )
}

/// First id visible, the rest shipped inside comments.
pub fn stats_page(ids: &[&str]) -> String {
    let mut body = String::new();
    for (i, id) in ids.iter().enumerate() {
        if i == 0 {
            body.push_str(&team_table(id));
        } else {
            body.push_str(&format!("<div class=\"placeholder\"></div><!--\n{}\n-->", team_table(id)));
        }
    }
    format!("<html><body>{body}</body></html>")
}

pub fn payroll_page(years: &[u16]) -> String {
    let mut body = String::from("<p>Payroll history</p>");
    for y in years {
        body.push_str(&format!(
            r#"<h3>{y} MLB Opening Day Payrolls</h3>
<table>
<tr><th>Rank</th><th>Team</th><th>Payroll</th></tr>
<tr><td>1</td><td>NY Yankees</td><td>$184,193,950</td></tr>
<tr><td>2</td><td>Boston</td><td>$127,298,500</td></tr>
<tr><td>3</td><td>Montreal</td><td>$40,897,500</td></tr>
<tr><td>4</td><td>Devil Rays</td><td>$29,556,667</td></tr>
<tr><td>Total</td><td></td><td>$381,946,617</td></tr>
</table>"#
        ));
    }
    format!("<html><body>{body}</body></html>")
}
