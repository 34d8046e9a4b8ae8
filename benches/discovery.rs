// benches/discovery.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use mlb_scrape::specs::{stats::locate, LogicalTable};
use mlb_scrape::table::{discover_tables, DiscoveryLimits};
use mlb_scrape::teams::{Normalizer, Team};

/// Saved page if present, otherwise a synthetic page shaped like the real one:
/// one visible table, the rest commented out between lots of filler comments.
fn load_sample() -> String {
    std::fs::read_to_string(".ignore/page_samples/2004.shtml").unwrap_or_else(|_| synthetic())
}

fn team_table(id: &str) -> String {
    let mut s = format!("<table id=\"{id}\"><thead><tr><th>Tm</th><th>G</th><th>R</th><th>H</th></tr></thead><tbody>");
    for (i, t) in Team::ALL.iter().enumerate() {
        s.push_str(&format!("<tr><td>{}</td><td>162</td><td>{}</td><td>{}</td></tr>", t.name(), 600 + i, 1300 + i));
    }
    s.push_str("<tr><td>League Average</td><td>162</td><td>700</td><td>1400</td></tr></tbody></table>");
    s
}

fn synthetic() -> String {
    let mut s = String::from("<html><body>");
    s.push_str(&team_table("teams_standard_batting"));
    for (i, id) in ["teams_standard_pitching", "teams_standard_fielding", "team_output", "postseason"].iter().enumerate() {
        for k in 0..8 {
            s.push_str(&format!("<!-- ad slot {i}.{k} --><div class=\"filler\">{}</div>", "x".repeat(200)));
        }
        s.push_str(&format!("<div class=\"placeholder\"><!--\n{}\n--></div>", team_table(id)));
    }
    s.push_str("</body></html>");
    s
}

fn bench_discovery(c: &mut Criterion) {
    let doc = load_sample();
    let limits = DiscoveryLimits::default();

    c.bench_function("discover", |b| {
        b.iter(|| {
            let found = discover_tables(black_box(&doc), &limits);
            black_box(found.tables.len())
        })
    });

    let found = discover_tables(&doc, &limits);
    let norm = Normalizer::default();
    c.bench_function("locate_and_normalize", |b| {
        b.iter(|| {
            let mut n = 0;
            for t in LogicalTable::STATS {
                if let mlb_scrape::specs::stats::Located::Found { record, .. } = locate(black_box(&found), t) {
                    n += norm.normalize_record(&record).changes.len();
                }
            }
            black_box(n)
        })
    });
}

criterion_group!(benches, bench_discovery);
criterion_main!(benches);
