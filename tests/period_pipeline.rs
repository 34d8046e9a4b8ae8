// tests/period_pipeline.rs
mod common;

use std::fs;
use std::time::{Duration, Instant};

use common::{opts, payroll_page, stats_page, tmp_dir, ScriptedFetcher, ALL_STATS_IDS};
use mlb_scrape::config::Source;
use mlb_scrape::csv::{parse_record, Delim};
use mlb_scrape::pipeline::{Pipeline, Status, Warning};
use mlb_scrape::specs::overrides::payroll_override;
use mlb_scrape::specs::LogicalTable;
use mlb_scrape::store::{CsvStore, MemoryStore};

#[test]
fn full_stats_page_writes_every_table_with_current_names() {
    let mut fetcher = ScriptedFetcher::default().with_page("2003.shtml", stats_page(&ALL_STATS_IDS));
    let mut store = MemoryStore::default();
    let mut p = Pipeline::new(&mut fetcher, &mut store, &opts(&[Source::Stats]));

    let res = p.run_period(2003).unwrap();
    assert_eq!(res.status, Status::Succeeded, "{:?}", res.warnings);
    assert_eq!(res.files.len(), 5);
    assert_eq!(res.tables_found.len(), 5);
    drop(p);

    let batting = store.get(2003, LogicalTable::Batting).unwrap();
    let teams: Vec<&str> = batting.column(0).collect();
    assert_eq!(teams, ["Washington Nationals", "Athletics", "New York Yankees"]);
    let notes: Vec<&str> = batting.column(2).collect();
    assert_eq!(notes, ["WSN12.5", "ATH4.0", "-"]);

    // comment-hidden tables come through the same way
    let post = store.get(2003, LogicalTable::Postseason).unwrap();
    assert_eq!(post.len(), 3);
}

#[test]
fn missing_tables_degrade_to_partial() {
    let mut fetcher = ScriptedFetcher::default()
        .with_page("2004.shtml", stats_page(&["teams_standard_batting", "teams_standard_pitching"]));
    let mut store = MemoryStore::default();
    let mut p = Pipeline::new(&mut fetcher, &mut store, &opts(&[Source::Stats]));

    let res = p.run_period(2004).unwrap();
    assert_eq!(res.status, Status::PartialFailure);
    assert_eq!(res.files.len(), 2);
    for t in [LogicalTable::Fielding, LogicalTable::WaaPositions, LogicalTable::Postseason] {
        assert!(res.warnings.contains(&Warning::MissingTable { table: t }), "{t}");
    }
}

#[test]
fn page_without_tables_fails_the_period() {
    let mut fetcher = ScriptedFetcher::default().with_page("2005.shtml", "<html><body><p>maintenance</p></body></html>");
    let mut store = MemoryStore::default();
    let mut p = Pipeline::new(&mut fetcher, &mut store, &opts(&[Source::Stats]));

    let res = p.run_period(2005).unwrap();
    assert_eq!(res.status, Status::Failed);
    assert!(res.files.is_empty());
    assert!(res.failure.is_some());
}

#[test]
fn navigation_error_fails_the_period() {
    let mut fetcher = ScriptedFetcher::default();
    let mut store = MemoryStore::default();
    let mut p = Pipeline::new(&mut fetcher, &mut store, &opts(&[Source::Stats]));

    let res = p.run_period(2006).unwrap();
    assert_eq!(res.status, Status::Failed);
    assert!(res.failure.unwrap().contains("2006.shtml"));
}

#[test]
fn page_that_never_loads_is_a_page_load_failure() {
    let mut fetcher = ScriptedFetcher { never_ready: true, ..Default::default() }
        .with_page("2007.shtml", stats_page(&ALL_STATS_IDS));
    let mut store = MemoryStore::default();
    let mut p = Pipeline::new(&mut fetcher, &mut store, &opts(&[Source::Stats]))
        .with_ready_wait(Duration::from_millis(50));

    let res = p.run_period(2007).unwrap();
    assert_eq!(res.status, Status::Failed);
    assert!(res.tables_found.is_empty());
    drop(p);
    assert!(store.tables.is_empty());
}

#[test]
fn budget_below_discovery_floor_after_load_times_out() {
    let mut fetcher = ScriptedFetcher { delay: Duration::from_millis(20), ..Default::default() }
        .with_page("2008.shtml", stats_page(&ALL_STATS_IDS));
    let mut store = MemoryStore::default();
    let mut o = opts(&[Source::Stats]);
    o.period_budget_secs = 10;
    let mut p = Pipeline::new(&mut fetcher, &mut store, &o);

    let res = p.run_period(2008).unwrap();
    assert_eq!(res.status, Status::Failed);
    let reason = res.failure.unwrap();
    assert!(reason.contains("discovering"), "{reason}");
    assert!(res.tables_found.is_empty());
}

#[test]
fn curated_payroll_years_skip_the_payroll_page() {
    let mut fetcher = ScriptedFetcher::default();
    let mut store = MemoryStore::default();
    let mut p = Pipeline::new(&mut fetcher, &mut store, &opts(&[Source::Payroll]));

    let res = p.run_period(1998).unwrap();
    assert_eq!(res.status, Status::Succeeded);
    drop(p);
    assert!(fetcher.fetched.is_empty());

    let sal = store.get(1998, LogicalTable::Payroll).unwrap();
    assert_eq!(sal.headers, ["Tm", "Payroll"]);
    assert_eq!(sal.len(), 30);
    let amounts: Vec<i64> = sal.column(1).map(|v| v.parse().unwrap()).collect();
    assert!(amounts.windows(2).all(|w| w[0] >= w[1]));

    let curated: Vec<Vec<String>> = payroll_override(1998)
        .unwrap()
        .iter()
        .map(|(team, amount)| vec![team.name().to_string(), amount.to_string()])
        .collect();
    assert_eq!(sal.rows, curated);
    assert_eq!(sal.rows[0], ["Baltimore Orioles", "71860921"]);
    assert_eq!(sal.rows[29], ["Washington Nationals", "8317000"]);
}

#[test]
fn stats_fetch_failure_fails_the_period_even_with_curated_payroll() {
    let mut fetcher = ScriptedFetcher::default();
    let mut store = MemoryStore::default();
    let mut p = Pipeline::new(&mut fetcher, &mut store, &opts(&Source::ALL));

    let res = p.run_period(1998).unwrap();
    assert_eq!(res.status, Status::Failed);
    assert!(res.is_failed());
    assert!(res.aborted);
    assert!(res.failure.as_deref().unwrap().contains("1998.shtml"));
    // nothing after the aborted fetch runs
    assert!(res.files.is_empty());
    drop(p);
    assert_eq!(fetcher.fetched, ["1998.shtml"]);
    assert!(store.tables.is_empty());
}

#[test]
fn payroll_page_is_fetched_once_and_split_by_year() {
    let mut fetcher = ScriptedFetcher::default().with_page("Payrolls.htm", payroll_page(&[2001, 2002]));
    let mut store = MemoryStore::default();
    let mut p = Pipeline::new(&mut fetcher, &mut store, &opts(&[Source::Payroll]));

    let a = p.run_period(2001).unwrap();
    let b = p.run_period(2002).unwrap();
    let c = p.run_period(2003).unwrap();
    assert_eq!(a.status, Status::Succeeded, "{:?}", a.warnings);
    assert_eq!(b.status, Status::Succeeded);
    assert_eq!(c.status, Status::Failed);
    assert!(c.warnings.contains(&Warning::MissingTable { table: LogicalTable::Payroll }));
    drop(p);
    assert_eq!(fetcher.fetched, ["Payrolls.htm"]);

    let sal = store.get(2001, LogicalTable::Payroll).unwrap();
    let teams: Vec<&str> = sal.column(0).collect();
    assert_eq!(teams, ["New York Yankees", "Boston Red Sox", "Washington Nationals", "Tampa Bay Rays"]);
    assert_eq!(sal.get(0, "Payroll"), Some("184193950"));
}

#[test]
fn unavailable_payroll_page_only_warns_when_stats_succeed() {
    let mut fetcher = ScriptedFetcher::default().with_page("2010.shtml", stats_page(&ALL_STATS_IDS));
    let mut store = MemoryStore::default();
    let mut p = Pipeline::new(&mut fetcher, &mut store, &opts(&Source::ALL));

    let res = p.run_period(2010).unwrap();
    assert_eq!(res.status, Status::PartialFailure);
    assert_eq!(res.files.len(), 5);
    assert!(res.warnings.iter().any(|w| matches!(w, Warning::SourceUnavailable { source: Source::Payroll, .. })));
}

#[test]
fn payroll_page_wait_is_capped_by_the_period_budget() {
    let mut fetcher = ScriptedFetcher { never_ready: true, ..Default::default() }
        .with_page("Payrolls.htm", payroll_page(&[2001]));
    let mut store = MemoryStore::default();
    let mut o = opts(&[Source::Payroll]);
    o.period_budget_secs = 0;
    let mut p = Pipeline::new(&mut fetcher, &mut store, &o).with_ready_wait(Duration::from_secs(30));

    let started = Instant::now();
    let res = p.run_period(2001).unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(res.status, Status::Failed);
    let unavailable = res.warnings.iter().any(|w| {
        matches!(w, Warning::SourceUnavailable { reason, .. } if reason.contains("did not finish loading"))
    });
    assert!(unavailable, "{:?}", res.warnings);
}

#[test]
fn csv_store_lays_out_one_directory_per_season() {
    let root = tmp_dir("layout");
    let mut fetcher = ScriptedFetcher::default()
        .with_page("2011.shtml", stats_page(&["teams_standard_batting"]))
        .with_page("Payrolls.htm", payroll_page(&[2011]));
    let mut p = Pipeline::new(&mut fetcher, CsvStore::new(&root, Delim::Tsv), &opts(&Source::ALL));

    let res = p.run_period(2011).unwrap();
    assert_eq!(res.status, Status::PartialFailure);

    let batting = root.join("2011").join("Batting_2011.tsv");
    let salaries = root.join("2011").join("Salaries_2011.tsv");
    assert!(batting.is_file());
    assert!(salaries.is_file());

    let rec = parse_record(&fs::read_to_string(&salaries).unwrap(), Delim::Tsv);
    assert_eq!(rec.headers, ["Tm", "Payroll"]);
    assert_eq!(rec.len(), 4);

    let leftovers: Vec<_> = fs::read_dir(root.join("2011"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
        .collect();
    assert!(leftovers.is_empty());
}
