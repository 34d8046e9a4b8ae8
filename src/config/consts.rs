// src/config/consts.rs

// Sources
pub const STATS_URL_TMPL: &str = "https://www.baseball-reference.com/leagues/majors/{year}.shtml";
pub const PAYROLL_URL: &str = "https://www.stevetheump.com/Payrolls.htm";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Periods
pub const FIRST_PERIOD: u16 = 1998;
pub const LAST_PERIOD: u16 = 2025;
pub const MIN_SUPPORTED_PERIOD: u16 = 1871;
pub const MAX_SUPPORTED_PERIOD: u16 = 2100;

// Time budgets (seconds)
pub const PERIOD_BUDGET_SECS: u64 = 180;
pub const NAV_TIMEOUT_SECS: u64 = 60;
pub const PAGE_READY_WAIT_SECS: u64 = 15;
pub const DISCOVERY_CAP_SECS: u64 = 60;
pub const DISCOVERY_FLOOR_SECS: u64 = 10;
pub const READY_POLL_MS: u64 = 100;

// Be polite between periods
pub const PAUSE_BETWEEN_PERIODS_MS: u64 = 10_000;

// Discovery
pub const MAX_COMMENT_BLOCKS: usize = 50;

// Role inference
pub const IDENTITY_SAMPLE_ROWS: usize = 10;
pub const MIN_IDENTITY_MATCHES: usize = 3;
pub const PAYROLL_MAX_THRESHOLD: i64 = 10_000_000;
pub const PAYROLL_MEDIAN_THRESHOLD: i64 = 5_000_000;
pub const MIN_NUMERIC_VALUES: usize = 10;

// Payroll page: a full season table has ~30 rows
pub const MIN_PAYROLL_ROWS: usize = 20;

// Output
pub const DEFAULT_OUT_ROOT: &str = "Data";
pub const LOG_FILE: &str = ".store/debug.log";
