// src/config/consts.rs

// Storage
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const LOG_FILE: &str = "scraper.log";
pub const FULL_PREFIX: &str = "all_";
pub const SEARCH_PREFIX: &str = "search_";
pub const DEFAULT_SEARCH: &str = "baker road";

// Browser
pub const DEFAULT_WEBDRIVER: &str = "http://localhost:9515";
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
pub const WINDOW_SIZE: (u32, u32) = (1400, 900);

// Pagination
pub const MAX_PAGES: usize = 50;
pub const MAX_FILTER_REMOVALS: usize = 5;
pub const MIN_ROW_CELLS: usize = 3;
pub const PAGE_SIZE_PREFS: &[&str] = &["1000", "500", "100", "All"];

// Settle budgets (ms)
pub const NAVIGATE_TIMEOUT_MS: u64 = 10_000;
pub const INTERACT_TIMEOUT_MS: u64 = 5_000;
pub const PAGINATE_TIMEOUT_MS: u64 = 4_000;
pub const POLL_MS: u64 = 250;
/// Lowercase class names of the report's loading overlay.
pub const BUSY_MARKERS: &[&str] = &["u-processing", "a-irr-processing"];
pub const DATASET_PAUSE_MS: u64 = 2_000;

// Reporting
pub const SUMMARY_LIMIT: usize = 20;

// Locality policy
pub const COUNTIES: &[&str] = &["Rutherford", "Wilson", "Williamson", "Davidson", "Bedford", "Cannon"];
pub const KEYWORDS: &[&str] = &[
    "geothermal", "karst", "sinkhole", "subsidence", "cave", "void",
    "well explosion", "well damage", "groundwater", "aquifer", "foundation",
    "ground collapse", "drilling damage", "water well", "baker road", "baker rd",
    "poplar hill", "blackman", "mid-state", "rg anderson",
];
