use std::path::PathBuf;

/// Published location of the wait-time dataset.
pub const DEFAULT_DATA_URL: &str =
    "https://github.com/justinross102/ThemeParkWaitTimes_EDA/raw/main/wait_times.csv";

/// Number of rows in the highest/lowest wait tables.
pub const DEFAULT_TOP_N: usize = 5;

/// Largest table size the row picker offers.
pub const MAX_TOP_N: usize = 50;

pub const ENV_DATA_URL: &str = "PARK_WAITS_DATA_URL";
pub const ENV_TOP_N: &str = "PARK_WAITS_TOP_N";

/// Where the session's dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

/// Startup settings for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub top_n: usize,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Url(DEFAULT_DATA_URL.to_string()),
            top_n: DEFAULT_TOP_N,
            window_size: [1200.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Read overrides from the process environment and command line.
    pub fn from_env() -> Self {
        Self::resolve(
            |key| std::env::var(key).ok(),
            std::env::args().nth(1),
        )
    }

    /// Apply overrides: a positional argument names a local CSV and wins over
    /// the URL variable. Unusable values fall back to defaults.
    pub fn resolve(var: impl Fn(&str) -> Option<String>, arg: Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = var(ENV_DATA_URL).filter(|u| !u.trim().is_empty()) {
            config.source = DataSource::Url(url.trim().to_string());
        }
        if let Some(path) = arg {
            config.source = DataSource::File(PathBuf::from(path));
        }

        if let Some(raw) = var(ENV_TOP_N) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > MAX_TOP_N => {
                    log::warn!("{ENV_TOP_N}={n} exceeds {MAX_TOP_N}; capping");
                    config.top_n = MAX_TOP_N;
                }
                Ok(n) if n > 0 => config.top_n = n,
                _ => log::warn!(
                    "Ignoring {ENV_TOP_N}={raw:?}; using {}",
                    DEFAULT_TOP_N
                ),
            }
        }

        config
    }
}
