use std::env;
use std::path::PathBuf;

use crate::dashboard::AnalysisSettings;
use crate::player_summary::MetricSet;

pub const EURO_2024_COMPETITION_ID: u32 = 55;
pub const EURO_2024_SEASON_ID: u32 = 282;
pub const DEFAULT_TEAM: &str = "Spain";
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/statsbomb/open-data/master/data";
pub const MAX_TOP_N: usize = 20;
pub const MIN_HTTP_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Settings {
    pub competition_id: u32,
    pub season_id: u32,
    pub team: String,
    pub analysis: AnalysisSettings,
    pub data_dir: Option<PathBuf>,
    pub base_url: String,
    pub http_timeout_secs: u64,
    pub export_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            competition_id: EURO_2024_COMPETITION_ID,
            season_id: EURO_2024_SEASON_ID,
            team: DEFAULT_TEAM.to_string(),
            analysis: AnalysisSettings::default(),
            data_dir: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout_secs: 20,
            export_dir: PathBuf::from("figures"),
            log_file: None,
        }
    }
}

impl Settings {
    /// Loads `.env.local` / `.env` and reads the environment over the defaults.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; unparseable or blank values keep the defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let string = |key: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Settings::default();
        Self {
            competition_id: parse_or(string("COMPETITION_ID"), defaults.competition_id),
            season_id: parse_or(string("SEASON_ID"), defaults.season_id),
            team: string("TEAM").unwrap_or(defaults.team),
            analysis: AnalysisSettings {
                target_marker: string("TARGET_PLAYER").unwrap_or(defaults.analysis.target_marker),
                top_n: parse_or(string("TOP_N"), defaults.analysis.top_n).clamp(1, MAX_TOP_N),
                metric_set: string("METRIC_SET")
                    .and_then(|raw| MetricSet::parse(&raw))
                    .unwrap_or(defaults.analysis.metric_set),
            },
            data_dir: string("STATSBOMB_DATA_DIR").map(PathBuf::from),
            base_url: string("STATSBOMB_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            http_timeout_secs: parse_or(string("HTTP_TIMEOUT_SECS"), defaults.http_timeout_secs)
                .max(MIN_HTTP_TIMEOUT_SECS),
            export_dir: string("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            log_file: string("LOG_FILE").map(PathBuf::from),
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse::<T>().ok()).unwrap_or(default)
}
