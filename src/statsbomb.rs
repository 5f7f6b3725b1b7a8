use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Settings;
use crate::event::{Event, EventType, Location, MatchInfo};
use crate::http_client::fetch_text;

/// Read-only provider of matches and their event feeds.
pub trait EventSource {
    fn fetch_matches(&self, competition_id: u32, season_id: u32) -> Result<Vec<MatchInfo>>;
    fn fetch_events(&self, match_id: u64) -> Result<Vec<Event>>;
}

#[derive(Debug, Clone)]
enum DataRoot {
    Remote(String),
    Local(PathBuf),
}

/// The StatsBomb open-data layout, served over HTTP or from a local checkout.
#[derive(Debug, Clone)]
pub struct OpenData {
    root: DataRoot,
}

impl OpenData {
    pub fn remote(base_url: impl Into<String>) -> Self {
        Self {
            root: DataRoot::Remote(base_url.into()),
        }
    }

    pub fn local(dir: impl Into<PathBuf>) -> Self {
        Self {
            root: DataRoot::Local(dir.into()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        match settings.data_dir.as_ref() {
            Some(dir) => Self::local(dir.clone()),
            None => Self::remote(settings.base_url.clone()),
        }
    }

    pub fn describe(&self) -> String {
        match &self.root {
            DataRoot::Remote(url) => url.clone(),
            DataRoot::Local(dir) => dir.display().to_string(),
        }
    }

    fn read(&self, rel: &str) -> Result<String> {
        match &self.root {
            DataRoot::Remote(base) => {
                let url = format!("{base}/{rel}");
                debug!(%url, "fetching");
                fetch_text(&url)
            }
            DataRoot::Local(dir) => {
                let path = dir.join(rel);
                fs::read_to_string(&path)
                    .with_context(|| format!("failed reading {}", path.display()))
            }
        }
    }
}

impl EventSource for OpenData {
    fn fetch_matches(&self, competition_id: u32, season_id: u32) -> Result<Vec<MatchInfo>> {
        let body = self
            .read(&format!("matches/{competition_id}/{season_id}.json"))
            .context("matches request failed")?;
        let matches = parse_matches_json(&body)?;
        info!(competition_id, season_id, count = matches.len(), "matches loaded");
        Ok(matches)
    }

    fn fetch_events(&self, match_id: u64) -> Result<Vec<Event>> {
        let body = self
            .read(&format!("events/{match_id}.json"))
            .context("events request failed")?;
        let events = parse_events_json(&body)?;
        info!(match_id, count = events.len(), "events loaded");
        Ok(events)
    }
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    match_id: u64,
    #[serde(default)]
    match_date: String,
    home_team: RawHomeTeam,
    away_team: RawAwayTeam,
    home_score: Option<u8>,
    away_score: Option<u8>,
    competition_stage: Option<Named>,
}

#[derive(Debug, Deserialize)]
struct RawHomeTeam {
    home_team_name: String,
}

#[derive(Debug, Deserialize)]
struct RawAwayTeam {
    away_team_name: String,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    id: String,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    period: u8,
    #[serde(default)]
    minute: u16,
    #[serde(default)]
    second: u8,
    #[serde(rename = "type")]
    kind: Named,
    team: Option<Named>,
    player: Option<Named>,
    location: Option<Value>,
    pass: Option<RawDetail>,
    carry: Option<RawDetail>,
    shot: Option<RawDetail>,
    dribble: Option<RawDetail>,
}

#[derive(Debug, Deserialize)]
struct RawDetail {
    end_location: Option<Value>,
    outcome: Option<Named>,
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchInfo>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let rows: Vec<RawMatch> = serde_json::from_str(trimmed).context("invalid matches json")?;
    Ok(rows
        .into_iter()
        .map(|m| MatchInfo {
            match_id: m.match_id,
            match_date: m.match_date,
            home_team: m.home_team.home_team_name,
            away_team: m.away_team.away_team_name,
            home_score: m.home_score,
            away_score: m.away_score,
            stage: m.competition_stage.map(|s| s.name),
        })
        .collect())
}

pub fn parse_events_json(raw: &str) -> Result<Vec<Event>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let rows: Vec<RawEvent> = serde_json::from_str(trimmed).context("invalid events json")?;
    Ok(rows.into_iter().map(event_from_raw).collect())
}

fn event_from_raw(raw: RawEvent) -> Event {
    let kind = EventType::from_name(&raw.kind.name);
    // End location and outcome live in the sub-record named after the type.
    let detail = match &kind {
        EventType::Pass => raw.pass,
        EventType::Carry => raw.carry,
        EventType::Shot => raw.shot,
        EventType::Dribble => raw.dribble,
        EventType::Other(_) => None,
    };
    let (end_location, outcome) = match detail {
        Some(d) => (
            Location::from_value(d.end_location.as_ref()),
            d.outcome.map(|o| o.name),
        ),
        None => (Location::Unknown, None),
    };

    Event {
        id: raw.id,
        index: raw.index,
        period: raw.period,
        minute: raw.minute,
        second: raw.second,
        team: raw.team.map(|t| t.name),
        player: raw.player.map(|p| p.name),
        kind,
        location: Location::from_value(raw.location.as_ref()),
        end_location,
        outcome,
    }
}
