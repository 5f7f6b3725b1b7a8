use std::collections::VecDeque;

use crate::dashboard::{AnalysisSettings, Dashboard};
use crate::event::{Event, MatchInfo, team_matches};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Matches,
    Dashboard,
}

#[derive(Debug, Clone)]
pub struct LoadedMatch {
    pub info: MatchInfo,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub team: String,
    pub analysis: AnalysisSettings,
    pub matches: Vec<MatchInfo>,
    pub match_selected: usize,
    pub loaded: Option<LoadedMatch>,
    /// Explicit player pick; `None` means the dashboard's default row.
    pub player_choice: Option<usize>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("Spain", AnalysisSettings::default())
    }
}

impl AppState {
    pub fn new(team: impl Into<String>, analysis: AnalysisSettings) -> Self {
        Self {
            screen: Screen::Matches,
            team: team.into(),
            analysis,
            matches: Vec::new(),
            match_selected: 0,
            loaded: None,
            player_choice: None,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn selected_match(&self) -> Option<&MatchInfo> {
        self.matches.get(self.match_selected)
    }

    pub fn select_next(&mut self) {
        if self.matches.is_empty() {
            self.match_selected = 0;
            return;
        }
        self.match_selected = (self.match_selected + 1).min(self.matches.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.match_selected = self.match_selected.saturating_sub(1);
    }

    /// Recomputed on every call; nothing derived from the events is kept.
    pub fn dashboard(&self) -> Option<Dashboard> {
        let loaded = self.loaded.as_ref()?;
        Some(Dashboard::build(
            &loaded.events,
            &self.analysis,
            self.player_choice,
        ))
    }

    pub fn select_player_next(&mut self) {
        let Some(dash) = self.dashboard() else {
            return;
        };
        if dash.summary.is_empty() {
            return;
        }
        let current = dash.selected_index.unwrap_or(dash.default_index);
        self.player_choice = Some((current + 1).min(dash.summary.len() - 1));
    }

    pub fn select_player_prev(&mut self) {
        let Some(dash) = self.dashboard() else {
            return;
        };
        let current = dash.selected_index.unwrap_or(dash.default_index);
        self.player_choice = Some(current.saturating_sub(1));
    }

    pub fn reset_player_choice(&mut self) {
        self.player_choice = None;
    }

    pub fn cycle_metric_set(&mut self) {
        self.analysis.metric_set = self.analysis.metric_set.next();
        self.push_log(format!(
            "[INFO] Metric set: {}",
            self.analysis.metric_set.label()
        ));
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetMatches(Vec<MatchInfo>),
    SetEvents { info: MatchInfo, events: Vec<Event> },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchMatches { competition_id: u32, season_id: u32 },
    FetchEvents { info: MatchInfo },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetMatches(all) => {
            let selected_id = state.selected_match().map(|m| m.match_id);
            state.matches = team_matches(&all, &state.team);
            state.match_selected = selected_id
                .and_then(|id| state.matches.iter().position(|m| m.match_id == id))
                .unwrap_or(0);
            let msg = format!(
                "[INFO] {} matches for {} ({} in competition)",
                state.matches.len(),
                state.team,
                all.len()
            );
            state.push_log(msg);
        }
        Delta::SetEvents { info, events } => {
            let msg = format!("[INFO] {}: {} events", info.label(), events.len());
            state.loaded = Some(LoadedMatch { info, events });
            state.player_choice = None;
            state.screen = Screen::Dashboard;
            state.push_log(msg);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
