use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

use euro24_terminal::dashboard::{AnalysisSettings, Dashboard};
use euro24_terminal::event::{Event, MatchInfo};
use euro24_terminal::player_summary::{Metric, MetricSet};
use euro24_terminal::provider::run_command;
use euro24_terminal::state::{AppState, Delta, ProviderCommand, Screen, apply_delta};
use euro24_terminal::statsbomb::{EventSource, parse_events_json, parse_matches_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_events() -> Vec<Event> {
    parse_events_json(&read_fixture("events.json")).expect("fixture should parse")
}

struct FixtureSource {
    fail_events: bool,
    event_calls: Cell<usize>,
}

impl EventSource for FixtureSource {
    fn fetch_matches(&self, _competition_id: u32, _season_id: u32) -> Result<Vec<MatchInfo>> {
        parse_matches_json(&read_fixture("matches.json"))
    }

    fn fetch_events(&self, match_id: u64) -> Result<Vec<Event>> {
        self.event_calls.set(self.event_calls.get() + 1);
        if self.fail_events {
            return Err(anyhow!("connection reset fetching {match_id}"));
        }
        Ok(fixture_events())
    }
}

#[test]
fn pipeline_over_fixture() {
    let events = fixture_events();
    let dash = Dashboard::build(&events, &AnalysisSettings::default(), None);

    assert_eq!(dash.summary.len(), 3);
    assert_eq!(dash.default_index, 0);
    let yamal = dash.selected().expect("target row");
    assert_eq!(yamal.player, "Lamine Yamal Nasraoui Ebana");
    assert_eq!(yamal.count(Metric::ProgressiveCarries), 1);
    assert_eq!(yamal.count(Metric::FinalThirdPasses), 1);
    assert_eq!(yamal.count(Metric::Shots), 1);

    assert_eq!(dash.actions.passes.len(), 1);
    assert_eq!(dash.actions.shots.len(), 1);
    assert_eq!(dash.actions.carries.len(), 2);
    assert_eq!(dash.pitch.carry_arrows.len(), 1);
    assert_eq!(dash.pitch.pass_lines.len(), 1);
    assert_eq!(dash.pitch.shot_points.len(), 1);

    assert_eq!(dash.comparison.players.len(), 3);
    assert_eq!(dash.comparison.players[0], "Declan Rice");
}

#[test]
fn success_metric_set_swaps_columns() {
    let events = fixture_events();
    let settings = AnalysisSettings {
        metric_set: MetricSet::Success,
        ..AnalysisSettings::default()
    };
    let dash = Dashboard::build(&events, &settings, None);
    assert_eq!(dash.metrics, MetricSet::Success.metrics().to_vec());
    let williams = dash
        .summary
        .iter()
        .find(|r| r.player.starts_with("Nicholas"))
        .expect("williams row");
    assert_eq!(williams.count(Metric::SuccessfulDribbles), 1);
    let yamal = &dash.summary[dash.default_index];
    assert_eq!(yamal.count(Metric::SuccessfulPasses), 1);
    let rice = dash.summary.iter().find(|r| r.player == "Declan Rice").expect("rice row");
    assert_eq!(rice.count(Metric::SuccessfulPasses), 0);
}

#[test]
fn missing_target_defaults_to_first_row() {
    let events = fixture_events();
    let settings = AnalysisSettings {
        target_marker: "Lamine Jr".to_string(),
        ..AnalysisSettings::default()
    };
    let dash = Dashboard::build(&events, &settings, None);
    assert_eq!(dash.default_index, 0);
    assert_eq!(dash.selected_index, Some(0));
    assert!(dash.actions.is_empty());
    assert!(dash.pitch.shot_points.is_empty());
}

#[test]
fn state_loads_team_matches_then_events() {
    let source = FixtureSource {
        fail_events: false,
        event_calls: Cell::new(0),
    };
    let mut state = AppState::default();

    let cmd = ProviderCommand::FetchMatches {
        competition_id: 55,
        season_id: 282,
    };
    for delta in run_command(&source, cmd) {
        apply_delta(&mut state, delta);
    }
    assert_eq!(state.matches.len(), 2);
    assert_eq!(state.screen, Screen::Matches);

    state.select_next();
    state.select_next();
    assert_eq!(state.match_selected, 1);
    let info = state.selected_match().cloned().expect("selected match");
    for delta in run_command(&source, ProviderCommand::FetchEvents { info }) {
        apply_delta(&mut state, delta);
    }
    assert_eq!(source.event_calls.get(), 1);
    assert_eq!(state.screen, Screen::Dashboard);

    let dash = state.dashboard().expect("dashboard");
    assert_eq!(dash.selected_index, Some(0));

    state.select_player_next();
    state.select_player_next();
    state.select_player_next();
    assert_eq!(state.player_choice, Some(2));
    state.select_player_prev();
    assert_eq!(state.dashboard().and_then(|d| d.selected_index), Some(1));

    state.cycle_metric_set();
    assert_eq!(state.analysis.metric_set, MetricSet::Success);
    assert_eq!(state.dashboard().and_then(|d| d.selected_index), Some(1));

    state.reset_player_choice();
    assert_eq!(state.dashboard().and_then(|d| d.selected_index), Some(0));
}

#[test]
fn fetch_failure_is_logged_and_state_kept() {
    let source = FixtureSource {
        fail_events: true,
        event_calls: Cell::new(0),
    };
    let mut state = AppState::default();
    apply_delta(&mut state, Delta::SetMatches(source.fetch_matches(55, 282).expect("matches")));
    let info = state.selected_match().cloned().expect("selected match");

    let deltas = run_command(&source, ProviderCommand::FetchEvents { info });
    assert_eq!(deltas.len(), 1);
    for delta in deltas {
        apply_delta(&mut state, delta);
    }
    assert!(state.loaded.is_none());
    assert_eq!(state.screen, Screen::Matches);
    let last = state.logs.back().expect("log line");
    assert!(last.starts_with("[WARN]"));
    assert!(last.contains("connection reset"));
}

#[test]
fn match_selection_survives_reload() {
    let source = FixtureSource {
        fail_events: false,
        event_calls: Cell::new(0),
    };
    let mut state = AppState::default();
    let all = source.fetch_matches(55, 282).expect("matches");
    apply_delta(&mut state, Delta::SetMatches(all.clone()));
    state.select_next();
    let before = state.selected_match().map(|m| m.match_id);

    let mut reordered = all;
    reordered.reverse();
    apply_delta(&mut state, Delta::SetMatches(reordered));
    assert_eq!(state.selected_match().map(|m| m.match_id), before);
    assert_eq!(state.match_selected, 0);
}
