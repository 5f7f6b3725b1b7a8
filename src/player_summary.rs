use std::collections::HashMap;

use crate::event::{Event, EventType};

pub const PROGRESSIVE_CARRY_MIN_X: f64 = 60.0;
pub const FINAL_THIRD_MIN_X: f64 = 80.0;
pub const ON_TARGET_OUTCOMES: &[&str] = &["Goal", "Saved", "Post"];
pub const COMPLETE_DRIBBLE_OUTCOMES: &[&str] = &["Complete"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    ProgressiveCarries,
    FinalThirdPasses,
    Shots,
    SuccessfulDribbles,
    SuccessfulPasses,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Qualifier {
    StartXAtLeast(f64),
    OutcomeIn(&'static [&'static str]),
    // Passes carry no outcome when they reach a team-mate.
    NoOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountRule {
    pub kind: EventType,
    pub qualifier: Qualifier,
}

impl CountRule {
    pub fn counts(&self, event: &Event) -> bool {
        if event.kind != self.kind {
            return false;
        }
        match self.qualifier {
            Qualifier::StartXAtLeast(min_x) => event.location.x().is_some_and(|x| x >= min_x),
            Qualifier::OutcomeIn(allowed) => event
                .outcome
                .as_deref()
                .is_some_and(|o| allowed.contains(&o)),
            Qualifier::NoOutcome => event.outcome.is_none(),
        }
    }
}

impl Metric {
    pub fn rule(self) -> CountRule {
        let (kind, qualifier) = match self {
            Metric::ProgressiveCarries => (
                EventType::Carry,
                Qualifier::StartXAtLeast(PROGRESSIVE_CARRY_MIN_X),
            ),
            Metric::FinalThirdPasses => {
                (EventType::Pass, Qualifier::StartXAtLeast(FINAL_THIRD_MIN_X))
            }
            Metric::Shots => (EventType::Shot, Qualifier::OutcomeIn(ON_TARGET_OUTCOMES)),
            Metric::SuccessfulDribbles => (
                EventType::Dribble,
                Qualifier::OutcomeIn(COMPLETE_DRIBBLE_OUTCOMES),
            ),
            Metric::SuccessfulPasses => (EventType::Pass, Qualifier::NoOutcome),
        };
        CountRule { kind, qualifier }
    }

    /// Column key, as used in tables and exports.
    pub fn key(self) -> &'static str {
        match self {
            Metric::ProgressiveCarries => "progressive_carries",
            Metric::FinalThirdPasses => "final_third_passes",
            Metric::Shots => "shots",
            Metric::SuccessfulDribbles => "successful_dribbles",
            Metric::SuccessfulPasses => "successful_passes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::ProgressiveCarries => "Progressive carries",
            Metric::FinalThirdPasses => "Final third passes",
            Metric::Shots => "Shots",
            Metric::SuccessfulDribbles => "Successful dribbles",
            Metric::SuccessfulPasses => "Successful passes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSet {
    Attacking,
    Success,
}

impl MetricSet {
    pub fn metrics(self) -> &'static [Metric] {
        match self {
            MetricSet::Attacking => &[
                Metric::ProgressiveCarries,
                Metric::FinalThirdPasses,
                Metric::Shots,
            ],
            MetricSet::Success => &[
                Metric::SuccessfulDribbles,
                Metric::SuccessfulPasses,
                Metric::Shots,
            ],
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "attacking" | "attack" => Some(MetricSet::Attacking),
            "success" => Some(MetricSet::Success),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            MetricSet::Attacking => MetricSet::Success,
            MetricSet::Success => MetricSet::Attacking,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricSet::Attacking => "ATTACKING",
            MetricSet::Success => "SUCCESS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    pub player: String,
    pub counts: HashMap<Metric, u32>,
}

impl PlayerSummary {
    fn empty(player: &str, metrics: &[Metric]) -> Self {
        Self {
            player: player.to_string(),
            counts: metrics.iter().map(|m| (*m, 0)).collect(),
        }
    }

    pub fn count(&self, metric: Metric) -> u32 {
        self.counts.get(&metric).copied().unwrap_or(0)
    }
}

/// One row per distinct non-null player, in order of first appearance.
pub fn summarize_players(events: &[Event], metrics: &[Metric]) -> Vec<PlayerSummary> {
    let rules: Vec<(Metric, CountRule)> = metrics.iter().map(|m| (*m, m.rule())).collect();
    let mut rows: Vec<PlayerSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        let Some(player) = event.player.as_deref() else {
            continue;
        };
        let idx = *index.entry(player).or_insert_with(|| {
            rows.push(PlayerSummary::empty(player, metrics));
            rows.len() - 1
        });
        for (metric, rule) in &rules {
            if rule.counts(event) {
                *rows[idx].counts.entry(*metric).or_insert(0) += 1;
            }
        }
    }

    rows
}
