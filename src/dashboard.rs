use crate::event::Event;
use crate::pitch_map::{PitchLayers, TargetActions};
use crate::player_summary::{Metric, MetricSet, PlayerSummary, summarize_players};
use crate::ranking::{
    ComparisonChart, DEFAULT_TOP_N, combined_top_players, comparison_chart, find_player,
};

/// Substring that picks the highlighted player when nothing else is configured.
pub const DEFAULT_TARGET: &str = "Lamine";

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub target_marker: String,
    pub top_n: usize,
    pub metric_set: MetricSet,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            target_marker: DEFAULT_TARGET.to_string(),
            top_n: DEFAULT_TOP_N,
            metric_set: MetricSet::Attacking,
        }
    }
}

/// Everything one render needs, derived from the loaded events.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub metrics: Vec<Metric>,
    pub summary: Vec<PlayerSummary>,
    /// Row of the target player, or 0 when nobody matches the marker.
    pub default_index: usize,
    pub selected_index: Option<usize>,
    pub comparison: ComparisonChart,
    pub actions: TargetActions,
    pub pitch: PitchLayers,
}

impl Dashboard {
    /// Runs the full pipeline. `player_choice` overrides the default selection when in range.
    pub fn build(
        events: &[Event],
        settings: &AnalysisSettings,
        player_choice: Option<usize>,
    ) -> Self {
        let metrics = settings.metric_set.metrics().to_vec();
        let summary = summarize_players(events, &metrics);
        let default_index = find_player(&summary, &settings.target_marker).unwrap_or(0);
        let selected_index = player_choice
            .filter(|idx| *idx < summary.len())
            .or_else(|| (!summary.is_empty()).then_some(default_index));

        let players = combined_top_players(&summary, &metrics, settings.top_n);
        let comparison = comparison_chart(&summary, &players, &metrics);

        let actions = TargetActions::collect(events, &settings.target_marker);
        let pitch = PitchLayers::build(&actions);

        Self {
            metrics,
            summary,
            default_index,
            selected_index,
            comparison,
            actions,
            pitch,
        }
    }

    pub fn selected(&self) -> Option<&PlayerSummary> {
        self.selected_index.and_then(|idx| self.summary.get(idx))
    }

    pub fn player_names(&self) -> Vec<&str> {
        self.summary.iter().map(|row| row.player.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    #[test]
    fn out_of_range_choice_falls_back_to_default() {
        let events = vec![
            Event::new(Some("Rodrigo Hernández Cascante"), EventType::Pass),
            Event::new(Some("Lamine Yamal Nasraoui Ebana"), EventType::Pass),
        ];
        let dash = Dashboard::build(&events, &AnalysisSettings::default(), Some(9));
        assert_eq!(dash.default_index, 1);
        assert_eq!(dash.selected_index, Some(1));
        assert_eq!(
            dash.player_names(),
            vec!["Rodrigo Hernández Cascante", "Lamine Yamal Nasraoui Ebana"]
        );
    }

    #[test]
    fn empty_events_have_no_selection() {
        let dash = Dashboard::build(&[], &AnalysisSettings::default(), None);
        assert!(dash.summary.is_empty());
        assert_eq!(dash.default_index, 0);
        assert!(dash.selected().is_none());
        assert!(dash.comparison.is_empty());
    }
}
