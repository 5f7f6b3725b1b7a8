use std::collections::BTreeSet;

use crate::player_summary::{Metric, PlayerSummary};

pub const DEFAULT_TOP_N: usize = 6;

/// Top `n` rows by `metric`, descending. Ties keep summary order.
pub fn top_n(rows: &[PlayerSummary], metric: Metric, n: usize) -> Vec<PlayerSummary> {
    let mut sorted: Vec<&PlayerSummary> = rows.iter().collect();
    sorted.sort_by(|a, b| b.count(metric).cmp(&a.count(metric)));
    sorted.into_iter().take(n).cloned().collect()
}

/// Union of the top-`n` players over every metric, alphabetically sorted.
pub fn combined_top_players(rows: &[PlayerSummary], metrics: &[Metric], n: usize) -> Vec<String> {
    let mut players: BTreeSet<String> = BTreeSet::new();
    for metric in metrics {
        players.extend(top_n(rows, *metric, n).into_iter().map(|row| row.player));
    }
    players.into_iter().collect()
}

/// Index of the first row whose player name contains `marker`.
pub fn find_player(rows: &[PlayerSummary], marker: &str) -> Option<usize> {
    rows.iter().position(|row| row.player.contains(marker))
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub metric: Metric,
    pub values: Vec<u32>,
}

/// Grouped-bar data: one category per player, one series per metric.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonChart {
    pub players: Vec<String>,
    pub series: Vec<MetricSeries>,
}

impl ComparisonChart {
    pub fn max_value(&self) -> u32 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

pub fn comparison_chart(
    rows: &[PlayerSummary],
    players: &[String],
    metrics: &[Metric],
) -> ComparisonChart {
    let series = metrics
        .iter()
        .map(|metric| MetricSeries {
            metric: *metric,
            values: players
                .iter()
                .map(|p| {
                    rows.iter()
                        .find(|row| &row.player == p)
                        .map(|row| row.count(*metric))
                        .unwrap_or(0)
                })
                .collect(),
        })
        .collect();
    ComparisonChart {
        players: players.to_vec(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(player: &str, shots: u32) -> PlayerSummary {
        PlayerSummary {
            player: player.to_string(),
            counts: HashMap::from([(Metric::Shots, shots)]),
        }
    }

    #[test]
    fn ties_keep_original_order() {
        let rows = vec![row("C", 1), row("A", 2), row("B", 1)];
        let top = top_n(&rows, Metric::Shots, 3);
        let names: Vec<&str> = top.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn chart_values_align_with_players() {
        let rows = vec![row("Rodri", 1), row("Pedri", 0)];
        let players = vec!["Pedri".to_string(), "Rodri".to_string(), "Ghost".to_string()];
        let chart = comparison_chart(&rows, &players, &[Metric::Shots]);
        assert_eq!(chart.series[0].values, vec![0, 1, 0]);
        assert_eq!(chart.max_value(), 1);
    }
}
