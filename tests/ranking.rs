use std::collections::HashMap;

use euro24_terminal::player_summary::{Metric, PlayerSummary};
use euro24_terminal::ranking::{combined_top_players, comparison_chart, find_player, top_n};

fn row(player: &str, carries: u32, passes: u32, shots: u32) -> PlayerSummary {
    PlayerSummary {
        player: player.to_string(),
        counts: HashMap::from([
            (Metric::ProgressiveCarries, carries),
            (Metric::FinalThirdPasses, passes),
            (Metric::Shots, shots),
        ]),
    }
}

fn table() -> Vec<PlayerSummary> {
    vec![
        row("Unai Simón Mendibil", 0, 0, 0),
        row("Lamine Yamal Nasraoui Ebana", 7, 4, 1),
        row("Nicholas Williams Arthuer", 9, 2, 1),
        row("Fabián Ruiz Peña", 3, 6, 0),
        row("Rodrigo Hernández Cascante", 5, 3, 0),
        row("Dani Olmo Carvajal", 2, 5, 2),
        row("Álvaro Borja Morata Martín", 1, 1, 1),
        row("Marc Cucurella Saseta", 4, 0, 0),
    ]
}

#[test]
fn top_n_is_bounded_and_descending() {
    let rows = table();
    for n in [0, 1, 3, 6, 20] {
        let top = top_n(&rows, Metric::ProgressiveCarries, n);
        assert!(top.len() <= n);
        assert_eq!(top.len(), n.min(rows.len()));

        let min_included = top.iter().map(|r| r.count(Metric::ProgressiveCarries)).min();
        let Some(min_included) = min_included else { continue };
        for excluded in rows.iter().filter(|r| !top.contains(r)) {
            assert!(excluded.count(Metric::ProgressiveCarries) <= min_included);
        }
        for pair in top.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.count(Metric::ProgressiveCarries) >= b.count(Metric::ProgressiveCarries));
        }
    }
}

#[test]
fn ranking_is_idempotent() {
    let rows = table();
    for metric in [Metric::ProgressiveCarries, Metric::FinalThirdPasses, Metric::Shots] {
        let once = top_n(&rows, metric, 6);
        let twice = top_n(&once, metric, 6);
        assert_eq!(once, twice);
    }
}

#[test]
fn shots_ties_are_stable() {
    let rows = table();
    let top = top_n(&rows, Metric::Shots, 4);
    let names: Vec<&str> = top.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Dani Olmo Carvajal",
            "Lamine Yamal Nasraoui Ebana",
            "Nicholas Williams Arthuer",
            "Álvaro Borja Morata Martín",
        ]
    );
}

#[test]
fn combined_axis_is_union_sorted() {
    let rows = table();
    let metrics = [Metric::ProgressiveCarries, Metric::FinalThirdPasses, Metric::Shots];
    let players = combined_top_players(&rows, &metrics, 2);
    assert_eq!(
        players,
        vec![
            "Dani Olmo Carvajal".to_string(),
            "Fabián Ruiz Peña".to_string(),
            "Lamine Yamal Nasraoui Ebana".to_string(),
            "Nicholas Williams Arthuer".to_string(),
        ]
    );

    let chart = comparison_chart(&rows, &players, &metrics);
    assert_eq!(chart.players, players);
    assert_eq!(chart.series.len(), 3);
    assert_eq!(chart.series[0].metric, Metric::ProgressiveCarries);
    assert_eq!(chart.series[0].values, vec![2, 3, 7, 9]);
    assert_eq!(chart.series[2].values, vec![2, 0, 1, 1]);
}

#[test]
fn marker_lookup_and_explicit_fallback() {
    let rows = table();
    assert_eq!(find_player(&rows, "Lamine"), Some(1));

    let without: Vec<PlayerSummary> = rows
        .into_iter()
        .filter(|r| !r.player.contains("Lamine"))
        .collect();
    assert_eq!(find_player(&without, "Lamine"), None);
    assert_eq!(find_player(&without, "Lamine").unwrap_or(0), 0);
    assert_eq!(find_player(&[], "Lamine"), None);
}
