use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use euro24_terminal::dashboard::{AnalysisSettings, Dashboard};
use euro24_terminal::event::{Event, EventType};
use euro24_terminal::player_summary::{MetricSet, summarize_players};
use euro24_terminal::statsbomb::parse_events_json;

const PLAYERS: [&str; 8] = [
    "Lamine Yamal Nasraoui Ebana",
    "Nicholas Williams Arthuer",
    "Rodrigo Hernández Cascante",
    "Fabián Ruiz Peña",
    "Dani Olmo Carvajal",
    "Declan Rice",
    "Bukayo Saka",
    "Jude Bellingham",
];

// Roughly the size of one match feed.
fn synthetic_events(n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| {
            let player = PLAYERS[i % PLAYERS.len()];
            let x = (i * 7 % 120) as f64;
            let y = (i * 13 % 80) as f64;
            match i % 4 {
                0 => Event::new(Some(player), EventType::Pass)
                    .at(x, y)
                    .to((x + 10.0).min(120.0), y),
                1 => Event::new(Some(player), EventType::Carry)
                    .at(x, y)
                    .to((x + 5.0).min(120.0), y),
                2 => Event::new(Some(player), EventType::Shot).at(x, y).with_outcome(
                    if i % 3 == 0 { "Goal" } else { "Off T" },
                ),
                _ => Event::new(None, EventType::Other("Pressure".to_string())),
            }
        })
        .collect()
}

fn events_json(n: usize) -> String {
    let rows: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"id":"e{i}","index":{i},"period":1,"minute":{m},"second":0,"type":{{"name":"Pass"}},"player":{{"name":"{p}"}},"location":[{x},40.0],"pass":{{"end_location":[100.0,30.0]}}}}"#,
                m = i / 40,
                p = PLAYERS[i % PLAYERS.len()],
                x = i % 120,
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}

fn bench_parse_events(c: &mut Criterion) {
    let raw = events_json(3500);
    c.bench_function("events_parse", |b| {
        b.iter(|| {
            let events = parse_events_json(black_box(&raw)).unwrap();
            black_box(events.len());
        })
    });
}

fn bench_summarize(c: &mut Criterion) {
    let events = synthetic_events(3500);
    c.bench_function("summarize_players", |b| {
        b.iter(|| {
            let rows = summarize_players(black_box(&events), MetricSet::Attacking.metrics());
            black_box(rows.len());
        })
    });
}

fn bench_dashboard(c: &mut Criterion) {
    let events = synthetic_events(3500);
    let settings = AnalysisSettings::default();
    c.bench_function("dashboard_build", |b| {
        b.iter(|| {
            let dash = Dashboard::build(black_box(&events), &settings, None);
            black_box(dash.comparison.players.len());
        })
    });
}

criterion_group!(benches, bench_parse_events, bench_summarize, bench_dashboard);
criterion_main!(benches);
