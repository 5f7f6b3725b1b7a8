use anyhow::{Context, Result, anyhow};

use euro24_terminal::config::Settings;
use euro24_terminal::dashboard::Dashboard;
use euro24_terminal::event::team_matches;
use euro24_terminal::player_summary::MetricSet;
use euro24_terminal::ranking::top_n;
use euro24_terminal::statsbomb::{EventSource, OpenData};
use euro24_terminal::{http_client, logging};

fn main() -> Result<()> {
    let mut settings = Settings::load();
    if let Err(err) = logging::init_stderr_logging() {
        eprintln!("logging disabled: {err:#}");
    }
    http_client::configure_timeout(settings.http_timeout_secs);

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if let Some(raw) = arg_value(&args, "--metrics") {
        settings.analysis.metric_set =
            MetricSet::parse(&raw).ok_or_else(|| anyhow!("unknown metric set: {raw}"))?;
    }
    let match_id = arg_value(&args, "--match")
        .map(|raw| raw.parse::<u64>().with_context(|| format!("invalid match id: {raw}")))
        .transpose()?;

    let source = OpenData::from_settings(&settings);
    let all = source
        .fetch_matches(settings.competition_id, settings.season_id)
        .context("fetch matches")?;
    let matches = team_matches(&all, &settings.team);
    if matches.is_empty() {
        eprintln!(
            "No matches for {} in {}/{}",
            settings.team, settings.competition_id, settings.season_id
        );
        return Ok(());
    }

    println!("{} matches:", settings.team);
    for m in &matches {
        println!("  {:>8}  {}  {} {}", m.match_id, m.match_date, m.label(), m.score_label());
    }

    let info = match match_id {
        Some(id) => matches
            .iter()
            .find(|m| m.match_id == id)
            .ok_or_else(|| anyhow!("match {id} does not involve {}", settings.team))?,
        None => &matches[0],
    };
    let events = source
        .fetch_events(info.match_id)
        .with_context(|| format!("fetch events for {}", info.match_id))?;
    let dash = Dashboard::build(&events, &settings.analysis, None);

    println!();
    println!("{} ({} events)", info.label(), events.len());
    let header = dash
        .metrics
        .iter()
        .map(|m| format!("{:>20}", m.key()))
        .collect::<String>();
    println!("{:<36}{header}", "player");
    for row in &dash.summary {
        let counts = dash
            .metrics
            .iter()
            .map(|m| format!("{:>20}", row.count(*m)))
            .collect::<String>();
        println!("{:<36}{counts}", row.player);
    }

    println!();
    if let Some(selected) = dash.selected() {
        println!("Default selection: {} (row {})", selected.player, dash.default_index);
    }
    for metric in &dash.metrics {
        let top = top_n(&dash.summary, *metric, settings.analysis.top_n);
        let names = top
            .iter()
            .map(|r| format!("{} ({})", r.player, r.count(*metric)))
            .collect::<Vec<_>>();
        println!("Top {} {}: {}", settings.analysis.top_n, metric.key(), names.join(", "));
    }
    println!("Comparison axis: {}", dash.comparison.players.join(" | "));
    println!(
        "Target actions: {} passes, {} shots, {} carries",
        dash.actions.passes.len(),
        dash.actions.shots.len(),
        dash.actions.carries.len()
    );

    Ok(())
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
