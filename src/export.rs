use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dashboard::Dashboard;
use crate::event::MatchInfo;
use crate::pitch_map::ActionPoint;

pub struct ExportReport {
    pub path: PathBuf,
    pub players: usize,
    pub comparison_players: usize,
    pub actions: usize,
}

/// Writes the dashboard for one match into `<dir>/<home>_vs_<away>_<timestamp>.xlsx`.
pub fn export_dashboard(
    dir: &Path,
    info: &MatchInfo,
    dashboard: &Dashboard,
) -> Result<ExportReport> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("{}_{stamp}.xlsx", file_stem(&info.label())));
    write_workbook(&path, dashboard)
}

pub fn write_workbook(path: &Path, dashboard: &Dashboard) -> Result<ExportReport> {
    let mut summary_rows = vec![header_row("Player", dashboard)];
    for row in &dashboard.summary {
        let mut cells = vec![row.player.clone()];
        cells.extend(dashboard.metrics.iter().map(|m| row.count(*m).to_string()));
        summary_rows.push(cells);
    }

    let mut comparison_rows = vec![header_row("Player", dashboard)];
    for (idx, player) in dashboard.comparison.players.iter().enumerate() {
        let mut cells = vec![player.clone()];
        cells.extend(
            dashboard
                .comparison
                .series
                .iter()
                .map(|s| s.values.get(idx).copied().unwrap_or(0).to_string()),
        );
        comparison_rows.push(cells);
    }

    let mut action_rows = vec![vec![
        "Event".to_string(),
        "Type".to_string(),
        "Period".to_string(),
        "Time".to_string(),
        "Team".to_string(),
        "Player".to_string(),
        "X".to_string(),
        "Y".to_string(),
        "End X".to_string(),
        "End Y".to_string(),
        "Outcome".to_string(),
    ]];
    let actions = &dashboard.actions;
    let mut ordered: Vec<&ActionPoint> = actions
        .carries
        .iter()
        .chain(actions.passes.iter())
        .chain(actions.shots.iter())
        .collect();
    // Feed order, so the sheet reads as a timeline.
    ordered.sort_by_key(|action| (action.event.period, action.event.index));
    action_rows.extend(ordered.into_iter().map(action_row));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_rows(sheet, &summary_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Comparison")?;
        write_rows(sheet, &comparison_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Actions")?;
        write_rows(sheet, &action_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        path: path.to_path_buf(),
        players: dashboard.summary.len(),
        comparison_players: dashboard.comparison.players.len(),
        actions: actions.total(),
    })
}

fn header_row(first: &str, dashboard: &Dashboard) -> Vec<String> {
    let mut row = vec![first.to_string()];
    row.extend(dashboard.metrics.iter().map(|m| m.key().to_string()));
    row
}

fn action_row(action: &ActionPoint) -> Vec<String> {
    let event = &action.event;
    vec![
        event.id.clone(),
        event.kind.as_str().to_string(),
        event.period.to_string(),
        event.clock_label(),
        event.team.clone().unwrap_or_default(),
        event.player.clone().unwrap_or_default(),
        opt_to_string(action.x),
        opt_to_string(action.y),
        opt_to_string(event.end_location.x()),
        opt_to_string(event.end_location.y()),
        event.outcome.clone().unwrap_or_default(),
    ]
}

fn file_stem(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
