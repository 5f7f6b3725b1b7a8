use std::io;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points, Rectangle};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph,
    Row, Table,
};
use tracing::info;

use euro24_terminal::config::Settings;
use euro24_terminal::dashboard::Dashboard;
use euro24_terminal::event::{PITCH_LENGTH, PITCH_WIDTH, Point};
use euro24_terminal::pitch_map::{KEY_ZONES, PitchLayers, Segment};
use euro24_terminal::provider::run_command;
use euro24_terminal::ranking::ComparisonChart;
use euro24_terminal::state::{AppState, ProviderCommand, Screen, apply_delta};
use euro24_terminal::statsbomb::{EventSource, OpenData};
use euro24_terminal::{export, http_client, logging};

const CARRY_COLOR: Color = Color::Rgb(0x1E, 0x88, 0xE5);
const PASS_COLOR: Color = Color::Rgb(0xC0, 0xCA, 0x33);
const SHOT_COLOR: Color = Color::Rgb(0xFB, 0x8C, 0x00);
const ZONE_COLOR: Color = Color::Rgb(0x66, 0xBB, 0x6A);
const PITCH_COLOR: Color = Color::Rgb(0x2E, 0x7D, 0x32);
const SERIES_COLORS: [Color; 3] = [CARRY_COLOR, PASS_COLOR, SHOT_COLOR];

struct App {
    state: AppState,
    settings: Settings,
    source: Box<dyn EventSource>,
    pending: Option<ProviderCommand>,
    should_quit: bool,
}

impl App {
    fn new(settings: Settings, source: Box<dyn EventSource>) -> Self {
        let state = AppState::new(settings.team.clone(), settings.analysis.clone());
        Self {
            state,
            settings,
            source,
            pending: None,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('m') | KeyCode::Char('M') => self.state.cycle_metric_set(),
            _ => match self.state.screen {
                Screen::Matches => self.on_matches_key(key),
                Screen::Dashboard => self.on_dashboard_key(key),
            },
        }
    }

    fn on_matches_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('d') | KeyCode::Enter => self.request_events(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_matches(),
            _ => {}
        }
    }

    fn on_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Matches,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_player_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_player_prev(),
            KeyCode::Char('0') => self.state.reset_player_choice(),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_current(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if let Some(loaded) = &self.state.loaded {
                    let info = loaded.info.clone();
                    self.queue(ProviderCommand::FetchEvents { info });
                }
            }
            _ => {}
        }
    }

    fn request_matches(&mut self) {
        self.queue(ProviderCommand::FetchMatches {
            competition_id: self.settings.competition_id,
            season_id: self.settings.season_id,
        });
    }

    fn request_events(&mut self) {
        let Some(info) = self.state.selected_match().cloned() else {
            self.state.push_log("[INFO] No match selected");
            return;
        };
        self.queue(ProviderCommand::FetchEvents { info });
    }

    fn queue(&mut self, cmd: ProviderCommand) {
        let what = match &cmd {
            ProviderCommand::FetchMatches { .. } => "matches".to_string(),
            ProviderCommand::FetchEvents { info } => format!("events for {}", info.label()),
        };
        self.state.push_log(format!("[INFO] Loading {what}..."));
        self.pending = Some(cmd);
    }

    /// Blocks until the pending fetch completes.
    fn run_pending(&mut self) {
        let Some(cmd) = self.pending.take() else {
            return;
        };
        for delta in run_command(self.source.as_ref(), cmd) {
            apply_delta(&mut self.state, delta);
        }
    }

    fn export_current(&mut self) {
        let Some(info) = self.state.loaded.as_ref().map(|l| l.info.clone()) else {
            self.state.push_log("[INFO] Nothing to export");
            return;
        };
        let Some(dash) = self.state.dashboard() else {
            return;
        };
        match export::export_dashboard(&self.settings.export_dir, &info, &dash) {
            Ok(report) => {
                info!(path = %report.path.display(), "dashboard exported");
                self.state.push_log(format!(
                    "[INFO] Exported {} players, {} actions -> {}",
                    report.players,
                    report.actions,
                    report.path.display()
                ));
            }
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}

fn main() -> Result<()> {
    let settings = Settings::load();
    if let Some(path) = settings.log_file.as_ref() {
        if let Err(err) = logging::init_file_logging(path) {
            eprintln!("logging disabled: {err:#}");
        }
    }
    http_client::configure_timeout(settings.http_timeout_secs);

    let source = OpenData::from_settings(&settings);
    info!(source = %source.describe(), team = %settings.team, "starting");
    let mut app = App::new(settings, Box::new(source));
    app.request_matches();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui(f, &app.state))?;

        // Draw the "Loading" line first, then block on the fetch.
        if app.pending.is_some() {
            app.run_pending();
            continue;
        }

        if event::poll(tick_rate)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match state.screen {
        Screen::Matches => render_matches(frame, chunks[1], state),
        Screen::Dashboard => render_dashboard(frame, chunks[1], state),
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::Matches => format!(
            "EURO24 TERMINAL | {} matches | Target: {}",
            state.team, state.analysis.target_marker
        ),
        Screen::Dashboard => {
            let label = state
                .loaded
                .as_ref()
                .map(|l| l.info.label())
                .unwrap_or_default();
            format!(
                "EURO24 TERMINAL | {label} | Target: {} | Metrics: {}",
                state.analysis.target_marker,
                state.analysis.metric_set.label()
            )
        }
    };
    let line1 = format!("  .-.  {}", title);
    let line2 = " ( o )".to_string();
    let line3 = "  '-'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Matches => {
            "j/k/↑/↓ Move | Enter/d Load | r Reload | m Metrics | ? Help | q Quit".to_string()
        }
        Screen::Dashboard => {
            "j/k/↑/↓ Player | 0 Default | m Metrics | e Export | r Reload | b/Esc Back | ? Help | q Quit"
                .to_string()
        }
    }
}

fn render_matches(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = match_columns();
    render_matches_header(frame, sections[0], &widths);

    let list_area = sections[1];
    if state.matches.is_empty() {
        let empty = Paragraph::new(format!("No matches for {}", state.team))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.match_selected, state.matches.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let selected = idx == state.match_selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let m = &state.matches[idx];
        let stage = m.stage.clone().unwrap_or_else(|| "-".to_string());
        render_cell_text(frame, cols[0], &format_match_date(&m.match_date), row_style);
        render_cell_text(frame, cols[1], &m.label(), row_style);
        render_cell_text(frame, cols[2], &m.score_label(), row_style);
        render_cell_text(frame, cols[3], &stage, row_style);
    }
}

fn match_columns() -> [Constraint; 4] {
    [
        Constraint::Length(14),
        Constraint::Min(24),
        Constraint::Length(7),
        Constraint::Min(14),
    ]
}

fn render_matches_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "Date", style);
    render_cell_text(frame, cols[1], "Match", style);
    render_cell_text(frame, cols[2], "Score", style);
    render_cell_text(frame, cols[3], "Stage", style);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(dash) = state.dashboard() else {
        let empty = Paragraph::new("No match loaded").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(dash.metrics.len() as u16 + 5),
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[1]);

    render_player_list(frame, left[0], &dash);
    render_player_stats(frame, left[1], &dash);
    render_comparison(frame, right[0], &dash.comparison);
    render_pitch(frame, right[1], &dash.pitch, &state.analysis.target_marker);
}

fn render_player_list(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let items: Vec<ListItem> = dash
        .player_names()
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let marker = if idx == dash.default_index { "*" } else { " " };
            ListItem::new(format!("{marker} {name}"))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Compare with").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(dash.selected_index);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_player_stats(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let block = Block::default().title(stats_title(dash)).borders(Borders::ALL);
    let Some(row) = dash.selected() else {
        frame.render_widget(Paragraph::new("No players").block(block), area);
        return;
    };

    let rows: Vec<Row> = dash
        .metrics
        .iter()
        .map(|m| Row::new(vec![Cell::from(m.label()), Cell::from(row.count(*m).to_string())]))
        .collect();
    let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(6)])
        .header(
            Row::new(vec!["Metric", "Count"]).style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block);
    frame.render_widget(table, area);
}

fn stats_title(dash: &Dashboard) -> String {
    match dash.selected() {
        Some(row) => format!("Statistics - {}", short_name(&row.player)),
        None => "Statistics".to_string(),
    }
}

fn render_comparison(frame: &mut Frame, area: Rect, chart: &ComparisonChart) {
    let legend: Vec<Span> = chart
        .series
        .iter()
        .enumerate()
        .flat_map(|(idx, s)| {
            [
                Span::styled(" ■ ", Style::default().fg(series_color(idx))),
                Span::raw(s.metric.label()),
            ]
        })
        .collect();
    let mut title = vec![Span::raw("Key metrics ")];
    title.extend(legend);
    let block = Block::default().title(Line::from(title)).borders(Borders::ALL);

    if chart.is_empty() {
        frame.render_widget(Paragraph::new("No players").block(block), area);
        return;
    }

    let mut bar_chart = BarChart::default()
        .block(block)
        .bar_width(2)
        .bar_gap(0)
        .group_gap(2)
        .max(u64::from(chart.max_value().max(1)));
    for (idx, player) in chart.players.iter().enumerate() {
        let bars: Vec<Bar> = chart
            .series
            .iter()
            .enumerate()
            .map(|(s_idx, s)| {
                let value = s.values.get(idx).copied().unwrap_or(0);
                Bar::default()
                    .value(u64::from(value))
                    .style(Style::default().fg(series_color(s_idx)))
                    .value_style(Style::default().fg(Color::Black).bg(series_color(s_idx)))
            })
            .collect();
        bar_chart = bar_chart.data(
            BarGroup::default()
                .label(Line::from(short_name(player)))
                .bars(&bars),
        );
    }
    frame.render_widget(bar_chart, area);
}

fn render_pitch(frame: &mut Frame, area: Rect, layers: &PitchLayers, target: &str) {
    let title = Line::from(vec![
        Span::raw(format!("{target} - attacking impact ")),
        Span::styled("── ", Style::default().fg(CARRY_COLOR)),
        Span::raw("carries "),
        Span::styled("── ", Style::default().fg(PASS_COLOR)),
        Span::raw("final third passes "),
        Span::styled("● ", Style::default().fg(SHOT_COLOR)),
        Span::raw("shots "),
        Span::styled("□ ", Style::default().fg(ZONE_COLOR)),
        Span::raw("key zones"),
    ]);
    let shots: Vec<(f64, f64)> = layers.shot_points.iter().map(|p| to_canvas(*p)).collect();

    let canvas = Canvas::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .background_color(PITCH_COLOR)
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, PITCH_LENGTH])
        .y_bounds([0.0, PITCH_WIDTH])
        .paint(|ctx| {
            for zone in KEY_ZONES {
                ctx.draw(&Rectangle {
                    x: zone.x,
                    y: PITCH_WIDTH - (zone.y + zone.height),
                    width: zone.width,
                    height: zone.height,
                    color: ZONE_COLOR,
                });
            }
            draw_pitch_markings(ctx);
            ctx.layer();
            for seg in &layers.pass_lines {
                draw_segment(ctx, *seg, PASS_COLOR);
            }
            for seg in &layers.carry_arrows {
                draw_segment(ctx, *seg, CARRY_COLOR);
                draw_arrow_head(ctx, *seg, CARRY_COLOR);
            }
            ctx.layer();
            ctx.draw(&Points {
                coords: &shots,
                color: SHOT_COLOR,
            });
            for (x, y) in &shots {
                ctx.draw(&Circle {
                    x: *x,
                    y: *y,
                    radius: 1.2,
                    color: SHOT_COLOR,
                });
            }
        });
    frame.render_widget(canvas, area);
}

// Feed coordinates grow downwards; the canvas grows upwards.
fn to_canvas(p: Point) -> (f64, f64) {
    (p.x, PITCH_WIDTH - p.y)
}

fn draw_segment(ctx: &mut Context, seg: Segment, color: Color) {
    let (x1, y1) = to_canvas(seg.start);
    let (x2, y2) = to_canvas(seg.end);
    ctx.draw(&CanvasLine {
        x1,
        y1,
        x2,
        y2,
        color,
    });
}

fn draw_arrow_head(ctx: &mut Context, seg: Segment, color: Color) {
    const HEAD_LEN: f64 = 2.5;
    const HEAD_ANGLE: f64 = 0.45;
    let (x1, y1) = to_canvas(seg.start);
    let (x2, y2) = to_canvas(seg.end);
    let (dx, dy) = (x2 - x1, y2 - y1);
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return;
    }
    let angle = dy.atan2(dx);
    for side in [-HEAD_ANGLE, HEAD_ANGLE] {
        let a = angle + std::f64::consts::PI + side;
        ctx.draw(&CanvasLine {
            x1: x2,
            y1: y2,
            x2: x2 + HEAD_LEN * a.cos(),
            y2: y2 + HEAD_LEN * a.sin(),
            color,
        });
    }
}

fn draw_pitch_markings(ctx: &mut Context) {
    let white = Color::White;
    let rects = [
        (0.0, 0.0, PITCH_LENGTH, PITCH_WIDTH),
        (0.0, 18.0, 18.0, 44.0),
        (102.0, 18.0, 18.0, 44.0),
        (0.0, 30.0, 6.0, 20.0),
        (114.0, 30.0, 6.0, 20.0),
    ];
    for (x, y, width, height) in rects {
        ctx.draw(&Rectangle {
            x,
            y,
            width,
            height,
            color: white,
        });
    }
    ctx.draw(&CanvasLine {
        x1: PITCH_LENGTH / 2.0,
        y1: 0.0,
        x2: PITCH_LENGTH / 2.0,
        y2: PITCH_WIDTH,
        color: white,
    });
    ctx.draw(&Circle {
        x: PITCH_LENGTH / 2.0,
        y: PITCH_WIDTH / 2.0,
        radius: 10.0,
        color: white,
    });
}

fn series_color(idx: usize) -> Color {
    SERIES_COLORS[idx % SERIES_COLORS.len()]
}

fn short_name(full: &str) -> String {
    full.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

fn format_match_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d %b %Y").to_string(),
        Err(_) if raw.is_empty() => "TBD".to_string(),
        Err(_) => raw.to_string(),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Euro24 Terminal - Help",
        "",
        "Global:",
        "  m            Cycle metric set",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Matches:",
        "  j/k or ↑/↓   Move",
        "  Enter / d    Load match events",
        "  r            Reload match list",
        "",
        "Dashboard:",
        "  j/k or ↑/↓   Choose comparison player",
        "  0            Back to the target player",
        "  e            Export to xlsx",
        "  r            Reload events",
        "  b / Esc      Back to matches",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
