//! UI rendering for the pomodoro view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::features::pomodoro::{format_mmss, render_progress_bar, SessionKind, TimerSnapshot};
use crate::tui::app::{App, Notification};

const HELP: &str =
    "space:start/pause | r:reset | f/b:focus/break | 1-9:preset | [/]:subject | s:stats | q:quit";

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let snapshot = app.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(7), // Countdown
            Constraint::Length(3), // Presets
            Constraint::Length(4), // Stats
            Constraint::Min(3),    // History
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, &snapshot, chunks[0]);
    render_countdown(frame, &snapshot, chunks[1]);
    render_presets(frame, app, &snapshot, chunks[2]);
    render_stats(frame, app, chunks[3]);
    render_history(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[5]);
}

const fn kind_color(kind: SessionKind) -> Color {
    match kind {
        SessionKind::Focus => Color::Red,
        SessionKind::Break => Color::Green,
    }
}

fn render_header(frame: &mut Frame<'_>, app: &App, snapshot: &TimerSnapshot, area: Rect) {
    let position = format!(" ({}/{})", app.subject_index + 1, app.subjects.len());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Subject: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            snapshot.subject.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(position, Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Pomodoro ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

fn render_countdown(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let color = kind_color(snapshot.kind);
    let total = f64::from(snapshot.configured_minutes * 60);
    let progress = if total > 0.0 {
        1.0 - f64::from(snapshot.remaining_seconds) / total
    } else {
        1.0
    };
    let width = usize::from(area.width.saturating_sub(6)).min(40);
    let state = if snapshot.running { "running" } else { "paused" };

    let lines = vec![
        Line::from(Span::styled(
            snapshot.kind.display_name().to_uppercase(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_mmss(snapshot.remaining_seconds),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            render_progress_bar(progress, width),
            Style::default().fg(color),
        )),
        Line::from(Span::styled(
            format!("{} min, {state}", snapshot.configured_minutes),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let countdown = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(countdown, area);
}

fn render_presets(frame: &mut Frame<'_>, app: &App, snapshot: &TimerSnapshot, area: Rect) {
    let mut spans = Vec::new();
    for (i, minutes) in app.presets.iter().enumerate() {
        let label = format!(" {}:{minutes}m ", i + 1);
        let style = if *minutes == snapshot.configured_minutes {
            Style::default()
                .fg(Color::Black)
                .bg(kind_color(snapshot.kind))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let presets = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Presets "));
    frame.render_widget(presets, area);
}

fn render_stats(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let count = u32::try_from(app.cards.len()).unwrap_or(1).max(1);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); app.cards.len()])
        .split(area);

    for (card, column) in app.cards.iter().zip(columns.iter()) {
        let widget = Paragraph::new(Span::styled(
            card.value.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(card.label));
        frame.render_widget(widget, *column);
    }
}

fn render_history(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem<'_>> = if app.history.is_empty() {
        vec![ListItem::new(Span::styled(
            "No sessions yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.history
            .iter()
            .rev()
            .map(|session| {
                let time = session
                    .created_at
                    .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
                    .unwrap_or_default();
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{time:>5}  "), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{:<6}", session.kind.as_str()),
                        Style::default().fg(kind_color(session.kind)),
                    ),
                    Span::raw(format!("{:>3} min  ", session.duration)),
                    Span::raw(session.study_task.clone()),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Today's Sessions ({}) ", app.history.len())),
    );
    frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status = match &app.notification {
        Some(Notification::Info(text)) => {
            Paragraph::new(text.as_str()).style(Style::default().fg(Color::Yellow))
        }
        Some(Notification::Success(text)) => {
            Paragraph::new(text.as_str()).style(Style::default().fg(Color::Green))
        }
        Some(Notification::Error(text)) => {
            Paragraph::new(text.as_str()).style(Style::default().fg(Color::Red))
        }
        None => Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
    };

    frame.render_widget(status, area);
}
