// UI rendering logic
//
// All rendering code for the TUI. The layout mirrors the two-card shape of
// the converter: an intake card (drop target / browse affordance) above a
// preview card where results are typed out, with a logs panel and status bar
// below. Rendering also publishes the intake card's rectangle back to the
// drop zone so the drag-leave containment check tracks the live layout.

use super::app::App;
use super::prompt::PathPrompt;
use crate::config::VERSION;
use crate::convert::UploadState;
use crate::logging::{LogEntry, LogLevel};
use crate::typing::ActiveAnimator;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Five vertical sections: title, intake card, preview, logs, status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(7), // Intake card (drop target)
            Constraint::Min(10),   // Preview - takes remaining space
            Constraint::Length(6), // System logs - fixed height
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_intake_card(f, chunks[1], app);
    // Keep the drop zone's containment rectangle in sync with the layout
    app.drop_zone.set_rect(chunks[1]);
    render_preview(f, chunks[2], app);
    render_logs_panel(f, chunks[3], app);
    render_status(f, chunks[4], app);

    if let Some(prompt) = &app.prompt {
        render_prompt(f, f.area(), prompt);
    }
    if let Some(toast) = &app.toast {
        toast.render(f, f.area());
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " docdrop ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("v{VERSION} "), Style::default().fg(Color::DarkGray)),
        Span::raw("· Document to JSON Converter"),
    ]);
    let block = Block::default().borders(Borders::ALL);
    f.render_widget(Paragraph::new(title).block(block), area);
}

/// The drop target. Highlighted while a drag is over it.
fn render_intake_card(f: &mut Frame, area: Rect, app: &App) {
    let active = app.drop_zone.drag_active();
    let border_style = if active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Upload ");

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            if active {
                "Release to convert"
            } else {
                "Drop your file here or press o to browse"
            },
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            "Supported formats: PDF, DOCX, PNG, JPG",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// The preview card: typed text with a blinking cursor, or the error block.
fn render_preview(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" JSON Preview ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    // File name line above the content, when a file is selected
    let (name_area, content_area) = if app.file_name.is_empty() {
        (None, inner)
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);
        (Some(rows[0]), rows[1])
    };

    if let Some(name_area) = name_area {
        let name = Line::from(vec![
            Span::styled("▣ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                app.file_name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        f.render_widget(Paragraph::new(name), name_area);
    }

    if let UploadState::Failed(message) = &app.upload {
        let error = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        f.render_widget(error, content_area);
        return;
    }

    let show_cursor = app.typewriter.is_running()
        || matches!(app.upload, UploadState::Pending | UploadState::Succeeded);

    // split('\n') yields at least one line, so the cursor always has a
    // line to land on
    let mut lines: Vec<Line> = app.typewriter.display().split('\n').map(Line::from).collect();
    if show_cursor && app.cursor_visible() {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
    }

    // Follow the typing: keep the newest line in view
    let height = content_area.height as usize;
    let scroll = lines.len().saturating_sub(height) as u16;

    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), content_area);
}

fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let lines: Vec<Line> = entries.iter().map(log_line).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Logs ")
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn log_line(entry: &LogEntry) -> Line<'_> {
    let level_color = match entry.level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Green,
        LogLevel::Debug | LogLevel::Trace => Color::DarkGray,
    };
    Line::from(vec![
        Span::styled(
            format!("{} ", entry.timestamp.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:<5} ", entry.level.as_str()),
            Style::default().fg(level_color),
        ),
        Span::raw(entry.message.as_str()),
    ])
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let state = match &app.upload {
        UploadState::Idle => Span::styled("ready", Style::default().fg(Color::DarkGray)),
        UploadState::Pending => Span::styled(
            format!("converting {}…", app.file_name),
            Style::default().fg(Color::Yellow),
        ),
        UploadState::Succeeded => {
            // Show when the reveal is still playing
            if app.typewriter.active() == ActiveAnimator::Result {
                Span::styled("revealing result…", Style::default().fg(Color::Green))
            } else {
                Span::styled("done", Style::default().fg(Color::Green))
            }
        }
        UploadState::Failed(_) => Span::styled("failed", Style::default().fg(Color::Red)),
    };

    let hints = " o browse · d save · y copy · c clear · q quit ";
    let line = Line::from(vec![
        state,
        Span::raw("  "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);
    let block = Block::default().borders(Borders::ALL);
    f.render_widget(Paragraph::new(line).block(block), area);
}

/// Centered overlay asking for a file path.
fn render_prompt(f: &mut Frame, area: Rect, prompt: &PathPrompt) {
    let width = area.width.saturating_sub(10).min(70).max(20);
    let height = 3;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let prompt_area = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Open file (Enter to convert, Esc to cancel) ");

    let line = Line::from(vec![
        Span::raw(prompt.value()),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]);

    f.render_widget(Clear, prompt_area);
    f.render_widget(Paragraph::new(line).block(block), prompt_area);
}
