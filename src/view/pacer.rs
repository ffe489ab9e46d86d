//! Guided line-sweep rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{PacerState, PlaybackClock};
use super::utils::truncate_string;

pub fn render(frame: &mut Frame, area: Rect, state: &PacerState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Speed and position info
            Constraint::Min(0),    // Text with the guide line
        ])
        .split(area);

    render_info(frame, chunks[0], state);
    render_text(frame, chunks[1], state);
}

fn render_info(frame: &mut Frame, area: Rect, state: &PacerState) {
    let playing = if state.clock.is_playing() {
        Span::styled("▶ playing", Style::default().fg(Color::Green))
    } else {
        Span::styled("⏸ paused", Style::default().fg(Color::DarkGray))
    };
    let title_width = usize::from(area.width).saturating_sub(40).max(8);
    let line = Line::from(vec![
        Span::styled(
            truncate_string(&state.text.title, title_width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " · speed {} · line {}/{} · ",
            state.speed,
            state.guide_row() + 1,
            state.lines.len()
        )),
        playing,
    ]);

    let info = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(info, area);
}

/// Rows above the guide dim out as the sweep passes them, which nudges the
/// eyes forward instead of letting them regress.
fn render_text(frame: &mut Frame, area: Rect, state: &PacerState) {
    let guide = state.guide_row();

    let lines: Vec<Line> = state
        .lines
        .iter()
        .enumerate()
        .map(|(row, text)| {
            if row == guide {
                Line::from(vec![
                    Span::styled("▶ ", Style::default().fg(Color::Green)),
                    Span::styled(
                        text.clone(),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else if row < guide {
                Line::from(Span::styled(
                    format!("  {}", text),
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Line::from(Span::raw(format!("  {}", text)))
            }
        })
        .collect();

    let inner_height = usize::from(area.height.saturating_sub(2)).max(1);
    let max_scroll = state.lines.len().saturating_sub(inner_height);
    let scroll = guide.saturating_sub(inner_height / 2).min(max_scroll) as u16;

    let text = Paragraph::new(lines)
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(text, area);
}
