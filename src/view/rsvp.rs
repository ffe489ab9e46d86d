//! Serial-presentation stage rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::model::{PlaybackClock, RsvpState};

pub fn render(frame: &mut Frame, area: Rect, state: &RsvpState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Presentation stage
            Constraint::Length(3), // Progress gauge
        ])
        .split(area);

    render_stage(frame, chunks[0], state);
    render_gauge(frame, chunks[1], state);
}

/// One unit at a time in the center of the stage, with fixation markers
/// above and below so the eyes have somewhere to hold still.
fn render_stage(frame: &mut Frame, area: Rect, state: &RsvpState) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let pad = inner_height.saturating_sub(3) / 2;

    let mut lines: Vec<Line> = Vec::with_capacity(pad + 3);
    for _ in 0..pad {
        lines.push(Line::from(""));
    }
    lines.push(Line::styled("▼", Style::default().fg(Color::Red)));
    lines.push(Line::styled(
        state.current_unit().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled("▲", Style::default().fg(Color::Red)));

    let stage = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(stage, area);
}

fn render_gauge(frame: &mut Frame, area: Rect, state: &RsvpState) {
    let title = if state.clock.is_playing() {
        " ▶ Playing "
    } else {
        " ⏸ Paused "
    };
    let info = format!(" {} CPM | {} ", state.cpm, state.text.title);
    let label = format!("{}/{}", state.clock.current_index() + 1, state.clock.len());

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(state.clock.progress())
        .label(label);
    frame.render_widget(gauge, area);
}
