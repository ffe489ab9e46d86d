//! Chunk-flow rendering
//!
//! Lays the chunked text out as a flow of boxed groups, wrapped by display
//! width, with the unchunked text beside it for comparison. When fixation
//! dots are on, each text row gets a companion row above it with a dot over
//! the center of every group.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::ChunkingState;
use super::utils::{display_width, truncate_string};

pub fn render(frame: &mut Frame, area: Rect, state: &ChunkingState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Drill info and toggle state
            Constraint::Min(0),
        ])
        .split(area);

    render_info(frame, chunks[0], state);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(62), // Chunk flow
            Constraint::Percentage(38), // Unchunked text for comparison
        ])
        .split(chunks[1]);
    render_flow(frame, body[0], state);
    render_original(frame, body[1], state);
}

fn toggle_span(name: &str, on: bool) -> Span<'static> {
    let style = if on {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label = if on { "on" } else { "off" };
    Span::styled(format!("{} {}", name, label), style)
}

fn render_info(frame: &mut Frame, area: Rect, state: &ChunkingState) {
    let title_width = usize::from(area.width).saturating_sub(40).max(8);
    let line = Line::from(vec![
        Span::styled(
            truncate_string(&state.text.title, title_width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" · {} chunks · ", state.units.len())),
        toggle_span("dots", state.show_focus_dots),
        Span::raw(" · "),
        toggle_span("boundaries", state.show_boundaries),
    ]);

    let info = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(info, area);
}

fn render_flow(frame: &mut Frame, area: Rect, state: &ChunkingState) {
    let max_width = usize::from(area.width.saturating_sub(4)).max(4);

    let unit_style = if state.show_boundaries {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    } else {
        Style::default()
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut row_spans: Vec<Span> = Vec::new();
    let mut dot_cols: Vec<usize> = Vec::new();
    let mut row_width = 0usize;

    let flush =
        |row_spans: &mut Vec<Span<'static>>, dot_cols: &mut Vec<usize>, row_width: &mut usize, lines: &mut Vec<Line<'static>>| {
            if row_spans.is_empty() {
                return;
            }
            if state.show_focus_dots {
                let mut dots = String::with_capacity(*row_width);
                for col in 0..*row_width {
                    dots.push(if dot_cols.contains(&col) { '·' } else { ' ' });
                }
                lines.push(Line::styled(dots, Style::default().fg(Color::Red)));
            }
            lines.push(Line::from(std::mem::take(row_spans)));
            lines.push(Line::from(""));
            dot_cols.clear();
            *row_width = 0;
        };

    for unit in state.display_units() {
        let cell = if state.show_boundaries {
            format!(" {} ", unit)
        } else {
            unit.clone()
        };
        let width = display_width(&cell);
        let gap = if row_width > 0 { 1 } else { 0 };

        if row_width > 0 && row_width + gap + width > max_width {
            flush(&mut row_spans, &mut dot_cols, &mut row_width, &mut lines);
        }
        if row_width > 0 {
            row_spans.push(Span::raw(" "));
            row_width += 1;
        }
        dot_cols.push(row_width + width / 2);
        row_spans.push(Span::styled(cell, unit_style));
        row_width += width;
    }
    flush(&mut row_spans, &mut dot_cols, &mut row_width, &mut lines);

    let flow = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(flow, area);
}

fn render_original(frame: &mut Frame, area: Rect, state: &ChunkingState) {
    let text = Paragraph::new(state.text.content.as_str())
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Original ")
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(text, area);
}
