//! Timed-reading assessment rendering, one screen per phase

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{AssessmentPhase, AssessmentState, Band, FLUENCY_NORMS};
use super::utils::format_secs;

pub fn render(frame: &mut Frame, area: Rect, state: &AssessmentState) {
    match state.phase {
        AssessmentPhase::Intro => render_intro(frame, area, state),
        AssessmentPhase::Reading => render_reading(frame, area, state),
        AssessmentPhase::Scoring => render_scoring(frame, area, state),
        AssessmentPhase::Result => render_result(frame, area, state),
    }
}

fn band_color(band: Band) -> Color {
    match band {
        Band::Excellent => Color::Green,
        Band::Strong => Color::Cyan,
        Band::Average => Color::Yellow,
        Band::Developing => Color::Red,
    }
}

/// Centers `lines` vertically inside a bordered block filling `area`.
fn render_centered(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let inner_height = usize::from(area.height.saturating_sub(2));
    let pad = inner_height.saturating_sub(lines.len()) / 2;

    let mut padded: Vec<Line> = Vec::with_capacity(pad + lines.len());
    for _ in 0..pad {
        padded.push(Line::from(""));
    }
    padded.extend(lines);

    let body = Paragraph::new(padded)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );
    frame.render_widget(body, area);
}

fn render_intro(frame: &mut Frame, area: Rect, state: &AssessmentState) {
    let lines = vec![
        Line::styled(
            state.text.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            format!("{} units", state.text.word_count),
            Style::default().fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from("Read the passage once at your natural pace."),
        Line::from("The timer runs until you press Space again."),
        Line::from("Afterwards, report how many units you misread."),
        Line::from(""),
        Line::styled("Press Space to begin", Style::default().fg(Color::Yellow)),
    ];
    render_centered(frame, area, " Fluency Assessment ", lines);
}

fn render_reading(frame: &mut Frame, area: Rect, state: &AssessmentState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Running timer
            Constraint::Min(0),    // Passage
        ])
        .split(area);

    let timer = Paragraph::new(Line::from(vec![
        Span::raw("Reading · "),
        Span::styled(
            format_secs(state.reading_elapsed(Instant::now())),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(timer, chunks[0]);

    let passage = Paragraph::new(state.text.content.clone())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", state.text.title))
                .padding(Padding::new(2, 2, 1, 1)),
        );
    frame.render_widget(passage, chunks[1]);
}

fn render_scoring(frame: &mut Frame, area: Rect, state: &AssessmentState) {
    let entry = if state.error_entry.is_empty() {
        Span::styled("0", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            state.error_entry.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(format!(
            "Reading time: {}",
            format_secs(state.reading_seconds)
        )),
        Line::from(""),
        Line::from("How many units did you misread?"),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            entry,
            Span::styled("▌", Style::default().fg(Color::Green)),
            Span::raw("  "),
        ]),
        Line::from(""),
        Line::styled(
            "Press Enter to score",
            Style::default().fg(Color::Yellow),
        ),
    ];
    render_centered(frame, area, " Error Count ", lines);
}

fn render_result(frame: &mut Frame, area: Rect, state: &AssessmentState) {
    let Some(result) = state.result else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Headline rate and band
            Constraint::Min(0),    // Percentile chart
        ])
        .split(area);

    let headline = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", result.rounded()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("units/min · "),
            Span::styled(
                result.band.label(),
                Style::default()
                    .fg(band_color(result.band))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::styled(
            format!(
                "{} units − {} errors in {}",
                result.total_units,
                result.error_count,
                format_secs(result.elapsed_seconds)
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let summary = Paragraph::new(headline)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Result "));
    frame.render_widget(summary, chunks[0]);

    // Norms ascending so the chart reads left to right, own result last.
    let own_rate = result.rate.max(0.0).round() as u64;
    let mut data: Vec<(&str, u64)> = FLUENCY_NORMS
        .iter()
        .rev()
        .map(|norm| (norm.percentile, norm.rate))
        .collect();
    data.push(("You", own_rate));

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Compared to silent-reading norms ")
                .padding(Padding::horizontal(2)),
        )
        .data(data.as_slice())
        .bar_width(7)
        .bar_gap(3)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .label_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(chart, chunks[1]);
}
