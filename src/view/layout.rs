//! Frame structure (header, footer, body area)

use std::rc::Rc;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{AssessmentPhase, ModuleView, TrainingModule};

/// The three vertical regions of every screen. Mouse hit-testing uses the
/// same split, so geometry stays in one place.
pub fn main_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header: app name, module, date
            Constraint::Min(0),    // Active module body
            Constraint::Length(1), // Footer: key hints
        ])
        .split(area)
}

/// Body region the active module draws into.
pub fn drill_body_area(area: Rect) -> Rect {
    main_chunks(area)[1]
}

pub fn render_header(frame: &mut Frame, area: Rect, module: TrainingModule) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // App name and module title
            Constraint::Length(14), // Date
        ])
        .split(area);

    let context = match module {
        TrainingModule::Dashboard => Line::from(Span::styled(
            "Cognitive reading training",
            Style::default().fg(Color::DarkGray),
        )),
        _ => Line::from(Span::styled(
            module.title(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    };

    let title = Paragraph::new(context).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" ReadTrain ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(title, chunks[0]);

    let date = Paragraph::new(chrono::Local::now().format("%a %b %d").to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(date, chunks[1]);
}

pub fn render_footer(frame: &mut Frame, area: Rect, module_view: &ModuleView) {
    let hints = match module_view {
        ModuleView::Dashboard => {
            "Tab switch section · ↑↓ select · Enter open · H help · Q quit"
        }
        ModuleView::Grid(_) => "Click numbers in ascending order · R reshuffle · 3-7 board size · Esc back",
        ModuleView::Rsvp(_) => "Space play/pause · +/- rate · R rewind · T text · Esc back",
        ModuleView::Chunking(_) => "D focus dots · B boundaries · T text · Esc back",
        ModuleView::Pacer(_) => "Space start/pause · +/- speed · R rewind · T text · Esc back",
        ModuleView::Assessment(state) => match state.phase {
            AssessmentPhase::Intro => "Space begin reading · T text · Esc back",
            AssessmentPhase::Reading => "Space finish reading",
            AssessmentPhase::Scoring => "Type error count · Backspace edit · Enter score",
            AssessmentPhase::Result => "R test again · T text · Esc back",
        },
    };

    let footer = Paragraph::new(format!(" {}", hints)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}
