//! Dashboard rendering (module list and training plan cards)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{DashboardSection, TrainingModule, UiState, TRAINING_PLANS};
use super::utils::render_scrollable_list;

pub fn render(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Drill list: five rows plus borders
            Constraint::Min(0),    // Four-week plan cards
        ])
        .split(area);

    render_modules(frame, chunks[0], ui_state);
    render_plans(frame, chunks[1], ui_state);
}

fn drill_blurb(module: TrainingModule) -> &'static str {
    match module {
        TrainingModule::Grid => "find numbers in order using only peripheral vision",
        TrainingModule::Pacer => "follow a guide line sweeping through the text",
        TrainingModule::Rsvp => "words arrive one group at a time at a fixed rate",
        TrainingModule::Chunking => "read boxed word groups in single glances",
        TrainingModule::Assessment => "timed reading with a fluency score",
        TrainingModule::Dashboard => "",
    }
}

fn render_modules(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let is_focused = ui_state.dashboard_section == DashboardSection::Modules;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = TrainingModule::DRILLS
        .iter()
        .enumerate()
        .map(|(i, module)| {
            let is_selected = is_focused && i == ui_state.module_selected;
            let title_style = if is_selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if is_selected { "▶ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{:<20}", marker, module.title()), title_style),
                Span::styled(drill_blurb(*module), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Training Modules ")
        .border_style(border_style);

    render_scrollable_list(frame, area, items, ui_state.module_selected, block);
}

fn render_plans(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let is_focused = ui_state.dashboard_section == DashboardSection::Plans;

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    for (i, plan) in TRAINING_PLANS.iter().enumerate() {
        let is_selected = is_focused && i == ui_state.plan_selected;
        let border_style = if is_selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let title_style = if is_selected {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let body = vec![
            Line::from(Span::styled(
                plan.title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(plan.subtitle, Style::default().fg(Color::DarkGray))),
        ];

        let card = Paragraph::new(body).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", plan.week))
                .title_style(title_style)
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
        frame.render_widget(card, cards[i]);
    }
}
