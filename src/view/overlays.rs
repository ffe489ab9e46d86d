//! Overlay rendering (error notification, plan detail, text picker, editor, help popup)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{PickerEntry, UiState, TRAINING_PLANS};
use super::utils::display_width;

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4) as usize; // account for borders

        // Calculate how many lines the error message will take when wrapped
        let error_line_count =
            ((error_msg.chars().count() as f32) / (inner_width as f32)).ceil() as u16;

        let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));
        let popup_area = centered_popup(area, popup_width, popup_height);

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_plan_detail(frame: &mut Frame, ui_state: &UiState) {
    let area = frame.area();
    let plan = &TRAINING_PLANS[ui_state.plan_selected.min(TRAINING_PLANS.len() - 1)];

    let popup_width = 64.min(area.width.saturating_sub(4));
    let inner_width = usize::from(popup_width.saturating_sub(4)).max(10);

    let desc_lines =
        ((plan.description.chars().count() as f32) / (inner_width as f32)).ceil() as u16;
    let popup_height =
        (desc_lines + plan.tasks.len() as u16 * 2 + 7).min(area.height.saturating_sub(4));
    let popup_area = centered_popup(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} · {} ", plan.week, plan.title))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Black))
        .padding(Padding::horizontal(1));
    let inner = outer.inner(popup_area);
    frame.render_widget(outer, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(desc_lines + 2), // Subtitle and description
            Constraint::Min(0),                 // Task list
            Constraint::Length(1),              // Key hint
        ])
        .split(inner);

    let header = Paragraph::new(vec![
        Line::styled(plan.subtitle, Style::default().fg(Color::Yellow)),
        Line::from(""),
        Line::from(plan.description),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = plan
        .tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = i == ui_state.plan_task_selected;
            let name_style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!(" {} ", task.name), name_style),
                    Span::styled(
                        format!(" {}", task.duration),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::styled(
                    format!("   {}", task.detail),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let list = List::new(items);
    let mut list_state = ListState::default();
    list_state.select(Some(ui_state.plan_task_selected));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);

    let hint = Paragraph::new("↑↓ select · Enter start task · Esc close")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[2]);
}

pub fn render_text_picker(frame: &mut Frame, ui_state: &UiState) {
    let area = frame.area();

    let max_entry_width = ui_state
        .picker_entries
        .iter()
        .map(|entry| match entry {
            PickerEntry::Custom => 24,
            PickerEntry::Material { title, category, .. } => {
                display_width(title) + category.label().len() + 6
            }
        })
        .max()
        .unwrap_or(30);

    let popup_width = (max_entry_width as u16 + 6).clamp(32, 60);
    let popup_height = (ui_state.picker_entries.len() as u16 + 2)
        .min(area.height.saturating_sub(4))
        .max(5);
    let popup_area = centered_popup(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = ui_state
        .picker_entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == ui_state.picker_selected;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let text = match entry {
                PickerEntry::Custom => "✎ Enter your own text…".to_string(),
                PickerEntry::Material { title, category, .. } => {
                    format!("{}  ({})", title, category.label())
                }
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Reading Text (↑↓ Enter Esc) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(ui_state.picker_selected));

    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

pub fn render_editor(frame: &mut Frame, ui_state: &UiState) {
    let area = frame.area();
    let popup_area = centered_popup(area, 60, 12);

    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = ui_state
        .editor_buffer
        .split('\n')
        .map(|part| Line::from(part.to_string()))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.push_span(Span::styled("▌", Style::default().fg(Color::Green)));
    }

    let editor = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Custom Text (Ctrl+S use · Esc cancel) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(editor, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle dashboard sections"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Open module / start plan task"),
        ("Backspace / Esc", "Back to dashboard"),
        ("", ""),
        ("", "── Drills ──"),
        ("Space", "Play / pause, advance assessment"),
        ("+ / -", "Faster / slower"),
        ("R", "Rewind / reshuffle / retry"),
        ("3-7 / S", "Board size"),
        ("D", "Toggle focus dots"),
        ("B", "Toggle chunk boundaries"),
        ("T", "Pick reading text"),
        ("Mouse", "Click grid numbers"),
        ("0-9", "Type error count when scoring"),
        ("", ""),
        ("", "── Custom text ──"),
        ("Ctrl+S", "Use the entered text"),
        ("Esc", "Discard and close editor"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit (dashboard)"),
        ("Ctrl+C", "Quit from anywhere"),
    ];

    let popup_width = 62;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered_popup(area, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
