//! Number-search board rendering
//!
//! Board geometry lives here in pure functions so the mouse handler can map
//! a click position back to a cell value with the same arithmetic the
//! renderer uses.

use std::rc::Rc;
use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{level_target, GridState, GridStatus};
use super::utils::format_secs;

/// Cell pitch: 6 columns of content plus a 1-column gap.
const CELL_W: u16 = 7;
/// Row pitch: 1 row of content plus a 1-row gap.
const CELL_H: u16 = 2;

fn status_chunks(body: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status line: next number, timer
            Constraint::Min(0),    // Board
        ])
        .split(body)
}

/// Where the board lands inside the drill body, centered.
fn board_rect(state: &GridState, body: Rect) -> Rect {
    let area = status_chunks(body)[1];
    let width = (state.size * CELL_W).saturating_sub(1);
    let height = (state.size * CELL_H).saturating_sub(1);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Map a click position to the number under it, if any. Positions in the
/// gaps between cells return `None`.
pub fn cell_value_at(state: &GridState, body: Rect, column: u16, row: u16) -> Option<u16> {
    let board = board_rect(state, body);
    if column < board.x || row < board.y {
        return None;
    }
    let rel_x = column - board.x;
    let rel_y = row - board.y;
    if rel_x >= board.width || rel_y >= board.height {
        return None;
    }
    if rel_x % CELL_W >= CELL_W - 1 || rel_y % CELL_H >= CELL_H - 1 {
        return None;
    }
    let col = usize::from(rel_x / CELL_W);
    let r = usize::from(rel_y / CELL_H);
    let index = r * usize::from(state.size) + col;
    state.numbers.get(index).copied()
}

pub fn render(frame: &mut Frame, area: Rect, state: &GridState) {
    let chunks = status_chunks(area);
    render_status(frame, chunks[0], state);
    render_board(frame, state, area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &GridState) {
    let line = match state.status {
        GridStatus::Idle => Line::from(vec![
            Span::raw(format!("{0}x{0} board · ", state.size)),
            Span::styled("Click 1 to start", Style::default().fg(Color::Yellow)),
        ]),
        GridStatus::Running => Line::from(vec![
            Span::raw("Find "),
            Span::styled(
                state.next_expected.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " · {}",
                format_secs(state.elapsed(Instant::now()).as_secs_f64())
            )),
        ]),
        GridStatus::Finished => {
            let elapsed = state.elapsed(Instant::now());
            let target = level_target(state.size);
            let verdict = if state.beat_target() {
                Span::styled(
                    " · Target beaten!",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(" · Over target", Style::default().fg(Color::Yellow))
            };
            let mut spans = vec![
                Span::raw("Done in "),
                Span::styled(
                    format_secs(elapsed.as_secs_f64()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            if let Some(target) = target {
                spans.push(Span::raw(format!(
                    " (target {})",
                    format_secs(target.as_secs_f64())
                )));
            }
            spans.push(verdict);
            Line::from(spans)
        }
    };

    let status = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn render_board(frame: &mut Frame, state: &GridState, body: Rect) {
    let board = board_rect(state, body);
    let size = usize::from(state.size);

    for (index, value) in state.numbers.iter().enumerate() {
        let col = (index % size) as u16;
        let row = (index / size) as u16;
        let cell = Rect {
            x: board.x + col * CELL_W,
            y: board.y + row * CELL_H,
            width: CELL_W - 1,
            height: 1,
        };
        if cell.x + cell.width > board.x + board.width || cell.y >= board.y + board.height {
            continue;
        }

        let confirmed = state.status == GridStatus::Finished || *value < state.next_expected;
        let style = if confirmed {
            Style::default().fg(Color::DarkGray)
        } else if state.status == GridStatus::Idle && *value == 1 {
            // Same yellow as the "Click 1 to start" cue
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let text = Paragraph::new(Span::styled(format!("[{:^4}]", value), style))
            .alignment(Alignment::Center);
        frame.render_widget(text, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn clicks_map_to_cells_and_gaps_to_nothing() {
        let state = GridState::new(3, &mut StdRng::seed_from_u64(7));
        let body = Rect::new(0, 0, 80, 24);
        // Board is 20x5, centered in the 80x21 area below the status row
        let board = board_rect(&state, body);
        assert_eq!((board.x, board.y), (30, 11));

        assert_eq!(
            cell_value_at(&state, body, board.x, board.y),
            Some(state.numbers[0])
        );
        assert_eq!(
            cell_value_at(&state, body, board.x + CELL_W, board.y + CELL_H),
            Some(state.numbers[4])
        );
        // Column gap between the first two cells
        assert_eq!(cell_value_at(&state, body, board.x + CELL_W - 1, board.y), None);
        // Row gap below the first row
        assert_eq!(cell_value_at(&state, body, board.x, board.y + 1), None);
        // Outside the board entirely
        assert_eq!(cell_value_at(&state, body, 0, 0), None);
    }
}
