//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Instant;

use crate::model::{DashboardSection, ModuleView, TrainingModule};
use crate::view;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Ctrl+C quits from anywhere, even with an overlay capturing input
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle custom text editor (captures all typing)
        if model.is_editor_open().await {
            return match key.code {
                KeyCode::Esc => {
                    model.close_editor().await;
                    Ok(())
                }
                KeyCode::Enter => {
                    model.editor_newline().await;
                    Ok(())
                }
                KeyCode::Backspace => {
                    model.editor_backspace().await;
                    Ok(())
                }
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    drop(model);
                    self.confirm_custom_text().await;
                    Ok(())
                }
                KeyCode::Char(c) => {
                    if !key.modifiers.contains(KeyModifiers::CONTROL) {
                        model.editor_push_char(c).await;
                    }
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle text picker modal
        if model.is_text_picker_open().await {
            return match key.code {
                KeyCode::Up => {
                    model.picker_move_up().await;
                    Ok(())
                }
                KeyCode::Down => {
                    model.picker_move_down().await;
                    Ok(())
                }
                KeyCode::Enter => {
                    drop(model);
                    self.apply_picker_selection().await;
                    Ok(())
                }
                KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('T') => {
                    model.hide_text_picker().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle training plan detail modal
        if model.is_plan_detail_open().await {
            return match key.code {
                KeyCode::Up => {
                    model.plan_task_move_up().await;
                    Ok(())
                }
                KeyCode::Down => {
                    model.plan_task_move_down().await;
                    Ok(())
                }
                KeyCode::Enter => {
                    drop(model);
                    self.launch_plan_task().await;
                    Ok(())
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    model.close_plan_detail().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Module-specific keybindings
        match model.active_module().await {
            TrainingModule::Dashboard => match key.code {
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        model.cycle_section_backward().await;
                    } else {
                        model.cycle_section_forward().await;
                    }
                    return Ok(());
                }
                KeyCode::BackTab => {
                    model.cycle_section_backward().await;
                    return Ok(());
                }
                KeyCode::Up => {
                    model.move_selection_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.move_selection_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    let section = model.get_ui_state().await.dashboard_section;
                    drop(model);
                    match section {
                        DashboardSection::Modules => self.open_selected_drill().await,
                        DashboardSection::Plans => self.open_plan_detail().await,
                    }
                    return Ok(());
                }
                _ => {}
            },
            TrainingModule::Grid => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    drop(model);
                    self.grid_regenerate().await;
                    return Ok(());
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    drop(model);
                    self.grid_cycle_size().await;
                    return Ok(());
                }
                KeyCode::Char(c @ '3'..='7') => {
                    drop(model);
                    self.grid_set_size(u16::from(c as u8 - b'0')).await;
                    return Ok(());
                }
                _ => {}
            },
            TrainingModule::Rsvp => match key.code {
                KeyCode::Char(' ') => {
                    drop(model);
                    self.rsvp_toggle().await;
                    return Ok(());
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    drop(model);
                    self.rsvp_reset().await;
                    return Ok(());
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    drop(model);
                    self.rsvp_rate_up().await;
                    return Ok(());
                }
                KeyCode::Char('-') => {
                    drop(model);
                    self.rsvp_rate_down().await;
                    return Ok(());
                }
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    model.open_text_picker().await;
                    return Ok(());
                }
                _ => {}
            },
            TrainingModule::Chunking => match key.code {
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    model.chunking_toggle_focus_dots().await;
                    return Ok(());
                }
                KeyCode::Char('b') | KeyCode::Char('B') => {
                    model.chunking_toggle_boundaries().await;
                    return Ok(());
                }
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    model.open_text_picker().await;
                    return Ok(());
                }
                _ => {}
            },
            TrainingModule::Pacer => match key.code {
                KeyCode::Char(' ') => {
                    drop(model);
                    self.pacer_toggle().await;
                    return Ok(());
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    drop(model);
                    self.pacer_reset().await;
                    return Ok(());
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    drop(model);
                    self.pacer_speed_up().await;
                    return Ok(());
                }
                KeyCode::Char('-') => {
                    drop(model);
                    self.pacer_speed_down().await;
                    return Ok(());
                }
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    model.open_text_picker().await;
                    return Ok(());
                }
                _ => {}
            },
            TrainingModule::Assessment => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    drop(model);
                    self.assessment_advance().await;
                    return Ok(());
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    model.assessment_push_digit(c).await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    // Consumed only while scoring; otherwise the global
                    // branch below backs out to the dashboard
                    if model.assessment_backspace().await {
                        return Ok(());
                    }
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    drop(model);
                    self.assessment_retry().await;
                    return Ok(());
                }
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    model.open_text_picker().await;
                    return Ok(());
                }
                _ => {}
            },
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                // Dashboard only; Ctrl+C quits from anywhere
                if model.active_module().await == TrainingModule::Dashboard {
                    model.set_should_quit(true).await;
                }
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            KeyCode::Esc | KeyCode::Backspace => {
                if model.active_module().await != TrainingModule::Dashboard {
                    drop(model);
                    self.back_to_dashboard().await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Mouse input drives the grid drill only. Clicks elsewhere fall
    /// through; overlays swallow them.
    pub async fn handle_mouse_event(&self, mouse: MouseEvent, frame_area: Rect) -> Result<()> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Ok(());
        }

        let model = self.model.lock().await;

        if model.has_error().await
            || model.is_help_popup_open().await
            || model.is_editor_open().await
            || model.is_text_picker_open().await
            || model.is_plan_detail_open().await
        {
            return Ok(());
        }

        if let ModuleView::Grid(state) = model.get_module_view().await {
            let body = view::layout::drill_body_area(frame_area);
            if let Some(value) = view::grid::cell_value_at(&state, body, mouse.column, mouse.row) {
                let accepted = model.grid_click(value, Instant::now()).await;
                tracing::debug!(value, accepted, "grid cell clicked");
            }
        }
        Ok(())
    }
}
