//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, centering)
//! - `layout`: Header, footer and body frame structure
//! - `dashboard`: Module cards and training plan row
//! - `rsvp`: Serial-presentation stage
//! - `chunking`: Boxed chunk flow
//! - `pacer`: Guided line-sweep reading
//! - `grid`: Number-search board (geometry shared with mouse hit-testing)
//! - `assessment`: Timed reading phases and result chart
//! - `overlays`: Modal overlays (error, picker, editor, plan detail, help)

mod assessment;
mod chunking;
mod dashboard;
pub(crate) mod grid;
pub(crate) mod layout;
mod overlays;
mod pacer;
mod rsvp;
mod utils;

use ratatui::Frame;

use crate::model::{ModuleView, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, module_view: &ModuleView) {
        let chunks = layout::main_chunks(frame.area());

        layout::render_header(frame, chunks[0], module_view.module());

        match module_view {
            ModuleView::Dashboard => dashboard::render(frame, chunks[1], ui_state),
            ModuleView::Grid(state) => grid::render(frame, chunks[1], state),
            ModuleView::Rsvp(state) => rsvp::render(frame, chunks[1], state),
            ModuleView::Chunking(state) => chunking::render(frame, chunks[1], state),
            ModuleView::Pacer(state) => pacer::render(frame, chunks[1], state),
            ModuleView::Assessment(state) => assessment::render(frame, chunks[1], state),
        }

        layout::render_footer(frame, chunks[2], module_view);

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Training plan detail overlay (if open)
        if ui_state.show_plan_detail {
            overlays::render_plan_detail(frame, ui_state);
        }

        // Text picker overlay (if open)
        if ui_state.show_text_picker {
            overlays::render_text_picker(frame, ui_state);
        }

        // Custom text editor overlay (if open)
        if ui_state.show_editor {
            overlays::render_editor(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
