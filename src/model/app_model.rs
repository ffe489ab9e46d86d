//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::drills::{
    AssessmentState, ChunkingState, ModuleView, PacerState, RsvpState,
};
use super::grid::{GridState, GRID_LEVELS};
use super::plan::{PlanTask, TRAINING_PLANS};
use super::text::{self, ReadingText};
use super::types::{DashboardSection, PickerEntry, TrainingModule, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    module_view: Arc<Mutex<ModuleView>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            module_view: Arc::new(Mutex::new(ModuleView::Dashboard)),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_module_view(&self) -> ModuleView {
        self.module_view.lock().await.clone()
    }

    pub async fn active_module(&self) -> TrainingModule {
        self.module_view.lock().await.module()
    }

    // ========================================================================
    // Module Lifecycle
    // ========================================================================

    /// Enter a module with freshly constructed drill state. Any overlay
    /// open at the time is dismissed.
    pub async fn open_module(&self, module: TrainingModule) {
        let view = match module {
            TrainingModule::Dashboard => ModuleView::Dashboard,
            TrainingModule::Grid => {
                ModuleView::Grid(GridState::new(GRID_LEVELS[0].size, &mut rand::thread_rng()))
            }
            TrainingModule::Rsvp => ModuleView::Rsvp(RsvpState::new(default_text(module))),
            TrainingModule::Chunking => {
                ModuleView::Chunking(ChunkingState::new(default_text(module)))
            }
            TrainingModule::Pacer => ModuleView::Pacer(PacerState::new(default_text(module))),
            TrainingModule::Assessment => {
                ModuleView::Assessment(AssessmentState::new(default_text(module)))
            }
        };
        *self.module_view.lock().await = view;

        let mut state = self.ui_state.lock().await;
        state.show_plan_detail = false;
        state.show_text_picker = false;
        state.show_editor = false;
    }

    /// Drop the active drill state and return to the dashboard. Dropping
    /// the state is also what stops its clock, the run loop only ticks
    /// the view that is current.
    pub async fn back_to_dashboard(&self) {
        *self.module_view.lock().await = ModuleView::Dashboard;

        let mut state = self.ui_state.lock().await;
        state.show_text_picker = false;
        state.show_editor = false;
    }

    /// Swap the active drill onto another text, keeping its settings.
    pub async fn assign_text(&self, text: ReadingText) {
        let mut view = self.module_view.lock().await;
        match &mut *view {
            ModuleView::Rsvp(state) => state.set_text(text),
            ModuleView::Chunking(state) => state.set_text(text),
            ModuleView::Pacer(state) => state.set_text(text),
            ModuleView::Assessment(state) => state.set_text(text),
            ModuleView::Dashboard | ModuleView::Grid(_) => {}
        }
    }

    /// Advance the active drill's clock. Called once per run-loop pass.
    pub async fn advance_clocks(&self, now: Instant) {
        use super::clock::PlaybackClock;

        let mut view = self.module_view.lock().await;
        match &mut *view {
            ModuleView::Rsvp(state) => state.clock.tick(now),
            ModuleView::Pacer(state) => state.clock.tick(now),
            _ => {}
        }
    }

    // ========================================================================
    // Dashboard Navigation
    // ========================================================================

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.dashboard_section = state.dashboard_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.dashboard_section = state.dashboard_section.prev();
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        match state.dashboard_section {
            DashboardSection::Modules => {
                if state.module_selected > 0 {
                    state.module_selected -= 1;
                }
            }
            DashboardSection::Plans => {
                if state.plan_selected > 0 {
                    state.plan_selected -= 1;
                }
            }
        }
    }

    pub async fn move_selection_down(&self) {
        let mut state = self.ui_state.lock().await;
        match state.dashboard_section {
            DashboardSection::Modules => {
                if state.module_selected < TrainingModule::DRILLS.len() - 1 {
                    state.module_selected += 1;
                }
            }
            DashboardSection::Plans => {
                if state.plan_selected < TRAINING_PLANS.len() - 1 {
                    state.plan_selected += 1;
                }
            }
        }
    }

    /// Drill under the dashboard cursor.
    pub async fn selected_drill(&self) -> TrainingModule {
        let state = self.ui_state.lock().await;
        TrainingModule::DRILLS[state.module_selected.min(TrainingModule::DRILLS.len() - 1)]
    }

    // ========================================================================
    // Training Plan Detail
    // ========================================================================

    pub async fn open_plan_detail(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_plan_detail = true;
        state.plan_task_selected = 0;
    }

    pub async fn close_plan_detail(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_plan_detail = false;
    }

    pub async fn is_plan_detail_open(&self) -> bool {
        self.ui_state.lock().await.show_plan_detail
    }

    pub async fn plan_task_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.plan_task_selected > 0 {
            state.plan_task_selected -= 1;
        }
    }

    pub async fn plan_task_move_down(&self) {
        let mut state = self.ui_state.lock().await;
        let task_count = TRAINING_PLANS
            .get(state.plan_selected)
            .map(|plan| plan.tasks.len())
            .unwrap_or(0);
        if state.plan_task_selected < task_count.saturating_sub(1) {
            state.plan_task_selected += 1;
        }
    }

    pub async fn selected_plan_task(&self) -> Option<PlanTask> {
        let state = self.ui_state.lock().await;
        TRAINING_PLANS
            .get(state.plan_selected)
            .and_then(|plan| plan.tasks.get(state.plan_task_selected))
            .copied()
    }

    // ========================================================================
    // Text Picker
    // ========================================================================

    /// Open the picker with the custom-entry option first, then the
    /// built-in materials, cursor on the drill's current text.
    pub async fn open_text_picker(&self) {
        let current = self.module_view.lock().await.text().cloned();

        let mut entries = vec![PickerEntry::Custom];
        entries.extend(text::materials().into_iter().map(|t| PickerEntry::Material {
            id: t.id,
            title: t.title,
            category: t.category,
        }));

        let selected = match current {
            // A custom text maps onto the custom entry at the top
            Some(text) if text.is_custom() => 0,
            Some(text) => entries
                .iter()
                .position(|entry| {
                    matches!(entry, PickerEntry::Material { id, .. } if *id == text.id)
                })
                .unwrap_or(0),
            None => 0,
        };

        let mut state = self.ui_state.lock().await;
        state.picker_entries = entries;
        state.picker_selected = selected;
        state.show_text_picker = true;
    }

    pub async fn hide_text_picker(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_text_picker = false;
    }

    pub async fn is_text_picker_open(&self) -> bool {
        self.ui_state.lock().await.show_text_picker
    }

    pub async fn picker_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.picker_selected > 0 {
            state.picker_selected -= 1;
        }
    }

    pub async fn picker_move_down(&self) {
        let mut state = self.ui_state.lock().await;
        if state.picker_selected < state.picker_entries.len().saturating_sub(1) {
            state.picker_selected += 1;
        }
    }

    pub async fn selected_picker_entry(&self) -> Option<PickerEntry> {
        let state = self.ui_state.lock().await;
        state.picker_entries.get(state.picker_selected).cloned()
    }

    // ========================================================================
    // Custom Text Editor
    // ========================================================================

    /// Open the free-text editor. The buffer keeps its previous content
    /// so a custom text can be tweaked rather than retyped.
    pub async fn open_editor(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_text_picker = false;
        state.show_editor = true;
    }

    pub async fn close_editor(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_editor = false;
    }

    pub async fn is_editor_open(&self) -> bool {
        self.ui_state.lock().await.show_editor
    }

    pub async fn editor_push_char(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.editor_buffer.push(c);
    }

    pub async fn editor_newline(&self) {
        let mut state = self.ui_state.lock().await;
        state.editor_buffer.push('\n');
    }

    pub async fn editor_backspace(&self) {
        let mut state = self.ui_state.lock().await;
        state.editor_buffer.pop();
    }

    /// Accept the buffer as the custom text. Whitespace-only content is
    /// rejected and leaves the editor open.
    pub async fn confirm_editor(&self) -> Option<String> {
        let mut state = self.ui_state.lock().await;
        if state.editor_buffer.trim().is_empty() {
            return None;
        }
        state.show_editor = false;
        Some(state.editor_buffer.clone())
    }

    // ========================================================================
    // Errors & Help
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Serial Presentation (RSVP)
    // ========================================================================

    pub async fn rsvp_toggle(&self, now: Instant) {
        if let ModuleView::Rsvp(state) = &mut *self.module_view.lock().await {
            state.toggle(now);
        }
    }

    pub async fn rsvp_reset(&self) {
        if let ModuleView::Rsvp(state) = &mut *self.module_view.lock().await {
            state.reset();
        }
    }

    pub async fn rsvp_adjust_cpm(&self, delta: i64, now: Instant) {
        if let ModuleView::Rsvp(state) = &mut *self.module_view.lock().await {
            state.adjust_cpm(delta, now);
        }
    }

    // ========================================================================
    // Visual Pacer
    // ========================================================================

    pub async fn pacer_toggle(&self, now: Instant) {
        if let ModuleView::Pacer(state) = &mut *self.module_view.lock().await {
            state.toggle(now);
        }
    }

    pub async fn pacer_reset(&self) {
        if let ModuleView::Pacer(state) = &mut *self.module_view.lock().await {
            state.reset();
        }
    }

    pub async fn pacer_adjust_speed(&self, delta: i64, now: Instant) {
        if let ModuleView::Pacer(state) = &mut *self.module_view.lock().await {
            state.adjust_speed(delta, now);
        }
    }

    // ========================================================================
    // Chunking Drill
    // ========================================================================

    pub async fn chunking_toggle_focus_dots(&self) {
        if let ModuleView::Chunking(state) = &mut *self.module_view.lock().await {
            state.toggle_focus_dots();
        }
    }

    pub async fn chunking_toggle_boundaries(&self) {
        if let ModuleView::Chunking(state) = &mut *self.module_view.lock().await {
            state.toggle_boundaries();
        }
    }

    // ========================================================================
    // Attention Grid
    // ========================================================================

    pub async fn grid_click(&self, value: u16, now: Instant) -> bool {
        if let ModuleView::Grid(state) = &mut *self.module_view.lock().await {
            state.click(value, now)
        } else {
            false
        }
    }

    pub async fn grid_regenerate(&self) {
        if let ModuleView::Grid(state) = &mut *self.module_view.lock().await {
            state.regenerate(&mut rand::thread_rng());
        }
    }

    /// Step to the next board size, wrapping after the largest.
    pub async fn grid_cycle_size(&self) {
        if let ModuleView::Grid(state) = &mut *self.module_view.lock().await {
            let index = GRID_LEVELS
                .iter()
                .position(|level| level.size == state.size)
                .unwrap_or(0);
            let next = GRID_LEVELS[(index + 1) % GRID_LEVELS.len()];
            state.resize(next.size, &mut rand::thread_rng());
        }
    }

    /// Jump straight to a board size. Sizes outside the level table are
    /// ignored.
    pub async fn grid_set_size(&self, size: u16) {
        if let ModuleView::Grid(state) = &mut *self.module_view.lock().await {
            if state.size != size && GRID_LEVELS.iter().any(|level| level.size == size) {
                state.resize(size, &mut rand::thread_rng());
            }
        }
    }

    // ========================================================================
    // Fluency Assessment
    // ========================================================================

    pub async fn assessment_start(&self, now: Instant) {
        if let ModuleView::Assessment(state) = &mut *self.module_view.lock().await {
            state.start_reading(now);
        }
    }

    pub async fn assessment_finish(&self, now: Instant) -> bool {
        if let ModuleView::Assessment(state) = &mut *self.module_view.lock().await {
            state.finish_reading(now)
        } else {
            false
        }
    }

    pub async fn assessment_push_digit(&self, c: char) {
        if let ModuleView::Assessment(state) = &mut *self.module_view.lock().await {
            state.push_digit(c);
        }
    }

    pub async fn assessment_backspace(&self) -> bool {
        if let ModuleView::Assessment(state) = &mut *self.module_view.lock().await {
            state.backspace_digit()
        } else {
            false
        }
    }

    pub async fn assessment_submit(&self) {
        if let ModuleView::Assessment(state) = &mut *self.module_view.lock().await {
            state.submit_score();
        }
    }

    pub async fn assessment_retry(&self) {
        if let ModuleView::Assessment(state) = &mut *self.module_view.lock().await {
            state.retry();
        }
    }
}

/// Text a drill starts on before the user picks one.
fn default_text(module: TrainingModule) -> ReadingText {
    let id = match module {
        TrainingModule::Assessment => "dinosaur",
        _ => "chameleon",
    };
    text::material(id).unwrap_or_else(|| ReadingText::custom(String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clock::PlaybackClock;
    use crate::model::drills::AssessmentPhase;

    #[tokio::test]
    async fn open_module_builds_fresh_drill_state() {
        let model = AppModel::new();
        model.open_module(TrainingModule::Grid).await;
        assert_eq!(model.active_module().await, TrainingModule::Grid);

        match model.get_module_view().await {
            ModuleView::Grid(state) => assert_eq!(state.size, GRID_LEVELS[0].size),
            other => panic!("unexpected view {:?}", other.module()),
        }
    }

    #[tokio::test]
    async fn leaving_a_module_drops_its_state() {
        let model = AppModel::new();
        model.open_module(TrainingModule::Rsvp).await;
        model.rsvp_toggle(Instant::now()).await;

        model.back_to_dashboard().await;
        assert_eq!(model.active_module().await, TrainingModule::Dashboard);

        // Re-entering starts over rather than resuming
        model.open_module(TrainingModule::Rsvp).await;
        match model.get_module_view().await {
            ModuleView::Rsvp(state) => {
                assert!(!state.clock.is_playing());
                assert_eq!(state.clock.current_index(), 0);
            }
            other => panic!("unexpected view {:?}", other.module()),
        }
    }

    #[tokio::test]
    async fn grid_set_size_swaps_board_and_ignores_unknown_sizes() {
        let model = AppModel::new();
        model.open_module(TrainingModule::Grid).await;

        model.grid_set_size(6).await;
        match model.get_module_view().await {
            ModuleView::Grid(state) => {
                assert_eq!(state.size, 6);
                assert_eq!(state.numbers.len(), 36);
            }
            other => panic!("unexpected view {:?}", other.module()),
        }

        model.grid_set_size(9).await;
        match model.get_module_view().await {
            ModuleView::Grid(state) => assert_eq!(state.size, 6),
            other => panic!("unexpected view {:?}", other.module()),
        }
    }

    #[tokio::test]
    async fn dashboard_selection_stays_in_bounds() {
        let model = AppModel::new();
        for _ in 0..20 {
            model.move_selection_down().await;
        }
        let state = model.get_ui_state().await;
        assert_eq!(state.module_selected, TrainingModule::DRILLS.len() - 1);

        for _ in 0..20 {
            model.move_selection_up().await;
        }
        assert_eq!(model.get_ui_state().await.module_selected, 0);
    }

    #[tokio::test]
    async fn picker_opens_on_the_current_text() {
        let model = AppModel::new();
        model.open_module(TrainingModule::Assessment).await;
        model.open_text_picker().await;

        let state = model.get_ui_state().await;
        assert!(state.show_text_picker);
        match &state.picker_entries[state.picker_selected] {
            PickerEntry::Material { id, .. } => assert_eq!(id, "dinosaur"),
            PickerEntry::Custom => panic!("cursor should sit on the current material"),
        }
        assert!(matches!(state.picker_entries[0], PickerEntry::Custom));
    }

    #[tokio::test]
    async fn editor_rejects_whitespace_only_content() {
        let model = AppModel::new();
        model.open_editor().await;
        model.editor_push_char(' ').await;
        model.editor_newline().await;

        assert!(model.confirm_editor().await.is_none());
        assert!(model.is_editor_open().await);

        model.editor_push_char('读').await;
        assert_eq!(model.confirm_editor().await.as_deref(), Some(" \n读"));
        assert!(!model.is_editor_open().await);
    }

    #[tokio::test]
    async fn assign_text_keeps_the_drill_settings() {
        let model = AppModel::new();
        model.open_module(TrainingModule::Rsvp).await;
        model.rsvp_adjust_cpm(50, Instant::now()).await;

        let custom = ReadingText::custom("从头到尾读一遍。".to_string());
        model.assign_text(custom).await;

        match model.get_module_view().await {
            ModuleView::Rsvp(state) => {
                assert!(state.text.is_custom());
                assert_eq!(state.cpm, 350);
                assert_eq!(state.clock.current_index(), 0);
            }
            other => panic!("unexpected view {:?}", other.module()),
        }
    }

    #[tokio::test]
    async fn launching_a_plan_task_closes_the_detail_overlay() {
        let model = AppModel::new();
        model.open_plan_detail().await;
        assert!(model.is_plan_detail_open().await);

        let task = model.selected_plan_task().await.unwrap();
        model.open_module(task.module).await;
        assert!(!model.is_plan_detail_open().await);
        assert_eq!(model.active_module().await, task.module);
    }

    #[tokio::test]
    async fn assessment_flow_reaches_a_result() {
        let model = AppModel::new();
        model.open_module(TrainingModule::Assessment).await;
        let t0 = Instant::now();
        model.assessment_start(t0).await;
        assert!(model.assessment_finish(t0 + std::time::Duration::from_secs(40)).await);
        model.assessment_push_digit('3').await;
        model.assessment_submit().await;

        match model.get_module_view().await {
            ModuleView::Assessment(state) => {
                assert_eq!(state.phase, AssessmentPhase::Result);
                assert!(state.result.is_some());
            }
            other => panic!("unexpected view {:?}", other.module()),
        }
    }
}
