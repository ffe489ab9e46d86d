//! Navigation-related controller methods (modules, text picker, plans)

use crate::model::{material, PickerEntry, ReadingText};
use super::AppController;

impl AppController {
    pub async fn open_selected_drill(&self) {
        let model = self.model.lock().await;
        let module = model.selected_drill().await;
        tracing::info!(module = module.title(), "Opening module");
        model.open_module(module).await;
    }

    pub async fn open_plan_detail(&self) {
        let model = self.model.lock().await;
        let week = model.get_ui_state().await.plan_selected + 1;
        tracing::debug!(week, "Opening training plan detail");
        model.open_plan_detail().await;
    }

    /// Launch the drill a plan task points at. The detail overlay closes
    /// as part of entering the module.
    pub async fn launch_plan_task(&self) {
        let model = self.model.lock().await;
        if let Some(task) = model.selected_plan_task().await {
            tracing::info!(task = task.name, module = task.module.title(), "Launching plan task");
            model.open_module(task.module).await;
        }
    }

    pub async fn back_to_dashboard(&self) {
        let model = self.model.lock().await;
        tracing::debug!(from = model.active_module().await.title(), "Returning to dashboard");
        model.back_to_dashboard().await;
    }

    /// Act on the highlighted picker entry: either open the custom text
    /// editor or assign a built-in material to the active drill.
    pub async fn apply_picker_selection(&self) {
        let model = self.model.lock().await;
        match model.selected_picker_entry().await {
            Some(PickerEntry::Custom) => {
                model.open_editor().await;
            }
            Some(PickerEntry::Material { id, .. }) => match material(&id) {
                Some(text) => {
                    tracing::info!(text_id = %id, title = %text.title, "Assigning material");
                    model.assign_text(text).await;
                    model.hide_text_picker().await;
                }
                None => {
                    tracing::warn!(text_id = %id, "Picker entry refers to unknown material");
                    model.hide_text_picker().await;
                    model.set_error(format!("Unknown text: {}", id)).await;
                }
            },
            None => {
                model.hide_text_picker().await;
            }
        }
    }

    /// Confirm the editor buffer as the drill text. Whitespace-only input
    /// is rejected with a visible error and the editor stays open.
    pub async fn confirm_custom_text(&self) {
        let model = self.model.lock().await;
        match model.confirm_editor().await {
            Some(content) => {
                let text = ReadingText::custom(content);
                tracing::info!(chars = text.word_count, "Using custom text");
                model.assign_text(text).await;
            }
            None => {
                model
                    .set_error("Custom text is empty. Type some content first.".to_string())
                    .await;
            }
        }
    }
}
