//! Grid and assessment controller methods

use std::time::Instant;

use crate::model::{AssessmentPhase, ModuleView};

use super::AppController;

impl AppController {
    pub async fn grid_regenerate(&self) {
        tracing::debug!("Reshuffling grid");
        let model = self.model.lock().await;
        model.grid_regenerate().await;
    }

    pub async fn grid_cycle_size(&self) {
        let model = self.model.lock().await;
        model.grid_cycle_size().await;

        if let ModuleView::Grid(state) = model.get_module_view().await {
            tracing::info!(size = state.size, "Switched grid size");
        }
    }

    pub async fn grid_set_size(&self, size: u16) {
        tracing::debug!(size, "Selecting grid size");
        let model = self.model.lock().await;
        model.grid_set_size(size).await;
    }

    /// The assessment's primary action key: each press moves the phase
    /// machine one step forward.
    pub async fn assessment_advance(&self) {
        let model = self.model.lock().await;
        let phase = match model.get_module_view().await {
            ModuleView::Assessment(state) => state.phase,
            _ => return,
        };

        match phase {
            AssessmentPhase::Intro => {
                tracing::info!("Assessment reading started");
                model.assessment_start(Instant::now()).await;
            }
            AssessmentPhase::Reading => {
                if !model.assessment_finish(Instant::now()).await {
                    tracing::debug!("Ignored finish, reading time implausibly short");
                }
            }
            AssessmentPhase::Scoring => {
                model.assessment_submit().await;
                if let ModuleView::Assessment(state) = model.get_module_view().await {
                    if let Some(result) = state.result {
                        tracing::info!(
                            rate = result.rounded(),
                            band = result.band.label(),
                            errors = result.error_count,
                            "Assessment scored"
                        );
                    }
                }
            }
            AssessmentPhase::Result => {}
        }
    }

    pub async fn assessment_retry(&self) {
        tracing::debug!("Restarting assessment");
        let model = self.model.lock().await;
        model.assessment_retry().await;
    }
}
