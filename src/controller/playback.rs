//! Transport controls for the clock-driven drills

use std::time::Instant;

use crate::model::{ModuleView, PlaybackClock, PACER_SPEED_STEP, RSVP_CPM_STEP};

use super::AppController;

impl AppController {
    pub async fn rsvp_toggle(&self) {
        let model = self.model.lock().await;
        model.rsvp_toggle(Instant::now()).await;

        if let ModuleView::Rsvp(state) = model.get_module_view().await {
            tracing::debug!(
                playing = state.clock.is_playing(),
                unit = state.clock.current_index(),
                "Toggled presentation"
            );
        }
    }

    pub async fn rsvp_reset(&self) {
        tracing::debug!("Rewinding presentation");
        let model = self.model.lock().await;
        model.rsvp_reset().await;
    }

    pub async fn rsvp_rate_up(&self) {
        self.rsvp_adjust(i64::from(RSVP_CPM_STEP)).await;
    }

    pub async fn rsvp_rate_down(&self) {
        self.rsvp_adjust(-i64::from(RSVP_CPM_STEP)).await;
    }

    async fn rsvp_adjust(&self, delta: i64) {
        let model = self.model.lock().await;
        model.rsvp_adjust_cpm(delta, Instant::now()).await;

        if let ModuleView::Rsvp(state) = model.get_module_view().await {
            tracing::debug!(cpm = state.cpm, "Adjusted presentation rate");
        }
    }

    pub async fn pacer_toggle(&self) {
        let model = self.model.lock().await;
        model.pacer_toggle(Instant::now()).await;

        if let ModuleView::Pacer(state) = model.get_module_view().await {
            tracing::debug!(
                playing = state.clock.is_playing(),
                row = state.guide_row(),
                "Toggled pacing guide"
            );
        }
    }

    pub async fn pacer_reset(&self) {
        tracing::debug!("Rewinding pacing guide");
        let model = self.model.lock().await;
        model.pacer_reset().await;
    }

    pub async fn pacer_speed_up(&self) {
        self.pacer_adjust(i64::from(PACER_SPEED_STEP)).await;
    }

    pub async fn pacer_speed_down(&self) {
        self.pacer_adjust(-i64::from(PACER_SPEED_STEP)).await;
    }

    async fn pacer_adjust(&self, delta: i64) {
        let model = self.model.lock().await;
        model.pacer_adjust_speed(delta, Instant::now()).await;

        if let ModuleView::Pacer(state) = model.get_module_view().await {
            tracing::debug!(speed = state.speed, "Adjusted guide speed");
        }
    }
}
