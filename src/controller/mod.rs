//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and advances drill clocks.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `navigation`: Module entry/exit, text picker and plan flows
//! - `playback`: Transport controls for the clock-driven drills
//! - `drills`: Grid and assessment operations

mod drills;
mod input;
mod navigation;
mod playback;

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    /// Advance the active drill's clock by one run-loop pass. The render
    /// loop calls this once per iteration, so clock resolution equals the
    /// loop's poll interval.
    pub async fn tick(&self) {
        let model = self.model.lock().await;
        model.advance_clocks(Instant::now()).await;
    }
}
