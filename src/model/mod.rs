//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (enums, UI state, etc.)
//! - `text`: Built-in reading materials and the text value type
//! - `chunker`: Text-to-display-unit engines and segmentation strategies
//! - `clock`: Poll-driven playback clocks (interval and frame-delta)
//! - `grid`: Number-search grid drill state
//! - `scorer`: Fluency rate computation and bands
//! - `plan`: Static four-week training program
//! - `drills`: Per-drill state structs and the active-module container
//! - `app_model`: Main application model with state management methods

mod app_model;
mod chunker;
mod clock;
mod drills;
mod grid;
mod plan;
mod scorer;
mod text;
mod types;

// Re-export all public types for convenient access
pub use types::{
    DashboardSection, PickerEntry, TrainingModule, UiState,
};

pub use clock::PlaybackClock;

pub use drills::{
    AssessmentPhase, AssessmentState, ChunkingState, ModuleView, PacerState,
    RsvpState, PACER_SPEED_STEP, RSVP_CPM_STEP,
};

pub use grid::{level_target, GridState, GridStatus, GRID_LEVELS};

pub use plan::{PlanTask, TrainingPlan, TRAINING_PLANS};

pub use scorer::{Band, ScoreResult, FLUENCY_NORMS};

pub use text::{material, materials, Category, ReadingText};

pub use app_model::AppModel;
