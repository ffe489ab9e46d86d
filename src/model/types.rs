//! Core type definitions for the application

use std::time::Instant;

use super::text::Category;

/// The training modules reachable from the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainingModule {
    Dashboard,
    Grid,
    Pacer,
    Rsvp,
    Chunking,
    Assessment,
}

impl TrainingModule {
    /// Drills in dashboard card order.
    pub const DRILLS: [TrainingModule; 5] = [
        TrainingModule::Grid,
        TrainingModule::Pacer,
        TrainingModule::Rsvp,
        TrainingModule::Chunking,
        TrainingModule::Assessment,
    ];

    pub fn title(self) -> &'static str {
        match self {
            TrainingModule::Dashboard => "Dashboard",
            TrainingModule::Grid => "Attention Grid",
            TrainingModule::Pacer => "Visual Pacer",
            TrainingModule::Rsvp => "RSVP Reading",
            TrainingModule::Chunking => "Chunking Drill",
            TrainingModule::Assessment => "Fluency Assessment",
        }
    }
}

/// Which dashboard section is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardSection {
    Modules,
    Plans,
}

impl DashboardSection {
    pub fn next(self) -> Self {
        match self {
            DashboardSection::Modules => DashboardSection::Plans,
            DashboardSection::Plans => DashboardSection::Modules,
        }
    }

    pub fn prev(self) -> Self {
        // Two sections, so forward and backward both toggle
        self.next()
    }
}

/// An entry in the text picker overlay
#[derive(Clone, Debug)]
pub enum PickerEntry {
    Custom,
    Material {
        id: String,
        title: String,
        category: Category,
    },
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub dashboard_section: DashboardSection,
    pub module_selected: usize,
    pub plan_selected: usize,
    pub show_plan_detail: bool,
    pub plan_task_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    pub show_text_picker: bool,
    pub picker_entries: Vec<PickerEntry>,
    pub picker_selected: usize,
    pub show_editor: bool,
    pub editor_buffer: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            dashboard_section: DashboardSection::Modules,
            module_selected: 0,
            plan_selected: 0,
            show_plan_detail: false,
            plan_task_selected: 0,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
            show_text_picker: false,
            picker_entries: vec![],
            picker_selected: 0,
            show_editor: false,
            editor_buffer: String::new(),
        }
    }
}
