//! Four-week training plan shown on the dashboard
//!
//! Static program data. Each week lists daily tasks that deep-link into a
//! drill, so the plan detail view can launch the right module directly.

use crate::model::types::TrainingModule;

#[derive(Clone, Copy, Debug)]
pub struct TrainingPlan {
    pub week: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub tasks: &'static [PlanTask],
}

#[derive(Clone, Copy, Debug)]
pub struct PlanTask {
    pub name: &'static str,
    pub duration: &'static str,
    pub detail: &'static str,
    pub module: TrainingModule,
}

pub const TRAINING_PLANS: [TrainingPlan; 4] = [
    TrainingPlan {
        week: "Week 1",
        title: "Foundations",
        subtitle: "Widen your visual span and quiet the inner voice",
        description: "Start small and consistent. The goal this week is not speed, \
            it is breaking the habit of reading one word at a time. Keep sessions \
            short and stop before fatigue sets in.",
        tasks: &[
            PlanTask {
                name: "Grid warm-up",
                duration: "5 min",
                detail: "3x3 and 4x4 boards. Keep your eyes on the center cell and \
                    find numbers with peripheral vision only.",
                module: TrainingModule::Grid,
            },
            PlanTask {
                name: "Chunk reading",
                duration: "10 min",
                detail: "Read each boxed group as one glance. Do not move your eyes \
                    within a box.",
                module: TrainingModule::Chunking,
            },
            PlanTask {
                name: "Serial presentation, baseline",
                duration: "5 min",
                detail: "Stay at the default rate. Let the words come to you instead \
                    of reaching for them.",
                module: TrainingModule::Rsvp,
            },
        ],
    },
    TrainingPlan {
        week: "Week 2",
        title: "Rhythm",
        subtitle: "Build a steady reading beat",
        description: "This week pairs grouped reading with a pacing guide. A \
            constant external rhythm stops you from drifting back to word-by-word \
            reading when the text gets harder.",
        tasks: &[
            PlanTask {
                name: "Chunk reading",
                duration: "10 min",
                detail: "Same drill as week one, but try to feel each box as a single \
                    beat.",
                module: TrainingModule::Chunking,
            },
            PlanTask {
                name: "Paced reading",
                duration: "10 min",
                detail: "Follow the guide line at the default speed. Your eyes lead \
                    the line slightly, never trail it.",
                module: TrainingModule::Pacer,
            },
            PlanTask {
                name: "Grid, one size up",
                duration: "5 min",
                detail: "Move to 5x5 once a 4x4 board takes you under its target \
                    time.",
                module: TrainingModule::Grid,
            },
        ],
    },
    TrainingPlan {
        week: "Week 3",
        title: "Overclock",
        subtitle: "Train above your comfortable rate",
        description: "Push presentation speed past what feels comfortable. \
            Comprehension will dip, that is expected. Reading slightly too fast \
            recalibrates what normal feels like.",
        tasks: &[
            PlanTask {
                name: "Serial presentation, pushed",
                duration: "10 min",
                detail: "Raise the rate until you just start missing words, then hold \
                    it there for the whole session.",
                module: TrainingModule::Rsvp,
            },
            PlanTask {
                name: "Paced reading, faster guide",
                duration: "10 min",
                detail: "Bump the guide speed up a notch or two from last week.",
                module: TrainingModule::Pacer,
            },
            PlanTask {
                name: "Grid 6x6",
                duration: "5 min",
                detail: "Larger boards force wider scanning. Accuracy first, time \
                    second.",
                module: TrainingModule::Grid,
            },
        ],
    },
    TrainingPlan {
        week: "Week 4",
        title: "Integration",
        subtitle: "Transfer the gains to normal reading",
        description: "Bring the pieces together on full passages and measure the \
            result. Finish the week with a timed assessment and compare your rate \
            against where you started.",
        tasks: &[
            PlanTask {
                name: "Paced reading, long passage",
                duration: "10 min",
                detail: "Pick the longest text and keep pace with the guide from \
                    start to finish.",
                module: TrainingModule::Pacer,
            },
            PlanTask {
                name: "Serial presentation, sprint",
                duration: "5 min",
                detail: "Short bursts at double your week-one rate.",
                module: TrainingModule::Rsvp,
            },
            PlanTask {
                name: "Timed assessment",
                duration: "5 min",
                detail: "Read one passage cold, count your slips honestly, and record \
                    the rate.",
                module: TrainingModule::Assessment,
            },
            PlanTask {
                name: "Grid 7x7",
                duration: "3 min",
                detail: "The widest board as a closing stretch.",
                module: TrainingModule::Grid,
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_cover_four_weeks_in_order() {
        assert_eq!(TRAINING_PLANS.len(), 4);
        for (i, plan) in TRAINING_PLANS.iter().enumerate() {
            assert_eq!(plan.week, format!("Week {}", i + 1));
            assert!(!plan.tasks.is_empty());
        }
    }

    #[test]
    fn every_task_launches_a_drill() {
        for plan in &TRAINING_PLANS {
            for task in plan.tasks {
                assert_ne!(task.module, TrainingModule::Dashboard);
                assert!(!task.name.is_empty());
                assert!(!task.duration.is_empty());
                assert!(!task.detail.is_empty());
            }
        }
    }
}
