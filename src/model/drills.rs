//! Per-drill state and the active-module container
//!
//! Each drill owns its text, its derived display units and its clock.
//! Entering a module constructs the state fresh; leaving drops it, which
//! also cancels any running clock since the clocks are poll-driven.

use std::time::Instant;

use crate::model::chunker::{self, chunk, group_units, FixedWidth, WordBoundary, GROUP_WIDTH};
use crate::model::clock::{FrameClock, IntervalClock, PlaybackClock};
use crate::model::grid::GridState;
use crate::model::scorer::ScoreResult;
use crate::model::text::ReadingText;
use crate::model::types::TrainingModule;

pub const RSVP_DEFAULT_CPM: u32 = 300;
pub const RSVP_MIN_CPM: u32 = 100;
pub const RSVP_MAX_CPM: u32 = 1200;
pub const RSVP_CPM_STEP: u32 = 50;
/// Average characters per presented unit, converts characters-per-minute
/// into the clock's units-per-minute.
const CHARS_PER_UNIT: f64 = 2.5;

pub const PACER_DEFAULT_SPEED: u32 = 30;
pub const PACER_MIN_SPEED: u32 = 10;
pub const PACER_MAX_SPEED: u32 = 100;
pub const PACER_SPEED_STEP: u32 = 5;
/// Guide rows advanced per speed unit per second.
const PACER_ROW_SCALE: f64 = 0.1;
/// Characters per wrapped pacer line.
const PACER_LINE_WIDTH: usize = 32;

/// Shortest believable reading session; earlier finishes are misclicks.
const MIN_READING_SECS: f64 = 0.1;
const MAX_ERROR_DIGITS: usize = 3;

fn units_per_min(cpm: u32) -> f64 {
    f64::from(cpm) / CHARS_PER_UNIT
}

/// Serial-presentation drill: one unit at a time at a fixed rate.
#[derive(Clone, Debug)]
pub struct RsvpState {
    pub text: ReadingText,
    pub units: Vec<String>,
    pub cpm: u32,
    pub clock: IntervalClock,
}

impl RsvpState {
    pub fn new(text: ReadingText) -> Self {
        let units = presentation_units(&text);
        let clock = IntervalClock::new(units.len(), units_per_min(RSVP_DEFAULT_CPM));
        Self {
            text,
            units,
            cpm: RSVP_DEFAULT_CPM,
            clock,
        }
    }

    /// Swap in another text, keeping the chosen rate.
    pub fn set_text(&mut self, text: ReadingText) {
        self.units = presentation_units(&text);
        self.clock = IntervalClock::new(self.units.len(), units_per_min(self.cpm));
        self.text = text;
    }

    pub fn current_unit(&self) -> &str {
        self.units
            .get(self.clock.current_index())
            .map(String::as_str)
            .unwrap_or(chunker::NO_CONTENT_PLACEHOLDER)
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.clock.is_playing() {
            self.clock.pause();
        } else {
            self.clock.start(now);
        }
    }

    pub fn reset(&mut self) {
        self.clock.reset();
    }

    pub fn adjust_cpm(&mut self, delta: i64, now: Instant) {
        let next = (i64::from(self.cpm) + delta)
            .clamp(i64::from(RSVP_MIN_CPM), i64::from(RSVP_MAX_CPM));
        self.cpm = next as u32;
        self.clock.set_rate(units_per_min(self.cpm), now);
    }
}

/// Units presented one at a time. Hand-prepared chunks win over automatic
/// word-boundary grouping; their `/` markers are display-only and dropped.
fn presentation_units(text: &ReadingText) -> Vec<String> {
    match &text.chunks {
        Some(chunks) => chunks.iter().map(|c| c.replace('/', "")).collect(),
        None => group_units(&text.content, &WordBoundary, GROUP_WIDTH),
    }
}

/// Static chunk-display drill with toggleable reading aids.
#[derive(Clone, Debug)]
pub struct ChunkingState {
    pub text: ReadingText,
    pub units: Vec<String>,
    pub show_focus_dots: bool,
    pub show_boundaries: bool,
}

impl ChunkingState {
    pub fn new(text: ReadingText) -> Self {
        let units = match &text.chunks {
            Some(chunks) => chunks.clone(),
            None => chunk(&text.content),
        };
        Self {
            text,
            units,
            show_focus_dots: true,
            show_boundaries: true,
        }
    }

    pub fn set_text(&mut self, text: ReadingText) {
        self.units = match &text.chunks {
            Some(chunks) => chunks.clone(),
            None => chunk(&text.content),
        };
        self.text = text;
    }

    /// Units as boxed on screen: sub-boundary markers removed, surrounding
    /// whitespace trimmed, blank leftovers dropped.
    pub fn display_units(&self) -> Vec<String> {
        self.units
            .iter()
            .map(|unit| unit.replace('/', "").trim().to_string())
            .filter(|unit| !unit.is_empty())
            .collect()
    }

    pub fn toggle_focus_dots(&mut self) {
        self.show_focus_dots = !self.show_focus_dots;
    }

    pub fn toggle_boundaries(&mut self) {
        self.show_boundaries = !self.show_boundaries;
    }
}

/// Pacing drill: a guide line sweeps down wrapped text lines.
#[derive(Clone, Debug)]
pub struct PacerState {
    pub text: ReadingText,
    pub lines: Vec<String>,
    pub speed: u32,
    pub clock: FrameClock,
}

impl PacerState {
    pub fn new(text: ReadingText) -> Self {
        let lines = wrap_content(&text.content, PACER_LINE_WIDTH);
        let clock = FrameClock::new(
            lines.len() as f64,
            f64::from(PACER_DEFAULT_SPEED),
            PACER_ROW_SCALE,
        );
        Self {
            text,
            lines,
            speed: PACER_DEFAULT_SPEED,
            clock,
        }
    }

    pub fn set_text(&mut self, text: ReadingText) {
        self.lines = wrap_content(&text.content, PACER_LINE_WIDTH);
        self.clock = FrameClock::new(
            self.lines.len() as f64,
            f64::from(self.speed),
            PACER_ROW_SCALE,
        );
        self.text = text;
    }

    /// Line index the guide currently sits on.
    pub fn guide_row(&self) -> usize {
        (self.clock.position() as usize).min(self.lines.len().saturating_sub(1))
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.clock.is_playing() {
            self.clock.pause();
        } else {
            self.clock.start(now);
        }
    }

    pub fn reset(&mut self) {
        self.clock.reset();
    }

    pub fn adjust_speed(&mut self, delta: i64, now: Instant) {
        let next = (i64::from(self.speed) + delta)
            .clamp(i64::from(PACER_MIN_SPEED), i64::from(PACER_MAX_SPEED));
        self.speed = next as u32;
        self.clock.set_rate(f64::from(self.speed), now);
    }
}

/// Paragraph-preserving wrap at a fixed character width.
fn wrap_content(content: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        let trimmed = paragraph.trim();
        if trimmed.is_empty() {
            continue;
        }
        lines.extend(group_units(trimmed, &FixedWidth, width));
    }
    if lines.is_empty() {
        lines.push(chunker::NO_CONTENT_PLACEHOLDER.to_string());
    }
    lines
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssessmentPhase {
    Intro,
    Reading,
    Scoring,
    Result,
}

/// Timed reading assessment: read a passage, self-report errors, get a
/// corrected units-per-minute rate.
#[derive(Clone, Debug)]
pub struct AssessmentState {
    pub text: ReadingText,
    pub phase: AssessmentPhase,
    reading_started: Option<Instant>,
    pub reading_seconds: f64,
    pub error_entry: String,
    pub result: Option<ScoreResult>,
}

impl AssessmentState {
    pub fn new(text: ReadingText) -> Self {
        Self {
            text,
            phase: AssessmentPhase::Intro,
            reading_started: None,
            reading_seconds: 0.0,
            error_entry: String::new(),
            result: None,
        }
    }

    pub fn set_text(&mut self, text: ReadingText) {
        self.text = text;
        self.retry();
    }

    pub fn start_reading(&mut self, now: Instant) {
        if self.phase != AssessmentPhase::Intro {
            return;
        }
        self.phase = AssessmentPhase::Reading;
        self.reading_started = Some(now);
    }

    /// Stop the reading timer. Finishes faster than a human could read
    /// anything are ignored, which also keeps the scorer's elapsed time
    /// strictly positive. Returns whether the finish was accepted.
    pub fn finish_reading(&mut self, now: Instant) -> bool {
        if self.phase != AssessmentPhase::Reading {
            return false;
        }
        let elapsed = self
            .reading_started
            .map(|start| now.duration_since(start).as_secs_f64())
            .unwrap_or(0.0);
        if elapsed < MIN_READING_SECS {
            return false;
        }
        self.reading_seconds = elapsed;
        self.phase = AssessmentPhase::Scoring;
        true
    }

    pub fn reading_elapsed(&self, now: Instant) -> f64 {
        self.reading_started
            .map(|start| now.duration_since(start).as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn push_digit(&mut self, c: char) {
        if self.phase == AssessmentPhase::Scoring
            && c.is_ascii_digit()
            && self.error_entry.len() < MAX_ERROR_DIGITS
        {
            self.error_entry.push(c);
        }
    }

    /// Delete the last typed digit. Returns whether the key was consumed,
    /// which is only the case during scoring.
    pub fn backspace_digit(&mut self) -> bool {
        if self.phase != AssessmentPhase::Scoring {
            return false;
        }
        self.error_entry.pop();
        true
    }

    /// Reported error count; an empty entry scores as zero errors.
    pub fn error_count(&self) -> u32 {
        self.error_entry.parse().unwrap_or(0)
    }

    pub fn submit_score(&mut self) {
        if self.phase != AssessmentPhase::Scoring {
            return;
        }
        self.result = Some(ScoreResult::compute(
            self.text.word_count as u32,
            self.error_count(),
            self.reading_seconds,
        ));
        self.phase = AssessmentPhase::Result;
    }

    /// Back to the intro screen, discarding the attempt.
    pub fn retry(&mut self) {
        self.phase = AssessmentPhase::Intro;
        self.reading_started = None;
        self.reading_seconds = 0.0;
        self.error_entry.clear();
        self.result = None;
    }
}

/// The module currently on screen, with its state.
#[derive(Clone, Debug)]
pub enum ModuleView {
    Dashboard,
    Grid(GridState),
    Rsvp(RsvpState),
    Chunking(ChunkingState),
    Pacer(PacerState),
    Assessment(AssessmentState),
}

impl ModuleView {
    pub fn module(&self) -> TrainingModule {
        match self {
            ModuleView::Dashboard => TrainingModule::Dashboard,
            ModuleView::Grid(_) => TrainingModule::Grid,
            ModuleView::Rsvp(_) => TrainingModule::Rsvp,
            ModuleView::Chunking(_) => TrainingModule::Chunking,
            ModuleView::Pacer(_) => TrainingModule::Pacer,
            ModuleView::Assessment(_) => TrainingModule::Assessment,
        }
    }

    /// The text the active drill reads from, if it uses one.
    pub fn text(&self) -> Option<&ReadingText> {
        match self {
            ModuleView::Dashboard | ModuleView::Grid(_) => None,
            ModuleView::Rsvp(state) => Some(&state.text),
            ModuleView::Chunking(state) => Some(&state.text),
            ModuleView::Pacer(state) => Some(&state.text),
            ModuleView::Assessment(state) => Some(&state.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clock::PlaybackClock;
    use crate::model::scorer::Band;
    use crate::model::text;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drill_text() -> ReadingText {
        text::material("chunk-rhythm").unwrap()
    }

    #[test]
    fn rsvp_strips_markers_from_prepared_chunks() {
        let state = RsvpState::new(drill_text());
        assert_eq!(state.units.len(), 10);
        assert!(state.units.iter().all(|u| !u.contains('/')));
        assert_eq!(state.units[0], "快速阅读不是");
    }

    #[test]
    fn rsvp_default_rate_presents_a_unit_every_half_second() {
        // 300 characters/min over 2.5-char units is 120 units/min
        let mut state = RsvpState::new(drill_text());
        let t0 = Instant::now();
        state.toggle(t0);

        state.clock.tick(t0 + ms(499));
        assert_eq!(state.clock.current_index(), 0);
        state.clock.tick(t0 + ms(500));
        assert_eq!(state.clock.current_index(), 1);
    }

    #[test]
    fn rsvp_rate_clamps_at_both_ends() {
        let mut state = RsvpState::new(drill_text());
        let t0 = Instant::now();

        for _ in 0..10 {
            state.adjust_cpm(-i64::from(RSVP_CPM_STEP), t0);
        }
        assert_eq!(state.cpm, RSVP_MIN_CPM);

        for _ in 0..40 {
            state.adjust_cpm(i64::from(RSVP_CPM_STEP), t0);
        }
        assert_eq!(state.cpm, RSVP_MAX_CPM);
    }

    #[test]
    fn rsvp_set_text_keeps_rate_and_rewinds() {
        let mut state = RsvpState::new(drill_text());
        let t0 = Instant::now();
        state.adjust_cpm(i64::from(RSVP_CPM_STEP), t0);
        state.toggle(t0);
        state.clock.tick(t0 + ms(1000));

        state.set_text(text::material("stars").unwrap());
        assert_eq!(state.cpm, RSVP_DEFAULT_CPM + RSVP_CPM_STEP);
        assert_eq!(state.clock.current_index(), 0);
        assert!(!state.clock.is_playing());
        assert!(!state.units.is_empty());
    }

    #[test]
    fn rsvp_toggle_at_end_restarts_from_first_unit() {
        let mut state = RsvpState::new(drill_text());
        let t0 = Instant::now();
        state.toggle(t0);
        // Walk the clock to the stopped end state
        let mut now = t0;
        for _ in 0..state.units.len() + 1 {
            now += ms(500);
            state.clock.tick(now);
        }
        assert!(!state.clock.is_playing());
        assert_eq!(state.clock.current_index(), state.units.len() - 1);

        state.toggle(now);
        assert_eq!(state.clock.current_index(), 0);
        assert!(state.clock.is_playing());
    }

    #[test]
    fn chunking_display_units_drop_markers_and_blanks() {
        let mut state = ChunkingState::new(drill_text());
        state.units.push("  ".to_string());
        state.units.push("/".to_string());
        let display = state.display_units();
        assert_eq!(display.len(), 10);
        assert!(display.iter().all(|u| !u.contains('/')));
    }

    #[test]
    fn chunking_without_prepared_chunks_uses_the_chunker() {
        let state = ChunkingState::new(text::material("stars").unwrap());
        assert!(!state.units.is_empty());
        let joined: String = state.units.join("");
        assert_eq!(joined, state.text.content);
    }

    #[test]
    fn pacer_wraps_lines_at_fixed_width() {
        let state = PacerState::new(text::material("chameleon").unwrap());
        assert!(!state.lines.is_empty());
        for line in &state.lines[..state.lines.len() - 1] {
            assert_eq!(line.chars().count(), 32);
        }
        let joined: String = state.lines.join("");
        assert_eq!(joined, state.text.content);
    }

    #[test]
    fn pacer_preserves_paragraph_breaks_without_blank_lines() {
        let text = ReadingText::custom("第一段。\n\n第二段。".to_string());
        let state = PacerState::new(text);
        assert_eq!(state.lines, vec!["第一段。", "第二段。"]);
    }

    #[test]
    fn pacer_guide_row_caps_at_last_line() {
        let mut state = PacerState::new(text::material("chameleon").unwrap());
        let t0 = Instant::now();
        state.toggle(t0);
        state.clock.tick(t0);
        // Far past the extent; position clamps and playback stops
        state.clock.tick(t0 + Duration::from_secs(3600));
        assert!(!state.clock.is_playing());
        assert_eq!(state.guide_row(), state.lines.len() - 1);
    }

    #[test]
    fn pacer_speed_clamps_at_both_ends() {
        let mut state = PacerState::new(text::material("bamboo").unwrap());
        let t0 = Instant::now();
        for _ in 0..30 {
            state.adjust_speed(-i64::from(PACER_SPEED_STEP), t0);
        }
        assert_eq!(state.speed, PACER_MIN_SPEED);
        for _ in 0..30 {
            state.adjust_speed(i64::from(PACER_SPEED_STEP), t0);
        }
        assert_eq!(state.speed, PACER_MAX_SPEED);
    }

    #[test]
    fn assessment_happy_path_scores_the_passage() {
        let mut state = AssessmentState::new(text::material("dinosaur").unwrap());
        let t0 = Instant::now();
        assert_eq!(state.phase, AssessmentPhase::Intro);

        state.start_reading(t0);
        assert_eq!(state.phase, AssessmentPhase::Reading);

        assert!(state.finish_reading(t0 + Duration::from_secs(30)));
        assert_eq!(state.phase, AssessmentPhase::Scoring);

        state.push_digit('2');
        assert_eq!(state.error_count(), 2);

        state.submit_score();
        assert_eq!(state.phase, AssessmentPhase::Result);
        let result = state.result.unwrap();
        let chars = state.text.word_count as f64;
        assert_eq!(result.rounded(), ((chars - 2.0) / 30.0 * 60.0).round() as i64);
        assert_eq!(result.band, Band::classify(result.rounded()));
    }

    #[test]
    fn assessment_rejects_implausibly_fast_finish() {
        let mut state = AssessmentState::new(text::material("dinosaur").unwrap());
        let t0 = Instant::now();
        state.start_reading(t0);
        assert!(!state.finish_reading(t0 + ms(20)));
        assert_eq!(state.phase, AssessmentPhase::Reading);
    }

    #[test]
    fn assessment_entry_accepts_at_most_three_digits() {
        let mut state = AssessmentState::new(text::material("dinosaur").unwrap());
        // Outside scoring, backspace is not an editing key
        assert!(!state.backspace_digit());

        let t0 = Instant::now();
        state.start_reading(t0);
        state.finish_reading(t0 + Duration::from_secs(20));

        for c in ['1', '2', '3', '4', 'x'] {
            state.push_digit(c);
        }
        assert_eq!(state.error_entry, "123");
        assert!(state.backspace_digit());
        assert_eq!(state.error_entry, "12");
    }

    #[test]
    fn assessment_retry_discards_the_attempt() {
        let mut state = AssessmentState::new(text::material("dinosaur").unwrap());
        let t0 = Instant::now();
        state.start_reading(t0);
        state.finish_reading(t0 + Duration::from_secs(25));
        state.push_digit('5');
        state.submit_score();
        assert!(state.result.is_some());

        state.retry();
        assert_eq!(state.phase, AssessmentPhase::Intro);
        assert!(state.result.is_none());
        assert!(state.error_entry.is_empty());
        assert_eq!(state.reading_seconds, 0.0);
    }

    #[test]
    fn module_view_reports_module_and_text() {
        let view = ModuleView::Rsvp(RsvpState::new(drill_text()));
        assert_eq!(view.module(), TrainingModule::Rsvp);
        assert_eq!(view.text().map(|t| t.id.as_str()), Some("chunk-rhythm"));
        assert!(ModuleView::Dashboard.text().is_none());
    }
}
