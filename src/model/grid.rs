//! Number-search grid drill
//!
//! A shuffled n*n board of 1..=n*n. The player confirms numbers in
//! ascending order; the timer runs from confirming 1 to confirming n*n.
//! Wrong clicks are silently ignored, the drill tracks order only.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

/// Board sizes on offer, with the target time an attempt should beat.
pub const GRID_LEVELS: [GridLevel; 5] = [
    GridLevel {
        size: 3,
        target: Duration::from_secs(10),
    },
    GridLevel {
        size: 4,
        target: Duration::from_secs(18),
    },
    GridLevel {
        size: 5,
        target: Duration::from_secs(30),
    },
    GridLevel {
        size: 6,
        target: Duration::from_secs(50),
    },
    GridLevel {
        size: 7,
        target: Duration::from_secs(75),
    },
];

#[derive(Clone, Copy, Debug)]
pub struct GridLevel {
    pub size: u16,
    pub target: Duration,
}

pub fn level_target(size: u16) -> Option<Duration> {
    GRID_LEVELS
        .iter()
        .find(|level| level.size == size)
        .map(|level| level.target)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridStatus {
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Debug)]
pub struct GridState {
    pub size: u16,
    /// Row-major board contents, a permutation of 1..=size*size.
    pub numbers: Vec<u16>,
    pub next_expected: u16,
    pub status: GridStatus,
    started_at: Option<Instant>,
    frozen_elapsed: Duration,
}

impl GridState {
    pub fn new(size: u16, rng: &mut impl Rng) -> Self {
        Self {
            size,
            numbers: generate(size, rng),
            next_expected: 1,
            status: GridStatus::Idle,
            started_at: None,
            frozen_elapsed: Duration::ZERO,
        }
    }

    pub fn last_number(&self) -> u16 {
        self.size * self.size
    }

    /// Validate a click against the expected sequence. Returns whether the
    /// click was accepted; rejected clicks change nothing.
    pub fn click(&mut self, value: u16, now: Instant) -> bool {
        match self.status {
            GridStatus::Idle => {
                if value != 1 {
                    return false;
                }
                self.status = GridStatus::Running;
                self.started_at = Some(now);
                self.next_expected = 2;
                true
            }
            GridStatus::Running => {
                if value != self.next_expected {
                    return false;
                }
                if value == self.last_number() {
                    self.status = GridStatus::Finished;
                    if let Some(start) = self.started_at {
                        self.frozen_elapsed = now.duration_since(start);
                    }
                } else {
                    self.next_expected += 1;
                }
                true
            }
            GridStatus::Finished => false,
        }
    }

    /// Elapsed attempt time as of `now`. Frozen once finished.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.status {
            GridStatus::Idle => Duration::ZERO,
            GridStatus::Running => self
                .started_at
                .map(|start| now.duration_since(start))
                .unwrap_or(Duration::ZERO),
            GridStatus::Finished => self.frozen_elapsed,
        }
    }

    /// Whether a finished attempt beat the target for this board size.
    pub fn beat_target(&self) -> bool {
        self.status == GridStatus::Finished
            && level_target(self.size).is_some_and(|target| self.frozen_elapsed <= target)
    }

    /// Reshuffle the board and discard the attempt in progress.
    pub fn regenerate(&mut self, rng: &mut impl Rng) {
        self.numbers = generate(self.size, rng);
        self.next_expected = 1;
        self.status = GridStatus::Idle;
        self.started_at = None;
        self.frozen_elapsed = Duration::ZERO;
    }

    /// Switch board size and start fresh.
    pub fn resize(&mut self, size: u16, rng: &mut impl Rng) {
        self.size = size;
        self.regenerate(rng);
    }
}

/// Uniformly shuffled permutation of 1..=n*n in row-major order.
fn generate(size: u16, rng: &mut impl Rng) -> Vec<u16> {
    let mut numbers: Vec<u16> = (1..=size * size).collect();
    numbers.shuffle(rng);
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn board_is_a_permutation_of_one_to_n_squared() {
        let mut rng = rng();
        for level in GRID_LEVELS {
            let state = GridState::new(level.size, &mut rng);
            let mut sorted = state.numbers.clone();
            sorted.sort_unstable();
            let expected: Vec<u16> = (1..=level.size * level.size).collect();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn only_one_starts_the_attempt() {
        let mut state = GridState::new(3, &mut rng());
        let t0 = Instant::now();

        assert!(!state.click(5, t0));
        assert_eq!(state.status, GridStatus::Idle);
        assert_eq!(state.elapsed(t0 + ms(500)), Duration::ZERO);

        assert!(state.click(1, t0));
        assert_eq!(state.status, GridStatus::Running);
        assert_eq!(state.next_expected, 2);
    }

    #[test]
    fn out_of_order_clicks_are_ignored() {
        let mut state = GridState::new(3, &mut rng());
        let t0 = Instant::now();
        state.click(1, t0);

        assert!(!state.click(4, t0 + ms(100)));
        assert!(!state.click(1, t0 + ms(100)));
        assert_eq!(state.next_expected, 2);
        assert_eq!(state.status, GridStatus::Running);
    }

    #[test]
    fn last_number_finishes_and_freezes_elapsed() {
        let mut state = GridState::new(3, &mut rng());
        let t0 = Instant::now();
        state.click(1, t0);
        for value in 2..=8 {
            assert!(state.click(value, t0 + ms(u64::from(value) * 100)));
        }
        assert!(state.click(9, t0 + ms(4200)));
        assert_eq!(state.status, GridStatus::Finished);
        assert_eq!(state.elapsed(t0 + ms(60_000)), ms(4200));
    }

    #[test]
    fn finished_board_ignores_all_clicks() {
        let mut state = GridState::new(3, &mut rng());
        let t0 = Instant::now();
        state.click(1, t0);
        for value in 2..=9 {
            state.click(value, t0 + ms(100));
        }
        assert_eq!(state.status, GridStatus::Finished);

        assert!(!state.click(1, t0 + ms(200)));
        assert_eq!(state.status, GridStatus::Finished);
    }

    #[test]
    fn elapsed_tracks_running_attempt() {
        let mut state = GridState::new(4, &mut rng());
        let t0 = Instant::now();
        state.click(1, t0);
        assert_eq!(state.elapsed(t0 + ms(2500)), ms(2500));
    }

    #[test]
    fn beat_target_compares_frozen_time_against_level() {
        let mut state = GridState::new(3, &mut rng());
        let t0 = Instant::now();
        state.click(1, t0);
        for value in 2..=9 {
            state.click(value, t0 + ms(u64::from(value) * 1000));
        }
        // 9 s attempt on a 10 s target
        assert!(state.beat_target());
    }

    #[test]
    fn regenerate_discards_attempt_and_reshuffles() {
        let mut rng = rng();
        let mut state = GridState::new(5, &mut rng);
        let t0 = Instant::now();
        state.click(1, t0);
        state.click(2, t0 + ms(100));

        state.regenerate(&mut rng);
        assert_eq!(state.status, GridStatus::Idle);
        assert_eq!(state.next_expected, 1);
        assert_eq!(state.elapsed(t0 + ms(1000)), Duration::ZERO);

        let mut sorted = state.numbers.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=25).collect::<Vec<u16>>());
    }

    #[test]
    fn resize_swaps_board_dimensions() {
        let mut rng = rng();
        let mut state = GridState::new(3, &mut rng);
        state.resize(6, &mut rng);
        assert_eq!(state.size, 6);
        assert_eq!(state.numbers.len(), 36);
        assert_eq!(state.status, GridStatus::Idle);
    }
}
