//! Fluency rate computation for the timed reading assessment
//!
//! Rate is corrected units per minute: (total - errors) / seconds * 60.
//! The caller guarantees a positive elapsed duration. Error counts are
//! user-reported and deliberately unvalidated, so a count above the unit
//! total yields a negative rate rather than a clamped zero.

/// Performance bands, checked top-down against the rounded rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Excellent,
    Strong,
    Average,
    Developing,
}

impl Band {
    pub fn classify(rounded_rate: i64) -> Self {
        if rounded_rate >= 300 {
            Band::Excellent
        } else if rounded_rate >= 200 {
            Band::Strong
        } else if rounded_rate >= 150 {
            Band::Average
        } else {
            Band::Developing
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Excellent => "Excellent",
            Band::Strong => "Strong",
            Band::Average => "Average",
            Band::Developing => "Developing",
        }
    }
}

/// Reference percentiles for silent-reading rate, shown next to a result.
pub const FLUENCY_NORMS: [FluencyNorm; 4] = [
    FluencyNorm {
        percentile: "90th",
        rate: 184,
    },
    FluencyNorm {
        percentile: "75th",
        rate: 160,
    },
    FluencyNorm {
        percentile: "50th",
        rate: 133,
    },
    FluencyNorm {
        percentile: "25th",
        rate: 106,
    },
];

#[derive(Clone, Copy, Debug)]
pub struct FluencyNorm {
    pub percentile: &'static str,
    pub rate: u64,
}

/// Raw corrected-rate value. Precondition: `elapsed_seconds > 0`.
pub fn fluency_rate(total_units: u32, error_count: u32, elapsed_seconds: f64) -> f64 {
    (f64::from(total_units) - f64::from(error_count)) / elapsed_seconds * 60.0
}

/// One completed assessment, as shown on the result screen.
#[derive(Clone, Copy, Debug)]
pub struct ScoreResult {
    pub total_units: u32,
    pub error_count: u32,
    pub elapsed_seconds: f64,
    pub rate: f64,
    pub band: Band,
}

impl ScoreResult {
    pub fn compute(total_units: u32, error_count: u32, elapsed_seconds: f64) -> Self {
        let rate = fluency_rate(total_units, error_count, elapsed_seconds);
        Self {
            total_units,
            error_count,
            elapsed_seconds,
            rate,
            band: Band::classify(rate.round() as i64),
        }
    }

    /// Display value, rounded to the nearest whole unit per minute.
    pub fn rounded(&self) -> i64 {
        self.rate.round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_minute_reads_at_unit_count() {
        let result = ScoreResult::compute(100, 0, 60.0);
        assert_eq!(result.rounded(), 100);
    }

    #[test]
    fn errors_subtract_before_the_rate_scales() {
        let result = ScoreResult::compute(100, 10, 45.0);
        assert_eq!(result.rounded(), 120);
    }

    #[test]
    fn rounding_is_to_nearest_integer() {
        // 97 / 58.9 * 60 = 98.81...
        let result = ScoreResult::compute(100, 3, 58.9);
        assert_eq!(result.rounded(), 99);
    }

    #[test]
    fn overreported_errors_go_negative_unclamped() {
        let result = ScoreResult::compute(10, 50, 60.0);
        assert_eq!(result.rounded(), -40);
        assert_eq!(result.band, Band::Developing);
    }

    #[test]
    fn bands_are_descending_first_match() {
        assert_eq!(Band::classify(340), Band::Excellent);
        assert_eq!(Band::classify(300), Band::Excellent);
        assert_eq!(Band::classify(299), Band::Strong);
        assert_eq!(Band::classify(200), Band::Strong);
        assert_eq!(Band::classify(199), Band::Average);
        assert_eq!(Band::classify(150), Band::Average);
        assert_eq!(Band::classify(149), Band::Developing);
        assert_eq!(Band::classify(0), Band::Developing);
    }

    #[test]
    fn band_follows_the_rounded_rate() {
        // 149.6 rounds to 150, just inside Average
        let result = ScoreResult::compute(150, 0, 60.16);
        assert_eq!(result.band, Band::Average);
    }

    #[test]
    fn norms_are_listed_high_to_low() {
        for pair in FLUENCY_NORMS.windows(2) {
            assert!(pair[0].rate > pair[1].rate);
        }
    }
}
