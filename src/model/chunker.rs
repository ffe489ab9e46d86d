//! Text chunking engine
//!
//! Turns raw Chinese text into small display units ("chunks") for the
//! serial-presentation and chunking drills. Two paths are provided:
//!
//! - `chunk`: punctuation-led heuristic. Clause terminators close a unit
//!   and attach to its end; long punctuation-free runs are subdivided into
//!   fixed-width groups.
//! - `group_units`: greedy merge of segmenter-provided boundary segments
//!   up to a caller-chosen character cap, with the segmenter pluggable
//!   behind the `Segmenter` trait.
//!
//! Both paths are pure and total: empty or whitespace-only input yields a
//! single placeholder unit so callers can always index position 0.

use unicode_segmentation::UnicodeSegmentation;

/// The single unit produced for empty content.
pub const NO_CONTENT_PLACEHOLDER: &str = "暂无内容";

/// Clause terminators. Each attaches to the end of the preceding unit.
const TERMINATORS: [char; 7] = ['，', '。', '；', '：', '、', '！', '？'];

/// Runs longer than this many characters are subdivided.
const RUN_SPLIT_THRESHOLD: usize = 8;

/// Width of subdivided groups, and the merge cap for presentation units.
pub const GROUP_WIDTH: usize = 4;

fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

/// Split `content` into ordered display chunks.
///
/// Deterministic and total. A terminator with no preceding unit is
/// dropped. Runs of more than eight characters become four-character
/// groups in order; shorter runs become a single unit.
pub fn chunk(content: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return vec![NO_CONTENT_PLACEHOLDER.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut run = String::new();

    for c in content.chars() {
        if is_terminator(c) {
            push_run(&mut chunks, &run);
            run.clear();
            if let Some(last) = chunks.last_mut() {
                last.push(c);
            }
        } else {
            run.push(c);
        }
    }
    push_run(&mut chunks, &run);

    chunks
}

fn push_run(chunks: &mut Vec<String>, run: &str) {
    if run.is_empty() {
        return;
    }
    if run.chars().count() > RUN_SPLIT_THRESHOLD {
        let chars: Vec<char> = run.chars().collect();
        for group in chars.chunks(GROUP_WIDTH) {
            chunks.push(group.iter().collect());
        }
    } else {
        chunks.push(run.to_string());
    }
}

/// A pluggable word-boundary source for `group_units`.
pub trait Segmenter {
    /// Ordered boundary-delimited segments whose concatenation
    /// reconstructs `content`.
    fn segments<'a>(&self, content: &'a str) -> Vec<&'a str>;
}

/// Deterministic strategy: every character is its own segment, so
/// grouping degrades to exact fixed-width units.
#[derive(Default)]
pub struct FixedWidth;

impl Segmenter for FixedWidth {
    fn segments<'a>(&self, content: &'a str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut rest = content;
        while let Some(c) = rest.chars().next() {
            let (head, tail) = rest.split_at(c.len_utf8());
            out.push(head);
            rest = tail;
        }
        out
    }
}

/// Locale-aware strategy backed by Unicode word boundaries.
#[derive(Default)]
pub struct WordBoundary;

impl Segmenter for WordBoundary {
    fn segments<'a>(&self, content: &'a str) -> Vec<&'a str> {
        content.split_word_bounds().collect()
    }
}

/// Build display units by greedily merging consecutive segments until
/// `width` characters would be exceeded. A single segment longer than the
/// cap becomes its own unit. Empty content yields the placeholder.
pub fn group_units(content: &str, segmenter: &dyn Segmenter, width: usize) -> Vec<String> {
    if content.trim().is_empty() {
        return vec![NO_CONTENT_PLACEHOLDER.to_string()];
    }

    let mut units: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for seg in segmenter.segments(content) {
        let seg_len = seg.chars().count();
        if current_len == 0 || current_len + seg_len <= width {
            current.push_str(seg);
            current_len += seg_len;
        } else {
            units.push(std::mem::take(&mut current));
            current.push_str(seg);
            current_len = seg_len;
        }
    }
    if !current.is_empty() {
        units.push(current);
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_yields_placeholder() {
        assert_eq!(chunk(""), vec![NO_CONTENT_PLACEHOLDER.to_string()]);
        assert_eq!(chunk("   "), vec![NO_CONTENT_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn short_run_is_one_unit() {
        assert_eq!(chunk("春眠不觉晓"), vec!["春眠不觉晓".to_string()]);
    }

    #[test]
    fn ten_char_run_splits_four_four_two() {
        let s = "一二三四五六七八九十";
        let chunks = chunk(s);
        let lengths: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lengths, vec![4, 4, 2]);
        assert_eq!(chunks.join(""), s);
    }

    #[test]
    fn terminator_attaches_to_preceding_unit() {
        let chunks = chunk("白日依山尽，黄河入海流。");
        assert_eq!(
            chunks,
            vec!["白日依山尽，".to_string(), "黄河入海流。".to_string()]
        );
    }

    #[test]
    fn terminator_after_long_run_attaches_to_last_group() {
        let chunks = chunk("一二三四五六七八九十。");
        assert_eq!(
            chunks,
            vec!["一二三四".to_string(), "五六七八".to_string(), "九十。".to_string()]
        );
    }

    #[test]
    fn leading_terminator_is_dropped() {
        assert_eq!(chunk("，山外青山"), vec!["山外青山".to_string()]);
    }

    #[test]
    fn consecutive_terminators_pile_onto_one_unit() {
        assert_eq!(chunk("真的吗！？"), vec!["真的吗！？".to_string()]);
    }

    #[test]
    fn chunks_reconstruct_punctuation_free_content() {
        let s = "快速阅读训练需要长期坚持才能看到效果";
        assert_eq!(chunk(s).join(""), s);
    }

    #[test]
    fn fixed_width_groups_are_capped_at_four() {
        let units = group_units("一二三四五六七八九", &FixedWidth, GROUP_WIDTH);
        let lengths: Vec<usize> = units.iter().map(|u| u.chars().count()).collect();
        assert_eq!(lengths, vec![4, 4, 1]);
    }

    #[test]
    fn fixed_width_honors_wider_caps() {
        let s = "春江潮水连海平海上明月共潮生";
        let units = group_units(s, &FixedWidth, 6);
        let lengths: Vec<usize> = units.iter().map(|u| u.chars().count()).collect();
        assert_eq!(lengths, vec![6, 6, 2]);
        assert_eq!(units.join(""), s);
    }

    #[test]
    fn word_boundary_units_reconstruct_content() {
        let s = "阅读训练，从今天开始。";
        let units = group_units(s, &WordBoundary, GROUP_WIDTH);
        assert_eq!(units.join(""), s);
        assert!(units.iter().all(|u| !u.is_empty()));
    }

    #[test]
    fn word_boundary_keeps_long_segment_whole() {
        // A single boundary segment above the cap becomes its own unit.
        let units = group_units("reading是一种训练", &WordBoundary, GROUP_WIDTH);
        assert!(units.contains(&"reading".to_string()));
        assert_eq!(units.join(""), "reading是一种训练");
    }

    #[test]
    fn group_units_empty_yields_placeholder() {
        assert_eq!(
            group_units("", &WordBoundary, GROUP_WIDTH),
            vec![NO_CONTENT_PLACEHOLDER.to_string()]
        );
        assert_eq!(
            group_units(" \n ", &FixedWidth, GROUP_WIDTH),
            vec![NO_CONTENT_PLACEHOLDER.to_string()]
        );
    }
}
