use alloc::string::String;
use core::fmt::Write;

use crate::{round, Histogram, DEFAULT_BAR_WIDTH};

/// How histogram bars are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Length of the bar for the fullest bucket
    pub bar_width: usize,
    pub marker: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            marker: '*',
        }
    }
}

/// Bar length for `count`, scaled so `max_count` maps to the full width.
/// An all-zero histogram gets no bars at all.
pub fn bar_length(count: u64, max_count: u64, bar_width: usize) -> usize {
    if max_count == 0 {
        return 0;
    }
    round(count as f64 / max_count as f64 * bar_width as f64) as usize
}

/// One line per bucket: `[start, end]: <bar> <count>`
pub fn render_histogram(histogram: &Histogram, options: &RenderOptions) -> String {
    let max_count = histogram.max_count();
    let mut out = String::new();

    for (index, &count) in histogram.counts().iter().enumerate() {
        let (start, end) = histogram.bounds(index);
        let length = bar_length(count, max_count, options.bar_width);
        let bar: String = core::iter::repeat(options.marker).take(length).collect();
        // writing into a String cannot fail
        let _ = writeln!(out, "[{:.2}, {:.2}]: {} {}", start, end, bar, count);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use alloc::vec::Vec;

    fn bars(rendered: &str) -> Vec<usize> {
        rendered
            .lines()
            .map(|line| line.chars().filter(|&c| c == '*').count())
            .collect()
    }

    #[test]
    fn test_line_format() {
        let histogram = Histogram::from_counts(0.1, vec![2, 1]).unwrap();
        let rendered = render_histogram(&histogram, &RenderOptions::default());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("[0.00, 0.10]: {} 2", "*".repeat(50)));
        assert_eq!(lines[1], format!("[0.10, 0.20]: {} 1", "*".repeat(25)));
    }

    #[test]
    fn test_equal_counts_give_equal_bars() {
        let histogram = Histogram::from_counts(0.1, vec![7; 10]).unwrap();
        let rendered = render_histogram(&histogram, &RenderOptions::default());
        let lengths = bars(&rendered);

        assert_eq!(lengths.len(), 10);
        assert!(lengths.iter().all(|&len| len == 50));
    }

    #[test]
    fn test_dominant_bucket_gets_full_width() {
        let histogram = Histogram::from_counts(0.1, vec![1, 1, 400, 3, 1]).unwrap();
        let rendered = render_histogram(&histogram, &RenderOptions::default());
        let lengths = bars(&rendered);

        assert_eq!(lengths[2], 50);
        assert!(lengths.iter().enumerate().all(|(i, &len)| i == 2 || len < 50));
    }

    #[test]
    fn test_all_zero_histogram_has_no_bars() {
        let histogram = Histogram::new(0.1).unwrap();
        let rendered = render_histogram(&histogram, &RenderOptions::default());

        assert_eq!(rendered.lines().count(), 11);
        assert!(bars(&rendered).iter().all(|&len| len == 0));
        assert!(rendered.lines().all(|line| line.ends_with(":  0")));
    }

    #[test]
    fn test_custom_width_and_marker() {
        let histogram = Histogram::from_counts(0.5, vec![4, 2]).unwrap();
        let options = RenderOptions {
            bar_width: 10,
            marker: '#',
        };
        let rendered = render_histogram(&histogram, &options);

        assert_eq!(rendered, "[0.00, 0.50]: ########## 4\n[0.50, 1.00]: ##### 2\n");
    }

    #[test]
    fn test_bar_length_rounds() {
        assert_eq!(bar_length(1, 3, 50), 17);
        assert_eq!(bar_length(2, 3, 50), 33);
        assert_eq!(bar_length(0, 0, 50), 0);
    }
}
