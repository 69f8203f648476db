//! Renders a ranking as a horizontal bar chart for the terminal.

use crate::rank::RankedEntry;

const BAR: char = '█';

#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    /// Length in characters of the longest bar.
    pub width: usize,
}

impl BarChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: 50,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// One row per entry in the given order. Bars are scaled against the
    /// largest count; any non-zero count gets at least one block.
    pub fn render(&self, entries: &[RankedEntry]) -> String {
        let mut out = format!("{}\n", self.title);

        let max = entries.iter().map(|e| e.count).max().unwrap_or(0);
        let label_width = entries
            .iter()
            .map(|e| e.word.chars().count())
            .max()
            .unwrap_or(0);

        for entry in entries {
            let len = bar_len(entry.count, max, self.width);
            out.push_str(&format!(
                "{:>label_width$} | {} {}\n",
                entry.word,
                BAR.to_string().repeat(len),
                entry.count
            ));
        }
        out
    }
}

fn bar_len(count: u64, max: u64, width: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let scaled = (count as u128 * width as u128 / max as u128) as usize;
    scaled.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_scaled_rows() {
        let chart = BarChart::new("Top 2").with_width(4);
        let rows = vec![RankedEntry::from(("cat", 4)), RankedEntry::from(("a", 2))];
        assert_eq!(chart.render(&rows), "Top 2\ncat | ████ 4\n  a | ██ 2\n");
    }

    #[test]
    fn empty_ranking_renders_title_only() {
        assert_eq!(BarChart::new("nothing").render(&[]), "nothing\n");
    }

    #[test]
    fn small_counts_stay_visible() {
        assert_eq!(bar_len(1, 1_000_000, 10), 1);
        assert_eq!(bar_len(0, 10, 10), 0);
        assert_eq!(bar_len(10, 10, 10), 10);
    }
}
