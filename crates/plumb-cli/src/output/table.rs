//! Left-aligned text table with a fixed column count.
//!
//! Column widths are measured in terminal cells, so wide characters in plugin
//! names or versions do not break alignment.

use unicode_width::UnicodeWidthStr;

const GAP: &str = "  ";

pub(super) struct Table<const N: usize> {
    header: [String; N],
    rows: Vec<[String; N]>,
}

impl<const N: usize> Table<N> {
    pub(super) fn new(header: [&str; N]) -> Self {
        Self {
            header: header.map(str::to_owned),
            rows: Vec::new(),
        }
    }

    pub(super) fn push(&mut self, row: [&str; N]) {
        self.rows.push(row.map(str::to_owned));
    }

    fn widths(&self) -> [usize; N] {
        let mut widths = [0; N];
        for row in std::iter::once(&self.header).chain(&self.rows) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }

    pub(super) fn render(&self) -> String {
        let widths = self.widths();
        let mut output = String::new();
        for row in std::iter::once(&self.header).chain(&self.rows) {
            let mut line = String::new();
            for (index, (cell, width)) in row.iter().zip(widths).enumerate() {
                if index > 0 {
                    line.push_str(GAP);
                }
                line.push_str(cell);
                line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
            }
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output
    }
}
