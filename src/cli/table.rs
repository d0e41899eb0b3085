//! Fixed-width text tables for list output.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub alignment: Alignment,
    pub max_width: Option<usize>,
}

impl TableColumn {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            alignment: Alignment::Left,
            max_width: None,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            alignment: Alignment::Right,
            ..Self::left(header)
        }
    }

    pub fn truncate_at(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .fold(column.header.chars().count(), usize::max);
                column.max_width.map_or(widest, |max| widest.min(max))
            })
            .collect()
    }

    fn render_row(&self, cells: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = fit(cells.get(idx).map(String::as_str).unwrap_or(""), *width);
                match column.alignment {
                    Alignment::Left => format!("{text:<width$}"),
                    Alignment::Right => format!("{text:>width$}"),
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();

        let mut lines = vec![
            self.render_row(&header, &widths),
            rule.join("  "),
        ];
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_columns_with_rule() {
        let mut table = Table::new(vec![TableColumn::left("Name"), TableColumn::right("Price")]);
        table.push(vec!["Widget".into(), "10.00".into()]);
        table.push(vec!["Gear".into(), "7.50".into()]);

        let rendered = table.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "Name    Price");
        assert_eq!(lines[1], "------  -----");
        assert_eq!(lines[2], "Widget  10.00");
        assert_eq!(lines[3], "Gear     7.50");
    }

    #[test]
    fn long_cells_are_truncated() {
        let mut table = Table::new(vec![TableColumn::left("Note").truncate_at(5)]);
        table.push(vec!["abcdefgh".into()]);
        assert!(table.render().ends_with("abcd…"));
    }
}
