//! Fixed-width text rendering of a [`TableView`].
//!
//! Widths are measured in terminal cells, so wide characters line up.
//! Cells longer than [`MAX_CELL_WIDTH`] are truncated with an ellipsis.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::selection::CheckState;
use crate::sort::SortDirection;
use crate::table::{BodyLayout, TableBody, TableView};

pub const MAX_CELL_WIDTH: usize = 24;

const SEPARATOR: &str = " | ";

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    let current = display_width(s);
    if current < width {
        out.extend(std::iter::repeat_n(' ', width - current));
    }
    out
}

fn checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Indeterminate => "[-]",
        CheckState::Checked => "[x]",
    }
}

fn checkbox_for(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

/// Render `view` as plain text, one line per row.
pub fn render_text(view: &TableView) -> String {
    let mut lines = Vec::new();

    // Toolbar
    let mut toolbar = format!("Search: {}", view.toolbar.search);
    for chip in &view.toolbar.quick_filters {
        toolbar.push_str(&format!("  {} {}", checkbox_for(chip.active), chip.label));
    }
    lines.push(toolbar);

    if let Some(bar) = &view.toolbar.bulk_bar {
        let mut line = format!("{} selected", bar.selected_count);
        for action in &bar.actions {
            line.push_str(SEPARATOR);
            line.push_str(&action.label);
            if action.disabled {
                line.push_str(" (disabled)");
            }
        }
        lines.push(line);
    }

    if let Some(error) = &view.error {
        lines.push(format!("! {}", error));
    }

    let labels: Vec<String> = view
        .header
        .cells
        .iter()
        .map(|cell| match cell.sort {
            Some(SortDirection::Ascending) => format!("{} ▲", cell.label),
            Some(SortDirection::Descending) => format!("{} ▼", cell.label),
            None => cell.label.clone(),
        })
        .collect();

    match &view.body {
        TableBody::Loading { .. } => {
            if view.layout == BodyLayout::Grid {
                lines.push(grid_line(checkbox(view.header.select_all), &labels, None));
            }
            lines.push("Loading...".to_string());
        }
        TableBody::Empty { .. } => {
            if view.layout == BodyLayout::Grid {
                lines.push(grid_line(checkbox(view.header.select_all), &labels, None));
            }
            lines.push("No results.".to_string());
        }
        TableBody::Rows(rows) => {
            let widths: Vec<usize> = labels
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    rows.iter()
                        .filter_map(|r| r.cells.get(i))
                        .map(|c| display_width(c))
                        .chain(std::iter::once(display_width(label)))
                        .max()
                        .unwrap_or(0)
                        .min(MAX_CELL_WIDTH)
                })
                .collect();

            lines.push(grid_line(
                checkbox(view.header.select_all),
                &labels,
                Some(&widths),
            ));
            for row in rows {
                lines.push(grid_line(
                    checkbox_for(row.selected),
                    &row.cells,
                    Some(&widths),
                ));
            }
        }
        TableBody::Cards(cards) => {
            for card in cards {
                lines.push(format!(
                    "{} {}",
                    checkbox_for(card.selected),
                    truncate_to_width(&card.card.title, MAX_CELL_WIDTH)
                ));
                for (label, value) in &card.card.fields {
                    lines.push(format!(
                        "    {}: {}",
                        label,
                        truncate_to_width(value, MAX_CELL_WIDTH)
                    ));
                }
            }
        }
    }

    let state = view.footer.pagination;
    lines.push(format!(
        "Page {} of {} - {} rows - {} per page",
        state.page_index + 1,
        state.page_count.max(1),
        state.total_rows,
        state.page_size
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn grid_line(check: &str, cells: &[String], widths: Option<&[usize]>) -> String {
    let mut parts = vec![check.to_string()];
    for (i, cell) in cells.iter().enumerate() {
        let width = widths
            .and_then(|w| w.get(i).copied())
            .unwrap_or_else(|| display_width(cell).min(MAX_CELL_WIDTH));
        let text = truncate_to_width(cell, width);
        parts.push(pad_to_width(&text, width));
    }
    parts.join(SEPARATOR).trim_end().to_string()
}
