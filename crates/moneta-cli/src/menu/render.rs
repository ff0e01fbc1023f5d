//! Pure text renderer for the selection menu
//!
//! `render` maps a menu configuration and a selected index to a formatted
//! block. The engine depends only on the returned block's content and line
//! count; everything about appearance lives here.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::menu::{MenuItem, MenuOptions};

const SELECTED_MARKER: &str = "❯ ";
const UNSELECTED_MARKER: &str = "  ";
const SEPARATOR_MIN_WIDTH: usize = 12;

/// One rendered row, kept in plain and styled form so padding can be
/// computed on visible width
struct Row {
    plain: String,
    styled: String,
    separator: bool,
}

impl Row {
    fn text(plain: String, styled: String) -> Self {
        Self {
            plain,
            styled,
            separator: false,
        }
    }

    fn separator() -> Self {
        Self {
            plain: String::new(),
            styled: String::new(),
            separator: true,
        }
    }
}

/// Render the menu at the given selected item index
pub fn render(options: &MenuOptions, selected: usize) -> String {
    let (start, end) = visible_range(options.items.len(), options.max_visible, selected);

    let mut rows = Vec::new();
    if start > 0 {
        let hidden = start;
        rows.push(Row::text(
            format!("  ↑ {hidden} more"),
            format!("  {}", format!("↑ {hidden} more").dimmed()),
        ));
    }
    for (index, item) in options.items.iter().enumerate().take(end).skip(start) {
        rows.push(item_row(item, index == selected));
    }
    if end < options.items.len() {
        let hidden = options.items.len() - end;
        rows.push(Row::text(
            format!("  ↓ {hidden} more"),
            format!("  {}", format!("↓ {hidden} more").dimmed()),
        ));
    }

    // +1 keeps the framed top border from collapsing when the title is the
    // widest element
    let title_width = options
        .title
        .as_deref()
        .map(|t| UnicodeWidthStr::width(t) + 1)
        .unwrap_or(0);
    let content_width = rows
        .iter()
        .map(|row| UnicodeWidthStr::width(row.plain.as_str()))
        .max()
        .unwrap_or(0)
        .max(title_width)
        .max(SEPARATOR_MIN_WIDTH);

    let rule = "─".repeat(content_width);
    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            if row.separator {
                format!("{}", rule.dimmed())
            } else {
                row.styled.clone()
            }
        })
        .collect();

    if options.border {
        framed(options.title.as_deref(), &rows, &lines, content_width)
    } else {
        let mut out = String::new();
        if let Some(title) = &options.title {
            out.push_str(&format!("{}\n", title.bold()));
        }
        out.push_str(&lines.join("\n"));
        out
    }
}

fn item_row(item: &MenuItem, selected: bool) -> Row {
    if item.separator {
        return Row::separator();
    }

    let marker = if selected {
        SELECTED_MARKER
    } else {
        UNSELECTED_MARKER
    };
    let icon = item
        .icon
        .as_deref()
        .map(|i| format!("{i} "))
        .unwrap_or_default();
    let shortcut = item
        .shortcut
        .map(|s| format!(" [{s}]"))
        .unwrap_or_default();
    let description = item
        .description
        .as_deref()
        .map(|d| format!("  {d}"))
        .unwrap_or_default();

    let plain = format!("{marker}{icon}{}{description}{shortcut}", item.label);

    let label = if item.disabled {
        item.label.dimmed().to_string()
    } else if selected {
        item.label.cyan().bold().to_string()
    } else {
        item.label.to_string()
    };
    let styled = format!(
        "{}{icon}{label}{}{}",
        if selected {
            SELECTED_MARKER.cyan().to_string()
        } else {
            UNSELECTED_MARKER.to_string()
        },
        description.dimmed(),
        shortcut.dimmed(),
    );

    Row::text(plain, styled)
}

/// Wrap rendered rows in a box, title embedded in the top border
fn framed(title: Option<&str>, rows: &[Row], lines: &[String], content_width: usize) -> String {
    let mut out = String::new();

    let top = match title {
        Some(title) => {
            let fill = content_width.saturating_sub(UnicodeWidthStr::width(title) + 1);
            format!("╭─ {} {}╮", title.bold(), "─".repeat(fill))
        }
        None => format!("╭─{}─╮", "─".repeat(content_width)),
    };
    out.push_str(&top);
    out.push('\n');

    for (row, line) in rows.iter().zip(lines) {
        let visible = if row.separator {
            content_width
        } else {
            UnicodeWidthStr::width(row.plain.as_str())
        };
        let pad = " ".repeat(content_width.saturating_sub(visible));
        out.push_str(&format!("│ {line}{pad} │\n"));
    }

    out.push_str(&format!("╰─{}─╯", "─".repeat(content_width)));
    out
}

/// Window of item indices kept visible under `max_visible`
///
/// Pure in (len, cap, selected): the window scrolls only as far as needed to
/// keep the selection on its last row, so redraws at the same selection are
/// identical.
fn visible_range(len: usize, max_visible: Option<usize>, selected: usize) -> (usize, usize) {
    match max_visible {
        Some(cap) if cap > 0 && len > cap => {
            let start = (selected + 1).saturating_sub(cap).min(len - cap);
            (start, start + cap)
        }
        _ => (0, len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<MenuItem> {
        (0..n)
            .map(|i| MenuItem::new(format!("k{i}"), format!("Item {i}")))
            .collect()
    }

    #[test]
    fn test_line_count_matches_items() {
        let options = MenuOptions::new(items(3));
        let block = render(&options, 0);
        assert_eq!(block.lines().count(), 3);
    }

    #[test]
    fn test_title_adds_a_line() {
        let options = MenuOptions::new(items(3)).title("Sessions");
        let block = render(&options, 0);
        assert_eq!(block.lines().count(), 4);
        assert!(block.lines().next().unwrap().contains("Sessions"));
    }

    #[test]
    fn test_border_frames_every_row() {
        let options = MenuOptions::new(items(2)).title("Pick one").border(true);
        let block = render(&options, 0);
        // top border, two rows, bottom border
        assert_eq!(block.lines().count(), 4);
        assert!(block.contains("╭"));
        assert!(block.contains("╰"));
        assert!(block.lines().next().unwrap().contains("Pick one"));
    }

    #[test]
    fn test_selected_row_carries_the_marker() {
        let options = MenuOptions::new(items(3));
        let block = render(&options, 1);
        let marked: Vec<&str> = block.lines().filter(|l| l.contains("❯")).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Item 1"));
    }

    #[test]
    fn test_separator_renders_as_rule() {
        let options = MenuOptions::new(vec![
            MenuItem::new("a", "A"),
            MenuItem::separator(),
            MenuItem::new("b", "B"),
        ]);
        let block = render(&options, 0);
        assert_eq!(block.lines().count(), 3);
        assert!(block.lines().nth(1).unwrap().contains("─"));
    }

    #[test]
    fn test_shortcut_and_description_shown() {
        let options = MenuOptions::new(vec![MenuItem::new("s", "Strategy")
            .description("draft a new strategy")
            .shortcut('s')]);
        let block = render(&options, 0);
        assert!(block.contains("draft a new strategy"));
        assert!(block.contains("[s]"));
    }

    #[test]
    fn test_window_keeps_selection_visible() {
        let options = MenuOptions::new(items(10)).max_visible(4);

        // near the top: no upper overflow marker
        let block = render(&options, 0);
        assert!(block.contains("Item 0"));
        assert!(!block.contains("↑"));
        assert!(block.contains("↓ 6 more"));

        // deep in the list: window has scrolled, selection on screen
        let block = render(&options, 7);
        assert!(block.contains("Item 7"));
        assert!(block.contains("↑ 4 more"));
        assert!(block.contains("↓ 2 more"));

        // at the end: no lower overflow marker
        let block = render(&options, 9);
        assert!(block.contains("Item 9"));
        assert!(!block.contains("↓"));
    }

    #[test]
    fn test_visible_range_is_pure_and_clamped() {
        assert_eq!(visible_range(10, Some(4), 0), (0, 4));
        assert_eq!(visible_range(10, Some(4), 3), (0, 4));
        assert_eq!(visible_range(10, Some(4), 4), (1, 5));
        assert_eq!(visible_range(10, Some(4), 9), (6, 10));
        assert_eq!(visible_range(3, Some(4), 2), (0, 3));
        assert_eq!(visible_range(3, None, 1), (0, 3));
    }
}
