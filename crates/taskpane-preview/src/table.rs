use std::io::Write;

use taskpane_core::render::{ListSurface, TaskItem};
use taskpane_core::task::Status;
use unicode_width::UnicodeWidthStr;

/// Collects rendered items as rows of a
/// plain-text table.
#[derive(Debug, Clone)]
pub struct TableSurface {
    color: bool,
    rows: Vec<Vec<String>>,
}

impl TableSurface {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            rows: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_to<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let headers = ["Title", "Description", "Priority", "Due", "Status", "Id"]
            .iter()
            .map(|header| header.to_string())
            .collect();
        write_table(writer, headers, &self.rows)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

impl ListSurface for TableSurface {
    fn replace_items(&mut self, items: Vec<TaskItem>) {
        self.rows = items
            .into_iter()
            .map(|item| {
                let status = match item.status {
                    Status::Pending => self.paint(item.status.as_str(), "33"),
                    Status::Completed => self.paint(item.status.as_str(), "32"),
                };
                vec![
                    item.title,
                    item.description,
                    item.priority.to_string(),
                    item.due,
                    status,
                    item.id.to_string(),
                ]
            })
            .collect();
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: &[Vec<String>],
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use taskpane_core::render::Renderer;
    use taskpane_core::task::{Priority, Task};

    use super::*;

    #[test]
    fn columns_align_on_visible_width() {
        let mut done = Task::new_pending("Ünïcode report".to_string(), Priority::High);
        done.status = Status::Completed;
        let todo = Task::new_pending("Milk".to_string(), Priority::Low);

        let mut surface = TableSurface::new(true);
        Renderer::default().render(&[done, todo], &mut surface);
        assert_eq!(surface.len(), 2);

        let mut out = Vec::new();
        surface.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Title          "));
        assert!(lines[2].starts_with("Milk           No description"));
        assert!(lines[3].contains("\x1b[32mcompleted\x1b[0m"));
        assert_eq!(
            strip_ansi(lines[2]).chars().count(),
            strip_ansi(lines[3]).chars().count()
        );
    }

    #[test]
    fn cells_ignore_display_labels() {
        let mut task = Task::new_pending("Plan trip".to_string(), Priority::High);
        task.due_date = Some("2026-05-01".to_string());
        let mut item = Renderer::default().item(&task);
        item.priority_label = "P: HIGH".to_string();
        item.due_label = "Deadline 2026-05-01".to_string();

        let mut surface = TableSurface::new(false);
        surface.replace_items(vec![item]);
        let mut out = Vec::new();
        surface.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row: Vec<&str> = text.lines().nth(2).unwrap().split_whitespace().collect();

        assert_eq!(row[..5], ["Plan", "trip", "No", "description", "high"]);
        assert_eq!(row[5], "2026-05-01");
        assert_eq!(row[6], "pending");
    }
}
