//! Console table rendering for listing results.

use crate::value::ResultSet;

const INDEX_HEADER: &str = "(index)";

/// Render rows as a boxed ASCII table with a leading `(index)` column.
///
/// Widths are measured in chars; SQL NULL prints as `null`. An empty result
/// renders as `(no rows)`.
pub fn render_table(set: &ResultSet) -> String {
    if set.is_empty() {
        return "(no rows)\n".to_string();
    }

    let mut header = Vec::with_capacity(set.columns.len() + 1);
    header.push(INDEX_HEADER.to_string());
    header.extend(set.columns.iter().cloned());

    let body: Vec<Vec<String>> = set
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            std::iter::once(idx.to_string())
                .chain(row.iter().map(|v| v.to_string()))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(&rule);
    push_row(&mut out, &header, &widths);
    out.push_str(&rule);
    for row in &body {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&rule);
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(pad + 1));
        out.push('|');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_render_departments() {
        let set = ResultSet {
            columns: vec!["id".into(), "name".into()],
            rows: vec![
                vec![Value::Int(1), Value::from("Engineering")],
                vec![Value::Int(2), Value::from("Sales")],
            ],
        };

        let expected = "\
+---------+----+-------------+
| (index) | id | name        |
+---------+----+-------------+
| 0       | 1  | Engineering |
| 1       | 2  | Sales       |
+---------+----+-------------+
";
        assert_eq!(render_table(&set), expected);
    }

    #[test]
    fn test_null_and_unicode_cells() {
        let set = ResultSet {
            columns: vec!["manager".into()],
            rows: vec![vec![Value::Null], vec![Value::from("Zoë Ré")]],
        };

        let rendered = render_table(&set);
        assert!(rendered.contains("| 0       | null    |"));
        assert!(rendered.contains("| 1       | Zoë Ré  |"));
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(render_table(&ResultSet::default()), "(no rows)\n");
    }
}
