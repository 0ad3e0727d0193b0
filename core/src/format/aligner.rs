//! # Field Alignment
//!
//! Lines up the columns of struct field declarations like gofmt does:
//! names, type, tag and trailing comment each start in a common column
//! within a section of consecutive single-line fields.
//!
//! Column widths follow tabwriter rules: a cell only takes part in a column
//! when another cell follows it on the same line, and a column block ends at
//! the first line without such a cell. A block made only of empty cells takes
//! no width. Sections end at blank lines, comment lines and fields spanning
//! several lines. Indentation is never changed.
//!
//! A trailing comment always sits in the fourth column: untagged fields get
//! empty cells in front of it, as gofmt does.
//!
//! Only struct field lists are touched; the rest of the file keeps its
//! layout. Use [`crate::Gofmt`] for fully canonical output.

use crate::error::AppResult;
use crate::format::{invalid_output, SourceFormatter};
use crate::ledger::OffsetLedger;
use crate::parser::extractors::node_text;
use crate::parser::parse_go;
use tree_sitter::Node;

const PADDING: usize = 1;

/// Built-in struct field aligner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aligner;

impl SourceFormatter for Aligner {
    fn format(&self, source: &str) -> AppResult<String> {
        let parsed = parse_go(source, "<rewritten>").map_err(invalid_output)?;

        let mut replacements = Vec::new();
        collect(parsed.root(), source, &mut replacements);
        replacements.sort_by_key(|r| r.start);

        let mut out = source.to_string();
        let mut ledger = OffsetLedger::new();
        for r in &replacements {
            ledger.apply(r.start, r.end, &r.text, &mut out)?;
        }
        Ok(out)
    }
}

/// One aligned field line: the byte range it covers and its cells.
#[derive(Debug)]
struct Row {
    start: usize,
    end: usize,
    line: usize,
    cells: Vec<String>,
}

#[derive(Debug)]
struct Replacement {
    start: usize,
    end: usize,
    text: String,
}

fn collect(node: Node, src: &str, out: &mut Vec<Replacement>) {
    if node.kind() == "field_declaration_list" {
        for section in sections(node, src) {
            let aligned = align(&section);
            for (row, text) in section.iter().zip(aligned) {
                if src[row.start..row.end] != text {
                    out.push(Replacement {
                        start: row.start,
                        end: row.end,
                        text,
                    });
                }
            }
        }
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    for child in children {
        collect(child, src, out);
    }
}

/// Splits a field list into runs of alignable rows on consecutive lines.
fn sections(list: Node, src: &str) -> Vec<Vec<Row>> {
    let open_row = list.start_position().row;
    let mut cursor = list.walk();
    let children: Vec<_> = list.named_children(&mut cursor).collect();

    let mut sections = Vec::new();
    let mut current: Vec<Row> = Vec::new();
    let mut i = 0;

    while i < children.len() {
        let child = children[i];
        let row = if child.kind() == "field_declaration" {
            let comment = children
                .get(i + 1)
                .filter(|n| n.kind() == "comment")
                .filter(|n| n.start_position().row == child.end_position().row)
                .copied();
            if comment.is_some() {
                i += 1;
            }
            row_for(child, comment, src, open_row)
        } else {
            None
        };

        match row {
            Some(row) => {
                let contiguous = current.last().is_some_and(|prev| prev.line + 1 == row.line);
                if !contiguous && !current.is_empty() {
                    sections.push(std::mem::take(&mut current));
                }
                current.push(row);
            }
            None => {
                if !current.is_empty() {
                    sections.push(std::mem::take(&mut current));
                }
            }
        }
        i += 1;
    }

    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t')
}

/// Cells of a single-line field that starts its own line, if alignable.
fn row_for(field: Node, comment: Option<Node>, src: &str, open_row: usize) -> Option<Row> {
    let line = field.start_position().row;
    if line != field.end_position().row || line <= open_row {
        return None;
    }

    let start = field.start_byte();
    let line_start = src[..start].rfind('\n').map_or(0, |p| p + 1);
    if !is_blank(&src[line_start..start]) {
        return None;
    }

    let ty = field.child_by_field_name("type")?;
    let mut cursor = field.walk();
    let last_name = field.children_by_field_name("name", &mut cursor).last();

    let mut cells = Vec::new();
    let mut pos = match last_name {
        Some(name) => {
            cells.push(src[start..name.end_byte()].to_string());
            push_cell(&mut cells, src, name.end_byte(), ty)?
        }
        None => {
            cells.push(src[start..ty.end_byte()].to_string());
            ty.end_byte()
        }
    };

    if let Some(tag) = field.child_by_field_name("tag") {
        pos = push_cell(&mut cells, src, pos, tag)?;
    }
    if pos != field.end_byte() {
        return None;
    }
    if let Some(comment) = comment {
        if field.child_by_field_name("tag").is_none() {
            let empty = if last_name.is_some() { 1 } else { 2 };
            cells.extend(std::iter::repeat(String::new()).take(empty));
        }
        pos = push_cell(&mut cells, src, pos, comment)?;
    }

    Some(Row {
        start,
        end: pos,
        line,
        cells,
    })
}

/// Appends `node` as a cell if only blanks separate it from `pos`.
fn push_cell(cells: &mut Vec<String>, src: &str, pos: usize, node: Node) -> Option<usize> {
    let gap = src.get(pos..node.start_byte())?;
    if gap.is_empty() || !is_blank(gap) {
        return None;
    }
    cells.push(node_text(node, src).to_string());
    Some(node.end_byte())
}

/// Renders each row with padded cells.
fn align(rows: &[Row]) -> Vec<String> {
    let mut out = vec![String::new(); rows.len()];
    let mut widths = Vec::new();
    format_block(rows, 0, rows.len(), &mut widths, &mut out);
    out
}

fn format_block(
    rows: &[Row],
    mut line0: usize,
    line1: usize,
    widths: &mut Vec<usize>,
    out: &mut [String],
) {
    let column = widths.len();
    let mut this = line0;

    while this < line1 {
        if column + 1 >= rows[this].cells.len() {
            this += 1;
            continue;
        }

        write_lines(rows, line0, this, widths, out);
        line0 = this;

        let mut width = 0;
        let mut discardable = true;
        while this < line1 && column + 1 < rows[this].cells.len() {
            let len = rows[this].cells[column].chars().count();
            discardable &= len == 0;
            width = width.max(len + PADDING);
            this += 1;
        }
        if discardable {
            width = 0;
        }

        widths.push(width);
        format_block(rows, line0, this, widths, out);
        widths.pop();
        line0 = this;
    }

    write_lines(rows, line0, line1, widths, out);
}

fn write_lines(rows: &[Row], line0: usize, line1: usize, widths: &[usize], out: &mut [String]) {
    for i in line0..line1 {
        let cells = &rows[i].cells;
        let mut text = String::new();
        for (j, cell) in cells.iter().enumerate() {
            text.push_str(cell);
            if j + 1 < cells.len() {
                let pad = widths
                    .get(j)
                    .map_or(PADDING, |w| w.saturating_sub(cell.chars().count()));
                text.push_str(&" ".repeat(pad));
            }
        }
        out[i] = text;
    }
}
