//! Markdown rendering of table documents and the index.
//!
//! Templates live in `templates/` and are compiled in by askama. Values are
//! escaped for Markdown table cells here, before they reach a template, so
//! the templates stay free of formatting logic.

use askama::Template;
use catalogdoc_core::{CatalogDocError, Column, Result, Table, TableSummary};

/// One row of a column or partition key table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    /// Escaped column name
    pub name: String,
    /// Type as an inline code span
    pub data_type: String,
    /// Escaped comment, empty when there is none
    pub comment: String,
}

impl From<&Column> for ColumnRow {
    fn from(column: &Column) -> Self {
        Self {
            name: escape_cell(&column.name),
            data_type: code_cell(&column.data_type),
            comment: column.comment.as_deref().map(escape_cell).unwrap_or_default(),
        }
    }
}

/// A labelled value in the table overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Row heading, e.g. `Location`
    pub label: &'static str,
    /// Cell-ready value
    pub value: String,
}

/// Expanded layout of one complex column type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedType {
    /// Column holding the type
    pub name: String,
    /// Output of [`format_nested_type`]
    pub layout: String,
}

/// Template context for one table document
#[derive(Debug, Template)]
#[template(path = "table.md", escape = "none")]
pub struct TableDocument {
    /// Document heading
    pub table_name: String,
    /// Paragraph under the heading; empty to omit it
    pub description: String,
    /// Overview rows, database first and column count last
    pub properties: Vec<Property>,
    /// Partition key rows
    pub partition_keys: Vec<ColumnRow>,
    /// Storage column rows
    pub columns: Vec<ColumnRow>,
    /// Complex types among the partition keys and columns
    pub nested_types: Vec<NestedType>,
}

impl TableDocument {
    /// Builds the template context for `table`.
    pub fn new(table: &Table) -> Self {
        let mut properties = vec![Property {
            label: "Database",
            value: code_cell(&table.database_name),
        }];
        for (label, value) in [
            ("Type", &table.table_type),
            ("Owner", &table.owner),
            ("Location", &table.location),
        ] {
            if let Some(value) = value {
                properties.push(Property {
                    label,
                    value: code_cell(value),
                });
            }
        }
        properties.push(Property {
            label: "Columns",
            value: table.column_count().to_string(),
        });

        let nested_types = table
            .partition_keys
            .iter()
            .chain(&table.columns)
            .filter(|column| column.is_complex())
            .map(|column| NestedType {
                name: column.name.clone(),
                layout: format_nested_type(&column.data_type),
            })
            .collect();

        Self {
            table_name: table.name.clone(),
            description: table.description.clone().unwrap_or_default(),
            properties,
            partition_keys: table.partition_keys.iter().map(ColumnRow::from).collect(),
            columns: table.columns.iter().map(ColumnRow::from).collect(),
            nested_types,
        }
    }
}

/// One row of the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    /// Link text
    pub name: String,
    /// Percent-encoded document file name
    pub link: String,
    /// Storage column count of the table
    pub column_count: usize,
}

impl From<&TableSummary> for IndexRow {
    fn from(summary: &TableSummary) -> Self {
        Self {
            name: escape_cell(&summary.name).replace('[', "\\[").replace(']', "\\]"),
            link: link_target(&summary.link),
            column_count: summary.column_count,
        }
    }
}

/// Template context for the table-of-contents index
#[derive(Debug, Template)]
#[template(path = "index.md", escape = "none")]
pub struct IndexDocument {
    /// Index heading
    pub project_name: String,
    /// Database the tables were read from
    pub database_name: String,
    /// One row per table document
    pub tables: Vec<IndexRow>,
}

impl IndexDocument {
    /// Builds the index context; rows keep the order of `tables`.
    pub fn new(project_name: &str, database_name: &str, tables: &[TableSummary]) -> Self {
        Self {
            project_name: project_name.to_string(),
            database_name: database_name.to_string(),
            tables: tables.iter().map(IndexRow::from).collect(),
        }
    }
}

/// Renders the Markdown document for one table.
///
/// # Errors
/// Returns a render error if template execution fails.
pub fn render_table(table: &Table) -> Result<String> {
    TableDocument::new(table)
        .render()
        .map_err(|e| CatalogDocError::render_failed(format!("table '{}'", table.name), e))
}

/// Renders the index listing every generated table document.
///
/// # Errors
/// Returns a render error if template execution fails.
pub fn render_index(
    project_name: &str,
    database_name: &str,
    tables: &[TableSummary],
) -> Result<String> {
    IndexDocument::new(project_name, database_name, tables)
        .render()
        .map_err(|e| CatalogDocError::render_failed("index", e))
}

/// Makes `value` safe inside a Markdown table cell.
///
/// Pipes would end the cell and line breaks would end the row.
pub fn escape_cell(value: &str) -> String {
    value
        .trim()
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

fn code_cell(value: &str) -> String {
    let value = escape_cell(value);
    if value.is_empty() {
        value
    } else {
        format!("`{}`", value)
    }
}

/// Characters that end or alter a Markdown link target, or a table cell
const LINK_RESERVED: [char; 17] = [
    ' ', '"', '#', '%', '(', ')', '<', '>', '?', '[', '\\', ']', '^', '`', '{', '|', '}',
];

/// Percent-encodes `link` so the target names the file itself rather than a
/// fragment or query of it.
fn link_target(link: &str) -> String {
    let mut target = String::with_capacity(link.len());
    for ch in link.chars() {
        if ch.is_ascii_control() || LINK_RESERVED.contains(&ch) {
            target.push_str(&format!("%{:02X}", u32::from(ch)));
        } else {
            target.push(ch);
        }
    }
    target
}

/// Lays out a nested type string one member per line.
///
/// Angle brackets open and close an indented block and top-level commas
/// separate members. Commas inside parentheses, as in `decimal(10,2)`, are
/// left alone.
///
/// ```
/// use catalogdoc::render::format_nested_type;
///
/// assert_eq!(
///     format_nested_type("array<struct<id:int,tags:array<string>>>"),
///     "array<\n  struct<\n    id:int,\n    tags:array<\n      string\n    >\n  >\n>"
/// );
/// ```
pub fn format_nested_type(data_type: &str) -> String {
    let mut out = String::with_capacity(data_type.len().saturating_mul(2));
    let mut depth: usize = 0;
    let mut parens: usize = 0;
    let mut line_start = false;

    for ch in data_type.trim().chars() {
        if line_start && ch.is_whitespace() {
            continue;
        }
        line_start = false;

        match ch {
            '(' => {
                parens = parens.saturating_add(1);
                out.push(ch);
            }
            ')' => {
                parens = parens.saturating_sub(1);
                out.push(ch);
            }
            '<' if parens == 0 => {
                out.push(ch);
                depth = depth.saturating_add(1);
                push_line_break(&mut out, depth);
                line_start = true;
            }
            '>' if parens == 0 => {
                depth = depth.saturating_sub(1);
                push_line_break(&mut out, depth);
                out.push(ch);
            }
            ',' if parens == 0 => {
                out.push(ch);
                push_line_break(&mut out, depth);
                line_start = true;
            }
            _ => out.push(ch),
        }
    }

    out
}

fn push_line_break(out: &mut String, depth: usize) {
    out.push('\n');
    out.push_str(&"  ".repeat(depth));
}
