use crate::normalize::NormalizedRecord;

/// Column labels shared by every table output.
pub const HEADERS: [&str; 3] = ["Name", "Surname", "ID"];

/// Destination for rendered rows.
///
/// Implementations must append: rows already in the sink stay where they are.
pub trait TableSink {
    fn append_row(&mut self, record: &NormalizedRecord);
}

impl TableSink for Vec<NormalizedRecord> {
    fn append_row(&mut self, record: &NormalizedRecord) {
        self.push(record.clone());
    }
}

/// Append one row per record to `sink`, in input order.
pub fn render_rows(records: &[NormalizedRecord], sink: &mut dyn TableSink) {
    for record in records {
        sink.append_row(record);
    }
}

/// The three cell values of a row. A missing surname renders as an empty cell.
fn cells(record: &NormalizedRecord) -> [String; 3] {
    [
        record.name.clone(),
        record.surname.clone().unwrap_or_default(),
        record.id.to_string(),
    ]
}

/// `<tbody>` contents of an HTML table, one `<tr>` per appended record.
#[derive(Debug, Clone, Default)]
pub struct HtmlTableBody {
    rows: Vec<String>,
}

impl HtmlTableBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from rows that are already present in the table body.
    pub fn with_rows(rows: Vec<String>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Body markup, one row per line.
    pub fn body_html(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }

    /// Complete `<table>` element with a header row around the body.
    pub fn to_table_html(&self) -> String {
        let mut out = String::from("<table id=\"student-table\">\n<thead>\n<tr>");
        for h in HEADERS {
            out.push_str(&format!("<th>{h}</th>"));
        }
        out.push_str("</tr>\n</thead>\n<tbody>\n");
        out.push_str(&self.body_html());
        out.push_str("</tbody>\n</table>\n");
        out
    }
}

impl TableSink for HtmlTableBody {
    fn append_row(&mut self, record: &NormalizedRecord) {
        let mut row = String::from("<tr>");
        for cell in cells(record) {
            row.push_str("<td>");
            row.push_str(&escape_html(&cell));
            row.push_str("</td>");
        }
        row.push_str("</tr>");
        self.rows.push(row);
    }
}

fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Rows collected for a pipe-delimited Markdown table.
#[derive(Debug, Clone, Default)]
pub struct MarkdownTable {
    rows: Vec<[String; 3]>,
}

impl MarkdownTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn to_markdown(&self) -> String {
        let rows: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect();
        build_table(&HEADERS, &rows)
    }
}

impl TableSink for MarkdownTable {
    fn append_row(&mut self, record: &NormalizedRecord) {
        self.rows.push(cells(record));
    }
}

/// Escape special characters in a table cell so that pipes, backslashes,
/// and newlines do not break Markdown table structure.
fn escape_cell(content: &str) -> String {
    content
        .replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
        .replace('\r', "")
}

/// Build a pipe-delimited Markdown table from headers and rows.
///
/// Each row is padded or truncated to match the header count.
fn build_table(headers: &[&str], rows: &[Vec<&str>]) -> String {
    let col_count = headers.len();
    if col_count == 0 {
        return String::new();
    }

    let mut out = String::new();

    out.push('|');
    for h in headers {
        out.push(' ');
        out.push_str(&escape_cell(h));
        out.push_str(" |");
    }
    out.push('\n');

    out.push('|');
    for _ in 0..col_count {
        out.push_str("---|");
    }
    out.push('\n');

    for row in rows {
        out.push('|');
        for i in 0..col_count {
            out.push(' ');
            if let Some(cell) = row.get(i) {
                out.push_str(&escape_cell(cell));
            }
            out.push_str(" |");
        }
        out.push('\n');
    }

    out
}
