// CSV export and line tokenization
//
// Export is semicolon-delimited and LF-joined. Import tokenization accepts
// either semicolon or comma, picked from the header line.

use stockbook_engine::filter::{filter_movements, MovementFilter};
use stockbook_engine::model::{BalanceRow, Store};

/// Export header for the movement list. `_id` is informational only.
pub const MOVEMENT_HEADERS: &[&str] = &[
    "Date",
    "Direction",
    "Client",
    "Product",
    "Quantity",
    "Unit",
    "Waybill Sender",
    "Waybill Carrier",
    "Container",
    "Customs",
    "Driver",
    "Tractor",
    "Notes",
    "_id",
];

/// Export header for the balances table.
pub const BALANCE_HEADERS: &[&str] =
    &["Client", "Code", "Product", "Unit", "Inbound", "Outbound", "Balance"];

/// Escape one field: line breaks collapse to spaces, and the field is quoted
/// (inner quotes doubled) when it contains a backslash, quote, comma,
/// semicolon, or line break.
pub fn escape_field(value: &str) -> String {
    let flat = value.replace('\n', " ");
    if flat.contains(['\\', '"', ',', ';', '\n', '\r']) {
        format!("\"{}\"", flat.replace('"', "\"\""))
    } else {
        flat
    }
}

/// Assemble a semicolon-delimited document: header row, then data rows,
/// joined with LF and no trailing newline.
pub fn write_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.iter().map(|h| escape_field(h)).collect::<Vec<_>>().join(";"));
    for row in rows {
        lines.push(row.iter().map(|v| escape_field(v)).collect::<Vec<_>>().join(";"));
    }
    lines.join("\n")
}

/// Quantities print as integers when whole, like the source data.
pub fn format_quantity(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Export the filtered movement list with resolved client/product names.
pub fn movements_csv(store: &Store, filter: &MovementFilter) -> String {
    let rows: Vec<Vec<String>> = filter_movements(&store.movements, filter)
        .iter()
        .map(|m| {
            let product = store.product(&m.product_id);
            vec![
                m.date.clone(),
                m.direction.label().to_string(),
                store.client(&m.client_id).map(|c| c.name.clone()).unwrap_or_default(),
                product.map(|p| p.name.clone()).unwrap_or_default(),
                format_quantity(m.quantity),
                product.map(|p| p.unit.clone()).unwrap_or_default(),
                m.waybill_sender.clone(),
                m.waybill_carrier.clone(),
                m.container.clone(),
                m.customs.clone(),
                m.driver.clone(),
                m.tractor.clone(),
                m.notes.clone(),
                m.id.clone(),
            ]
        })
        .collect();
    write_csv(MOVEMENT_HEADERS, &rows)
}

/// Export the aggregate balances table.
pub fn balances_csv(rows: &[BalanceRow]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.client.clone(),
                r.code.clone(),
                r.product.clone(),
                r.unit.clone(),
                format_quantity(r.inbound),
                format_quantity(r.outbound),
                format_quantity(r.balance),
            ]
        })
        .collect();
    write_csv(BALANCE_HEADERS, &rows)
}

/// Semicolon wins when the header line contains one, otherwise comma.
pub fn detect_delimiter(header_line: &str) -> char {
    if header_line.contains(';') {
        ';'
    } else {
        ','
    }
}

/// Split one line on `delimiter`, honoring quoted fields: a quote toggles
/// quoted mode, a doubled quote inside quoted mode is a literal quote, and
/// the delimiter only splits outside quoted mode.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '"' {
            if quoted && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                quoted = !quoted;
            }
        } else if ch == delimiter && !quoted {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}
