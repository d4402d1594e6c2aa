// CSV import engine
//
// Parses a delimited payload, resolves or creates clients/products by
// normalized name, and stages movements. Outbound rows are checked against
// a running balance that includes rows accepted earlier in the same batch.

use std::fmt;

use stockbook_engine::model::{new_id, today_iso, Direction, Movement, Store};
use stockbook_engine::resolve::{normalize, EntityResolver};

use crate::csv::{detect_delimiter, split_line};

#[derive(Debug, PartialEq, Eq)]
pub enum ImportError {
    /// Fewer than two non-empty lines: no header or no data rows.
    Empty,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "CSV file is empty"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Result of one import batch. `store` is the next snapshot; nothing from a
/// failed import is ever applied.
#[derive(Debug)]
pub struct ImportOutcome {
    pub store: Store,
    pub accepted: usize,
    pub skipped: usize,
}

/// Column positions resolved from the normalized header. A column that is
/// not present reads as empty for every row.
#[derive(Debug, Default)]
struct ColumnMap {
    date: Option<usize>,
    direction: Option<usize>,
    client: Option<usize>,
    product: Option<usize>,
    quantity: Option<usize>,
    waybill_sender: Option<usize>,
    waybill_carrier: Option<usize>,
    container: Option<usize>,
    customs: Option<usize>,
    driver: Option<usize>,
    tractor: Option<usize>,
    notes: Option<usize>,
    code: Option<usize>,
    unit: Option<usize>,
}

impl ColumnMap {
    /// Aliases cover our own export labels and the legacy Spanish headers.
    /// A header matches an alias by equality or prefix on the normalized text.
    fn locate(headers: &[String]) -> Self {
        let find = |aliases: &[&str]| -> Option<usize> {
            headers
                .iter()
                .position(|h| aliases.iter().any(|a| h == a || h.starts_with(a)))
        };
        Self {
            date: find(&["date", "fecha"]),
            direction: find(&["direction", "type", "tipo"]),
            client: find(&["client", "cliente"]),
            product: find(&["product", "producto"]),
            quantity: find(&["quantity", "qty", "cantidad"]),
            waybill_sender: find(&["waybill sender", "guia remitente"]),
            waybill_carrier: find(&["waybill carrier", "guia transportista"]),
            container: find(&["container", "contenedor"]),
            customs: find(&["customs", "dua"]),
            driver: find(&["driver", "chofer"]),
            tractor: find(&["tractor", "tracto", "plate", "placa"]),
            notes: find(&["notes", "obs", "observaciones"]),
            code: find(&["code", "codigo"]),
            unit: find(&["unit", "unidad"]),
        }
    }
}

fn cell<'a>(cells: &'a [String], index: Option<usize>) -> &'a str {
    index.and_then(|i| cells.get(i)).map(String::as_str).unwrap_or("")
}

/// Import a whole CSV payload against a store snapshot.
///
/// Rows are staged in file order. Outbound rows whose quantity exceeds the
/// running balance (existing movements plus rows already staged) are skipped
/// rather than failing the batch; clients/products created for a skipped row
/// are kept. On success the batch is prepended to the movement log.
pub fn import_movements(store: &Store, text: &str) -> Result<ImportOutcome, ImportError> {
    let lines: Vec<&str> = text.split(['\r', '\n']).filter(|l| !l.is_empty()).collect();
    if lines.len() < 2 {
        return Err(ImportError::Empty);
    }

    let delimiter = detect_delimiter(lines[0]);
    let headers: Vec<String> = split_line(lines[0], delimiter)
        .iter()
        .map(|h| normalize(h))
        .collect();
    let columns = ColumnMap::locate(&headers);

    let mut resolver = EntityResolver::new(store.clients.clone(), store.products.clone());
    let mut staged: Vec<Movement> = Vec::new();
    let mut skipped = 0usize;

    for line in &lines[1..] {
        let cells = split_line(line, delimiter);

        let direction = Direction::parse(cell(&cells, columns.direction));
        let raw_date = cell(&cells, columns.date);
        let date: String = if raw_date.is_empty() {
            today_iso()
        } else {
            raw_date.chars().take(10).collect()
        };
        let quantity = cell(&cells, columns.quantity).trim().parse::<f64>().unwrap_or(0.0);

        let client_id = resolver.resolve_or_create_client(cell(&cells, columns.client));
        let product_id = resolver.resolve_or_create_product(
            cell(&cells, columns.product),
            cell(&cells, columns.code),
            cell(&cells, columns.unit),
        );

        if direction == Direction::Outbound {
            let available: f64 = store
                .movements
                .iter()
                .chain(staged.iter())
                .filter(|m| m.client_id == client_id && m.product_id == product_id)
                .map(|m| m.direction.sign() * m.quantity)
                .sum();
            if quantity > available {
                skipped += 1;
                continue;
            }
        }

        staged.push(Movement {
            id: new_id(),
            date,
            direction,
            client_id,
            product_id,
            quantity,
            waybill_sender: cell(&cells, columns.waybill_sender).to_string(),
            waybill_carrier: cell(&cells, columns.waybill_carrier).to_string(),
            container: cell(&cells, columns.container).to_string(),
            customs: cell(&cells, columns.customs).to_string(),
            driver: cell(&cells, columns.driver).to_string(),
            tractor: cell(&cells, columns.tractor).to_string(),
            notes: cell(&cells, columns.notes).to_string(),
        });
    }

    let accepted = staged.len();
    let mut next = store.clone();
    next.clients = resolver.clients;
    next.products = resolver.products;
    // Batch goes in front, keeping its file order
    let mut movements = staged;
    movements.append(&mut next.movements);
    next.movements = movements;

    Ok(ImportOutcome { store: next, accepted, skipped })
}
