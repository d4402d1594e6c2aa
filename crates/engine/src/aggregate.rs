use std::collections::BTreeMap;

use crate::model::{BalanceRow, Client, Movement, Product, NAME_PLACEHOLDER};

/// Group movements by (product, client), summing inbound and outbound
/// separately. One row per pair observed, sorted by client name + product
/// name (case-sensitive lexical on the display strings).
pub fn aggregate_balances(
    movements: &[Movement],
    clients: &[Client],
    products: &[Product],
) -> Vec<BalanceRow> {
    let mut groups: BTreeMap<(String, String), (f64, f64)> = BTreeMap::new();

    for m in movements {
        let entry = groups
            .entry((m.product_id.clone(), m.client_id.clone()))
            .or_insert((0.0, 0.0));
        match m.direction {
            crate::model::Direction::Inbound => entry.0 += m.quantity,
            crate::model::Direction::Outbound => entry.1 += m.quantity,
        }
    }

    let mut rows: Vec<BalanceRow> = groups
        .into_iter()
        .map(|((product_id, client_id), (inbound, outbound))| {
            let product = products.iter().find(|p| p.id == product_id);
            let client = clients.iter().find(|c| c.id == client_id);
            BalanceRow {
                client: client
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
                code: product
                    .map(|p| p.code.clone())
                    .unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
                product: product
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
                unit: product
                    .map(|p| p.unit.clone())
                    .unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
                client_id,
                product_id,
                inbound,
                outbound,
                balance: inbound - outbound,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        format!("{}{}", a.client, a.product).cmp(&format!("{}{}", b.client, b.product))
    });
    rows
}

/// Total balance per client, in first-seen row order.
pub fn client_totals(rows: &[BalanceRow]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for row in rows {
        match totals.iter_mut().find(|(client, _)| *client == row.client) {
            Some((_, total)) => *total += row.balance,
            None => totals.push((row.client.clone(), row.balance)),
        }
    }
    totals
}

/// Movement count per driver. Blank drivers fall into a "(no driver)" bucket.
pub fn driver_counts(movements: &[Movement]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for m in movements {
        let driver = if m.driver.is_empty() { "(no driver)" } else { &m.driver };
        match counts.iter_mut().find(|(d, _)| d == driver) {
            Some((_, n)) => *n += 1,
            None => counts.push((driver.to_string(), 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;

    fn movement(client_id: &str, product_id: &str, direction: Direction, quantity: f64) -> Movement {
        Movement {
            id: crate::model::new_id(),
            date: "2026-08-01".into(),
            direction,
            client_id: client_id.into(),
            product_id: product_id.into(),
            quantity,
            ..Default::default()
        }
    }

    fn client(id: &str, name: &str) -> Client {
        Client { id: id.into(), name: name.into(), tax_id: String::new() }
    }

    fn product(id: &str, name: &str) -> Product {
        Product { id: id.into(), code: String::new(), name: name.into(), unit: "bag".into() }
    }

    #[test]
    fn balance_is_inbound_minus_outbound() {
        let movements = vec![
            movement("c1", "p1", Direction::Inbound, 100.0),
            movement("c1", "p1", Direction::Outbound, 30.0),
            movement("c1", "p1", Direction::Inbound, 5.0),
        ];
        let rows = aggregate_balances(&movements, &[client("c1", "Acme")], &[product("p1", "Bag")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].inbound, 105.0);
        assert_eq!(rows[0].outbound, 30.0);
        assert_eq!(rows[0].balance, 75.0);
    }

    #[test]
    fn insertion_order_does_not_change_totals() {
        let mut movements = vec![
            movement("c1", "p1", Direction::Inbound, 10.0),
            movement("c1", "p1", Direction::Outbound, 4.0),
            movement("c1", "p1", Direction::Inbound, 1.5),
        ];
        let forward = aggregate_balances(&movements, &[], &[]);
        movements.reverse();
        let reversed = aggregate_balances(&movements, &[], &[]);
        assert_eq!(forward[0].balance, reversed[0].balance);
        assert_eq!(forward[0].inbound, reversed[0].inbound);
        assert_eq!(forward[0].outbound, reversed[0].outbound);
    }

    #[test]
    fn one_row_per_pair_sorted_by_names() {
        let movements = vec![
            movement("c2", "p1", Direction::Inbound, 1.0),
            movement("c1", "p2", Direction::Inbound, 2.0),
            movement("c1", "p1", Direction::Inbound, 3.0),
        ];
        let clients = [client("c1", "Acme"), client("c2", "Zenith")];
        let products = [product("p1", "Bag"), product("p2", "Crate")];
        let rows = aggregate_balances(&movements, &clients, &products);
        let keys: Vec<String> = rows.iter().map(|r| format!("{}/{}", r.client, r.product)).collect();
        assert_eq!(keys, vec!["Acme/Bag", "Acme/Crate", "Zenith/Bag"]);
    }

    #[test]
    fn unresolved_ids_render_placeholder() {
        let movements = vec![movement("ghost", "gone", Direction::Inbound, 1.0)];
        let rows = aggregate_balances(&movements, &[], &[]);
        assert_eq!(rows[0].client, NAME_PLACEHOLDER);
        assert_eq!(rows[0].product, NAME_PLACEHOLDER);
        assert_eq!(rows[0].balance, 1.0);
    }

    #[test]
    fn client_totals_sum_across_products() {
        let movements = vec![
            movement("c1", "p1", Direction::Inbound, 10.0),
            movement("c1", "p2", Direction::Inbound, 5.0),
            movement("c2", "p1", Direction::Inbound, 2.0),
        ];
        let clients = [client("c1", "Acme"), client("c2", "Zenith")];
        let products = [product("p1", "Bag"), product("p2", "Crate")];
        let rows = aggregate_balances(&movements, &clients, &products);
        let totals = client_totals(&rows);
        assert_eq!(totals, vec![("Acme".to_string(), 15.0), ("Zenith".to_string(), 2.0)]);
    }

    #[test]
    fn driver_counts_bucket_blanks() {
        let mut with_driver = movement("c1", "p1", Direction::Inbound, 1.0);
        with_driver.driver = "J. Flores".into();
        let counts = driver_counts(&[
            with_driver.clone(),
            with_driver,
            movement("c1", "p1", Direction::Outbound, 1.0),
        ]);
        assert_eq!(counts, vec![("J. Flores".to_string(), 2), ("(no driver)".to_string(), 1)]);
    }
}
