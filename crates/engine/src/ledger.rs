use crate::error::LedgerError;
use crate::model::{new_id, Client, Direction, Movement, MovementDraft, Product, Store, DEFAULT_UNIT};

/// Signed fold over all movements for one (client, product) pair.
/// Returns 0 when nothing matches. Order-independent; O(n) over the log.
pub fn current_balance(movements: &[Movement], client_id: &str, product_id: &str) -> f64 {
    movements
        .iter()
        .filter(|m| m.client_id == client_id && m.product_id == product_id)
        .map(|m| m.direction.sign() * m.quantity)
        .sum()
}

/// Validate a draft and prepend it to the movement log.
///
/// Outbound drafts are checked against the pair's balance at commit time;
/// a draft that would drive it negative is rejected and the store is
/// returned untouched.
pub fn commit_movement(store: &Store, draft: MovementDraft) -> Result<Store, LedgerError> {
    if draft.client_id.is_empty() {
        return Err(LedgerError::MissingClient);
    }
    if draft.product_id.is_empty() {
        return Err(LedgerError::MissingProduct);
    }
    if !(draft.quantity > 0.0) {
        return Err(LedgerError::InvalidQuantity(draft.quantity));
    }

    if draft.direction == Direction::Outbound {
        let available = current_balance(&store.movements, &draft.client_id, &draft.product_id);
        if draft.quantity > available {
            return Err(LedgerError::InsufficientStock {
                requested: draft.quantity,
                available,
            });
        }
    }

    let mut next = store.clone();
    next.movements.insert(0, draft.into_movement(new_id()));
    Ok(next)
}

/// Remove a movement unconditionally. Movements accepted on the strength of
/// the removed one are not re-validated.
pub fn delete_movement(store: &Store, id: &str) -> Store {
    let mut next = store.clone();
    next.movements.retain(|m| m.id != id);
    next
}

/// Register a client. Name is the only required field.
pub fn add_client(store: &Store, name: &str, tax_id: &str) -> Result<Store, LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::MissingName);
    }
    let mut next = store.clone();
    next.clients.insert(
        0,
        Client {
            id: new_id(),
            name: name.trim().to_string(),
            tax_id: tax_id.trim().to_string(),
        },
    );
    Ok(next)
}

/// Register a product. Unit falls back to the default when blank.
pub fn add_product(store: &Store, code: &str, name: &str, unit: &str) -> Result<Store, LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::MissingName);
    }
    let unit = if unit.trim().is_empty() { DEFAULT_UNIT } else { unit.trim() };
    let mut next = store.clone();
    next.products.insert(
        0,
        Product {
            id: new_id(),
            code: code.trim().to_string(),
            name: name.trim().to_string(),
            unit: unit.to_string(),
        },
    );
    Ok(next)
}
