use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// Draft has no client id.
    MissingClient,
    /// Draft has no product id.
    MissingProduct,
    /// New client/product has no name.
    MissingName,
    /// Quantity must be strictly positive.
    InvalidQuantity(f64),
    /// Outbound quantity exceeds the pair's current balance.
    InsufficientStock { requested: f64, available: f64 },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingClient => write!(f, "movement has no client"),
            Self::MissingProduct => write!(f, "movement has no product"),
            Self::MissingName => write!(f, "name is required"),
            Self::InvalidQuantity(q) => write!(f, "quantity must be greater than 0, got {q}"),
            Self::InsufficientStock { requested, available } => {
                write!(f, "insufficient stock: requested {requested}, available {available}")
            }
        }
    }
}

impl std::error::Error for LedgerError {}
