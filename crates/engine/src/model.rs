use serde::{Deserialize, Serialize};

/// Unit assigned to products created without one.
pub const DEFAULT_UNIT: &str = "unit";

/// Shown in balance rows when a client/product id no longer resolves.
pub const NAME_PLACEHOLDER: &str = "—";

/// Fresh opaque id for clients, products, and movements.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Today's calendar date as an ISO `YYYY-MM-DD` string.
pub fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub tax_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub code: String,
    pub name: String,
    pub unit: String,
}

/// Movement direction. Signed fold: inbound adds, outbound subtracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Inbound,
    Outbound,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Self::Inbound => 1.0,
            Self::Outbound => -1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inbound => "IN",
            Self::Outbound => "OUT",
        }
    }

    /// Lenient parse for imported data: anything mentioning "out" (or the
    /// legacy "egr" for egreso) is outbound, everything else is inbound.
    pub fn parse(raw: &str) -> Self {
        let key = crate::resolve::normalize(raw);
        if key.contains("out") || key.contains("egr") {
            Self::Outbound
        } else {
            Self::Inbound
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Movements
// ---------------------------------------------------------------------------

/// One inbound or outbound stock transaction. Immutable once committed,
/// except for deletion. Shipping metadata fields are opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Movement {
    pub id: String,
    /// ISO calendar date, date-only (first 10 chars kept on import).
    pub date: String,
    pub direction: Direction,
    pub client_id: String,
    pub product_id: String,
    pub quantity: f64,
    pub waybill_sender: String,
    pub waybill_carrier: String,
    pub container: String,
    pub customs: String,
    pub driver: String,
    pub tractor: String,
    pub notes: String,
}

/// Candidate movement before validation. `commit_movement` assigns the id.
#[derive(Debug, Clone, Default)]
pub struct MovementDraft {
    pub date: String,
    pub direction: Direction,
    pub client_id: String,
    pub product_id: String,
    pub quantity: f64,
    pub waybill_sender: String,
    pub waybill_carrier: String,
    pub container: String,
    pub customs: String,
    pub driver: String,
    pub tractor: String,
    pub notes: String,
}

impl MovementDraft {
    pub(crate) fn into_movement(self, id: String) -> Movement {
        let date = if self.date.is_empty() { today_iso() } else { self.date };
        Movement {
            id,
            date,
            direction: self.direction,
            client_id: self.client_id,
            product_id: self.product_id,
            quantity: self.quantity,
            waybill_sender: self.waybill_sender,
            waybill_carrier: self.waybill_carrier,
            container: self.container,
            customs: self.customs,
            driver: self.driver,
            tractor: self.tractor,
            notes: self.notes,
        }
    }
}

// ---------------------------------------------------------------------------
// Store aggregate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    pub name: String,
    pub tax_id: String,
    pub warehouse: String,
}

/// The whole persisted aggregate. Operations never mutate a store in place;
/// they clone, modify, and return the next snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Store {
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
    pub movements: Vec<Movement>,
    pub company: CompanyProfile,
}

impl Store {
    /// Blank store, used by the reset operation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// First-run document: the warehouse's standing clients and its one
    /// stocked product.
    pub fn seed() -> Self {
        let client = |name: &str| Client {
            id: new_id(),
            name: name.to_string(),
            tax_id: String::new(),
        };
        Self {
            clients: vec![client("PROCOMSAC"), client("ATLANTICA"), client("EL ÁGUILA")],
            products: vec![Product {
                id: new_id(),
                code: "SACO25".to_string(),
                name: "Saco 25 kg".to_string(),
                unit: "saco".to_string(),
            }],
            movements: Vec::new(),
            company: CompanyProfile {
                name: "HR & NE Inversiones EIRL".to_string(),
                tax_id: String::new(),
                warehouse: "Chancay".to_string(),
            },
        }
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// One row of the inventory view: totals for a (client, product) pair.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceRow {
    pub client_id: String,
    pub product_id: String,
    pub client: String,
    pub code: String,
    pub product: String,
    pub unit: String,
    pub inbound: f64,
    pub outbound: f64,
    pub balance: f64,
}
