use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{new_id, Client, Product, DEFAULT_UNIT};

/// Matching key: NFD-decompose, drop combining marks, lowercase, trim.
/// "EL ÁGUILA" and "el aguila" normalize to the same key.
pub fn normalize(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Match-or-create resolution over working client/product lists.
///
/// Used by the import engine so rows later in a batch see entities created
/// by earlier rows. The final lists replace the store's on success.
#[derive(Debug)]
pub struct EntityResolver {
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
}

impl EntityResolver {
    pub fn new(clients: Vec<Client>, products: Vec<Product>) -> Self {
        Self { clients, products }
    }

    /// Resolve a client by normalized name, creating one when no match
    /// exists. A blank name resolves to the empty id and creates nothing.
    pub fn resolve_or_create_client(&mut self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            return String::new();
        }
        let key = normalize(name);
        if let Some(client) = self.clients.iter().find(|c| normalize(&c.name) == key) {
            return client.id.clone();
        }
        let id = new_id();
        self.clients.push(Client {
            id: id.clone(),
            name: name.to_string(),
            tax_id: String::new(),
        });
        id
    }

    /// Resolve a product by normalized code first, then normalized name.
    /// Creation falls back name → code → generic placeholder, and the unit
    /// defaults when blank.
    pub fn resolve_or_create_product(&mut self, name: &str, code: &str, unit: &str) -> String {
        let name = name.trim();
        let code = code.trim();
        let name_key = normalize(name);
        let code_key = normalize(code);

        if !code_key.is_empty() {
            if let Some(product) = self.products.iter().find(|p| normalize(&p.code) == code_key) {
                return product.id.clone();
            }
        }
        if !name_key.is_empty() {
            if let Some(product) = self.products.iter().find(|p| normalize(&p.name) == name_key) {
                return product.id.clone();
            }
        }

        let display = if !name.is_empty() {
            name
        } else if !code.is_empty() {
            code
        } else {
            "Product"
        };
        let unit = unit.trim();
        let id = new_id();
        self.products.push(Product {
            id: id.clone(),
            code: code.to_string(),
            name: display.to_string(),
            unit: if unit.is_empty() { DEFAULT_UNIT } else { unit }.to_string(),
        });
        id
    }
}
