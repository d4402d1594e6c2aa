use crate::model::{Direction, Movement};

/// Criteria for the movement list view. Empty criteria match everything;
/// date bounds are inclusive and rely on ISO strings comparing lexically.
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    pub client_id: Option<String>,
    pub product_id: Option<String>,
    pub direction: Option<Direction>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub container: Option<String>,
    pub customs: Option<String>,
    /// Searched against both waybill fields.
    pub waybill: Option<String>,
}

impl MovementFilter {
    pub fn matches(&self, m: &Movement) -> bool {
        if let Some(ref client_id) = self.client_id {
            if m.client_id != *client_id {
                return false;
            }
        }
        if let Some(ref product_id) = self.product_id {
            if m.product_id != *product_id {
                return false;
            }
        }
        if let Some(direction) = self.direction {
            if m.direction != direction {
                return false;
            }
        }
        if let Some(ref from) = self.from {
            if m.date < *from {
                return false;
            }
        }
        if let Some(ref to) = self.to {
            if m.date > *to {
                return false;
            }
        }
        if let Some(ref container) = self.container {
            if !contains_ci(&m.container, container) {
                return false;
            }
        }
        if let Some(ref customs) = self.customs {
            if !contains_ci(&m.customs, customs) {
                return false;
            }
        }
        if let Some(ref waybill) = self.waybill {
            let both = format!("{} {}", m.waybill_sender, m.waybill_carrier);
            if !contains_ci(&both, waybill) {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn filter_movements<'a>(movements: &'a [Movement], filter: &MovementFilter) -> Vec<&'a Movement> {
    movements.iter().filter(|m| filter.matches(m)).collect()
}
