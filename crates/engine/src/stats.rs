use chrono::{Datelike, NaiveDate};

use crate::model::Movement;

/// Dashboard numbers for the calendar month containing `today`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStats {
    pub inbound: f64,
    pub outbound: f64,
    pub movements: usize,
    /// Sum of every pair's balance, i.e. total stock on hand.
    pub stock_total: f64,
}

pub fn monthly_stats(movements: &[Movement], today: NaiveDate) -> MonthlyStats {
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .expect("first of month is always valid")
        .format("%Y-%m-%d")
        .to_string();
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .expect("last of month is always valid")
        .format("%Y-%m-%d")
        .to_string();

    let mut stats = MonthlyStats { inbound: 0.0, outbound: 0.0, movements: 0, stock_total: 0.0 };
    for m in movements {
        stats.stock_total += m.direction.sign() * m.quantity;
        // ISO strings compare lexically in date order
        if m.date >= first && m.date <= last {
            stats.movements += 1;
            match m.direction {
                crate::model::Direction::Inbound => stats.inbound += m.quantity,
                crate::model::Direction::Outbound => stats.outbound += m.quantity,
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;

    fn movement(date: &str, direction: Direction, quantity: f64) -> Movement {
        Movement {
            id: crate::model::new_id(),
            date: date.into(),
            direction,
            client_id: "c1".into(),
            product_id: "p1".into(),
            quantity,
            ..Default::default()
        }
    }

    #[test]
    fn only_current_month_counted() {
        let movements = vec![
            movement("2026-08-01", Direction::Inbound, 100.0),
            movement("2026-08-31", Direction::Outbound, 40.0),
            movement("2026-07-31", Direction::Inbound, 7.0),
            movement("2026-09-01", Direction::Inbound, 9.0),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();
        let stats = monthly_stats(&movements, today);
        assert_eq!(stats.inbound, 100.0);
        assert_eq!(stats.outbound, 40.0);
        assert_eq!(stats.movements, 2);
        // Stock total spans all months
        assert_eq!(stats.stock_total, 100.0 - 40.0 + 7.0 + 9.0);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let movements = vec![
            movement("2026-12-31", Direction::Inbound, 5.0),
            movement("2027-01-01", Direction::Inbound, 3.0),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 12, 10).unwrap();
        let stats = monthly_stats(&movements, today);
        assert_eq!(stats.movements, 1);
        assert_eq!(stats.inbound, 5.0);
    }
}
