use serde::{Deserialize, Serialize};

use crate::models::{OtherCost, ProjectItem};

/// Aggregate figures derived from both collections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectTotals {
    pub items_total: f64,
    pub costs_total: f64,
    pub grand_total: f64,
    pub item_count: usize,
    pub cost_count: usize,
}

impl ProjectTotals {
    /// Recompute from the current contents. Empty input gives zero totals.
    pub fn compute(items: &[ProjectItem], costs: &[OtherCost]) -> Self {
        let items_total: f64 = items.iter().map(|i| i.cost).sum();
        let costs_total: f64 = costs.iter().map(|c| c.amount).sum();
        Self {
            items_total,
            costs_total,
            grand_total: items_total + costs_total,
            item_count: items.len(),
            cost_count: costs.len(),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.item_count + self.cost_count
    }
}

/// Format an amount with a currency symbol and two decimals: `$120.00`.
pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{currency}{amount:.2}")
}

/// `"1 item"`, `"3 items"`.
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreatedAt;

    fn item(cost: f64) -> ProjectItem {
        ProjectItem {
            id: format!("i{cost}"),
            name: "x".into(),
            cost,
            created_at: CreatedAt::Unknown,
        }
    }

    fn cost(amount: f64) -> OtherCost {
        OtherCost {
            id: format!("c{amount}"),
            description: "y".into(),
            amount,
            created_at: CreatedAt::Unknown,
        }
    }

    #[test]
    fn test_empty_collections_total_zero() {
        assert_eq!(ProjectTotals::compute(&[], &[]), ProjectTotals::default());
    }

    #[test]
    fn test_grand_total() {
        let totals = ProjectTotals::compute(&[item(50.0), item(30.0)], &[cost(20.0)]);
        assert_eq!(totals.items_total, 80.0);
        assert_eq!(totals.costs_total, 20.0);
        assert_eq!(totals.grand_total, 100.0);
        assert_eq!(totals.entry_count(), 3);
    }

    #[test]
    fn test_single_item_total() {
        let totals = ProjectTotals::compute(&[item(120.0)], &[]);
        assert_eq!(totals.items_total, 120.0);
        assert_eq!(totals.grand_total, 120.0);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_money(120.0, "$"), "$120.00");
        assert_eq!(format_money(1234.5, "€"), "€1234.50");
        assert_eq!(pluralize(1, "item"), "1 item");
        assert_eq!(pluralize(0, "cost"), "0 costs");
    }
}
