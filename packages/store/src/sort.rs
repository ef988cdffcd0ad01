//! # Display ordering for record lists
//!
//! Sorting never touches a [`crate::Collection`]; [`sorted`] returns a new
//! ordering of borrowed records. The comparator depends on the field kind:
//!
//! - text: case-folded comparison, lowercase before uppercase on ties
//!   ([`locale_compare`]);
//! - amounts: numeric, `NaN` compares equal;
//! - creation time: epoch milliseconds, unknown timestamps as epoch 0.
//!
//! Descending order reverses the comparator and keeps the stable sort, so
//! records with equal keys stay in collection order in both directions.
//!
//! A [`SortOption`] is encoded for select boxes as `"<field>-<direction>"`,
//! e.g. `"cost-desc"` or `"createdAt-asc"`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{OtherCost, ProjectItem};
use crate::record::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Error parsing a sort field or option from its select-box encoding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option: {0}")]
pub struct ParseSortError(String);

/// A record field that can order a list.
pub trait SortField: Copy + PartialEq + fmt::Debug + Sized + 'static {
    /// Every field, in selector order.
    const ALL: &'static [Self];

    fn key(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

/// A record kind with sortable fields.
pub trait Sortable: Record {
    type Field: SortField;

    fn compare_by(&self, other: &Self, field: Self::Field) -> Ordering;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemSortField {
    Name,
    Cost,
    CreatedAt,
}

impl SortField for ItemSortField {
    const ALL: &'static [Self] = &[Self::Name, Self::Cost, Self::CreatedAt];

    fn key(self) -> &'static str {
        match self {
            ItemSortField::Name => "name",
            ItemSortField::Cost => "cost",
            ItemSortField::CreatedAt => "createdAt",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CostSortField {
    Description,
    Amount,
    CreatedAt,
}

impl SortField for CostSortField {
    const ALL: &'static [Self] = &[Self::Description, Self::Amount, Self::CreatedAt];

    fn key(self) -> &'static str {
        match self {
            CostSortField::Description => "description",
            CostSortField::Amount => "amount",
            CostSortField::CreatedAt => "createdAt",
        }
    }
}

impl Sortable for ProjectItem {
    type Field = ItemSortField;

    fn compare_by(&self, other: &Self, field: ItemSortField) -> Ordering {
        match field {
            ItemSortField::Name => locale_compare(&self.name, &other.name),
            ItemSortField::Cost => compare_amounts(self.cost, other.cost),
            ItemSortField::CreatedAt => compare_created(self, other),
        }
    }
}

impl Sortable for OtherCost {
    type Field = CostSortField;

    fn compare_by(&self, other: &Self, field: CostSortField) -> Ordering {
        match field {
            CostSortField::Description => locale_compare(&self.description, &other.description),
            CostSortField::Amount => compare_amounts(self.amount, other.amount),
            CostSortField::CreatedAt => compare_created(self, other),
        }
    }
}

/// Field plus direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortOption<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> SortOption<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Column-header click: the same field flips direction, another field
    /// starts ascending.
    pub fn toggle(self, field: F) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self::asc(field)
        }
    }
}

impl<F: SortField> fmt::Display for SortOption<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field.key(), self.direction.as_str())
    }
}

impl<F: SortField> FromStr for SortOption<F> {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .rsplit_once('-')
            .ok_or_else(|| ParseSortError(s.to_string()))?;
        let field = F::from_key(field).ok_or_else(|| ParseSortError(s.to_string()))?;
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(ParseSortError(s.to_string())),
        };
        Ok(Self { field, direction })
    }
}

/// Selector entries for project items: (option, label).
pub fn item_sort_presets() -> Vec<(SortOption<ItemSortField>, &'static str)> {
    vec![
        (SortOption::asc(ItemSortField::Name), "Name (A-Z)"),
        (SortOption::desc(ItemSortField::Name), "Name (Z-A)"),
        (SortOption::asc(ItemSortField::Cost), "Cost (Low-High)"),
        (SortOption::desc(ItemSortField::Cost), "Cost (High-Low)"),
        (SortOption::desc(ItemSortField::CreatedAt), "Newest First"),
        (SortOption::asc(ItemSortField::CreatedAt), "Oldest First"),
    ]
}

/// Selector entries for other costs: (option, label).
pub fn cost_sort_presets() -> Vec<(SortOption<CostSortField>, &'static str)> {
    vec![
        (SortOption::asc(CostSortField::Description), "Description (A-Z)"),
        (SortOption::desc(CostSortField::Description), "Description (Z-A)"),
        (SortOption::asc(CostSortField::Amount), "Amount (Low-High)"),
        (SortOption::desc(CostSortField::Amount), "Amount (High-Low)"),
        (SortOption::desc(CostSortField::CreatedAt), "Newest First"),
        (SortOption::asc(CostSortField::CreatedAt), "Oldest First"),
    ]
}

/// Records in display order. The input slice is left as is.
pub fn sorted<'a, R: Sortable>(records: &'a [R], option: SortOption<R::Field>) -> Vec<&'a R> {
    let mut view: Vec<&R> = records.iter().collect();
    view.sort_by(|a, b| {
        let ord = a.compare_by(b, option.field);
        match option.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    view
}

/// Case-insensitive ordering; on a case-only difference lowercase sorts first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

fn compare_amounts(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

fn compare_created<R: Record>(a: &R, b: &R) -> Ordering {
    a.created_at().epoch_millis().cmp(&b.created_at().epoch_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreatedAt;
    use chrono::{TimeZone, Utc};

    fn item(id: &str, name: &str, cost: f64, created_ms: Option<i64>) -> ProjectItem {
        ProjectItem {
            id: id.into(),
            name: name.into(),
            cost,
            created_at: match created_ms {
                Some(ms) => CreatedAt::Server(Utc.timestamp_millis_opt(ms).unwrap()),
                None => CreatedAt::Unknown,
            },
        }
    }

    fn ids(records: &[&ProjectItem]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let items = vec![
            item("1", "nails", 5.0, None),
            item("2", "Lumber", 120.0, None),
            item("3", "anchors", 9.0, None),
        ];
        let view = sorted(&items, SortOption::asc(ItemSortField::Name));
        assert_eq!(ids(&view), vec!["3", "2", "1"]);
        // Input order is untouched.
        assert_eq!(items[0].id, "1");
    }

    #[test]
    fn test_toggle_reverses_distinct_keys() {
        let items = vec![
            item("1", "b", 30.0, Some(2_000)),
            item("2", "a", 10.0, Some(3_000)),
            item("3", "c", 20.0, Some(1_000)),
        ];
        for field in ItemSortField::ALL {
            let asc = SortOption::asc(*field);
            let desc = asc.toggle(*field);
            assert_eq!(desc.direction, SortDirection::Desc);

            let mut forward = ids(&sorted(&items, asc));
            forward.reverse();
            assert_eq!(forward, ids(&sorted(&items, desc)));
        }
    }

    #[test]
    fn test_ties_keep_collection_order_in_both_directions() {
        let items = vec![
            item("1", "x", 10.0, None),
            item("2", "y", 50.0, None),
            item("3", "z", 10.0, None),
        ];
        let asc = sorted(&items, SortOption::asc(ItemSortField::Cost));
        assert_eq!(ids(&asc), vec!["1", "3", "2"]);
        let desc = sorted(&items, SortOption::desc(ItemSortField::Cost));
        assert_eq!(ids(&desc), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_nan_cost_sorts_after_numbers() {
        let items = vec![
            item("1", "a", f64::NAN, None),
            item("2", "b", 30.0, None),
            item("3", "c", 10.0, None),
        ];
        let view = sorted(&items, SortOption::asc(ItemSortField::Cost));
        assert_eq!(ids(&view), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_unknown_timestamp_sorts_as_epoch() {
        let items = vec![item("1", "a", 1.0, Some(5_000)), item("2", "b", 1.0, None)];
        let view = sorted(&items, SortOption::asc(ItemSortField::CreatedAt));
        assert_eq!(ids(&view), vec!["2", "1"]);
    }

    #[test]
    fn test_toggle_other_field_starts_ascending() {
        let option = SortOption::desc(CostSortField::Amount).toggle(CostSortField::Description);
        assert_eq!(option, SortOption::asc(CostSortField::Description));
    }

    #[test]
    fn test_select_encoding() {
        let option: SortOption<ItemSortField> = "createdAt-desc".parse().unwrap();
        assert_eq!(option, SortOption::desc(ItemSortField::CreatedAt));
        assert_eq!(option.to_string(), "createdAt-desc");

        assert!("price-asc".parse::<SortOption<ItemSortField>>().is_err());
        assert!("name".parse::<SortOption<ItemSortField>>().is_err());
        assert!("amount-up".parse::<SortOption<CostSortField>>().is_err());

        for (option, _) in cost_sort_presets() {
            assert_eq!(option.to_string().parse::<SortOption<CostSortField>>(), Ok(option));
        }
    }

    #[test]
    fn test_locale_compare_case_ties() {
        assert_eq!(locale_compare("apple", "Apple"), Ordering::Less);
        assert_eq!(locale_compare("Apple", "banana"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }
}
