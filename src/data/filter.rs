use crate::error::EmptyDatasetError;

use super::model::PropertyRecord;

// ---------------------------------------------------------------------------
// Filter predicate: vacancy flag and inclusive rent range
// ---------------------------------------------------------------------------

/// Inclusive rent interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentRange {
    pub min: u32,
    pub max: u32,
}

impl RentRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, rent: u32) -> bool {
        self.min <= rent && rent <= self.max
    }

    /// Keep `min <= max` after one end was moved, dragging the other end along.
    pub fn clamp_after_min_change(&mut self) {
        if self.min > self.max {
            self.max = self.min;
        }
    }

    pub fn clamp_after_max_change(&mut self) {
        if self.max < self.min {
            self.min = self.max;
        }
    }
}

/// Sidebar filter selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyFilter {
    pub vacancy_only: bool,
    pub rent_range: RentRange,
}

impl PropertyFilter {
    /// Filter that retains every record of a table with the given bounds.
    pub fn unfiltered(bounds: RentRange) -> Self {
        Self {
            vacancy_only: false,
            rent_range: bounds,
        }
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        (!self.vacancy_only || record.is_vacant) && self.rent_range.contains(record.monthly_rent)
    }
}

/// Min/max rent over the whole (unfiltered) table; these are the slider bounds.
pub fn rent_bounds(records: &[PropertyRecord]) -> Result<RentRange, EmptyDatasetError> {
    let min = records.iter().map(|r| r.monthly_rent).min().ok_or(EmptyDatasetError)?;
    let max = records.iter().map(|r| r.monthly_rent).max().ok_or(EmptyDatasetError)?;
    Ok(RentRange { min, max })
}

/// Return indices of records passing the filter, in table order.
pub fn filtered_indices(records: &[PropertyRecord], filter: &PropertyFilter) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(r))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregates and chart projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_revenue: i64,
    pub total_maintenance: i64,
    pub net_profit: i64,
}

impl Summary {
    /// Sum rent and maintenance over the given records. Empty input gives all zeros.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PropertyRecord>) -> Self {
        let (total_revenue, total_maintenance) =
            records.into_iter().fold((0i64, 0i64), |(rev, maint), r| {
                (
                    rev + i64::from(r.monthly_rent),
                    maint + i64::from(r.maintenance_cost),
                )
            });
        Summary {
            total_revenue,
            total_maintenance,
            net_profit: total_revenue - total_maintenance,
        }
    }
}

/// `(name, rent)` pairs for the bar chart, in table order.
pub fn chart_points<'a>(records: &'a [PropertyRecord], indices: &[usize]) -> Vec<(&'a str, u32)> {
    indices
        .iter()
        .filter_map(|&i| records.get(i))
        .map(|r| (r.name.as_str(), r.monthly_rent))
        .collect()
}
