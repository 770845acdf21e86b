use chrono::NaiveDate;

use super::model::PropertyRecord;

/// Supplies the property table shown in the rental section.
pub trait PropertySource {
    fn properties(&self) -> Vec<PropertyRecord>;
}

/// Fixed demo portfolio used until a real source is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProperties;

type DemoRow = (&'static str, u32, u32, &'static str, (i32, u32, u32), bool);

const DEMO_ROWS: [DemoRow; 4] = [
    ("A Heights", 75_000, 5_000, "Tanaka", (2023, 4, 1), false),
    ("B Mansion", 120_000, 10_000, "Sato", (2022, 11, 15), false),
    ("C Corpo", 55_000, 3_000, "Yamamoto", (2024, 1, 1), false),
    ("D Heights", 90_000, 8_000, "Ito", (2023, 7, 20), true),
];

impl PropertySource for DemoProperties {
    fn properties(&self) -> Vec<PropertyRecord> {
        DEMO_ROWS.iter().filter_map(demo_record).collect()
    }
}

/// Build one record; a row whose lease date does not exist is logged and
/// left out.
fn demo_record(row: &DemoRow) -> Option<PropertyRecord> {
    let &(name, rent, maintenance, tenant, (y, m, d), vacant) = row;
    let Some(lease_start_date) = NaiveDate::from_ymd_opt(y, m, d) else {
        log::error!("Demo property '{name}' has invalid lease start {y}-{m:02}-{d:02}; skipped");
        return None;
    };
    Some(PropertyRecord {
        name: name.to_string(),
        monthly_rent: rent,
        maintenance_cost: maintenance,
        tenant_name: tenant.to_string(),
        lease_start_date,
        is_vacant: vacant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_properties() {
        let props = DemoProperties.properties();
        assert_eq!(props.len(), 4);
        let rents: Vec<u32> = props.iter().map(|p| p.monthly_rent).collect();
        assert_eq!(rents, vec![75_000, 120_000, 55_000, 90_000]);
        assert_eq!(
            props.iter().filter(|p| p.is_vacant).map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["D Heights"]
        );
        assert_eq!(
            props[1].lease_start_date,
            NaiveDate::from_ymd_opt(2022, 11, 15).unwrap()
        );
    }

    #[test]
    fn test_invalid_lease_date_is_skipped() {
        let row: DemoRow = ("E Court", 60_000, 4_000, "Kato", (2023, 2, 30), false);
        assert_eq!(demo_record(&row), None);
        assert!(demo_record(&DEMO_ROWS[0]).is_some());
    }
}
