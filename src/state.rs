use crate::color::PropertyColors;
use crate::data::filter::{filtered_indices, rent_bounds, PropertyFilter, RentRange, Summary};
use crate::data::model::{PropertyRecord, SheetTable};
use crate::data::provider::PropertySource;
use crate::error::{CredentialError, LoadError};
use crate::sheets::{DocumentLocator, SheetLoader};

// ---------------------------------------------------------------------------
// List sheet section
// ---------------------------------------------------------------------------

/// Result of the last attempt to load the lookup list.
#[derive(Debug)]
pub enum ListStatus {
    NotLoaded,
    Loaded(SheetTable),
    Failed(LoadError),
}

/// Where the list comes from and what happened last time.
pub struct ListSection {
    /// `Err` when the credentials failed validation at startup.
    loader: Result<Box<dyn SheetLoader>, CredentialError>,
    pub locator: String,
    pub sheet_name: String,
    pub status: ListStatus,
}

impl ListSection {
    pub fn new(
        loader: Result<Box<dyn SheetLoader>, CredentialError>,
        locator: String,
        sheet_name: String,
    ) -> Self {
        Self {
            loader,
            locator,
            sheet_name,
            status: ListStatus::NotLoaded,
        }
    }

    /// Run the load to completion on the calling thread.
    pub fn reload(&mut self) {
        self.status = match self.fetch() {
            Ok(table) => {
                log::info!(
                    "Loaded sheet '{}' with {} rows, columns {:?}",
                    self.sheet_name,
                    table.len(),
                    table.columns
                );
                ListStatus::Loaded(table)
            }
            Err(e) => {
                if e.is_remote() {
                    log::error!("Failed to load sheet '{}': {e}", self.sheet_name);
                } else {
                    log::warn!("Sheet '{}' not loaded: {e}", self.sheet_name);
                }
                ListStatus::Failed(e)
            }
        };
    }

    fn fetch(&self) -> Result<SheetTable, LoadError> {
        let loader = match &self.loader {
            Ok(loader) => loader,
            Err(e) => return Err(e.clone().into()),
        };
        let document = DocumentLocator::parse(&self.locator)?;
        loader.load_sheet(&document, &self.sheet_name)
    }

    pub fn table(&self) -> Option<&SheetTable> {
        match &self.status {
            ListStatus::Loaded(table) => Some(table),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Property section
// ---------------------------------------------------------------------------

/// Base table, filter selections and the cached derived views.
pub struct PropertySection {
    source: Box<dyn PropertySource>,
    pub records: Vec<PropertyRecord>,
    /// Slider bounds; `None` when the base table is empty.
    pub bounds: Option<RentRange>,
    pub filter: PropertyFilter,
    pub visible_indices: Vec<usize>,
    pub summary: Summary,
    pub colors: PropertyColors,
}

impl PropertySection {
    pub fn new(source: Box<dyn PropertySource>) -> Self {
        let mut section = Self {
            source,
            records: Vec::new(),
            bounds: None,
            filter: PropertyFilter::unfiltered(RentRange::new(0, 0)),
            visible_indices: Vec::new(),
            summary: Summary::default(),
            colors: PropertyColors::default(),
        };
        section.reload();
        section
    }

    /// Pull the base table from the source and reset filters to its bounds.
    pub fn reload(&mut self) {
        self.records = self.source.properties();
        self.bounds = match rent_bounds(&self.records) {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                log::warn!("{e}; rent filter disabled");
                None
            }
        };
        let vacancy_only = self.filter.vacancy_only;
        self.filter = PropertyFilter {
            vacancy_only,
            rent_range: self.bounds.unwrap_or(RentRange::new(0, 0)),
        };
        self.colors = PropertyColors::new(self.records.iter().map(|r| r.name.as_str()));
        self.refilter();
    }

    /// Recompute `visible_indices` and the summary after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.records, &self.filter);
        self.summary = Summary::from_records(self.visible());
    }

    pub fn visible(&self) -> impl Iterator<Item = &PropertyRecord> + '_ {
        self.visible_indices.iter().map(|&i| &self.records[i])
    }

    pub fn set_vacancy_only(&mut self, on: bool) {
        self.filter.vacancy_only = on;
        self.refilter();
    }

    pub fn set_min_rent(&mut self, min: u32) {
        self.filter.rent_range.min = min;
        self.filter.rent_range.clamp_after_min_change();
        self.refilter();
    }

    pub fn set_max_rent(&mut self, max: u32) {
        self.filter.rent_range.max = max;
        self.filter.rent_range.clamp_after_max_change();
        self.refilter();
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. The two sections never
/// share failure state.
pub struct AppState {
    pub list: ListSection,
    pub properties: PropertySection,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(list: ListSection, properties: PropertySection) -> Self {
        Self {
            list,
            properties,
            status_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, SheetRow};
    use crate::data::provider::DemoProperties;
    use crate::error::RemoteAccessError;

    struct NoProperties;

    impl PropertySource for NoProperties {
        fn properties(&self) -> Vec<PropertyRecord> {
            Vec::new()
        }
    }

    struct FakeLoader(fn() -> Result<SheetTable, LoadError>);

    impl SheetLoader for FakeLoader {
        fn load_sheet(&self, _: &DocumentLocator, _: &str) -> Result<SheetTable, LoadError> {
            (self.0)()
        }
    }

    fn one_row_table() -> Result<SheetTable, LoadError> {
        let mut row = SheetRow::new();
        row.insert("code".into(), CellValue::String("Y1".into()));
        Ok(SheetTable {
            columns: vec!["code".into()],
            rows: vec![row],
        })
    }

    fn missing_document() -> Result<SheetTable, LoadError> {
        Err(RemoteAccessError::DocumentNotFound("abc".into()).into())
    }

    const SHEET: &str = "1hIToCx1ICTuIv9qA8PNx_y9R3xI-7cjWarr-5XOfGxg";

    #[test]
    fn test_property_section_starts_unfiltered() {
        let section = PropertySection::new(Box::new(DemoProperties));
        assert_eq!(section.bounds, Some(RentRange::new(55_000, 120_000)));
        assert_eq!(section.visible_indices, vec![0, 1, 2, 3]);
        assert_eq!(section.summary.net_profit, 314_000);
    }

    #[test]
    fn test_bounds_do_not_follow_vacancy_filter() {
        let mut section = PropertySection::new(Box::new(DemoProperties));
        section.set_vacancy_only(true);
        assert_eq!(section.visible_indices, vec![3]);
        assert_eq!(section.summary.total_revenue, 90_000);
        assert_eq!(section.bounds, Some(RentRange::new(55_000, 120_000)));
    }

    #[test]
    fn test_slider_clamping() {
        let mut section = PropertySection::new(Box::new(DemoProperties));
        section.set_max_rent(100_000);
        section.set_min_rent(80_000);
        assert_eq!(section.visible_indices, vec![3]);

        section.set_min_rent(110_000);
        assert_eq!(section.filter.rent_range, RentRange::new(110_000, 110_000));
        assert!(section.visible_indices.is_empty());
        assert_eq!(section.summary, Summary::default());
    }

    #[test]
    fn test_empty_property_source() {
        let section = PropertySection::new(Box::new(NoProperties));
        assert_eq!(section.bounds, None);
        assert!(section.visible_indices.is_empty());
        assert_eq!(section.summary, Summary::default());
    }

    #[test]
    fn test_list_loads_through_loader() {
        let mut list = ListSection::new(
            Ok(Box::new(FakeLoader(one_row_table))),
            SHEET.into(),
            "list".into(),
        );
        assert!(matches!(list.status, ListStatus::NotLoaded));
        list.reload();
        assert_eq!(list.table().map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_list_failure_is_kept_raw() {
        let mut list = ListSection::new(
            Ok(Box::new(FakeLoader(missing_document))),
            SHEET.into(),
            "list".into(),
        );
        list.reload();
        match &list.status {
            ListStatus::Failed(e) => assert!(e.is_remote()),
            other => panic!("unexpected status {other:?}"),
        }
        assert!(list.table().is_none());
    }

    #[test]
    fn test_startup_credential_error_reported_on_load() {
        let mut list = ListSection::new(Err(CredentialError::Missing), SHEET.into(), "list".into());
        list.reload();
        match &list.status {
            ListStatus::Failed(e) => assert!(e.is_credential()),
            other => panic!("unexpected status {other:?}"),
        }
        // Reloading reports it again.
        list.reload();
        assert!(matches!(list.status, ListStatus::Failed(LoadError::Credential(_))));
    }

    #[test]
    fn test_bad_locator_is_remote_error() {
        let mut list = ListSection::new(
            Ok(Box::new(FakeLoader(one_row_table))),
            "https://example.com/nothing".into(),
            "list".into(),
        );
        list.reload();
        assert!(matches!(
            list.status,
            ListStatus::Failed(LoadError::RemoteAccess(RemoteAccessError::InvalidLocator(_)))
        ));
    }

    #[test]
    fn test_sections_are_independent() {
        let list = ListSection::new(Err(CredentialError::Missing), SHEET.into(), "list".into());
        let mut state = AppState::new(list, PropertySection::new(Box::new(DemoProperties)));
        state.list.reload();
        assert!(matches!(state.list.status, ListStatus::Failed(_)));
        assert_eq!(state.properties.visible_indices.len(), 4);
    }
}
