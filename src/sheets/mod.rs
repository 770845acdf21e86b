//! Google Sheets access: service-account auth, locator parsing, and the
//! blocking REST client that materialises a worksheet as records.

pub mod auth;
pub mod client;
pub mod locator;
pub mod records;

#[cfg(test)]
mod test_helpers;

use crate::data::model::SheetTable;
use crate::error::LoadError;

pub use locator::DocumentLocator;

/// Load every record of `sheet_name` in the given spreadsheet.
pub trait SheetLoader {
    fn load_sheet(
        &self,
        document: &DocumentLocator,
        sheet_name: &str,
    ) -> Result<SheetTable, LoadError>;
}
