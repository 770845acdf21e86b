pub mod format;
pub mod panels;
pub mod plot;
pub mod tables;
