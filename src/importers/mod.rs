//! Bulk importers that feed articles into the store without touching the
//! site.

pub mod spreadsheet;
