//! Service-layer collaborators: spreadsheet fetch and workbook I/O

pub mod fetcher;
pub mod workbook;
