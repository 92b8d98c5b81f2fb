//! File-backed storage adapters.
//!
//! Every collection is one file that is rewritten as a whole on save.

mod file_io;
mod json_active_store;
mod line_name_store;
mod record_source;

pub use json_active_store::JsonActiveDomainStore;
pub use line_name_store::LineNameListStore;
pub use record_source::FileRecordTemplateSource;
