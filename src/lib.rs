pub mod causes;
pub mod error;
pub mod export;
pub mod fetch;
pub mod process;

pub use error::{Result, ScrapeError};

/// One accident/incident report as returned by the endpoint: field name
/// → scalar value. The schema is owned by the source API; the pipeline
/// only assumes the projected column subset is present.
pub type Record = serde_json::Map<String, serde_json::Value>;
