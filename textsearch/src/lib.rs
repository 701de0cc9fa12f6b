pub mod config;
pub mod errors;
pub mod filters;
pub mod request;
pub mod results;
pub mod search;

pub use config::{Settings, SettingsOverrides, SettingsSources};
pub use errors::{SearchError, SearchResult};
pub use request::{EncodingMode, SearchRequest, UnreadablePolicy};
pub use results::{FileHits, LineHit, SearchResult as SearchOutput};
pub use search::search;
