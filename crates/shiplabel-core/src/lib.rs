pub mod barcode;
pub mod check;
pub mod error;
pub mod orchestrator;
pub mod store;
pub mod test_util;
pub mod types;
pub mod writer;

pub use error::CoreError;
pub use types::{AccessKey, SourceDocumentId};
