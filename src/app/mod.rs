pub mod context;
pub mod error;

pub use context::{AppContext, Home};
pub use error::{BroadsheetError, Result};
