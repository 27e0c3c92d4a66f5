//! Middleware modules.

pub mod error;
pub mod extractors;
pub mod translation;
pub mod translator;

pub use error::{AppError, AppResult};
pub use extractors::configure_extractors;
pub use translation::ErrorTranslation;
pub use translator::ErrorTranslator;
