mod handler;
pub mod model;

pub use handler::LanguageModelHandler;
pub use model::{Classification, Generation};
