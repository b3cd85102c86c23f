mod api;
mod model;

pub use model::{GroqModel, GroqModelOptions, DEFAULT_MODEL_ID};
