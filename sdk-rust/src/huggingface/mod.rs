mod api;
mod model;

pub use model::{HuggingFaceModel, HuggingFaceModelOptions, DEFAULT_MODEL_ID};
