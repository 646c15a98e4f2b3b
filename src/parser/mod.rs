mod json;
mod validation;

pub use json::{load_config, load_config_or_default};
pub use validation::validate_config;
