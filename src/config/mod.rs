mod types;
mod loader;
mod defaults;
mod validation;

pub use types::*;
pub use loader::load_config;
pub use defaults::PRODUCTION_ENV_VAR;
pub use validation::validate_config;
