/// Database configuration and connection management
pub mod database;

/// Economy tables (jobs, variations, lottery) loaded from economy.toml
pub mod economy;

/// Deployment settings from environment variables
pub mod settings;
