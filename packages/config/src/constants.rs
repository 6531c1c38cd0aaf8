// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used by Todo Tracker

// Runtime environment (test, development, production)
pub const TODOS_ENV: &str = "TODOS_ENV";

// Database location
pub const TODOS_DATA_DIR: &str = "TODOS_DATA_DIR";
pub const TODOS_DATABASE_URL: &str = "TODOS_DATABASE_URL";

// System Environment Variables
pub const HOME: &str = "HOME";

/// Directory under the home directory that holds the database files
pub const DEFAULT_DATA_DIR_NAME: &str = ".todos";
