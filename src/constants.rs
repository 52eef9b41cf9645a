//! Constants

pub(crate) const DEFAULT_ADDR: &str = "0.0.0.0:8000";
pub(crate) const DEFAULT_DATABASE_PORT: &str = "5432";
/// File-backed database used when no database server is configured.
pub(crate) const DEFAULT_SQLITE_URL: &str = "sqlite://main.db?mode=rwc";

pub(crate) const OPENWEATHER_CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

