use std::env;
use std::path::{Path, PathBuf};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

pub const REVIEWS_FILE: &str = "Final_Cleaned_Tourist_Reviews.csv";
pub const ACTIVITIES_FILE: &str = "Rural_Activities_Expanded.csv";
pub const DB_FILE: &str = "tourism.db";
pub const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub reviews_path: PathBuf,
    pub activities_path: PathBuf,
    /// SQLite location for the review cache, or `:memory:`.
    pub db_path: String,
}

impl AppConfig {
    /// Config rooted at `data_dir` with the default file names.
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            host: HOST.to_string(),
            port: PORT,
            reviews_path: data_dir.join(REVIEWS_FILE),
            activities_path: data_dir.join(ACTIVITIES_FILE),
            db_path: data_dir.join(DB_FILE).to_string_lossy().into_owned(),
            data_dir,
        }
    }

    pub fn from_env() -> Self {
        let data_dir = env::var("TRAVELPULSE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let mut config = Self::for_data_dir(data_dir);

        config.host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
        config.port = env::var("PORT")
            .unwrap_or_else(|_| PORT.to_string())
            .parse()
            .unwrap_or(PORT);

        if let Ok(name) = env::var("TRAVELPULSE_REVIEWS_FILE") {
            config.reviews_path = config.data_dir.join(name);
        }
        if let Ok(name) = env::var("TRAVELPULSE_ACTIVITIES_FILE") {
            config.activities_path = config.data_dir.join(name);
        }
        if let Ok(db_path) = env::var("TRAVELPULSE_DB_PATH") {
            config.db_path = db_path;
        }

        config
    }
}

/// Directory holding the running executable, so data files sit next to the app.
fn default_data_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
