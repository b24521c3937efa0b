use std::path::PathBuf;

use dotenvy::dotenv;

use crate::errors::ApplicationError;

pub const DEFAULT_DB_PATH: &str = "./data/moodnotes.db";
pub const DEFAULT_STATIC_DIR: &str = "./ui/static";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub db_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    /// Read configuration from the environment, after loading `.env` if present
    pub fn from_env() -> Result<Self, ApplicationError> {
        dotenv().ok();

        let host = required("MOODNOTES_HOST")?;
        let port = required("MOODNOTES_PORT")?;
        let db_path =
            std::env::var("MOODNOTES_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let static_dir = std::env::var("MOODNOTES_STATIC_DIR")
            .unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());

        Ok(Config {
            host,
            port,
            db_path: PathBuf::from(db_path),
            static_dir: PathBuf::from(static_dir),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &str) -> Result<String, ApplicationError> {
    std::env::var(name).map_err(|e| ApplicationError::EnvError(e, name.to_string()))
}
