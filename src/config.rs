use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        api_base_url: get_env_or_default("API_BASE_URL", "http://127.0.0.1:8000"),
        web_host: get_env_or_default("WEB_HOST", "127.0.0.1"),
        web_port: get_env_or_default("WEB_PORT", "3000")
            .parse()
            .unwrap_or(DEFAULT_WEB_PORT),
    }
});

const DEFAULT_WEB_PORT: u16 = 3000;

pub struct Config {
    /// Where the planner API lives; `/api/search` is appended.
    pub api_base_url: String,
    pub web_host: String,
    pub web_port: u16,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
