use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Enables the LLM advisor. Without it, advice is rule-based.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub engine: EngineSettings,
    pub sample: SampleSettings,
}

/// Tunables for distribution lookups and advice retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Years either side of the requested experience for the primary compare query.
    pub experience_window: i32,
    /// Wider window used when the industry-scoped query finds nothing.
    pub broad_experience_window: i32,
    /// Minimum samples before a script distribution is narrowed by location or industry.
    pub min_script_sample: i64,
    pub knowledge_top_k: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            experience_window: 2,
            broad_experience_window: 3,
            min_script_sample: 5,
            knowledge_top_k: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleSettings {
    /// Seed the table with generated submissions at startup when it is empty.
    pub seed_on_startup: bool,
    pub records: usize,
    /// Fixed RNG seed for reproducible sample data. `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SampleSettings {
    fn default() -> Self {
        Self {
            seed_on_startup: true,
            records: 500,
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let engine_defaults = EngineSettings::default();
        let sample_defaults = SampleSettings::default();

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            engine: EngineSettings {
                experience_window: engine_defaults.experience_window,
                broad_experience_window: engine_defaults.broad_experience_window,
                min_script_sample: parse_env("MIN_SCRIPT_SAMPLE", engine_defaults.min_script_sample)?,
                knowledge_top_k: parse_env("KNOWLEDGE_TOP_K", engine_defaults.knowledge_top_k)?,
            },
            sample: SampleSettings {
                seed_on_startup: parse_env("SEED_SAMPLE_DATA", sample_defaults.seed_on_startup)?,
                records: parse_env("SAMPLE_RECORDS", sample_defaults.records)?,
                rng_seed: std::env::var("SAMPLE_SEED")
                    .ok()
                    .map(|s| s.parse::<u64>())
                    .transpose()
                    .context("SAMPLE_SEED must be an unsigned integer")?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("COUNTERMARKET_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("COUNTERMARKET_TEST_BAD_RECORDS", "many");
        let result: Result<usize> = parse_env("COUNTERMARKET_TEST_BAD_RECORDS", 500);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_reads_bool() {
        std::env::set_var("COUNTERMARKET_TEST_SEED_FLAG", "false");
        let value: bool = parse_env("COUNTERMARKET_TEST_SEED_FLAG", true).unwrap();
        assert!(!value);
    }

    #[test]
    fn test_defaults() {
        let engine = EngineSettings::default();
        assert_eq!(engine.experience_window, 2);
        assert_eq!(engine.min_script_sample, 5);
        assert_eq!(SampleSettings::default().records, 500);
    }
}
