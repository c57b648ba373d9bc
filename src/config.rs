use crate::error::{AdvisorError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub advisory: AdvisoryConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdvisoryConfig {
    /// Path to the static JSON rule table.
    pub rules_file: PathBuf,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            rules_file: PathBuf::from("data/rules.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    pub cache_ttl_minutes: i64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            cache_ttl_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".into(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AdvisorError::Config(format!(
                "Config file not found at {:?}. Run `agriadvisor init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AdvisorError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| AdvisorError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("agriadvisor").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| AdvisorError::Config("Cannot determine config directory".into()))?
            .join("agriadvisor")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AdvisorError::Config("Cannot determine config directory".into()))?
            .join("agriadvisor");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up AgriAdvisor!");
        println!();

        let rules_file: String = Input::new()
            .with_prompt("  Rule table path")
            .default("data/rules.json".into())
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        let cache_ttl_minutes: i64 = Input::new()
            .with_prompt("  Weather cache TTL (minutes)")
            .default(30)
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        let bind: String = Input::new()
            .with_prompt("  HTTP bind address")
            .default("127.0.0.1:8080".into())
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            advisory: AdvisoryConfig {
                rules_file: PathBuf::from(rules_file),
            },
            weather: WeatherConfig { cache_ttl_minutes },
            server: ServerConfig { bind },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AdvisorError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# AgriAdvisor Configuration\n# Generated by `agriadvisor init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Directory for cache, snapshot, and feedback files.
    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("AGRIADVISOR_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AdvisorError::Config("Cannot determine data directory".into()))?
            .join("agriadvisor");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }
}
