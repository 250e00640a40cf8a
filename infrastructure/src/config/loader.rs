//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "crew-pipeline";
const PROJECT_FILES: [&str; 2] = ["crew-pipeline.toml", ".crew-pipeline.toml"];
const ENV_PREFIX: &str = "CREW_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CREW_` environment variables, `__` separating section and key
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./crew-pipeline.toml` or `./.crew-pipeline.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/crew-pipeline/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();

        Self::layered(global.as_deref(), project.as_deref(), config_path.map(|p| p.as_path()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// File layers on top of the defaults, lowest priority first.
    fn layered(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/crew-pipeline/config.toml if set,
    /// otherwise falls back to ~/.config/crew-pipeline/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] Variables: {}<SECTION>__<KEY>", ENV_PREFIX);

        // Project config
        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]);
        }

        // Global config
        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.execution.max_tool_turns, 10);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("crew-pipeline"));
    }

    #[test]
    fn test_later_layers_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(
            &global,
            "[llm]\nmodel = \"gemini-2.5-pro\"\ntemperature = 0.2\n",
        )
        .unwrap();
        fs::write(&explicit, "[llm]\ntemperature = 0.9\n").unwrap();

        let config: FileConfig = ConfigLoader::layered(Some(&global), None, Some(&explicit))
            .extract()
            .unwrap();

        // Model from the global file survives, temperature is overridden
        assert_eq!(config.llm.model, "gemini-2.5-pro");
        assert_eq!(config.llm.temperature, 0.9);
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[llm\nmodel = ").unwrap();

        let result: Result<FileConfig, _> =
            ConfigLoader::layered(None, None, Some(&path)).extract();
        assert!(result.is_err());
    }
}
