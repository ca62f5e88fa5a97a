//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// File names checked in the working directory, in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["multifill.toml", ".multifill.toml"];

/// Prefix of environment variable overrides (`MULTIFILL_OUTPUT__FORMAT=json`)
const ENV_PREFIX: &str = "MULTIFILL_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `MULTIFILL_` environment variables (`__` separates nested keys)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./multifill.toml` or `./.multifill.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/multifill/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/multifill/config.toml if set,
    /// otherwise falls back to the platform config directory
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("multifill").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [  ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let status = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:^7}] Explicit: {}", status, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [ FOUND ] Project: {}", path.display());
        } else {
            println!("  [       ] Project: ./multifill.toml or ./.multifill.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [ FOUND ] Global:  {}", path.display());
            } else {
                println!("  [       ] Global:  {}", path.display());
            }
        }

        println!("  [       ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use multifill_domain::OutputFormat;

    /// Point the global config lookup into the jail
    fn isolate(jail: &mut Jail) {
        let dir = jail.directory().to_path_buf();
        jail.set_env("XDG_CONFIG_HOME", dir.display());
    }

    fn load(config_path: Option<&PathBuf>) -> figment::error::Result<FileConfig> {
        ConfigLoader::load(config_path).map_err(|e| *e)
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.tasks.root, PathBuf::from("tasks"));
        assert_eq!(config.tasks.descriptor, "task.yaml");
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let path = ConfigLoader::global_config_path().expect("config dir");
            assert!(path.ends_with("multifill/config.toml"));
            Ok(())
        });
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            assert_eq!(load(None)?, FileConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_project_file_overrides_global() {
        Jail::expect_with(|jail| {
            isolate(jail);
            std::fs::create_dir("multifill").map_err(|e| e.to_string())?;
            jail.create_file(
                "multifill/config.toml",
                r#"
                [tasks]
                root = "/global/tasks"
                descriptor = "task.toml"
                "#,
            )?;
            jail.create_file(
                ".multifill.toml",
                r#"
                [tasks]
                root = "course"
                "#,
            )?;

            let config = load(None)?;
            assert_eq!(config.tasks.root, PathBuf::from("course"));
            assert_eq!(config.tasks.descriptor, "task.toml");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_project() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("multifill.toml", "[output]\nformat = \"json\"\n")?;
            jail.create_file("other.toml", "[output]\nformat = \"text\"\ncolor = false\n")?;

            let explicit = PathBuf::from("other.toml");
            let config = load(Some(&explicit))?;
            assert_eq!(config.output.format, OutputFormat::Text);
            assert!(!config.output.color);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("multifill.toml", "[output]\nformat = \"text\"\n")?;
            jail.set_env("MULTIFILL_OUTPUT__FORMAT", "json");
            jail.set_env("MULTIFILL_TASKS__DESCRIPTOR", "task.json");

            let config = load(None)?;
            assert_eq!(config.output.format, OutputFormat::Json);
            assert_eq!(config.tasks.descriptor, "task.json");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("multifill.toml", "[output]\nformat = \"html\"\n")?;
            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }
}
