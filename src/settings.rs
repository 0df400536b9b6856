use crate::args::Args;
use crate::core::{RenderLimit, ShellError};
use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const CONFIG_PATHS: [&str; 2] = ["/etc/sqlshell/sqlshell.toml", "./sqlshell.toml"];

/// Shell configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub create: bool,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_history")]
    pub history: bool,
    /// Schema name -> database path, attached at open.
    #[serde(default)]
    pub attach: BTreeMap<String, String>,
}

const fn default_limit() -> i64 { 200 }
const fn default_history() -> bool { true }

/// Everything needed to open a connection, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub database: String,
    pub create: bool,
    pub attach: BTreeMap<String, String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            database: None,
            create: false,
            limit: default_limit(),
            history: default_history(),
            attach: BTreeMap::new(),
        }
    }
}

impl ShellConfig {
    /// Load configuration with priority: CLI args > ENV > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ShellError> {
        Self::load_with(args, Self::environment())
    }

    // SQLSHELL_DATABASE, SQLSHELL_LIMIT, SQLSHELL_ATTACH_<SCHEMA>, ...
    fn environment() -> Environment {
        Environment::with_prefix("SQLSHELL")
            .separator("_")
            .try_parsing(true)
    }

    fn load_with(args: &Args, env: Environment) -> Result<Self, ShellError> {
        let mut builder = Config::builder();

        match &args.config {
            Some(path) => builder = builder.add_source(File::from(path.as_path())),
            None => {
                if let Some(path) = CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
                    debug!("loading config from {path}");
                    builder = builder.add_source(File::with_name(path));
                }
            }
        }

        let base: Self = builder.add_source(env).build()?.try_deserialize()?;
        Ok(base.merge(args))
    }

    fn merge(self, args: &Args) -> Self {
        Self {
            database: args.database.clone().or(self.database),
            create: args.create || self.create,
            limit: args.limit.unwrap_or(self.limit),
            ..self
        }
    }

    pub fn connection_settings(&self) -> Result<ConnectionSettings, ShellError> {
        let database = self
            .database
            .clone()
            .filter(|db| !db.trim().is_empty())
            .ok_or_else(|| ShellError::Configuration("database".to_string()))?;
        Ok(ConnectionSettings {
            database,
            create: self.create,
            attach: self.attach.clone(),
        })
    }

    #[must_use]
    pub fn render_limit(&self) -> RenderLimit {
        RenderLimit::from_signed(self.limit)
    }

    /// `~/.sqlshell_history` when history is enabled and a home directory exists.
    #[must_use]
    pub fn history_file(&self) -> Option<PathBuf> {
        if !self.history {
            return None;
        }
        dirs::home_dir().map(|mut p| {
            p.push(".sqlshell_history");
            p
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load(args: &Args, vars: &[(&str, &str)]) -> Result<ShellConfig, ShellError> {
        let vars = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ShellConfig::load_with(args, ShellConfig::environment().source(Some(vars)))
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_values_and_defaults() {
        let file = write_config("database = \"from_file.db\"\n");
        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let config = load(&args, &[]).unwrap();
        assert_eq!(config.database.as_deref(), Some("from_file.db"));
        assert_eq!(config.limit, 200);
        assert!(config.history);
        assert!(!config.create);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = write_config(
            "database = \"from_file.db\"\nlimit = 50\n\n[attach]\nhr = \"hr.db\"\n",
        );
        let args = Args {
            config: Some(file.path().to_path_buf()),
            database: Some("cli.db".to_string()),
            limit: Some(-1),
            create: true,
            ..Args::default()
        };
        let config = load(&args, &[("SQLSHELL_DATABASE", "env.db")]).unwrap();
        assert_eq!(config.database.as_deref(), Some("cli.db"));
        assert_eq!(config.render_limit(), RenderLimit::UNLIMITED);

        let settings = config.connection_settings().unwrap();
        assert!(settings.create);
        assert_eq!(settings.attach.get("hr").map(String::as_str), Some("hr.db"));
    }

    #[test]
    fn test_missing_database_is_configuration_error() {
        let config = ShellConfig::default();
        assert!(matches!(
            config.connection_settings(),
            Err(ShellError::Configuration(key)) if key == "database"
        ));

        let blank = ShellConfig {
            database: Some("  ".to_string()),
            ..ShellConfig::default()
        };
        assert!(blank.connection_settings().is_err());
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let args = Args {
            config: Some(PathBuf::from("/definitely/not/here/sqlshell.toml")),
            ..Args::default()
        };
        assert!(matches!(load(&args, &[]), Err(ShellError::Config(_))));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("database = \"from_file.db\"\nlimit = 50\n");
        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let config = load(&args, &[("SQLSHELL_DATABASE", "env.db"), ("SQLSHELL_LIMIT", "25")]).unwrap();
        assert_eq!(config.database.as_deref(), Some("env.db"));
        assert_eq!(config.limit, 25);
    }

    #[test]
    fn test_unrelated_env_is_ignored() {
        let file = write_config("");
        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let config = load(&args, &[("DATABASE", "stray.db"), ("OTHER_LIMIT", "7")]).unwrap();
        assert_eq!(config.database, None);
        assert_eq!(config.limit, 200);
    }

    #[test]
    fn test_history_can_be_disabled() {
        let config = ShellConfig {
            history: false,
            ..ShellConfig::default()
        };
        assert_eq!(config.history_file(), None);
    }
}
