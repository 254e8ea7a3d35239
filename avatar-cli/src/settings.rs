use std::path::Path;

use serde::Deserialize;

/// Settings of the command line driver itself. Cloudinary credentials are
/// read separately from the `CLOUDINARY_*` variables.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Upper bound for a single request to the API. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            log_filter: default_log_filter(),
        }
    }
}

/// Layers, lowest priority first: `avatar-cli.toml` in the working directory
/// (optional), the file given with `--config`, then `AVATAR_CLI_*` variables.
pub fn read_settings(config_file: Option<&Path>) -> Result<Settings, config::ConfigError> {
    let mut builder = config::Config::builder()
        .add_source(config::File::with_name("avatar-cli").required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("AVATAR_CLI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_without_any_source() {
        let settings = read_settings(None).unwrap();

        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn reads_explicit_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "timeout_secs = 15\nlog_filter = \"debug\"").unwrap();

        let settings = read_settings(Some(file.path())).unwrap();

        assert_eq!(settings.timeout_secs, Some(15));
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        assert!(read_settings(Some(Path::new("/no/such/avatar-cli.toml"))).is_err());
    }
}
