// Copyright 2025 Oxide Computer Company

//! The optional configuration file

use anyhow::Context;
use camino::Utf8Path;
use oas_contract::{ConfigLogging, ConfigVerifier};
use serde::Deserialize;

/// Contents of the file named by `--config`
///
/// Both tables are optional.  An empty file (or no file) gives exact
/// constraint matching and warnings logged to stderr.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub verifier: ConfigVerifier,
    #[serde(default)]
    pub log: ConfigLogging,
}

impl ConfigFile {
    pub fn from_file(path: &Utf8Path) -> anyhow::Result<ConfigFile> {
        let contents = fs_err::read_to_string(path)?;
        toml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path))
    }
}

#[cfg(test)]
mod test {
    use super::ConfigFile;
    use camino::Utf8PathBuf;
    use oas_contract::{ConfigLogging, ConfigLoggingLevel, ConstraintPolicy};

    fn write_config(contents: &str) -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path =
            Utf8PathBuf::try_from(dir.path().join("config.toml")).unwrap();
        fs_err::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_config_empty() {
        let (_dir, path) = write_config("");
        let config = ConfigFile::from_file(&path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_config_full() {
        let (_dir, path) = write_config(
            r#"
            [verifier]
            constraint_policy = "allow-relaxation"

            [log]
            mode = "stderr-terminal"
            level = "debug"
            "#,
        );
        let config = ConfigFile::from_file(&path).unwrap();
        assert_eq!(
            config.verifier.constraint_policy,
            ConstraintPolicy::AllowRelaxation
        );
        assert_eq!(
            config.log,
            ConfigLogging::StderrTerminal { level: ConfigLoggingLevel::Debug }
        );
    }

    #[test]
    fn test_config_errors() {
        let (_dir, path) = write_config("[verifyer]\n");
        let error = ConfigFile::from_file(&path).unwrap_err();
        let message = format!("{:#}", error);
        assert!(message.starts_with("parsing config file "), "{}", message);
        assert!(message.contains("unknown field `verifyer`"), "{}", message);

        let missing = path.with_file_name("nope.toml");
        let error = ConfigFile::from_file(&missing).unwrap_err();
        assert!(format!("{:#}", error).contains("nope.toml"), "{:#}", error);
    }
}
