use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};

use imgup::SettingsSource;

const CONFIG_DIR_NAME: &str = "imgup";
const SETTINGS_FILE_STEM: &str = "settings";

/// Settings store backed by a single JSON or YAML file.
///
/// The file must contain a top-level mapping; each provider reads its own
/// section out of it, eg:
///
/// ```yaml
/// r2:
///   accountId: "..."
///   bucketName: images
///   uploadDir: img
///   publicDomain: https://cdn.example.com
/// ```
///
/// The file is re-read on every call. A missing file simply means no
/// sections are present.
#[derive(Debug, Clone)]
pub struct FsSettingsStore {
    path: PathBuf,
}

impl FsSettingsStore {
    fn default_config_dir() -> Result<PathBuf, anyhow::Error> {
        let home = std::env::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".config").join(CONFIG_DIR_NAME))
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Use the first of `settings.json` / `settings.yaml` / `settings.yml`
    /// under `~/.config/imgup/` that exists, defaulting to the YAML name.
    pub fn new_default() -> Result<Self, anyhow::Error> {
        let dir = Self::default_config_dir()?;

        for ext in ["json", "yaml", "yml"] {
            let candidate = dir.join(format!("{SETTINGS_FILE_STEM}.{ext}"));
            if candidate.is_file() {
                return Ok(Self { path: candidate });
            }
        }
        Ok(Self {
            path: dir.join(format!("{SETTINGS_FILE_STEM}.yaml")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(path: &Path, contents: &str) -> Result<serde_json::Value, anyhow::Error> {
        let ext = path
            .extension()
            .context("settings file does not have an extension")?
            .to_str()
            .context("settings file extension is not valid UTF-8")?;

        let value = match ext {
            "json" => serde_json::from_str::<serde_json::Value>(contents)
                .context("Failed to parse JSON settings")?,
            "yaml" | "yml" => serde_yaml::from_str::<serde_json::Value>(contents)
                .context("Failed to parse YAML settings")?,
            _ => bail!("Unsupported settings file extension: '{}'", ext),
        };

        Ok(value)
    }
}

impl SettingsSource for FsSettingsStore {
    fn read_section(&self, section: &str) -> Result<Option<serde_json::Value>, anyhow::Error> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read settings file: '{}'", self.path.display())
                });
            }
        };

        let value = Self::parse(&self.path, &contents)?;
        let serde_json::Value::Object(mut map) = value else {
            bail!(
                "Invalid settings file '{}': expected a top-level mapping",
                self.path.display()
            );
        };

        Ok(map.remove(section))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_read_section_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"r2": {"accountId": "acc123"}}"#).unwrap();

        let store = FsSettingsStore::new(path);
        assert_eq!(
            store.read_section("r2").unwrap(),
            Some(json!({"accountId": "acc123"}))
        );
        assert_eq!(store.read_section("other").unwrap(), None);
    }

    #[test]
    fn test_read_section_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "r2:\n  accountId: acc123\n  uploadDir: img\n").unwrap();

        let store = FsSettingsStore::new(path);
        assert_eq!(
            store.read_section("r2").unwrap(),
            Some(json!({"accountId": "acc123", "uploadDir": "img"}))
        );
    }

    #[test]
    fn test_missing_file_means_no_sections() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSettingsStore::new(dir.path().join("settings.yaml"));
        assert_eq!(store.read_section("r2").unwrap(), None);
    }

    #[test]
    fn test_edits_are_visible_on_next_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FsSettingsStore::new(path.clone());

        std::fs::write(&path, r#"{"r2": {"uploadDir": "img"}}"#).unwrap();
        assert_eq!(
            store.read_section("r2").unwrap(),
            Some(json!({"uploadDir": "img"}))
        );

        std::fs::write(&path, r#"{"r2": {"uploadDir": "pics"}}"#).unwrap();
        assert_eq!(
            store.read_section("r2").unwrap(),
            Some(json!({"uploadDir": "pics"}))
        );
    }

    #[test]
    fn test_non_mapping_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FsSettingsStore::new(path);
        assert!(store.read_section("r2").is_err());
    }
}
