//! Config file loading.
//!
//! ```toml
//! [grid]
//! rows = 10000
//! cols = 10000
//!
//! [formula]
//! column_decoding = "bijective" # or "legacy"
//! ```
//!
//! Problems never stop the program: they are returned as warnings and the
//! affected settings keep their defaults.

use directories::ProjectDirs;
use gridcalc_core::{ColumnDecoding, Extent, Settings};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    grid: Option<GridSection>,
    formula: Option<FormulaSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridSection {
    rows: Option<usize>,
    cols: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FormulaSection {
    column_decoding: Option<ColumnDecoding>,
}

/// Load settings from `config_file`, or from the user config dir when None.
/// A missing default file is not worth a warning; a missing explicit one is.
pub fn load_settings(config_file: Option<&PathBuf>) -> (Settings, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (Settings::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    let file = match read_config(&path) {
        Ok(file) => file,
        Err(warning) => {
            warnings.push(warning);
            return (Settings::default(), warnings);
        }
    };

    let settings = apply(file, &mut warnings);
    (settings, warnings)
}

fn read_config(path: &Path) -> Result<ConfigFile, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str::<ConfigFile>(&content)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn apply(file: ConfigFile, warnings: &mut Vec<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(grid) = file.grid {
        settings.extent = Extent::new(
            positive_or_default("grid.rows", grid.rows, settings.extent.rows, warnings),
            positive_or_default("grid.cols", grid.cols, settings.extent.cols, warnings),
        );
    }

    if let Some(decoding) = file.formula.and_then(|f| f.column_decoding) {
        settings.column_decoding = decoding;
    }

    settings
}

fn positive_or_default(
    key: &str,
    value: Option<usize>,
    default: usize,
    warnings: &mut Vec<String>,
) -> usize {
    match value {
        Some(0) => {
            warnings.push(format!("{} must be positive; using {}", key, default));
            default
        }
        Some(n) => n,
        None => default,
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridcalc")?;
    Some(proj.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn load(content: &str) -> (Settings, Vec<String>) {
        let file = write_config(content);
        load_settings(Some(&file.path().to_path_buf()))
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let (settings, warnings) = load("");
        assert_eq!(settings, Settings::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_full_config() {
        let (settings, warnings) = load(
            r#"
            [grid]
            rows = 500
            cols = 26

            [formula]
            column_decoding = "legacy"
            "#,
        );
        assert!(warnings.is_empty(), "{:?}", warnings);
        assert_eq!(settings.extent, Extent::new(500, 26));
        assert_eq!(settings.column_decoding, ColumnDecoding::Legacy);
    }

    #[test]
    fn test_partial_grid_section() {
        let (settings, _) = load("[grid]\nrows = 20\n");
        assert_eq!(settings.extent, Extent::new(20, 10_000));
    }

    #[test]
    fn test_zero_extent_warns() {
        let (settings, warnings) = load("[grid]\nrows = 0\n");
        assert_eq!(settings.extent.rows, 10_000);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("grid.rows must be positive"));
    }

    #[test]
    fn test_unknown_key_falls_back() {
        let (settings, warnings) = load("[grid]\nheight = 3\n");
        assert_eq!(settings, Settings::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse"));
    }

    #[test]
    fn test_bad_decoding_value() {
        let (settings, warnings) = load("[formula]\ncolumn_decoding = \"octal\"\n");
        assert_eq!(settings.column_decoding, ColumnDecoding::Bijective);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_explicit_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let (settings, warnings) = load_settings(Some(&path));
        assert_eq!(settings, Settings::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Config file not found"));
    }
}
