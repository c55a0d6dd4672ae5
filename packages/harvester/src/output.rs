//! Serialization of extraction results to JSON or YAML files.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;
use crate::types::Law;

/// Default output directory for harvested laws.
pub const DEFAULT_OUTPUT_DIR: &str = "boe";

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Serialize any value in the requested format.
///
/// JSON is pretty-printed with a trailing newline.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(value)?;
            text.push('\n');
            text
        }
        OutputFormat::Yaml => serde_yaml_ng::to_string(value)?,
    })
}

/// Write `content` to `path` via a temp file and rename.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    // Write to temp file first, then sync and rename for atomicity
    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Save a harvested law as `<output_base>/<boe_id>.<ext>`.
///
/// # Returns
/// Path of the written file
pub fn save_law(law: &Law, format: OutputFormat, output_base: Option<&Path>) -> Result<PathBuf> {
    let output_dir = output_base.unwrap_or(Path::new(DEFAULT_OUTPUT_DIR));
    fs::create_dir_all(output_dir)?;

    let output_file = output_dir.join(format!("{}.{}", law.boe_id, format.extension()));
    write_atomic(&output_file, &render(law, format)?)?;
    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractedArticle;
    use tempfile::tempdir;

    fn create_test_law() -> Law {
        Law {
            boe_id: "BOE-A-2015-10565".to_string(),
            url: "https://www.boe.es/buscar/act.php?id=BOE-A-2015-10565".to_string(),
            articles: vec![
                ExtractedArticle::new("1", Some("Objeto".to_string()), "Texto uno."),
                ExtractedArticle::new("DF", None, "Entrada en vigor."),
            ],
        }
    }

    #[test]
    fn test_render_json() {
        let json = render(&create_test_law(), OutputFormat::Json).unwrap();
        assert!(json.ends_with('\n'));
        let parsed: Law = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, create_test_law());
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&create_test_law(), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("boe_id: BOE-A-2015-10565"));
        assert!(yaml.contains("article_number: DF"));
        assert!(yaml.contains("title: null"));
    }

    #[test]
    fn test_save_law_creates_file() {
        let dir = tempdir().unwrap();
        let path = save_law(&create_test_law(), OutputFormat::Yaml, Some(dir.path())).unwrap();

        assert_eq!(path, dir.path().join("BOE-A-2015-10565.yaml"));
        assert!(path.exists());
        assert!(!dir.path().join(".BOE-A-2015-10565.yaml.tmp").exists());
    }

    #[test]
    fn test_save_law_overwrites() {
        let dir = tempdir().unwrap();
        save_law(&create_test_law(), OutputFormat::Json, Some(dir.path())).unwrap();

        let mut law = create_test_law();
        law.articles.truncate(1);
        let path = save_law(&law, OutputFormat::Json, Some(dir.path())).unwrap();

        let parsed: Law = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed.articles.len(), 1);
    }
}
