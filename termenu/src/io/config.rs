//! Menu display style, optionally stored as a TOML file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Upper bound on `n_symbols`.
pub const MAX_N_SYMBOLS: usize = 1000;
/// Upper bound on the rendered border, in bytes.
pub const MAX_BORDER_BYTES: usize = 4096;

/// Display configuration of a [`Menu`](crate::menu::Menu).
///
/// Fixed when the menu is built. Missing fields default to the classic
/// look: a 15-character `_` border, `Select item` / `Wrong item number`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MenuStyle {
    /// Border symbol repeated above and below the title.
    pub symbol: String,

    /// How many times `symbol` is repeated.
    pub n_symbols: usize,

    /// Prompt shown when asking for an item number.
    pub select_prompt: String,

    /// Prefix of the line reported for an invalid item number.
    pub error_prompt: String,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            symbol: "_".to_string(),
            n_symbols: 15,
            select_prompt: "Select item".to_string(),
            error_prompt: "Wrong item number".to_string(),
        }
    }
}

impl MenuStyle {
    pub fn validate(&self) -> Result<()> {
        if self.select_prompt.trim().is_empty() {
            return Err(anyhow!("select_prompt must not be empty"));
        }
        if self.error_prompt.trim().is_empty() {
            return Err(anyhow!("error_prompt must not be empty"));
        }
        if self.n_symbols > MAX_N_SYMBOLS {
            return Err(anyhow!("n_symbols must be <= {MAX_N_SYMBOLS}"));
        }
        if self.symbol.len().saturating_mul(self.n_symbols) > MAX_BORDER_BYTES {
            return Err(anyhow!(
                "border (symbol x n_symbols) must be <= {MAX_BORDER_BYTES} bytes"
            ));
        }
        Ok(())
    }

    /// The border line: `symbol` repeated `n_symbols` times.
    pub fn border(&self) -> String {
        self.symbol.repeat(self.n_symbols)
    }
}

/// Load a style from a TOML file.
///
/// If the file is missing, returns `MenuStyle::default()`.
pub fn load_style(path: &Path) -> Result<MenuStyle> {
    if !path.exists() {
        return Ok(MenuStyle::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let style: MenuStyle =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    style
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(style)
}

/// Atomically write a style to disk (temp file + rename).
pub fn write_style(path: &Path, style: &MenuStyle) -> Result<()> {
    style.validate()?;
    let mut buf = toml::to_string_pretty(style).context("serialize style toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("style path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp style {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace style {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let style = load_style(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(style, MenuStyle::default());
        assert_eq!(style.border(), "_______________");
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested/style.toml");
        let style = MenuStyle {
            symbol: "=-".to_string(),
            n_symbols: 3,
            ..MenuStyle::default()
        };
        write_style(&path, &style).expect("write");
        let loaded = load_style(&path).expect("load");
        assert_eq!(loaded, style);
        assert_eq!(loaded.border(), "=-=-=-");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("style.toml");
        fs::write(&path, "symbol = \"*\"\n").expect("write");
        let style = load_style(&path).expect("load");
        assert_eq!(style.symbol, "*");
        assert_eq!(style.n_symbols, 15);
        assert_eq!(style.select_prompt, "Select item");
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("style.toml");
        fs::write(&path, "error_prompt = \"  \"\n").expect("write");
        let err = load_style(&path).unwrap_err();
        assert!(format!("{err:#}").contains("error_prompt must not be empty"));
    }

    #[test]
    fn oversized_border_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("style.toml");
        fs::write(&path, "n_symbols = 5000\n").expect("write");
        let err = load_style(&path).unwrap_err();
        assert!(format!("{err:#}").contains("n_symbols must be <= 1000"));

        let wide = MenuStyle {
            symbol: "=".repeat(10),
            n_symbols: MAX_N_SYMBOLS,
            ..MenuStyle::default()
        };
        let err = wide.validate().unwrap_err();
        assert!(err.to_string().starts_with("border"));

        let widest_allowed = MenuStyle {
            symbol: "==".to_string(),
            n_symbols: MAX_N_SYMBOLS,
            ..MenuStyle::default()
        };
        widest_allowed.validate().expect("2000 bytes fits");
    }

    #[test]
    fn malformed_toml_is_reported_with_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("style.toml");
        fs::write(&path, "n_symbols = \"many\"\n").expect("write");
        let err = load_style(&path).unwrap_err();
        assert!(err.to_string().starts_with("parse "));
    }
}
