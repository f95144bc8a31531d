//! Resolution of the run configuration.
//!
//! Values come from CLI overrides, the `GITHUB_TOKEN` environment variable and a
//! YAML config file, in that order of precedence. Unusable string values are
//! reported as warnings and replaced by defaults; only malformed YAML and invalid
//! format patterns are hard errors.

use crate::core::cache::DEFAULT_CACHE_FILENAME;
use crate::core::diagnostics::Diagnostics;
use crate::core::dirs::{get_user_config_file, resolve_root, PROJECT_CONFIG_FILENAME};
use crate::core::error::{Result, StarlistError};
use crate::core::source::CatalogSource;
use crate::core::timestamp::{DateTimeConfig, LocaleFormatter, TimeZoneSetting};
use chrono::Locale;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILENAME: &str = "README.md";
pub const DEFAULT_LOCALE: &str = "en_US";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub format: Option<FormatSection>,
    #[serde(default)]
    pub output: Option<OutputSection>,
    #[serde(default)]
    pub stars: Option<StarsSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormatSection {
    #[serde(default)]
    pub date_time: Option<DateTimeSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateTimeSection {
    pub mode: Option<String>,
    pub time_zone: Option<String>,
    pub locale: Option<String>,
    pub date_style: Option<String>,
    pub time_style: Option<String>,
    pub hour12: Option<bool>,
    pub date_format: Option<String>,
    pub time_format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    pub filename: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StarsSection {
    pub source: Option<String>,
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub token: Option<String>,
    pub source: Option<CatalogSource>,
    pub output: Option<String>,
    pub config_path: Option<PathBuf>,
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: Option<String>,
    pub date_time: DateTimeConfig,
    pub output_filename: String,
    pub source: CatalogSource,
    pub stars_filename: String,
    pub root: PathBuf,
}

impl Config {
    /// Resolve against the current directory and environment.
    pub fn resolve(overrides: ConfigOverrides, diagnostics: &mut Diagnostics) -> Result<Self> {
        let root = match &overrides.root {
            Some(root) => root.clone(),
            None => resolve_root(&std::env::current_dir()?),
        };

        let file = match locate_config_file(&root, overrides.config_path.as_deref())? {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                load_file_config(&path)?
            }
            None => FileConfig::default(),
        };

        let env_token = std::env::var(TOKEN_ENV).ok();
        Self::from_parts(file, overrides, env_token, root, diagnostics)
    }

    pub fn from_parts(
        file: FileConfig,
        overrides: ConfigOverrides,
        env_token: Option<String>,
        root: PathBuf,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let token = overrides
            .token
            .or(env_token)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let date_time = resolve_date_time(
            file.format.and_then(|format| format.date_time),
            diagnostics,
        )?;

        let output_filename = overrides
            .output
            .or_else(|| {
                file.output
                    .and_then(|output| resolve_string("output.filename", output.filename, diagnostics))
            })
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILENAME.to_string());

        let source = match overrides.source {
            Some(source) => source,
            None => resolve_source(file.stars, diagnostics),
        };

        Ok(Self {
            token,
            date_time,
            output_filename,
            source,
            stars_filename: DEFAULT_CACHE_FILENAME.to_string(),
            root,
        })
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_filename)
    }

    pub fn stars_path(&self) -> PathBuf {
        self.root.join(&self.stars_filename)
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(StarlistError::MissingToken)
    }
}

fn locate_config_file(root: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(StarlistError::config_error(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let project = root.join(PROJECT_CONFIG_FILENAME);
    if project.is_file() {
        return Ok(Some(project));
    }

    let user = get_user_config_file()?;
    Ok(user.is_file().then_some(user))
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_file_config(&content).map_err(|e| StarlistError::config_parse_failed(path, e))
}

pub fn parse_file_config(content: &str) -> std::result::Result<FileConfig, serde_yaml_ng::Error> {
    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml_ng::from_str::<Option<FileConfig>>(content).map(Option::unwrap_or_default)
}

/// Trimmed value, or `None` with a warning when blank.
fn resolve_string(key: &str, value: Option<String>, diagnostics: &mut Diagnostics) -> Option<String> {
    let value = value?.trim().to_string();
    if value.is_empty() {
        diagnostics.warn(format!("{key} is invalid"));
        return None;
    }
    Some(value)
}

fn resolve_source(stars: Option<StarsSection>, diagnostics: &mut Diagnostics) -> CatalogSource {
    let Some(value) = stars.and_then(|s| resolve_string("stars.source", s.source, diagnostics)) else {
        return CatalogSource::default();
    };

    match value.parse() {
        Ok(source) => source,
        Err(_) => {
            diagnostics.warn("config.stars.source must be either api or file");
            CatalogSource::default()
        }
    }
}

fn resolve_date_time(
    section: Option<DateTimeSection>,
    diagnostics: &mut Diagnostics,
) -> Result<DateTimeConfig> {
    let Some(section) = section else {
        return Ok(DateTimeConfig::default());
    };

    let time_zone = resolve_string("time_zone", section.time_zone.clone(), diagnostics)
        .map(|zone| TimeZoneSetting::parse(&zone))
        .unwrap_or_default();

    let mode = resolve_string("mode", section.mode.clone(), diagnostics).map(|m| m.to_lowercase());
    let is_iso = match mode.as_deref() {
        Some("iso") => true,
        Some("locale") => false,
        Some(other) => {
            diagnostics.warn(format!("date_time mode {other} is not iso or locale"));
            !has_locale_options(&section)
        }
        None => !has_locale_options(&section) || section.locale.as_deref().map(str::trim) == Some("iso"),
    };

    if is_iso {
        return Ok(DateTimeConfig::Iso { time_zone });
    }

    let locale = resolve_locale(section.locale.clone(), diagnostics);
    let hour12 = section.hour12.unwrap_or(false);

    let date_pattern = match resolve_string("date_format", section.date_format.clone(), diagnostics) {
        Some(pattern) => pattern,
        None => date_style_pattern(
            resolve_string("date_style", section.date_style.clone(), diagnostics).as_deref(),
            diagnostics,
        ),
    };

    let time_pattern = match resolve_string("time_format", section.time_format.clone(), diagnostics) {
        Some(pattern) => pattern,
        None => time_style_pattern(
            resolve_string("time_style", section.time_style.clone(), diagnostics).as_deref(),
            hour12,
            diagnostics,
        ),
    };

    Ok(DateTimeConfig::Locale {
        date: LocaleFormatter::new(date_pattern, locale, time_zone)?,
        time: LocaleFormatter::new(time_pattern, locale, time_zone)?,
    })
}

fn has_locale_options(section: &DateTimeSection) -> bool {
    section.locale.is_some()
        || section.date_style.is_some()
        || section.time_style.is_some()
        || section.date_format.is_some()
        || section.time_format.is_some()
        || section.hour12.is_some()
}

fn resolve_locale(value: Option<String>, diagnostics: &mut Diagnostics) -> Locale {
    let name = resolve_string("locale", value, diagnostics).unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    let normalized = name.replace('-', "_");

    match Locale::try_from(normalized.as_str()) {
        Ok(locale) => locale,
        Err(_) => {
            diagnostics.warn(format!("locale {name} is not supported, using {DEFAULT_LOCALE}"));
            Locale::en_US
        }
    }
}

fn date_style_pattern(style: Option<&str>, diagnostics: &mut Diagnostics) -> String {
    match style {
        None | Some("short") => "%x",
        Some("medium") => "%e %b %Y",
        Some("long") => "%e %B %Y",
        Some("full") => "%A, %e %B %Y",
        Some(other) => {
            diagnostics.warn(format!("date_style {other} is not short, medium, long or full"));
            "%x"
        }
    }
    .to_string()
}

fn time_style_pattern(style: Option<&str>, hour12: bool, diagnostics: &mut Diagnostics) -> String {
    let base = match (style, hour12) {
        (None | Some("short"), false) => "%H:%M",
        (None | Some("short"), true) => "%I:%M %p",
        (Some("medium" | "long" | "full"), false) => "%H:%M:%S",
        (Some("medium" | "long" | "full"), true) => "%I:%M:%S %p",
        (Some(other), _) => {
            diagnostics.warn(format!("time_style {other} is not short, medium, long or full"));
            if hour12 {
                "%I:%M %p"
            } else {
                "%H:%M"
            }
        }
    };

    match style {
        Some("long" | "full") => format!("{base} %:z"),
        _ => base.to_string(),
    }
}
