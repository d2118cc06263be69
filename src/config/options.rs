use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Automation library the generated script targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Library {
    #[default]
    Puppeteer,
    Playwright,
}

impl Library {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Puppeteer => "puppeteer",
            Self::Playwright => "playwright",
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Library {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "puppeteer" => Ok(Self::Puppeteer),
            "playwright" => Ok(Self::Playwright),
            other => Err(Error::Config(format!(
                "unknown library '{}', expected puppeteer or playwright",
                other
            ))),
        }
    }
}

/// Rendering options for one generation call.
///
/// Missing keys fall back to [`Options::default`]. Keys are snake_case, and
/// the recorder's camelCase spellings (`wrapAsync`, ...) are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Wrap the script in an async entry point.
    #[serde(alias = "wrapAsync")]
    pub wrap_async: bool,

    /// Launch the browser headless.
    pub headless: bool,

    /// Await a navigation promise where the recorder saw a navigation.
    #[serde(alias = "waitForNavigation")]
    pub wait_for_navigation: bool,

    /// Emit `waitForSelector` before every click.
    #[serde(alias = "waitForSelectorOnClick")]
    pub wait_for_selector_on_click: bool,

    /// Separate blocks with an empty line.
    #[serde(alias = "blankLinesBetweenBlocks")]
    pub blank_lines_between_blocks: bool,

    /// Preferred data attribute for selectors. Used by the recorder, carried here.
    #[serde(alias = "dataAttribute")]
    pub data_attribute: String,

    /// Output dialect.
    pub library: Library,

    /// Number of the first screenshot file.
    #[serde(alias = "screenshotOrigin")]
    pub screenshot_origin: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            wrap_async: true,
            headless: true,
            wait_for_navigation: true,
            wait_for_selector_on_click: true,
            blank_lines_between_blocks: true,
            data_attribute: String::new(),
            library: Library::Puppeteer,
            screenshot_origin: 0,
        }
    }
}

impl Options {
    /// Load options from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse options from a YAML string. An empty document is the baseline.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Options = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// Validate the options.
    fn validate(&self) -> Result<()> {
        if self
            .data_attribute
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '"')
        {
            return Err(Error::Config(format!(
                "data_attribute '{}' must not contain whitespace or quotes",
                self.data_attribute
            )));
        }
        Ok(())
    }
}
