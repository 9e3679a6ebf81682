//! Configuration file loading.
//!
//! The configuration names the two frameworks to compare, where their source
//! and test code live, and the run options:
//!
//! ```toml
//! [framework1]
//! name = "Backbone"
//! [framework1.src]
//! path = "./example/javascripts/"
//! filetypes = [".js", ".handlebars", ".json"]
//! exclude = "test"
//! [framework1.test]
//! path = "./example/tests/"
//! filetypes = [".js"]
//! includeOnly = "overview"
//!
//! [framework2]
//! name = "React"
//! [framework2.src]
//! path = "./example/react/src/"
//! filetypes = [".js"]
//!
//! [options]
//! modules = ["Cell", "Header"]
//! outputFilename = "./out/stats-out.json"
//! sort = true
//! unconditionalLoc = true
//! ```
//!
//! Paths are used as written, so relative paths resolve against the
//! current working directory, not the config file.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::UistatError;
use crate::options::{Category, FrameworkId, RunOptions};
use crate::source::{Filetypes, PathFilter};
use crate::Result;

/// Where one category of a framework lives and how to filter it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryConfig {
    pub path: PathBuf,
    /// Allowed extensions, with or without the leading dot
    #[serde(default)]
    pub filetypes: Vec<String>,
    /// Regular expression; matching paths are not counted
    #[serde(default)]
    pub exclude: Option<String>,
    /// Regular expression; only matching paths are counted
    #[serde(default)]
    pub include_only: Option<String>,
}

impl CategoryConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            filetypes: Vec::new(),
            exclude: None,
            include_only: None,
        }
    }

    /// Builder: set allowed filetypes
    pub fn filetypes<I, S>(mut self, filetypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filetypes = filetypes.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the exclude pattern
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    /// Builder: set the include-only pattern
    pub fn include_only(mut self, pattern: impl Into<String>) -> Self {
        self.include_only = Some(pattern.into());
        self
    }

    /// Compile the exclude / include-only patterns.
    pub fn path_filter(&self) -> Result<PathFilter> {
        PathFilter::new(self.exclude.as_deref(), self.include_only.as_deref())
    }

    pub fn allowed_filetypes(&self) -> Filetypes {
        Filetypes::new(&self.filetypes)
    }
}

/// One of the two compared codebases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FrameworkConfig {
    pub name: String,
    pub src: CategoryConfig,
    #[serde(default)]
    pub test: Option<CategoryConfig>,
}

impl FrameworkConfig {
    pub fn new(name: impl Into<String>, src: CategoryConfig) -> Self {
        Self {
            name: name.into(),
            src,
            test: None,
        }
    }

    /// Builder: set the test category
    pub fn test(mut self, test: CategoryConfig) -> Self {
        self.test = Some(test);
        self
    }

    /// Configuration for a category, if it is configured.
    pub fn category(&self, category: Category) -> Option<&CategoryConfig> {
        match category {
            Category::Src => Some(&self.src),
            Category::Test => self.test.as_ref(),
        }
    }
}

/// The `[options]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ConfigOptions {
    /// Substrings selecting which modules of the bundler report to track
    pub modules: Option<Vec<String>>,
    /// Where to write the stats report
    pub output_filename: Option<PathBuf>,
    pub silent: bool,
    /// Sort module usage by count, descending
    pub sort: bool,
    pub subdirectories: bool,
    pub unconditional_loc: bool,
    /// Bundler module report to read
    pub webpack_stats_file: Option<PathBuf>,
    /// Where to write the module usage report
    pub webpack_stats_output_filename: Option<PathBuf>,
}

/// A complete configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatsConfig {
    pub framework1: FrameworkConfig,
    pub framework2: FrameworkConfig,
    #[serde(default)]
    pub options: ConfigOptions,
}

impl StatsConfig {
    pub fn new(framework1: FrameworkConfig, framework2: FrameworkConfig) -> Self {
        Self {
            framework1,
            framework2,
            options: ConfigOptions::default(),
        }
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| UistatError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&contents, path)
    }

    /// Parse configuration text; `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: impl AsRef<Path>) -> Result<Self> {
        toml::from_str(contents).map_err(|e| UistatError::ConfigParse {
            path: origin.as_ref().to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn framework(&self, id: FrameworkId) -> &FrameworkConfig {
        match id {
            FrameworkId::Framework1 => &self.framework1,
            FrameworkId::Framework2 => &self.framework2,
        }
    }

    /// Run options derived from the `[options]` table.
    pub fn run_options(&self) -> RunOptions {
        RunOptions::new()
            .with_subdirectories(self.options.subdirectories)
            .with_unconditional_loc(self.options.unconditional_loc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const EXAMPLE: &str = r#"
[framework1]
name = "Backbone"
[framework1.src]
path = "./example/javascripts/"
filetypes = [".js", ".handlebars", ".json"]
exclude = "test"
[framework1.test]
path = "./example/tests/"
filetypes = [".js", ".handlebars", ".json"]
includeOnly = "overview"

[framework2]
name = "React"
[framework2.src]
path = "./example/react/src/"
filetypes = [".js", ".json"]
[framework2.test]
path = "./example/react/test/"
filetypes = [".js", ".json"]

[options]
modules = ["Cell", "Header"]
outputFilename = "./out/stats-out.json"
silent = false
sort = true
subdirectories = false
unconditionalLoc = true
webpackStatsFile = "./example/webpack-stats-example.json"
webpackStatsOutputFilename = "./out/webpack-stats-out.json"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = StatsConfig::parse(EXAMPLE, "stats.toml").unwrap();

        assert_eq!(config.framework1.name, "Backbone");
        assert_eq!(config.framework1.src.exclude.as_deref(), Some("test"));
        assert_eq!(
            config
                .framework1
                .test
                .as_ref()
                .and_then(|t| t.include_only.as_deref()),
            Some("overview")
        );
        assert_eq!(config.framework(FrameworkId::Framework2).name, "React");
        assert_eq!(
            config.options.modules,
            Some(vec!["Cell".to_string(), "Header".to_string()])
        );
        assert!(config.options.sort);
        assert!(config.options.unconditional_loc);
        assert_eq!(
            config.options.webpack_stats_output_filename,
            Some(PathBuf::from("./out/webpack-stats-out.json"))
        );

        let run = config.run_options();
        assert!(run.unconditional_loc);
        assert!(!run.subdirectories);
    }

    #[test]
    fn test_demo_config_parses() {
        let demo = include_str!("../../demos/stats.example.toml");
        let config = StatsConfig::parse(demo, "stats.example.toml").unwrap();

        assert_eq!(config.framework1.src.exclude.as_deref(), Some("_spec\\.js$"));
        assert!(config.framework1.src.path_filter().is_ok());
        assert!(config.options.webpack_stats_file.is_some());
    }

    #[test]
    fn test_options_are_optional() {
        let config = StatsConfig::parse(
            r#"
[framework1]
name = "A"
src = { path = "a" }
[framework2]
name = "B"
src = { path = "b" }
"#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.options, ConfigOptions::default());
        assert!(config.framework1.test.is_none());
        assert!(config.framework1.category(Category::Test).is_none());
        assert!(config.framework1.src.filetypes.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = StatsConfig::parse(
            r#"
[framework1]
name = "A"
src = { path = "a", exlude = "typo" }
[framework2]
name = "B"
src = { path = "b" }
"#,
            "inline",
        );

        assert!(matches!(result, Err(UistatError::ConfigParse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().unwrap();
        let result = StatsConfig::load(temp.path().join("missing.toml"));
        assert!(matches!(result, Err(UistatError::ConfigRead { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("stats.toml");
        std::fs::write(&path, EXAMPLE).unwrap();

        let config = StatsConfig::load(&path).unwrap();
        assert_eq!(config.framework2.src.path, PathBuf::from("./example/react/src/"));
    }

    #[test]
    fn test_category_filter_compiles_patterns() {
        let category = CategoryConfig::new("src")
            .filetypes([".js"])
            .exclude("(bad");
        assert!(category.path_filter().is_err());

        let category = CategoryConfig::new("src").include_only("views");
        let filter = category.path_filter().unwrap();
        assert!(filter.should_include(Path::new("src/views/a.js")));
        assert!(!filter.should_include(Path::new("src/models/a.js")));
    }
}
