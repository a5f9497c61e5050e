use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use navlight_api::{ACTIVE_LINK_CLASS, INACTIVE_LINK_CLASS};

// style framework configuration
//
// this is a declarative description of the design tokens the page templates are allowed to
// use (colors, font sizes, spacing, font families, breakpoints) and of the source files that
// get scanned for class names.  nothing here runs; the highlighter only relies on it to know
// that the two link classes name real tokens
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StyleConfig {
    // globs of the files to scan for class name usage
    pub content: Vec<String>,

    pub theme: ThemeTokens,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ThemeTokens {
    pub colors: BTreeMap<String, ColorToken>,
    pub font_size: BTreeMap<String, String>,
    pub spacing: BTreeMap<String, String>,
    pub font_family: BTreeMap<String, Vec<String>>,
    pub screens: BTreeMap<String, String>,
}

// either a flat color ("white" = "#ffffff") or a palette keyed by shade ("gray" = { 400 = ... })
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorToken {
    Value(String),
    Shades(BTreeMap<String, String>),
}

impl ColorToken {
    pub fn shade(&self, shade: Option<&str>) -> Option<&str> {
        match (self, shade) {
            (ColorToken::Value(value), None) => Some(value.as_str()),
            (ColorToken::Shades(shades), Some(shade)) => shades.get(shade).map(String::as_str),
            _ => None,
        }
    }
}

// in order to extract the style table from a larger document, we need to specify it
// as a subtable of the root node, i.e. a substruct
#[derive(Debug, Deserialize, Serialize)]
struct TomlStyleFile {
    style: StyleConfig,
}

impl StyleConfig {
    // look up a color token, e.g. ("gray", Some("400")) or ("white", None)
    pub fn color(&self, name: &str, shade: Option<&str>) -> Option<&str> {
        self.theme.colors.get(name).and_then(|token| token.shade(shade))
    }

    // whether a background class such as bg-gray-400 or bg-white is backed by a color token
    //
    // color names may themselves contain dashes, so every split point is tried
    pub fn resolves_class(&self, class: &str) -> bool {
        let name = match class.strip_prefix("bg-") {
            Some(name) if !name.is_empty() => name,
            _ => return false,
        };

        if self.color(name, None).is_some() {
            return true;
        }

        name.match_indices('-').any(|(pos, _)| {
            let (color, shade) = (&name[..pos], &name[pos + 1..]);
            self.color(color, Some(shade)).is_some()
        })
    }

    // background rules for the two navigation link classes, for pages that are served
    // without the compiled stylesheet
    pub fn link_styles(&self) -> String {
        [ACTIVE_LINK_CLASS, INACTIVE_LINK_CLASS]
            .iter()
            .filter_map(|class| {
                let (color, shade) = class.strip_prefix("bg-")?.rsplit_once('-')?;
                let value = self.color(color, Some(shade))?;

                Some(format!(".{class} {{ background-color: {value}; }}\n"))
            })
            .collect()
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        let gray = [
            ("100", "#f3f4f6"),
            ("200", "#e5e7eb"),
            ("300", "#d1d5db"),
            ("400", "#9ca3af"),
            ("500", "#6b7280"),
            ("600", "#4b5563"),
            ("700", "#374151"),
            ("800", "#1f2937"),
            ("900", "#111827"),
        ];

        let mut colors = BTreeMap::new();
        colors.insert(String::from("white"), ColorToken::Value(String::from("#ffffff")));
        colors.insert(String::from("black"), ColorToken::Value(String::from("#000000")));
        colors.insert(String::from("gray"), ColorToken::Shades(owned_map(&gray)));

        let font_size = owned_map(&[
            ("xs", "0.75rem"),
            ("sm", "0.875rem"),
            ("base", "1rem"),
            ("lg", "1.125rem"),
            ("xl", "1.25rem"),
            ("2xl", "1.5rem"),
        ]);

        let spacing = owned_map(&[
            ("1", "0.25rem"),
            ("2", "0.5rem"),
            ("4", "1rem"),
            ("14", "3.5rem"),
        ]);

        let mut font_family = BTreeMap::new();
        font_family.insert(
            String::from("sans"),
            vec![
                String::from("ui-sans-serif"),
                String::from("system-ui"),
                String::from("sans-serif"),
            ],
        );

        let screens = owned_map(&[
            ("sm", "640px"),
            ("md", "768px"),
            ("lg", "1024px"),
            ("xl", "1280px"),
            ("2xl", "1536px"),
        ]);

        StyleConfig {
            content: vec![String::from("./src/**/*.rs"), String::from("./web/**/*.js")],
            theme: ThemeTokens {
                colors,
                font_size,
                spacing,
                font_family,
                screens,
            },
        }
    }
}

fn owned_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (String::from(*k), String::from(*v)))
        .collect()
}

pub fn parse_style_config(doc: &str) -> Result<StyleConfig> {
    let data: TomlStyleFile = toml::from_str(doc).context("failed to parse style config")?;

    Ok(data.style)
}

#[cfg(not(target_arch = "wasm32"))]
#[tracing::instrument(level = "debug")]
pub async fn read_style_config(filename: std::path::PathBuf) -> Result<StyleConfig> {
    tracing::debug!("reading style config file");

    let doc = tokio::fs::read_to_string(&filename)
        .await
        .with_context(|| format!("failed to read style config {}", filename.display()))?;

    let config = parse_style_config(&doc)?;

    tracing::debug!(colors = config.theme.colors.len(), "successfully parsed style config file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE_TOML: &str = r##"
        [style]
        content = ["./templates/**/*.html"]

        [style.theme.colors]
        primary = "#2196f3"
        slate-blue = { 500 = "#6a5acd" }

        [style.theme.colors.gray]
        400 = "#9ca3af"
        600 = "#4b5563"

        [style.theme.font_size]
        base = "1rem"

        [style.theme.font_family]
        sans = ["Inter", "sans-serif"]

        [style.theme.screens]
        md = "768px"
    "##;

    #[test]
    fn link_classes_are_backed_by_tokens() {
        let config = StyleConfig::default();

        assert!(config.resolves_class(ACTIVE_LINK_CLASS));
        assert!(config.resolves_class(INACTIVE_LINK_CLASS));
    }

    #[test]
    fn link_styles_use_the_gray_palette() {
        let css = StyleConfig::default().link_styles();

        assert_eq!(
            css,
            ".bg-gray-400 { background-color: #9ca3af; }\n.bg-gray-600 { background-color: #4b5563; }\n"
        );
    }

    #[test]
    fn link_styles_skip_missing_tokens() {
        let mut config = StyleConfig::default();
        config.theme.colors.remove("gray");

        assert!(config.link_styles().is_empty());
    }

    #[test]
    fn class_resolution() {
        let config = parse_style_config(STYLE_TOML).expect("valid config");

        assert!(config.resolves_class("bg-primary"));
        assert!(config.resolves_class("bg-gray-400"));
        assert!(config.resolves_class("bg-slate-blue-500"));
        assert!(!config.resolves_class("bg-gray-500"));
        assert!(!config.resolves_class("bg-primary-400"));
        assert!(!config.resolves_class("text-gray-400"));
        assert!(!config.resolves_class("bg-"));
    }

    #[test]
    fn parses_style_subtable() {
        let config = parse_style_config(STYLE_TOML).expect("valid config");

        assert_eq!(config.content, vec![String::from("./templates/**/*.html")]);
        assert_eq!(config.color("primary", None), Some("#2196f3"));
        assert_eq!(config.color("gray", Some("600")), Some("#4b5563"));
        assert_eq!(config.color("gray", None), None);
        assert_eq!(config.theme.font_family["sans"][0], "Inter");
        assert!(config.theme.spacing.is_empty());
    }

    #[test]
    fn default_survives_toml() {
        let config = StyleConfig::default();

        let doc = toml::to_string(&TomlStyleFile {
            style: config.clone(),
        })
        .expect("serializable");

        assert_eq!(parse_style_config(&doc).expect("valid config"), config);
    }

    #[test]
    fn missing_style_table_is_an_error() {
        let err = parse_style_config("[theme]\ncontent = []\n").unwrap_err();

        assert!(err.to_string().contains("style config"));
    }

    #[tokio::test]
    async fn reads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("style.toml");
        std::fs::write(&path, STYLE_TOML).expect("write config");

        let config = read_style_config(path).await.expect("readable config");

        assert_eq!(config.theme.screens["md"], "768px");
    }

    #[tokio::test]
    async fn missing_file_reports_the_path() {
        let err = read_style_config("/nonexistent/style.toml".into())
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("/nonexistent/style.toml"));
    }
}
