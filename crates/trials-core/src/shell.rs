//! Document Shell
//!
//! Declarative description of the page skeleton: root attributes, head
//! scripts and metadata, the body font binding, and the default theme.

use serde::{Deserialize, Serialize};

/// 3Dmol.js molecule viewer
pub const THREE_DMOL_SRC: &str = "https://3dmol.csb.pitt.edu/build/3Dmol-min.js";

pub const FONT_SANS_VARIABLE: &str = "--font-sans";

const BODY_BASE_CLASSES: &str = "font-sans antialiased bg-background text-foreground";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossOrigin {
    #[serde(rename = "anonymous")]
    Anonymous,
    #[serde(rename = "use-credentials")]
    UseCredentials,
}

impl CrossOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossOrigin::Anonymous => "anonymous",
            CrossOrigin::UseCredentials => "use-credentials",
        }
    }
}

/// A `<script async>` injected into the document head
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThirdPartyScript {
    pub src: String,
    /// Subresource integrity hash; empty when the CDN publishes none
    #[serde(default)]
    pub integrity: String,
    pub cross_origin: CrossOrigin,
}

/// Font family bound to a CSS custom property on the body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontBinding {
    pub family: String,
    pub variable: String,
}

impl FontBinding {
    /// Class that sets the custom property, e.g. `font-var-sans`
    pub fn class_name(&self) -> String {
        format!("font-var-{}", self.variable.trim_start_matches("--font-"))
    }

    /// Inline style declaring the property
    pub fn style(&self) -> String {
        format!("{}: '{}', sans-serif;", self.variable, self.family)
    }
}

/// `<meta name="theme-color">` for one color scheme
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeColor {
    pub media: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub lang: String,
    pub title: String,
    pub description: String,
    pub scripts: Vec<ThirdPartyScript>,
    pub font: FontBinding,
    pub default_theme: Theme,
    pub theme_colors: Vec<ThemeColor>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            title: "Drug Discovery AI".to_string(),
            description:
                "AI-powered drug discovery platform for molecular analysis and clinical trials"
                    .to_string(),
            scripts: vec![ThirdPartyScript {
                src: THREE_DMOL_SRC.to_string(),
                integrity: String::new(),
                cross_origin: CrossOrigin::Anonymous,
            }],
            font: FontBinding {
                family: "Inter".to_string(),
                variable: FONT_SANS_VARIABLE.to_string(),
            },
            default_theme: Theme::Dark,
            theme_colors: vec![
                ThemeColor {
                    media: "(prefers-color-scheme: light)".to_string(),
                    color: "white".to_string(),
                },
                ThemeColor {
                    media: "(prefers-color-scheme: dark)".to_string(),
                    color: "black".to_string(),
                },
            ],
        }
    }
}

impl ShellConfig {
    pub fn body_class(&self) -> String {
        format!("{} {}", self.font.class_name(), BODY_BASE_CLASSES)
    }
}
