//! Page structure the runtime works against
//!
//! A [`PageManifest`] is the serde form (TOML on disk, or the built-in 2cats
//! page). [`Page`] is the checked version: ids are unique, links point at
//! sections, and every lookup by id is fallible.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::Span;
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    pub id: String,
    pub title: String,
    pub top: f64,
    pub height: f64,
    #[serde(default)]
    pub body: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLinkEntry {
    pub label: String,
    pub href: String,
}

/// An element that fades in when scrolled into view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealEntry {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub top: f64,
    pub height: f64,
    /// Grid container the element belongs to; grid members reveal staggered
    #[serde(default)]
    pub grid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    /// Text as authored, e.g. "150+"
    pub value: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEntry {
    pub top: f64,
    pub height: f64,
    pub items: Vec<StatEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphicsEntry {
    /// Hero graphic present
    #[serde(default)]
    pub hero: bool,
    /// Section that owns the about graphic, if the page has one
    #[serde(default)]
    pub about_section: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormEntry {
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
    /// Choices offered by the service select
    #[serde(default)]
    pub services: Vec<String>,
}

fn default_submit_label() -> String {
    "Send message".to_string()
}

fn default_viewport_height() -> f64 {
    800.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageManifest {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
    #[serde(default)]
    pub nav_links: Vec<NavLinkEntry>,
    #[serde(default)]
    pub reveal: Vec<RevealEntry>,
    #[serde(default)]
    pub stats: Option<StatsEntry>,
    #[serde(default)]
    pub graphics: GraphicsEntry,
    #[serde(default)]
    pub form: Option<FormEntry>,
}

impl Default for PageManifest {
    /// The 2cats landing page
    fn default() -> Self {
        let section = |id: &str, title: &str, top: f64, height: f64, body: &[&str]| SectionEntry {
            id: id.to_string(),
            title: title.to_string(),
            top,
            height,
            body: body.iter().map(|s| s.to_string()).collect(),
        };
        let link = |label: &str, href: &str| NavLinkEntry {
            label: label.to_string(),
            href: href.to_string(),
        };
        let target = |id: &str, label: &str, top: f64, height: f64, grid: Option<&str>| RevealEntry {
            id: id.to_string(),
            label: label.to_string(),
            top,
            height,
            grid: grid.map(str::to_string),
        };
        let stat = |value: &str, label: &str| StatEntry {
            value: value.to_string(),
            label: label.to_string(),
        };

        Self {
            title: "2cats Studio".to_string(),
            viewport_height: default_viewport_height(),
            sections: vec![
                section(
                    "home",
                    "Design that purrs",
                    0.0,
                    900.0,
                    &["Websites, brands and apps built by a small, curious team."],
                ),
                section(
                    "services",
                    "Services",
                    900.0,
                    1100.0,
                    &["Everything from a first sketch to a production launch."],
                ),
                section(
                    "about",
                    "About us",
                    2000.0,
                    900.0,
                    &["Two designers, one studio, and a lot of coffee."],
                ),
                section(
                    "contact",
                    "Contact",
                    2900.0,
                    1100.0,
                    &["Tell us about your project and we will reply within 24 hours."],
                ),
            ],
            nav_links: vec![
                link("Home", "#home"),
                link("Services", "#services"),
                link("About", "#about"),
                link("Contact", "#contact"),
            ],
            reveal: vec![
                target("services-header", "Services", 940.0, 120.0, None),
                target("card-web", "Web design", 1100.0, 380.0, Some("services-grid")),
                target("card-brand", "Branding", 1100.0, 380.0, Some("services-grid")),
                target("card-app", "App development", 1100.0, 380.0, Some("services-grid")),
                target("card-seo", "SEO", 1520.0, 380.0, Some("services-grid")),
                target("card-content", "Content", 1520.0, 380.0, Some("services-grid")),
                target("card-support", "Support", 1520.0, 380.0, Some("services-grid")),
                target("about-header", "About us", 2040.0, 120.0, None),
                target("about-text", "Our story", 2180.0, 260.0, None),
                target("contact-header", "Contact", 2940.0, 120.0, None),
                target("contact-info", "Where to find us", 3100.0, 300.0, None),
                target("contact-form", "Contact form", 3100.0, 700.0, None),
            ],
            stats: Some(StatsEntry {
                top: 2480.0,
                height: 200.0,
                items: vec![
                    stat("150+", "Projects shipped"),
                    stat("98%", "Happy clients"),
                    stat("24h", "Reply time"),
                ],
            }),
            graphics: GraphicsEntry {
                hero: true,
                about_section: Some("about".to_string()),
            },
            form: Some(FormEntry {
                submit_label: default_submit_label(),
                services: vec![
                    "web".to_string(),
                    "design".to_string(),
                    "app".to_string(),
                    "seo".to_string(),
                ],
            }),
        }
    }
}

impl PageManifest {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidManifest(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub span: Span,
    pub body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    /// Section id the link points at
    pub fn target(&self) -> Option<&str> {
        self.href.strip_prefix('#')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealTarget {
    pub id: String,
    pub label: String,
    pub span: Span,
    pub grid: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsRegion {
    pub span: Span,
    pub items: Vec<StatEntry>,
}

/// Checked page structure
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub viewport_height: f64,
    sections: Vec<Section>,
    nav_links: Vec<NavLink>,
    reveal: Vec<RevealTarget>,
    stats: Option<StatsRegion>,
    hero_graphic: bool,
    about_graphic: Option<String>,
    form: Option<FormEntry>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            title: String::new(),
            viewport_height: default_viewport_height(),
            sections: Vec::new(),
            nav_links: Vec::new(),
            reveal: Vec::new(),
            stats: None,
            hero_graphic: false,
            about_graphic: None,
            form: None,
        }
    }
}

impl Page {
    /// The built-in 2cats landing page
    pub fn two_cats() -> Self {
        // The built-in manifest is known to be consistent
        Self::from_manifest(PageManifest::default()).unwrap_or_default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_manifest(PageManifest::load(path)?)
    }

    pub fn from_manifest(manifest: PageManifest) -> Result<Self> {
        if !manifest.viewport_height.is_finite() || manifest.viewport_height <= 0.0 {
            return Err(Error::InvalidManifest(format!(
                "viewport height must be positive, got {}",
                manifest.viewport_height
            )));
        }

        let mut ids = HashSet::new();
        let mut sections = Vec::with_capacity(manifest.sections.len());
        for entry in manifest.sections {
            if entry.id.is_empty() {
                return Err(Error::InvalidManifest("section without an id".to_string()));
            }
            if entry.height < 0.0 {
                return Err(Error::InvalidManifest(format!(
                    "section '{}' has a negative height",
                    entry.id
                )));
            }
            if !ids.insert(entry.id.clone()) {
                return Err(Error::InvalidManifest(format!("duplicate id '{}'", entry.id)));
            }
            sections.push(Section {
                id: entry.id,
                title: entry.title,
                span: Span::new(entry.top, entry.height),
                body: entry.body,
            });
        }
        // Document order
        sections.sort_by(|a, b| a.span.top.total_cmp(&b.span.top));

        let mut nav_links = Vec::with_capacity(manifest.nav_links.len());
        for entry in manifest.nav_links {
            if !entry.href.starts_with('#') {
                return Err(Error::InvalidManifest(format!(
                    "nav link '{}' must point at a section anchor, got '{}'",
                    entry.label, entry.href
                )));
            }
            let link = NavLink {
                label: entry.label,
                href: entry.href,
            };
            if let Some(target) = link.target() {
                if !ids.contains(target) {
                    warn!(href = %link.href, "nav link points at a missing section");
                }
            }
            nav_links.push(link);
        }

        let mut reveal = Vec::with_capacity(manifest.reveal.len());
        for entry in manifest.reveal {
            if !ids.insert(entry.id.clone()) {
                return Err(Error::InvalidManifest(format!("duplicate id '{}'", entry.id)));
            }
            reveal.push(RevealTarget {
                id: entry.id,
                label: entry.label,
                span: Span::new(entry.top, entry.height),
                grid: entry.grid,
            });
        }

        let stats = manifest.stats.map(|entry| StatsRegion {
            span: Span::new(entry.top, entry.height),
            items: entry.items,
        });

        let about_graphic = match manifest.graphics.about_section {
            Some(owner) if !sections.iter().any(|s| s.id == owner) => {
                warn!(section = %owner, "about graphic owner section is missing; parallax disabled");
                None
            }
            other => other,
        };

        Ok(Self {
            title: manifest.title,
            viewport_height: manifest.viewport_height,
            sections,
            nav_links,
            reveal,
            stats,
            hero_graphic: manifest.graphics.hero,
            about_graphic,
            form: manifest.form,
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn nav_links(&self) -> &[NavLink] {
        &self.nav_links
    }

    pub fn reveal_targets(&self) -> &[RevealTarget] {
        &self.reveal
    }

    pub fn stats(&self) -> Option<&StatsRegion> {
        self.stats.as_ref()
    }

    pub fn has_hero_graphic(&self) -> bool {
        self.hero_graphic
    }

    /// Section owning the about graphic
    pub fn about_graphic_section(&self) -> Option<&Section> {
        let owner = self.about_graphic.as_deref()?;
        self.sections.iter().find(|s| s.id == owner)
    }

    pub fn form(&self) -> Option<&FormEntry> {
        self.form.as_ref()
    }

    pub fn section(&self, id: &str) -> Result<&Section> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::MissingElement(format!("section#{}", id)))
    }

    /// Resolve an anchor like `#about` to its section
    pub fn anchor_target(&self, href: &str) -> Result<&Section> {
        let id = href
            .strip_prefix('#')
            .ok_or_else(|| Error::MissingElement(format!("anchor '{}'", href)))?;
        self.section(id)
    }

    /// Members of a grid container, in document order
    pub fn grid_members(&self, grid: &str) -> Vec<String> {
        self.reveal
            .iter()
            .filter(|t| t.grid.as_deref() == Some(grid))
            .map(|t| t.id.clone())
            .collect()
    }

    /// Bottom of the last section
    pub fn document_height(&self) -> f64 {
        self.sections
            .iter()
            .map(|s| s.span.bottom())
            .fold(0.0, f64::max)
    }

    /// Largest scroll offset the viewport can reach
    pub fn max_scroll(&self, viewport_height: f64) -> f64 {
        (self.document_height() - viewport_height).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_page_is_consistent() {
        let manifest = PageManifest::default();
        let page = Page::from_manifest(manifest).unwrap();
        assert_eq!(page.sections().len(), 4);
        assert_eq!(page.document_height(), 4000.0);
        assert_eq!(page.max_scroll(800.0), 3200.0);
        assert_eq!(page.grid_members("services-grid").len(), 6);
        assert_eq!(page.about_graphic_section().map(|s| s.id.as_str()), Some("about"));
        assert_eq!(
            page.stats(),
            Some(&StatsRegion {
                span: Span::new(2480.0, 200.0),
                items: vec![
                    StatEntry {
                        value: "150+".to_string(),
                        label: "Projects shipped".to_string(),
                    },
                    StatEntry {
                        value: "98%".to_string(),
                        label: "Happy clients".to_string(),
                    },
                    StatEntry {
                        value: "24h".to_string(),
                        label: "Reply time".to_string(),
                    },
                ],
            })
        );
    }

    #[test]
    fn test_anchor_lookup_is_fallible() {
        let page = Page::two_cats();
        assert_eq!(page.anchor_target("#about").unwrap().span.top, 2000.0);
        assert!(matches!(page.anchor_target("#pricing"), Err(Error::MissingElement(_))));
        assert!(matches!(page.anchor_target("about"), Err(Error::MissingElement(_))));
    }

    #[test]
    fn test_manifest_from_toml() {
        let manifest = PageManifest::from_toml(
            r##"
            viewport_height = 600

            [[sections]]
            id = "second"
            title = "Second"
            top = 500
            height = 500

            [[sections]]
            id = "first"
            title = "First"
            top = 0
            height = 500

            [[nav_links]]
            label = "First"
            href = "#first"
            "##,
        )
        .unwrap();
        let page = Page::from_manifest(manifest).unwrap();
        let ids: Vec<_> = page.sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert!(page.stats().is_none());
        assert!(page.form().is_none());
        assert!(!page.has_hero_graphic());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut manifest = PageManifest::default();
        manifest.reveal[0].id = "home".to_string();
        assert!(matches!(
            Page::from_manifest(manifest),
            Err(Error::InvalidManifest(_))
        ));
    }

    #[test]
    fn test_unusable_viewport_rejected() {
        for height in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let manifest = PageManifest {
                viewport_height: height,
                ..PageManifest::default()
            };
            assert!(
                matches!(Page::from_manifest(manifest), Err(Error::InvalidManifest(_))),
                "viewport {} accepted",
                height
            );
        }
    }

    #[test]
    fn test_external_nav_link_rejected() {
        let mut manifest = PageManifest::default();
        manifest.nav_links[0].href = "https://example.com".to_string();
        assert!(Page::from_manifest(manifest).is_err());
    }

    #[test]
    fn test_missing_about_owner_disables_graphic() {
        let mut manifest = PageManifest::default();
        manifest.graphics.about_section = Some("team".to_string());
        let page = Page::from_manifest(manifest).unwrap();
        assert!(page.about_graphic_section().is_none());
    }
}
