//! Episode-list page parser. Converts one HTML page body from the listing API
//! into the show's display name plus episode -> resolution -> link records.
//!
//! The document is walked once in document order and every node is handled
//! like a streamed markup event; no selector queries. Context (current
//! episode, current resolution) is never popped on close tags, matching the
//! strictly non-nested shape of the source markup.

use crate::model::{EpisodeList, EpisodeMap, LinkKind, LinkMap, ResolutionMap};
use crate::scraper::error::ScraperError;
use scraper::node::{Element, Node};
use scraper::Html;

const EPISODE_CONTAINER_CLASS: &str = "rls-info-container";
const RESOLUTION_GROUP_CLASS: &str = "rls-link";
const MAGNET_LINK_TITLE: &str = "Magnet Link";
const TORRENT_LINK_TITLE: &str = "Torrent Link";

/// Fetch an attribute the markup shape requires. Absence means the template
/// changed, which is fatal.
fn require_attr<'a>(element: &'a Element, name: &str, what: &str) -> Result<&'a str, ScraperError> {
    element.attr(name).ok_or_else(|| ScraperError::MarkupShape {
        reason: format!("{} <{}> has no {} attribute", what, element.name(), name),
    })
}

fn has_class(element: &Element, class: &str) -> bool {
    element.classes().any(|c| c == class)
}

/// One-page parser. Construct fresh per page; state is only meaningful for
/// a single document walk.
#[derive(Debug, Default)]
pub struct EpisodeListParser {
    show_name: Option<String>,
    episodes: EpisodeMap,
    current_episode: Option<String>,
    current_resolution: Option<String>,
    text_count: usize,
}

impl EpisodeListParser {
    /// Parse one page body. Tolerates any unrelated markup between the
    /// recognized elements; fails only when a structural assumption about
    /// the recognized elements themselves is violated.
    pub fn parse(html: &str) -> Result<EpisodeList, ScraperError> {
        let mut parser = Self::default();
        let document = Html::parse_document(html);
        for node in document.tree.root().descendants() {
            match node.value() {
                Node::Element(element) => parser.open_element(element)?,
                Node::Text(text) => parser.text(text),
                _ => {}
            }
        }
        Ok(EpisodeList {
            show_name: parser.show_name,
            episodes: parser.episodes,
        })
    }

    /// Classify an opened element. Rules are checked in priority order and
    /// the first match wins; elements matching none are ignored.
    fn open_element(&mut self, element: &Element) -> Result<(), ScraperError> {
        let tag = element.name();

        if tag == "div" && has_class(element, EPISODE_CONTAINER_CLASS) {
            let id = require_attr(element, "id", "episode container")?;
            self.episodes.insert(id.to_string(), ResolutionMap::new());
            self.current_episode = Some(id.to_string());
            return Ok(());
        }

        if tag == "div" && has_class(element, RESOLUTION_GROUP_CLASS) {
            let id = require_attr(element, "id", "resolution link group")?;
            let episode = self.current_episode.as_deref().ok_or_else(|| {
                ScraperError::MarkupShape {
                    reason: format!("link group {:?} appears before any episode container", id),
                }
            })?;
            if !id.starts_with(episode) {
                return Err(ScraperError::MarkupShape {
                    reason: format!("link group {:?} does not belong to episode {:?}", id, episode),
                });
            }
            let resolution =
                id.split('-')
                    .nth(1)
                    .ok_or_else(|| ScraperError::MarkupShape {
                        reason: format!("link group {:?} has no resolution segment", id),
                    })?;
            let record = self
                .episodes
                .get_mut(episode)
                .ok_or_else(|| ScraperError::MarkupShape {
                    reason: format!("no record for episode {:?}", episode),
                })?;
            record.insert(resolution.to_string(), LinkMap::new());
            self.current_resolution = Some(resolution.to_string());
            return Ok(());
        }

        if tag == "a" && element.attr("title") == Some(MAGNET_LINK_TITLE) {
            return self.record_link(element, LinkKind::Magnet);
        }

        if tag == "a" && element.attr("title") == Some(TORRENT_LINK_TITLE) {
            return self.record_link(element, LinkKind::Torrent);
        }

        Ok(())
    }

    /// Record a download anchor under the current (episode, resolution)
    /// context. An anchor outside an open context is a markup-shape breach.
    fn record_link(&mut self, element: &Element, kind: LinkKind) -> Result<(), ScraperError> {
        let href = require_attr(element, "href", "download anchor")?;
        let episode =
            self.current_episode
                .as_deref()
                .ok_or_else(|| ScraperError::MarkupShape {
                    reason: format!("{} anchor appears before any episode container", kind),
                })?;
        let resolution =
            self.current_resolution
                .as_deref()
                .ok_or_else(|| ScraperError::MarkupShape {
                    reason: format!("{} anchor appears before any resolution link group", kind),
                })?;
        let links = self
            .episodes
            .get_mut(episode)
            .and_then(|record| record.get_mut(resolution))
            .ok_or_else(|| ScraperError::MarkupShape {
                reason: format!("no link map for episode {:?} at {}", episode, resolution),
            })?;
        links.insert(kind, href.to_string());
        Ok(())
    }

    /// Positional show-name heuristic: the second text event of the page,
    /// whitespace-trimmed. Every text event counts, including blank ones;
    /// this is tied to the fixed page template, and a reordered template
    /// silently yields a wrong or empty name rather than an error.
    fn text(&mut self, text: &str) {
        if self.text_count == 1 {
            self.show_name = Some(text.trim().to_string());
        }
        self.text_count += 1;
    }
}
