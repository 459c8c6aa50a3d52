//! Canonical data model for scraped episode listings.
//!
//! The page parser produces one [EpisodeList] per page; [ShowCatalog] merges
//! pages across show ids and is the single source of truth for output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Classification of a download link: magnet URI or torrent-file reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Magnet,
    Torrent,
}

impl LinkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::Magnet => "magnet",
            LinkKind::Torrent => "torrent",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download URLs for one resolution, keyed by link kind.
pub type LinkMap = BTreeMap<LinkKind, String>;

/// Resolutions of one episode (e.g. "480p", "720p", "1080p"), each with its links.
pub type ResolutionMap = BTreeMap<String, LinkMap>;

/// Episodes keyed by the id attribute taken verbatim from the markup.
pub type EpisodeMap = BTreeMap<String, ResolutionMap>;

/// One page's parse result: the show's display name (when the page template
/// yields one) and the episodes found on that page.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EpisodeList {
    pub show_name: Option<String>,
    pub episodes: EpisodeMap,
}

/// Merged listing across all fetched pages and show ids, keyed by show name.
///
/// Episode ids are page-disjoint upstream, so merging a page is plain
/// insertion with no conflict handling. Ordered maps make output
/// deterministic; insertion order carries no meaning.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ShowCatalog {
    shows: BTreeMap<String, EpisodeMap>,
}

impl ShowCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one page's parse result. A page with no name and no episodes
    /// (e.g. an empty body) contributes nothing; a page with episodes but no
    /// recognizable name is filed under the empty string.
    pub fn merge(&mut self, page: EpisodeList) {
        if page.show_name.is_none() && page.episodes.is_empty() {
            return;
        }
        let show = page.show_name.unwrap_or_default();
        self.shows.entry(show).or_default().extend(page.episodes);
    }

    pub fn shows(&self) -> &BTreeMap<String, EpisodeMap> {
        &self.shows
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(show: &str, episode: &str, resolution: &str, kind: LinkKind, url: &str) -> EpisodeList {
        let mut links = LinkMap::new();
        links.insert(kind, url.to_string());
        let mut resolutions = ResolutionMap::new();
        resolutions.insert(resolution.to_string(), links);
        let mut episodes = EpisodeMap::new();
        episodes.insert(episode.to_string(), resolutions);
        EpisodeList {
            show_name: Some(show.to_string()),
            episodes,
        }
    }

    #[test]
    fn link_kind_display_and_serde() {
        assert_eq!(LinkKind::Magnet.to_string(), "magnet");
        assert_eq!(LinkKind::Torrent.to_string(), "torrent");
        assert_eq!(
            serde_json::to_string(&LinkKind::Magnet).unwrap(),
            "\"magnet\""
        );
        assert_eq!(
            serde_json::from_str::<LinkKind>("\"torrent\"").unwrap(),
            LinkKind::Torrent
        );
    }

    #[test]
    fn merge_sequential_pages_of_one_show() {
        let mut catalog = ShowCatalog::new();
        catalog.merge(page("My Show", "e1", "720p", LinkKind::Magnet, "magnet:?a"));
        catalog.merge(page("My Show", "e2", "720p", LinkKind::Magnet, "magnet:?b"));

        assert_eq!(catalog.shows().len(), 1);
        let episodes = &catalog.shows()["My Show"];
        assert!(episodes.contains_key("e1"));
        assert!(episodes.contains_key("e2"));
    }

    #[test]
    fn merge_keeps_shows_separate() {
        let mut catalog = ShowCatalog::new();
        catalog.merge(page("Show A", "e1", "480p", LinkKind::Torrent, "http://a"));
        catalog.merge(page("Show B", "e1", "480p", LinkKind::Torrent, "http://b"));

        assert_eq!(catalog.shows().len(), 2);
        assert_eq!(
            catalog.shows()["Show A"]["e1"]["480p"][&LinkKind::Torrent],
            "http://a"
        );
        assert_eq!(
            catalog.shows()["Show B"]["e1"]["480p"][&LinkKind::Torrent],
            "http://b"
        );
    }

    #[test]
    fn merge_empty_page_is_a_no_op() {
        let mut catalog = ShowCatalog::new();
        catalog.merge(EpisodeList::default());
        assert!(catalog.is_empty());
    }

    #[test]
    fn merge_nameless_page_files_under_empty_string() {
        let mut catalog = ShowCatalog::new();
        let mut list = page("x", "e1", "720p", LinkKind::Magnet, "magnet:?a");
        list.show_name = None;
        catalog.merge(list);

        assert_eq!(catalog.shows().len(), 1);
        assert!(catalog.shows()[""].contains_key("e1"));
    }

    #[test]
    fn catalog_serializes_as_nested_objects() {
        let mut catalog = ShowCatalog::new();
        catalog.merge(page("My Show", "e5", "1080p", LinkKind::Magnet, "magnet:?x"));

        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            value["My Show"]["e5"]["1080p"]["magnet"],
            serde_json::json!("magnet:?x")
        );
    }
}
