use tracing::{debug, trace};

use navlight_api::{NAVIGATION_CONTAINER_ID, NavigationEvent};

// rendering target capability
//
// this is everything the highlighter needs from a document: find the container, walk its
// links, resolve where each one points, and flip the two classes.  the browser binding lives
// in the webapp, and memory.rs has a plain implementation for tests
//
// implementations must never fail outward -- a link that cannot be resolved returns None,
// and a class change that cannot be applied is dropped
pub trait NavDocument {
    type Link;

    // all link descendants of the element with this id, in document order, or None if the
    // element does not exist
    fn container_links(&self, id: &str) -> Option<Vec<Self::Link>>;

    // path component of the fully resolved destination url
    fn link_path(&self, link: &Self::Link) -> Option<String>;

    // both of these must leave the link with exactly one of the two classes
    fn add_active_class(&self, link: &Self::Link);

    fn add_inactive_class(&self, link: &Self::Link);
}

// what a single call to handle() did, mostly for logging and tests
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoPayload,
    NoContainer,
    Applied {
        links: usize,
        // index of the last link that matched the route, if any
        active: Option<usize>,
    },
}

#[derive(Clone, Debug)]
pub struct Highlighter {
    container_id: &'static str,
}

impl Default for Highlighter {
    fn default() -> Self {
        Highlighter {
            container_id: NAVIGATION_CONTAINER_ID,
        }
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Highlighter::default()
    }

    // synchronize the link classes in the container with the route carried by the event
    //
    // replaying the same event against the same document always ends in the same state
    pub fn handle<D: NavDocument>(&self, doc: &D, event: &NavigationEvent) -> Outcome {
        let detail = match &event.detail {
            Some(detail) => detail,
            None => {
                debug!("navigation event without payload, ignoring");
                return Outcome::NoPayload;
            }
        };

        debug!(route = ?detail.route, "received navigation event");

        let links = match doc.container_links(self.container_id) {
            Some(links) => links,
            None => {
                debug!(id = self.container_id, "navigation container not found");
                return Outcome::NoContainer;
            }
        };

        let route = detail.route();
        let mut active = None;

        for (index, link) in links.iter().enumerate() {
            let path = doc.link_path(link);

            let matched = match (path.as_deref(), route) {
                (Some(path), Some(route)) => path == route,
                _ => false,
            };

            trace!(?path, ?route, matched, "checked navigation link");

            if matched {
                doc.add_active_class(link);
                active = Some(index);
            } else {
                doc.add_inactive_class(link);
            }
        }

        Outcome::Applied {
            links: links.len(),
            active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use navlight_api::{ACTIVE_LINK_CLASS, INACTIVE_LINK_CLASS, NavigationDetail};

    use crate::memory::MemoryDocument;

    const BASE: &str = "http://localhost:3001/";

    fn document() -> MemoryDocument {
        MemoryDocument::new(BASE).with_container(
            NAVIGATION_CONTAINER_ID,
            ["/home", "/about", "/contact"],
        )
    }

    fn assert_only(doc: &MemoryDocument, index: usize, class: &str) {
        let classes = doc.classes(NAVIGATION_CONTAINER_ID, index).expect("link exists");

        let styling: Vec<&str> = classes
            .iter()
            .map(String::as_str)
            .filter(|c| *c == ACTIVE_LINK_CLASS || *c == INACTIVE_LINK_CLASS)
            .collect();

        assert_eq!(styling, vec![class], "link {index}");
    }

    #[test]
    fn matching_route_marks_one_link() {
        let doc = document();

        let outcome = Highlighter::new().handle(&doc, &NavigationEvent::to_route("/about"));

        assert_eq!(
            outcome,
            Outcome::Applied {
                links: 3,
                active: Some(1)
            }
        );
        assert_only(&doc, 0, INACTIVE_LINK_CLASS);
        assert_only(&doc, 1, ACTIVE_LINK_CLASS);
        assert_only(&doc, 2, INACTIVE_LINK_CLASS);
    }

    #[test]
    fn unknown_route_marks_everything_inactive() {
        let doc = document();

        let outcome = Highlighter::new().handle(&doc, &NavigationEvent::to_route("/missing"));

        assert_eq!(
            outcome,
            Outcome::Applied {
                links: 3,
                active: None
            }
        );
        for index in 0..3 {
            assert_only(&doc, index, INACTIVE_LINK_CLASS);
        }
    }

    #[test]
    fn null_detail_leaves_classes_alone() {
        let doc = document();
        let highlighter = Highlighter::new();

        highlighter.handle(&doc, &NavigationEvent::to_route("/contact"));
        doc.set_classes(NAVIGATION_CONTAINER_ID, 0, ["custom"]);
        let before = doc.snapshot(NAVIGATION_CONTAINER_ID);

        let outcome = highlighter.handle(&doc, &NavigationEvent::from_json("null"));

        assert_eq!(outcome, Outcome::NoPayload);
        assert_eq!(doc.snapshot(NAVIGATION_CONTAINER_ID), before);
    }

    #[test]
    fn payload_without_route_matches_nothing() {
        let doc = document();

        let event = NavigationEvent::new(Some(NavigationDetail::empty()));
        let outcome = Highlighter::new().handle(&doc, &event);

        assert_eq!(
            outcome,
            Outcome::Applied {
                links: 3,
                active: None
            }
        );
        for index in 0..3 {
            assert_only(&doc, index, INACTIVE_LINK_CLASS);
        }
    }

    #[test]
    fn missing_container_is_a_no_op() {
        let doc = MemoryDocument::new(BASE).with_container("sidebar", ["/about"]);

        let outcome = Highlighter::new().handle(&doc, &NavigationEvent::to_route("/about"));

        assert_eq!(outcome, Outcome::NoContainer);
        assert!(doc.classes("sidebar", 0).expect("link exists").is_empty());
    }

    #[test]
    fn replaying_an_event_is_idempotent() {
        let doc = document();
        let highlighter = Highlighter::new();
        let event = NavigationEvent::to_route("/home");

        highlighter.handle(&doc, &event);
        let once = doc.snapshot(NAVIGATION_CONTAINER_ID);

        highlighter.handle(&doc, &event);

        assert_eq!(doc.snapshot(NAVIGATION_CONTAINER_ID), once);
    }

    #[test]
    fn conflicting_classes_are_resolved() {
        let doc = document();
        for index in 0..3 {
            doc.set_classes(
                NAVIGATION_CONTAINER_ID,
                index,
                ["rounded-xl", ACTIVE_LINK_CLASS, INACTIVE_LINK_CLASS],
            );
        }

        Highlighter::new().handle(&doc, &NavigationEvent::to_route("/contact"));

        assert_only(&doc, 0, INACTIVE_LINK_CLASS);
        assert_only(&doc, 1, INACTIVE_LINK_CLASS);
        assert_only(&doc, 2, ACTIVE_LINK_CLASS);
        assert!(doc.has_class(NAVIGATION_CONTAINER_ID, 2, "rounded-xl"));
    }

    #[test]
    fn moving_between_routes() {
        let doc = document();
        let highlighter = Highlighter::new();

        highlighter.handle(&doc, &NavigationEvent::to_route("/home"));
        highlighter.handle(&doc, &NavigationEvent::to_route("/contact"));

        assert_only(&doc, 0, INACTIVE_LINK_CLASS);
        assert_only(&doc, 1, INACTIVE_LINK_CLASS);
        assert_only(&doc, 2, ACTIVE_LINK_CLASS);
    }

    #[test]
    fn paths_are_compared_after_resolution() {
        let doc = MemoryDocument::new("http://localhost:3001/docs/intro").with_container(
            NAVIGATION_CONTAINER_ID,
            ["https://elsewhere.example/about?tab=1", "guide#top", "../home"],
        );
        let highlighter = Highlighter::new();

        let outcome = highlighter.handle(&doc, &NavigationEvent::to_route("/about"));
        assert_eq!(
            outcome,
            Outcome::Applied {
                links: 3,
                active: Some(0)
            }
        );

        let outcome = highlighter.handle(&doc, &NavigationEvent::to_route("/docs/guide"));
        assert_eq!(
            outcome,
            Outcome::Applied {
                links: 3,
                active: Some(1)
            }
        );

        // exact equality only, no prefix matching
        let outcome = highlighter.handle(&doc, &NavigationEvent::to_route("/docs"));
        assert_eq!(
            outcome,
            Outcome::Applied {
                links: 3,
                active: None
            }
        );
    }

    #[test]
    fn escaped_routes_match_unescaped_hrefs() {
        let doc = MemoryDocument::new(BASE).with_container(
            NAVIGATION_CONTAINER_ID,
            ["/about us", "https://elsewhere.example/caf\u{e9}"],
        );
        let highlighter = Highlighter::new();

        let outcome = highlighter.handle(&doc, &NavigationEvent::to_route("/about%20us"));
        assert_eq!(
            outcome,
            Outcome::Applied {
                links: 2,
                active: Some(0)
            }
        );

        let outcome = highlighter.handle(&doc, &NavigationEvent::to_route("/caf%C3%A9"));
        assert_eq!(
            outcome,
            Outcome::Applied {
                links: 2,
                active: Some(1)
            }
        );
    }

    #[test]
    fn empty_container() {
        let doc = MemoryDocument::new(BASE).with_container(NAVIGATION_CONTAINER_ID, [] as [&str; 0]);

        let outcome = Highlighter::new().handle(&doc, &NavigationEvent::to_route("/about"));

        assert_eq!(
            outcome,
            Outcome::Applied {
                links: 0,
                active: None
            }
        );
    }
}
