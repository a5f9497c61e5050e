use gloo_events::EventListener;
use gloo_utils::format::JsValueSerdeExt;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Document, Element, Event, HtmlAnchorElement};

use navlight_api::{
    ACTIVE_LINK_CLASS, INACTIVE_LINK_CLASS, NAVIGATION_EVENT, NavigationEvent, RawDetail,
};
use navlight_common::{Highlighter, NavDocument};

// browser rendering target
//
// anchors report their pathname already resolved against the document base, so there is
// nothing to parse here.  dom exceptions are logged and dropped; the highlighter must never
// throw back into the event dispatch
#[derive(Clone, Debug)]
pub struct DomDocument {
    document: Document,
}

impl DomDocument {
    pub fn new(document: Document) -> Self {
        DomDocument { document }
    }

    fn swap_class(link: &Element, add: &str, remove: &str) {
        let classes = link.class_list();

        if let Err(err) = classes.remove_1(remove) {
            warn!(?err, class = remove, "failed to remove link class");
        }
        if let Err(err) = classes.add_1(add) {
            warn!(?err, class = add, "failed to add link class");
        }
    }
}

impl NavDocument for DomDocument {
    type Link = Element;

    fn container_links(&self, id: &str) -> Option<Vec<Element>> {
        let container = self.document.get_element_by_id(id)?;

        let nodes = match container.query_selector_all("a") {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!(?err, "failed to enumerate navigation links");
                return Some(Vec::new());
            }
        };

        let links = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();

        Some(links)
    }

    fn link_path(&self, link: &Element) -> Option<String> {
        // svg anchors and anchors without an href have no destination to compare
        let anchor = link.dyn_ref::<HtmlAnchorElement>()?;
        anchor.get_attribute("href")?;

        let path = anchor.pathname();
        if path.is_empty() { None } else { Some(path) }
    }

    fn add_active_class(&self, link: &Element) {
        Self::swap_class(link, ACTIVE_LINK_CLASS, INACTIVE_LINK_CLASS);
    }

    fn add_inactive_class(&self, link: &Element) {
        Self::swap_class(link, INACTIVE_LINK_CLASS, ACTIVE_LINK_CLASS);
    }
}

// pull the payload out of a dispatched event
//
// anything other than a CustomEvent, or one with a null/undefined detail, has no payload
fn raw_detail(event: &Event) -> RawDetail {
    let detail = match event.dyn_ref::<CustomEvent>() {
        Some(event) => event.detail(),
        None => return RawDetail::Missing,
    };

    if detail.is_null() || detail.is_undefined() {
        return RawDetail::Missing;
    }

    match detail.into_serde::<serde_json::Value>() {
        Ok(value) => RawDetail::Json(value),
        Err(err) => {
            warn!(%err, "navigation event detail is not json");
            RawDetail::Unreadable
        }
    }
}

// the one document-level listener
//
// dropping this removes the listener again
pub struct NavigationSubscription {
    _listener: EventListener,
}

pub fn subscribe(document: &Document, highlighter: Highlighter) -> NavigationSubscription {
    let target = DomDocument::new(document.clone());

    let listener = EventListener::new(document, NAVIGATION_EVENT, move |event| {
        let event = NavigationEvent::from(raw_detail(event));
        let outcome = highlighter.handle(&target, &event);

        debug!(?outcome, "navigation links updated");
    });

    debug!(event = NAVIGATION_EVENT, "subscribed to navigation events");

    NavigationSubscription {
        _listener: listener,
    }
}
