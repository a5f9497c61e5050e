use std::cell::RefCell;

use http::Uri;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::highlight::NavDocument;
use navlight_api::{ACTIVE_LINK_CLASS, INACTIVE_LINK_CLASS};

// in-memory rendering target
//
// a flat stand-in for the rendered page: some elements identified by id, each owning a list
// of anchors with an href and a class list.  hrefs are resolved against the document base
// the same way a browser fills in HTMLAnchorElement.pathname, which is what the highlighter
// compares against
//
// like the dom, this is single-threaded and mutated through shared references
#[derive(Debug)]
pub struct MemoryDocument {
    base: String,
    containers: Vec<MemoryContainer>,
}

#[derive(Debug)]
struct MemoryContainer {
    id: String,
    links: Vec<MemoryLink>,
}

#[derive(Debug)]
struct MemoryLink {
    href: String,
    classes: RefCell<Vec<String>>,
}

// handle to a link, handed out by container_links()
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkRef {
    container: usize,
    index: usize,
}

impl MemoryDocument {
    pub fn new(base: impl Into<String>) -> Self {
        MemoryDocument {
            base: base.into(),
            containers: Vec::new(),
        }
    }

    pub fn with_container<I, S>(mut self, id: &str, hrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let links = hrefs
            .into_iter()
            .map(|href| MemoryLink {
                href: href.into(),
                classes: RefCell::new(Vec::new()),
            })
            .collect();

        self.containers.push(MemoryContainer {
            id: id.to_owned(),
            links,
        });
        self
    }

    fn link(&self, id: &str, index: usize) -> Option<&MemoryLink> {
        self.containers
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.links.get(index))
    }

    pub fn classes(&self, id: &str, index: usize) -> Option<Vec<String>> {
        self.link(id, index).map(|link| link.classes.borrow().clone())
    }

    pub fn has_class(&self, id: &str, index: usize, class: &str) -> bool {
        self.link(id, index)
            .is_some_and(|link| link.classes.borrow().iter().any(|c| c == class))
    }

    // overwrite the class list of a link, e.g. to seed the state a server render left behind
    pub fn set_classes<I, S>(&self, id: &str, index: usize, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(link) = self.link(id, index) {
            *link.classes.borrow_mut() = classes.into_iter().map(Into::into).collect();
        }
    }

    // class lists of every link in the container, in document order
    pub fn snapshot(&self, id: &str) -> Vec<Vec<String>> {
        self.containers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.links.iter().map(|l| l.classes.borrow().clone()).collect())
            .unwrap_or_default()
    }

    fn get(&self, link: &LinkRef) -> Option<&MemoryLink> {
        self.containers
            .get(link.container)
            .and_then(|c| c.links.get(link.index))
    }

    fn swap_class(&self, link: &LinkRef, add: &str, remove: &str) {
        if let Some(link) = self.get(link) {
            let mut classes = link.classes.borrow_mut();

            classes.retain(|c| c != remove);
            if !classes.iter().any(|c| c == add) {
                classes.push(add.to_owned());
            }
        }
    }
}

impl NavDocument for MemoryDocument {
    type Link = LinkRef;

    fn container_links(&self, id: &str) -> Option<Vec<LinkRef>> {
        let container = self.containers.iter().position(|c| c.id == id)?;

        let links = (0..self.containers[container].links.len())
            .map(|index| LinkRef { container, index })
            .collect();

        Some(links)
    }

    fn link_path(&self, link: &LinkRef) -> Option<String> {
        let link = self.get(link)?;

        resolve_path(&self.base, &link.href)
    }

    fn add_active_class(&self, link: &LinkRef) {
        self.swap_class(link, ACTIVE_LINK_CLASS, INACTIVE_LINK_CLASS);
    }

    fn add_inactive_class(&self, link: &LinkRef) {
        self.swap_class(link, INACTIVE_LINK_CLASS, ACTIVE_LINK_CLASS);
    }
}

// characters a browser escapes when it parses the path of a url; '%' is left alone so that
// hrefs which are already escaped come out unchanged
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// path of href once resolved against base, with query and fragment dropped
//
// returns None for an empty href or one that cannot be resolved to an http(s) path, such as
// mailto: or javascript: links
pub fn resolve_path(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let href = href.split(['?', '#']).next().unwrap_or_default();
    let href = utf8_percent_encode(href, PATH).to_string();
    let href = href.as_str();

    let base_path = base
        .parse::<Uri>()
        .ok()
        .map(|uri| uri.path().to_owned())
        .filter(|path| path.starts_with('/'))
        .unwrap_or_else(|| String::from("/"));

    let joined = if href.is_empty() {
        base_path
    } else if href.starts_with("//") {
        absolute_path(&format!("http:{href}"))?
    } else if href.starts_with('/') {
        href.to_owned()
    } else if has_scheme(href) {
        absolute_path(href)?
    } else {
        // everything up to and including the last slash of the base
        let dir = match base_path.rfind('/') {
            Some(pos) => &base_path[..=pos],
            None => "/",
        };
        format!("{dir}{href}")
    };

    Some(remove_dot_segments(&joined))
}

fn has_scheme(href: &str) -> bool {
    match href.find(':') {
        Some(pos) => {
            let scheme = &href[..pos];
            !scheme.is_empty()
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn absolute_path(href: &str) -> Option<String> {
    let uri = href.parse::<Uri>().ok()?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => return None,
    }

    let path = uri.path();
    if path.is_empty() {
        Some(String::from("/"))
    } else {
        Some(path.to_owned())
    }
}

// rfc 3986 section 5.2.4, for paths that already start with a slash
fn remove_dot_segments(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').skip(1).collect();
    let last = segments.len().saturating_sub(1);

    let mut out: Vec<&str> = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {
                if i == last {
                    out.push("");
                }
            }
            ".." => {
                out.pop();
                if i == last {
                    out.push("");
                }
            }
            other => out.push(other),
        }
    }

    format!("/{}", out.join("/"))
}
