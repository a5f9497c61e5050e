use std::rc::Rc;

use dioxus::prelude::*;
use gloo_console::log as console_log;
use tracing::warn;

use navlight_api::{INACTIVE_LINK_CLASS, NAVIGATION_CONTAINER_ID};
use navlight_common::{Highlighter, config::StyleConfig};

use crate::dom::{NavigationSubscription, subscribe};

#[derive(Clone, Copy, PartialEq)]
struct NavLink {
    title: &'static str,
    label: &'static str,
    route: &'static str,
}

// the server owns the real link list and renders it the same way; this is the shell's copy
const LINKS: [NavLink; 3] = [
    NavLink {
        title: "Home",
        label: "H",
        route: "/home",
    },
    NavLink {
        title: "About",
        label: "A",
        route: "/about",
    },
    NavLink {
        title: "Contact",
        label: "C",
        route: "/contact",
    },
];

const NAV_STYLES: &str = r#"
.navigator {
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: flex-start;
    padding: 0.5rem;
    background-color: #1f2937;
}

.nav-link {
    width: 3.5rem;
    height: 3.5rem;
    margin: 0.25rem 0;
    display: flex;
    justify-content: center;
    align-items: center;
    text-decoration: none;
    border-radius: 0.75rem;
    transition-duration: 200ms;
}

.nav-link:hover {
    background-color: #6b7280;
}
"#;

// registers the navigation listener once, for as long as the nav bar is mounted
fn use_navigation_highlighting() -> Option<Rc<NavigationSubscription>> {
    use_hook(|| {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(document) => document,
            None => {
                warn!("no document available, navigation highlighting disabled");
                return None;
            }
        };

        console_log!("navigation highlighting enabled");
        Some(Rc::new(subscribe(&document, Highlighter::new())))
    })
}

#[component]
pub fn NavBar() -> Element {
    use_navigation_highlighting();

    let link_styles = use_hook(|| StyleConfig::default().link_styles());

    rsx! {
        style { "{NAV_STYLES}" }
        style { "{link_styles}" }
        div { class: "root",
            div { id: NAVIGATION_CONTAINER_ID, class: "navigator",
                for link in LINKS {
                    a {
                        key: "{link.route}",
                        href: link.route,
                        title: link.title,
                        class: "nav-link {INACTIVE_LINK_CLASS}",
                        "{link.label}"
                    }
                }
            }
            div { id: "content", class: "content" }
        }
    }
}
