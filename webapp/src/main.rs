#![allow(non_snake_case)]
use dioxus::prelude::*;

use tracing::Level;

mod dom;

mod nav;
use nav::NavBar;

fn main() {
    dioxus_logger::init(Level::DEBUG).expect("failed to init logger");
    launch(App);
}

// the page itself is rendered by the server, which also fires the navigation event through
// the HX-Trigger header; the app only owns the navigation shell and the listener
#[component]
pub fn App() -> Element {
    rsx! {
        NavBar {}
    }
}
