use serde::{self, Deserialize, Deserializer, Serialize};
use serde_json::Value;

// well-known names shared between the page template and the webapp
//
// the server renders the container with this id and triggers the event by name through
// the HX-Trigger response header; the two link classes come from the gray palette of the
// style configuration (see common config.rs)
pub const NAVIGATION_EVENT: &str = "navigator";
pub const NAVIGATION_CONTAINER_ID: &str = "navigator";

// these should eventually be driven by the header data, but for now the two-class scheme
// is the whole contract
pub const ACTIVE_LINK_CLASS: &str = "bg-gray-400";
pub const INACTIVE_LINK_CLASS: &str = "bg-gray-600";

// the event payload
//
// the producer serializes its whole link record (title, label, icon, ...) into the detail,
// but the only field we care about is the route.  anything that is not a string is treated
// as a missing route, which simply matches no link
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationDetail {
    #[serde(default, deserialize_with = "lenient_route")]
    pub route: Option<String>,
}

fn lenient_route<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(match value {
        Value::String(route) => Some(route),
        _ => None,
    })
}

impl NavigationDetail {
    pub fn new(route: impl Into<String>) -> Self {
        NavigationDetail {
            route: Some(route.into()),
        }
    }

    // a detail that is present but carries nothing usable
    pub fn empty() -> Self {
        NavigationDetail { route: None }
    }

    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }
}

impl From<Value> for NavigationDetail {
    fn from(value: Value) -> NavigationDetail {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => NavigationDetail::empty(),
        }
    }
}

// a single delivery of the navigation event
//
// detail is None when the event arrived with an undefined or null payload, which the
// highlighter treats as a no-op
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationEvent {
    pub detail: Option<NavigationDetail>,
}

impl NavigationEvent {
    pub fn new(detail: Option<NavigationDetail>) -> Self {
        NavigationEvent { detail }
    }

    pub fn to_route(route: impl Into<String>) -> Self {
        NavigationEvent {
            detail: Some(NavigationDetail::new(route)),
        }
    }

    // builds an event from the json text of the detail
    //
    // malformed text is still a payload, just one without a route
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => NavigationEvent::from(value),
            Err(_) => NavigationEvent::new(Some(NavigationDetail::empty())),
        }
    }

    pub fn route(&self) -> Option<&str> {
        self.detail.as_ref().and_then(|detail| detail.route())
    }
}

impl From<Value> for NavigationEvent {
    fn from(value: Value) -> NavigationEvent {
        match value {
            Value::Null => NavigationEvent::new(None),
            other => NavigationEvent::new(Some(NavigationDetail::from(other))),
        }
    }
}

// the event detail as the host handed it over, before any decoding
//
// Missing covers an undefined or null detail as well as events that carry no detail at all;
// Unreadable is a detail that exists but could not be turned into json
#[derive(Clone, Debug, PartialEq)]
pub enum RawDetail {
    Missing,
    Json(Value),
    Unreadable,
}

impl From<RawDetail> for NavigationEvent {
    fn from(raw: RawDetail) -> NavigationEvent {
        match raw {
            RawDetail::Missing => NavigationEvent::new(None),
            RawDetail::Json(value) => NavigationEvent::from(value),
            RawDetail::Unreadable => NavigationEvent::new(Some(NavigationDetail::empty())),
        }
    }
}
