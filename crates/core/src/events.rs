// Events directory data model and normalization of upstream event records

use crate::html;
use serde::{Deserialize, Serialize};

/// Maximum number of events listed per lookup
pub const EVENT_PAGE_SIZE: u32 = 10;

/// Length of the listing window in days, starting today
pub const EVENT_WINDOW_DAYS: i64 = 7;

/// Id of the element holding the description on an event's public page
pub const DESCRIPTION_ELEMENT_ID: &str = "eventDescription";

pub const FREE_EVENT: &str = "Free event";
pub const NO_TICKET_INFO: &str = "No ticket information available";
pub const UNNAMED_TICKET: &str = "Unnamed ticket";

/// Location match from the location search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationSearchResponse {
    #[serde(default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventSearchResponse {
    #[serde(default)]
    pub events: Vec<ApiEvent>,
}

/// Event record as the upstream API returns it, both in search results
/// (summary) and from the detail lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiEvent {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub datetime_start: Option<String>,
    #[serde(default)]
    pub datetime_end: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub ticket_types: Option<TicketTypes>,
    #[serde(default)]
    pub category: Option<ApiCategory>,
    #[serde(default)]
    pub categories: Vec<ApiCategory>,
}

/// Ticket types come either as a bare array or wrapped in an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketTypes {
    List(Vec<ApiTicketType>),
    Wrapped { ticket_types: Vec<ApiTicketType> },
}

impl TicketTypes {
    pub fn as_slice(&self) -> &[ApiTicketType] {
        match self {
            TicketTypes::List(list) => list,
            TicketTypes::Wrapped { ticket_types } => ticket_types,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTicketType {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub onsale_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCategory {
    pub name: String,
}

/// Normalized event returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub address: Option<String>,
    pub is_free: bool,
    pub ticket_info: TicketInfo,
    pub categories: Vec<String>,
}

/// Either a plain note ("Free event", no information) or the ticket list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketInfo {
    Note(String),
    Tickets(Vec<Ticket>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub name: String,
    pub price: Option<serde_json::Value>,
    pub description: Option<String>,
    pub onsale_at: Option<String>,
}

/// Description taken from the API record: plain text is used as-is, HTML is
/// reduced to text. Blank descriptions count as absent.
pub fn api_description(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    let text = if html::contains_markup(raw) {
        html::html_to_text(raw)
    } else {
        raw.to_string()
    };
    (!text.is_empty()).then_some(text)
}

/// Description scraped from an event page, if the page has a non-empty
/// description element
pub fn scraped_description(page: &str) -> Option<String> {
    let inner = html::inner_html_by_id(page, DESCRIPTION_ELEMENT_ID)?;
    let text = html::html_to_text(inner);
    (!text.is_empty()).then_some(text)
}

/// A non-empty scraped description wins over whatever the API supplied
pub fn choose_description(api: Option<String>, scraped: Option<String>) -> Option<String> {
    scraped.filter(|s| !s.trim().is_empty()).or(api)
}

pub fn ticket_info(event: &ApiEvent) -> TicketInfo {
    if event.is_free {
        return TicketInfo::Note(FREE_EVENT.to_string());
    }

    match event.ticket_types.as_ref().map(TicketTypes::as_slice) {
        Some(types) if !types.is_empty() => TicketInfo::Tickets(
            types
                .iter()
                .map(|t| Ticket {
                    name: t
                        .name
                        .clone()
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or_else(|| UNNAMED_TICKET.to_string()),
                    price: t.price.clone(),
                    description: t.description.clone(),
                    onsale_at: t.onsale_at.clone(),
                })
                .collect(),
        ),
        _ => TicketInfo::Note(NO_TICKET_INFO.to_string()),
    }
}

fn categories(event: &ApiEvent) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for category in event.category.iter().chain(event.categories.iter()) {
        if !names.contains(&category.name) {
            names.push(category.name.clone());
        }
    }
    names
}

/// Build the output record from the best available API record and an
/// optional scraped description.
pub fn normalize_event(record: &ApiEvent, scraped: Option<String>) -> Event {
    Event {
        id: record.id,
        title: record.name.clone(),
        description: choose_description(api_description(record.description.as_deref()), scraped),
        url: record.url.clone(),
        start: record.datetime_start.clone(),
        end: record.datetime_end.clone(),
        address: record.address.clone(),
        is_free: record.is_free,
        ticket_info: ticket_info(record),
        categories: categories(record),
    }
}

/// Page URL worth scraping: only absolute http(s) URLs
pub fn scrape_target(record: &ApiEvent) -> Option<&str> {
    record
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| u.starts_with("https://") || u.starts_with("http://"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(id: u64) -> ApiEvent {
        ApiEvent {
            id,
            name: format!("Event {}", id),
            ..Default::default()
        }
    }

    fn ticket(name: Option<&str>, price: &str) -> ApiTicketType {
        ApiTicketType {
            name: name.map(str::to_string),
            price: Some(json!(price)),
            description: None,
            onsale_at: Some("2026-10-01 09:00:00".to_string()),
        }
    }

    #[test]
    fn test_free_event_ignores_ticket_types() {
        let mut e = event(1);
        e.is_free = true;
        e.ticket_types = Some(TicketTypes::List(vec![ticket(Some("VIP"), "99.00")]));

        assert_eq!(ticket_info(&e), TicketInfo::Note("Free event".to_string()));
    }

    #[test]
    fn test_ticket_types_are_mapped() {
        let mut e = event(1);
        e.ticket_types = Some(TicketTypes::Wrapped {
            ticket_types: vec![ticket(Some("Adult"), "20.00"), ticket(None, "10.00")],
        });

        match ticket_info(&e) {
            TicketInfo::Tickets(tickets) => {
                assert_eq!(tickets.len(), 2);
                assert_eq!(tickets[0].name, "Adult");
                assert_eq!(tickets[1].name, "Unnamed ticket");
                assert_eq!(tickets[1].price, Some(json!("10.00")));
                assert_eq!(tickets[1].onsale_at.as_deref(), Some("2026-10-01 09:00:00"));
            }
            other => panic!("expected tickets, got {:?}", other),
        }
    }

    #[test]
    fn test_no_ticket_information() {
        let mut e = event(1);
        assert_eq!(ticket_info(&e), TicketInfo::Note(NO_TICKET_INFO.to_string()));

        e.ticket_types = Some(TicketTypes::List(vec![]));
        assert_eq!(ticket_info(&e), TicketInfo::Note(NO_TICKET_INFO.to_string()));
    }

    #[test]
    fn test_ticket_types_deserialize_both_shapes() {
        let wrapped: ApiEvent = serde_json::from_value(json!({
            "id": 7, "name": "x",
            "ticket_types": {"ticket_types": [{"name": "GA", "price": "5.00"}]}
        }))
        .unwrap();
        let bare: ApiEvent = serde_json::from_value(json!({
            "id": 7, "name": "x",
            "ticket_types": [{"name": "GA", "price": 5}]
        }))
        .unwrap();

        assert_eq!(wrapped.ticket_types.unwrap().as_slice()[0].name.as_deref(), Some("GA"));
        assert_eq!(bare.ticket_types.unwrap().as_slice()[0].price, Some(json!(5)));
    }

    #[test]
    fn test_api_description_plain_and_html() {
        assert_eq!(api_description(Some("  Just text ")), Some("Just text".to_string()));
        assert_eq!(
            api_description(Some("<p>Jazz &amp; blues</p><br/>tonight")),
            Some("Jazz & blues tonight".to_string())
        );
        assert_eq!(api_description(Some("<p> </p>")), None);
        assert_eq!(api_description(Some("")), None);
        assert_eq!(api_description(None), None);
    }

    #[test]
    fn test_scraped_description_overrides_api() {
        let mut e = event(1);
        e.description = Some("From the API".to_string());

        let normalized = normalize_event(&e, Some("From the page".to_string()));
        assert_eq!(normalized.description.as_deref(), Some("From the page"));
    }

    #[test]
    fn test_api_description_used_when_scrape_empty() {
        let mut e = event(1);
        e.description = Some("From the API".to_string());

        assert_eq!(
            normalize_event(&e, None).description.as_deref(),
            Some("From the API")
        );
        assert_eq!(
            normalize_event(&e, Some("   ".to_string())).description.as_deref(),
            Some("From the API")
        );
    }

    #[test]
    fn test_scraped_description_from_page() {
        let page = r#"<html><div id="eventDescription"><p>Doors&nbsp;open at 7</p></div></html>"#;
        assert_eq!(scraped_description(page), Some("Doors open at 7".to_string()));
        assert_eq!(scraped_description("<html><p>nothing</p></html>"), None);
        assert_eq!(scraped_description(r#"<div id="eventDescription"> </div>"#), None);
    }

    #[test]
    fn test_scraped_description_skips_embedded_code() {
        let page = r#"<div id="eventDescription"><script>var x = 1;</script><style>p{margin:0}</style><p>Real</p></div>"#;
        assert_eq!(scraped_description(page), Some("Real".to_string()));

        // A description holding only a widget counts as empty
        let page = r#"<div id="eventDescription"><script>widget()</script></div>"#;
        assert_eq!(scraped_description(page), None);
    }

    #[test]
    fn test_normalize_event_fields() {
        let e = ApiEvent {
            id: 42,
            name: "Night Market".to_string(),
            description: Some("Food stalls".to_string()),
            url: Some("https://events.example/night-market".to_string()),
            datetime_start: Some("2026-10-20 17:00:00".to_string()),
            datetime_end: Some("2026-10-20 22:00:00".to_string()),
            address: Some("1 Queen St".to_string()),
            is_free: true,
            ticket_types: None,
            category: Some(ApiCategory { name: "Markets".to_string() }),
            categories: vec![
                ApiCategory { name: "Markets".to_string() },
                ApiCategory { name: "Food".to_string() },
            ],
        };

        let out = normalize_event(&e, None);
        assert_eq!(out.id, 42);
        assert_eq!(out.title, "Night Market");
        assert_eq!(out.start.as_deref(), Some("2026-10-20 17:00:00"));
        assert_eq!(out.categories, vec!["Markets", "Food"]);
        assert_eq!(out.ticket_info, TicketInfo::Note(FREE_EVENT.to_string()));

        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["ticket_info"], json!("Free event"));
    }

    #[test]
    fn test_scrape_target() {
        let mut e = event(1);
        assert_eq!(scrape_target(&e), None);
        e.url = Some("/relative/path".to_string());
        assert_eq!(scrape_target(&e), None);
        e.url = Some("https://events.example/e/1".to_string());
        assert_eq!(scrape_target(&e), Some("https://events.example/e/1"));
    }
}
