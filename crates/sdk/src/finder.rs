//! Upcoming-events lookup: location resolution, listing, per-event detail
//! and description scraping, assembled into normalized `Event` records.

use crate::api::EventsClient;
use crate::error::SdkResult;
use chrono::{Duration, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use hearsay_core::events::{self, ApiEvent, Event, EVENT_WINDOW_DAYS};
use tracing::{debug, info, warn};

/// Default number of events resolved concurrently.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Events found for a location, in listing order.
#[derive(Debug, Clone)]
pub struct UpcomingEvents {
    pub location: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub events: Vec<Event>,
}

/// Runs the events pipeline against an `EventsClient`.
#[derive(Debug, Clone)]
pub struct EventFinder {
    client: EventsClient,
    concurrency: usize,
}

impl EventFinder {
    pub fn new(client: EventsClient) -> Self {
        Self {
            client,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Cap on per-event lookups in flight at once (at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Events for the next seven days starting today (UTC).
    pub async fn upcoming(&self, location: &str) -> SdkResult<UpcomingEvents> {
        self.upcoming_from(location, Utc::now().date_naive()).await
    }

    /// Events in `[today, today + 7 days]`.
    ///
    /// Location resolution and listing failures abort the lookup. Per-event
    /// failures only degrade that event.
    pub async fn upcoming_from(&self, location: &str, today: NaiveDate) -> SdkResult<UpcomingEvents> {
        let resolved = self.client.find_location(location).await?;
        let end = today + Duration::days(EVENT_WINDOW_DAYS);
        info!(location = %resolved.name, location_id = resolved.id, %today, %end, "Listing events");

        let summaries = self.client.search_events(resolved.id, today, end).await?;
        debug!(count = summaries.len(), "Events listed");

        // buffered() keeps input order regardless of completion order
        let events = stream::iter(summaries)
            .map(|summary| self.resolve(summary))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(UpcomingEvents {
            location: resolved.name,
            start: today,
            end,
            events,
        })
    }

    /// Detail record (or the summary if that fails) plus scraped description.
    async fn resolve(&self, summary: ApiEvent) -> Event {
        let record = match self.client.event(summary.id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(event_id = summary.id, error = %e, "Event detail fetch failed, using summary");
                summary
            }
        };

        let scraped = match events::scrape_target(&record) {
            Some(url) => self.scrape_description(record.id, url).await,
            None => None,
        };

        events::normalize_event(&record, scraped)
    }

    async fn scrape_description(&self, event_id: u64, url: &str) -> Option<String> {
        match self.client.fetch_page(url).await {
            Ok(page) => {
                let description = events::scraped_description(&page);
                if description.is_none() {
                    debug!(event_id, url, "No description element on event page");
                }
                description
            }
            Err(e) => {
                warn!(event_id, url, error = %e, "Description scrape failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientBuilder;
    use crate::error::UpstreamError;
    use hearsay_core::events::TicketInfo;
    use serde_json::json;
    use std::time::Duration as StdDuration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn finder(server: &MockServer) -> EventFinder {
        let client = ClientBuilder::new()
            .base_url(format!("{}/v2", server.uri()))
            .basic_auth("user", "pass")
            .events()
            .unwrap();
        EventFinder::new(client)
    }

    async fn mount_location(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v2/locations.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "locations": [{"id": 5, "name": "Wellington"}]
            })))
            .mount(server)
            .await;
    }

    async fn mount_listing(server: &MockServer, events: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v2/events.json"))
            .and(query_param("location", "5"))
            .and(query_param("start_date", "2026-10-18"))
            .and(query_param("end_date", "2026-10-25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": events })))
            .mount(server)
            .await;
    }

    async fn mount_detail(server: &MockServer, id: u64, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/v2/events.json"))
            .and(query_param("id", id.to_string()))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_unknown_location_stops_pipeline() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/locations.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"locations": []})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/events.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": []})))
            .expect(0)
            .mount(&server)
            .await;

        let err = finder(&server).upcoming_from("Nowhere", today()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::LocationNotFound(_)));
    }

    #[tokio::test]
    async fn test_detail_failure_falls_back_to_summary() {
        let server = MockServer::start().await;
        mount_location(&server).await;
        mount_listing(
            &server,
            json!([{"id": 1, "name": "Summary title", "description": "Summary text", "is_free": true}]),
        )
        .await;
        mount_detail(&server, 1, ResponseTemplate::new(500)).await;

        let result = finder(&server).upcoming_from("Wellington", today()).await.unwrap();
        assert_eq!(result.location, "Wellington");
        assert_eq!(result.events.len(), 1);

        let event = &result.events[0];
        assert_eq!(event.title, "Summary title");
        assert_eq!(event.description.as_deref(), Some("Summary text"));
        assert_eq!(event.ticket_info, TicketInfo::Note("Free event".to_string()));
    }

    #[tokio::test]
    async fn test_detail_record_preferred_over_summary() {
        let server = MockServer::start().await;
        mount_location(&server).await;
        mount_listing(&server, json!([{"id": 1, "name": "Short"}])).await;
        mount_detail(
            &server,
            1,
            ResponseTemplate::new(200).set_body_json(json!({"events": [{
                "id": 1, "name": "Full name", "description": "<p>Full &amp; rich</p>",
                "ticket_types": {"ticket_types": [{"name": "GA", "price": "15.00"}]}
            }]})),
        )
        .await;

        let result = finder(&server).upcoming_from("Wellington", today()).await.unwrap();
        let event = &result.events[0];
        assert_eq!(event.title, "Full name");
        assert_eq!(event.description.as_deref(), Some("Full & rich"));
        match &event.ticket_info {
            TicketInfo::Tickets(tickets) => assert_eq!(tickets[0].name, "GA"),
            other => panic!("expected tickets, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scraped_description_overrides_api() {
        let server = MockServer::start().await;
        let page_url = format!("{}/pages/1", server.uri());

        mount_location(&server).await;
        mount_listing(&server, json!([{"id": 1, "name": "E"}])).await;
        mount_detail(
            &server,
            1,
            ResponseTemplate::new(200).set_body_json(json!({"events": [{
                "id": 1, "name": "E", "description": "API text", "url": page_url
            }]})),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/pages/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><div id="eventDescription"><p>Page&nbsp;text</p></div></html>"#,
            ))
            .mount(&server)
            .await;

        let result = finder(&server).upcoming_from("Wellington", today()).await.unwrap();
        assert_eq!(result.events[0].description.as_deref(), Some("Page text"));
    }

    #[tokio::test]
    async fn test_scrape_failure_keeps_api_description() {
        let server = MockServer::start().await;
        let page_url = format!("{}/pages/missing", server.uri());

        mount_location(&server).await;
        mount_listing(
            &server,
            json!([{"id": 3, "name": "E", "description": "API text", "url": page_url}]),
        )
        .await;
        mount_detail(&server, 3, ResponseTemplate::new(404)).await;
        Mock::given(method("GET"))
            .and(path("/pages/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = finder(&server).upcoming_from("Wellington", today()).await.unwrap();
        assert_eq!(result.events[0].description.as_deref(), Some("API text"));
    }

    #[tokio::test]
    async fn test_output_order_matches_listing() {
        let server = MockServer::start().await;
        mount_location(&server).await;
        mount_listing(
            &server,
            json!([{"id": 1, "name": "first"}, {"id": 2, "name": "second"}, {"id": 3, "name": "third"}]),
        )
        .await;

        // The first detail is the slowest to answer
        for (id, delay_ms) in [(1u64, 300u64), (2, 100), (3, 0)] {
            mount_detail(
                &server,
                id,
                ResponseTemplate::new(200)
                    .set_delay(StdDuration::from_millis(delay_ms))
                    .set_body_json(json!({"events": [{"id": id, "name": format!("detail {}", id)}]})),
            )
            .await;
        }

        let result = finder(&server)
            .with_concurrency(3)
            .upcoming_from("Wellington", today())
            .await
            .unwrap();
        let titles: Vec<_> = result.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["detail 1", "detail 2", "detail 3"]);
    }

    #[tokio::test]
    async fn test_detail_lookups_respect_concurrency_limit() {
        let server = MockServer::start().await;
        mount_location(&server).await;
        let listing: Vec<_> = (1u64..=6)
            .map(|id| json!({"id": id, "name": format!("event {}", id)}))
            .collect();
        mount_listing(&server, json!(listing)).await;

        for id in 1u64..=6 {
            mount_detail(
                &server,
                id,
                ResponseTemplate::new(200)
                    .set_delay(StdDuration::from_millis(200))
                    .set_body_json(json!({"events": [{"id": id, "name": format!("detail {}", id)}]})),
            )
            .await;
        }

        // Two lookups in flight at a time means three 200ms waves
        let started = std::time::Instant::now();
        let result = finder(&server)
            .with_concurrency(2)
            .upcoming_from("Wellington", today())
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert!(
            elapsed >= StdDuration::from_millis(550),
            "finished in {:?}, more than two lookups ran at once",
            elapsed
        );
        let titles: Vec<_> = result.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["detail 1", "detail 2", "detail 3", "detail 4", "detail 5", "detail 6"]
        );
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let server = MockServer::start().await;
        mount_location(&server).await;
        mount_listing(&server, json!([])).await;

        let result = finder(&server).upcoming_from("Wellington", today()).await.unwrap();
        assert!(result.events.is_empty());
        assert_eq!(result.end, NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
    }

    #[tokio::test]
    async fn test_listing_failure_is_an_error() {
        let server = MockServer::start().await;
        mount_location(&server).await;
        Mock::given(method("GET"))
            .and(path("/v2/events.json"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = finder(&server).upcoming_from("Wellington", today()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Api { status: 502, .. }));
    }
}
