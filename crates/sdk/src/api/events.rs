//! Events directory API endpoints.

use crate::error::{SdkResult, UpstreamError};
use crate::transport::HttpTransport;
use chrono::NaiveDate;
use hearsay_core::events::{
    ApiEvent, EventSearchResponse, Location, LocationSearchResponse, EVENT_PAGE_SIZE,
};
use hearsay_core::params;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for the basic-auth protected events directory API.
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: HttpTransport,
}

impl EventsClient {
    pub(crate) fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    /// Resolve free text to a location. Only the first match is used; no
    /// match is an error.
    pub async fn find_location(&self, query: &str) -> SdkResult<Location> {
        let query = params::non_empty("location", query)?;

        let response: LocationSearchResponse = self
            .http
            .get_json("locations.json", &[("q", query.as_str()), ("rows", "1")])
            .await?;

        response
            .locations
            .into_iter()
            .next()
            .ok_or(UpstreamError::LocationNotFound(query))
    }

    /// Events at a location between two dates (inclusive), at most
    /// `EVENT_PAGE_SIZE` of them, ordered by date.
    pub async fn search_events(
        &self,
        location_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SdkResult<Vec<ApiEvent>> {
        let response: EventSearchResponse = self
            .http
            .get_json(
                "events.json",
                &[
                    ("location", location_id.to_string()),
                    ("start_date", start.format(DATE_FORMAT).to_string()),
                    ("end_date", end.format(DATE_FORMAT).to_string()),
                    ("rows", EVENT_PAGE_SIZE.to_string()),
                    ("order", "date".to_string()),
                ],
            )
            .await?;

        Ok(response.events)
    }

    /// Full record for one event.
    pub async fn event(&self, id: u64) -> SdkResult<ApiEvent> {
        let response: EventSearchResponse = self
            .http
            .get_json("events.json", &[("id", id.to_string())])
            .await?;

        response
            .events
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::NotFound(format!("event {}", id)))
    }

    /// Public event page as HTML. Sent without credentials.
    pub async fn fetch_page(&self, url: &str) -> SdkResult<String> {
        self.http.get_page(url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::ClientBuilder;
    use crate::error::UpstreamError;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> super::EventsClient {
        ClientBuilder::new()
            .base_url(format!("{}/v2", server.uri()))
            .basic_auth("user", "pass")
            .events()
            .unwrap()
    }

    #[tokio::test]
    async fn test_find_location_takes_first_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/locations.json"))
            .and(query_param("q", "Auckland"))
            .and(query_param("rows", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "locations": [{"id": 2, "name": "Auckland"}, {"id": 9, "name": "Auckland Central"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let location = client(&server).await.find_location(" Auckland ").await.unwrap();
        assert_eq!(location.id, 2);
        assert_eq!(location.name, "Auckland");
    }

    #[tokio::test]
    async fn test_find_location_no_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/locations.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"locations": []})))
            .mount(&server)
            .await;

        let err = client(&server).await.find_location("Atlantis").await.unwrap_err();
        assert!(matches!(err, UpstreamError::LocationNotFound(ref q) if q == "Atlantis"));
        assert_eq!(err.to_string(), "No location found matching 'Atlantis'");
    }

    #[tokio::test]
    async fn test_search_events_window_and_page_size() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/events.json"))
            .and(query_param("location", "2"))
            .and(query_param("start_date", "2026-10-18"))
            .and(query_param("end_date", "2026-10-25"))
            .and(query_param("rows", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{"id": 1, "name": "One"}, {"id": 2, "name": "Two"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let start = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        let events = client(&server).await.search_events(2, start, end).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].name, "Two");
    }

    #[tokio::test]
    async fn test_event_detail_missing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/events.json"))
            .and(query_param("id", "77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": []})))
            .mount(&server)
            .await;

        let err = client(&server).await.event(77).await.unwrap_err();
        assert!(matches!(err, UpstreamError::NotFound(_)));
    }
}
