use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::thread;
use std::time::Duration;
use thiserror::Error;

use super::client::{DayRange, ExternalCalendarClient};
use crate::models::external_event::{ExternalEvent, ExternalTime};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
pub const PRIMARY_CALENDAR: &str = "primary";

/// Upper bound on result pages followed for a single day.
const MAX_PAGES: usize = 10;

/// The calendar API refused the credentials. Not retried.
#[derive(Debug, Error)]
#[error("Google Calendar rejected the access token (HTTP {0}); sign in again and update the token")]
pub struct AuthError(pub u16);

/// One HTTP GET against the calendar API, returning the response body.
#[cfg_attr(test, mockall::automock)]
trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String>;
}

struct HttpFetcher {
    client: Client,
    access_token: String,
    max_response_bytes: usize,
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .map_err(|err| {
                anyhow!(
                    "Network error during calendar fetch: {}",
                    redact(&err.to_string(), &self.access_token)
                )
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError(status.as_u16()).into());
        }
        if status != StatusCode::OK {
            return Err(anyhow!("Calendar fetch failed with HTTP status {}", status));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_bytes {
                return Err(anyhow!(
                    "Calendar response too large ({} bytes > {} bytes)",
                    content_length,
                    self.max_response_bytes
                ));
            }
        }

        let bytes = response
            .bytes()
            .context("Failed to read calendar response body")?;

        if bytes.len() > self.max_response_bytes {
            return Err(anyhow!(
                "Calendar response too large ({} bytes > {} bytes)",
                bytes.len(),
                self.max_response_bytes
            ));
        }

        String::from_utf8(bytes.to_vec()).context("Calendar response is not valid UTF-8")
    }
}

pub struct GoogleCalendarClient {
    fetcher: Box<dyn PageFetcher>,
    base_url: String,
    calendar_id: String,
    access_token: String,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl GoogleCalendarClient {
    pub fn new(access_token: impl Into<String>, calendar_id: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .context("Failed to build Google Calendar HTTP client")?;

        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(anyhow!("Google Calendar access token is empty"));
        }

        let fetcher = HttpFetcher {
            client,
            access_token: access_token.clone(),
            max_response_bytes: 5 * 1024 * 1024,
        };

        Ok(Self {
            fetcher: Box::new(fetcher),
            base_url: DEFAULT_API_BASE.to_string(),
            calendar_id: calendar_id.into(),
            access_token,
            max_retries: 2,
            retry_delay_ms: 400,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn events_url(&self, range: &DayRange, page_token: Option<&str>) -> String {
        let mut url = format!(
            "{}/calendars/{}/events?timeMin={}&timeMax={}&singleEvents=true&orderBy=startTime&showDeleted=false",
            self.base_url,
            urlencoding::encode(&self.calendar_id),
            urlencoding::encode(&to_query_time(range.start.with_timezone(&Utc))),
            urlencoding::encode(&to_query_time(range.end.with_timezone(&Utc))),
        );
        if let Some(token) = page_token {
            url.push_str("&pageToken=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }

    fn fetch_with_retries(&self, url: &str) -> Result<String> {
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..=self.max_retries {
            match self.fetcher.fetch(url) {
                Ok(body) => return Ok(body),
                Err(err) if err.is::<AuthError>() => return Err(err),
                Err(err) => {
                    let is_last_attempt = attempt == self.max_retries;
                    if is_last_attempt {
                        last_error = Some(err.context(format!(
                            "Failed to fetch Google Calendar events after {} attempts",
                            attempt + 1
                        )));
                    } else {
                        log::warn!(
                            "Google Calendar fetch attempt {} failed: {}",
                            attempt + 1,
                            self.redact(&err.to_string())
                        );
                        thread::sleep(Duration::from_millis(self.retry_delay_ms));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("Unknown Google Calendar fetch error")))
    }

    fn redact(&self, text: &str) -> String {
        redact(text, &self.access_token)
    }
}

fn redact(text: &str, token: &str) -> String {
    text.replace(token, "***redacted***")
}

impl ExternalCalendarClient for GoogleCalendarClient {
    fn list_events(&self, range: &DayRange) -> Result<Vec<ExternalEvent>> {
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let url = self.events_url(range, page_token.as_deref());
            let body = self.fetch_with_retries(&url)?;
            let page = parse_event_list(&body)?;
            events.extend(page.events);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        log::info!(
            "Fetched {} Google Calendar events for {}",
            events.len(),
            range.date
        );
        Ok(events)
    }
}

fn to_query_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEventList {
    #[serde(default)]
    items: Vec<serde_json::Value>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEvent {
    id: Option<String>,
    status: Option<String>,
    summary: Option<String>,
    start: Option<WireTime>,
    end: Option<WireTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTime {
    date_time: Option<String>,
    date: Option<String>,
}

impl WireTime {
    fn to_external(&self) -> Option<ExternalTime> {
        if let Some(date_time) = &self.date_time {
            return DateTime::parse_from_rfc3339(date_time)
                .ok()
                .map(ExternalTime::At);
        }
        self.date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(ExternalTime::AllDay)
    }
}

impl WireEvent {
    fn into_external(self) -> Result<Option<ExternalEvent>, String> {
        if self.status.as_deref() == Some("cancelled") {
            return Ok(None);
        }

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| "record has no id".to_string())?;
        let start = self
            .start
            .as_ref()
            .and_then(WireTime::to_external)
            .ok_or_else(|| format!("record {} has no usable start", id))?;
        let end = self
            .end
            .as_ref()
            .and_then(WireTime::to_external)
            .ok_or_else(|| format!("record {} has no usable end", id))?;

        Ok(Some(ExternalEvent::new(id, self.summary, start, end)))
    }
}

#[derive(Debug)]
pub(crate) struct EventPage {
    pub events: Vec<ExternalEvent>,
    pub next_page_token: Option<String>,
}

/// Parse one page of an events list response. Individual malformed records
/// are skipped; a body that is not an events list at all is an error.
pub(crate) fn parse_event_list(body: &str) -> Result<EventPage> {
    let list: WireEventList =
        serde_json::from_str(body).context("Calendar response is not a valid events list")?;

    let mut events = Vec::with_capacity(list.items.len());
    for item in list.items {
        let parsed = serde_json::from_value::<WireEvent>(item)
            .map_err(|err| err.to_string())
            .and_then(WireEvent::into_external);
        match parsed {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(reason) => log::warn!("Skipping calendar record: {}", reason),
        }
    }

    Ok(EventPage {
        events,
        next_page_token: list.next_page_token,
    })
}
