//! Background fetch of one day's external events.
//!
//! A single request runs on its own thread and reports back over a channel
//! that the UI polls once per frame. Only one request is ever in flight.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;

use super::client::{DayRange, ExternalCalendarClient};
use crate::models::external_event::ExternalEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Fetched {
        day: NaiveDate,
        events: Vec<ExternalEvent>,
    },
    Failed {
        day: NaiveDate,
        message: String,
    },
}

impl SyncOutcome {
    pub fn day(&self) -> NaiveDate {
        match self {
            SyncOutcome::Fetched { day, .. } | SyncOutcome::Failed { day, .. } => *day,
        }
    }
}

struct InFlight {
    day: NaiveDate,
    rx: Receiver<SyncOutcome>,
}

pub struct SyncWorker {
    client: Arc<dyn ExternalCalendarClient>,
    in_flight: Option<InFlight>,
}

impl SyncWorker {
    pub fn new(client: Arc<dyn ExternalCalendarClient>) -> Self {
        Self {
            client,
            in_flight: None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight_day(&self) -> Option<NaiveDate> {
        self.in_flight.as_ref().map(|in_flight| in_flight.day)
    }

    /// Start fetching `day` in the system time zone.
    pub fn request(&mut self, day: NaiveDate) -> bool {
        self.request_range(DayRange::for_day(day))
    }

    /// Start fetching `range`. Returns false, doing nothing, while another
    /// request is outstanding.
    pub fn request_range(&mut self, range: DayRange) -> bool {
        if let Some(in_flight) = &self.in_flight {
            log::debug!(
                "Sync for {} requested while {} is still in flight; ignoring",
                range.date,
                in_flight.day
            );
            return false;
        }

        let (tx, rx) = mpsc::channel();
        let client = Arc::clone(&self.client);
        let day = range.date;

        log::info!("Starting external calendar sync for {}", day);
        thread::spawn(move || {
            let outcome = match client.list_events(&range) {
                Ok(events) => SyncOutcome::Fetched { day, events },
                Err(err) => SyncOutcome::Failed {
                    day,
                    message: format!("{:#}", err),
                },
            };
            let _ = tx.send(outcome);
        });

        self.in_flight = Some(InFlight { day, rx });
        true
    }

    /// Non-blocking check for a finished request.
    pub fn poll(&mut self) -> Option<SyncOutcome> {
        let in_flight = self.in_flight.as_ref()?;
        let outcome = match in_flight.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => SyncOutcome::Failed {
                day: in_flight.day,
                message: "Sync worker disconnected unexpectedly".to_string(),
            },
        };

        self.in_flight = None;
        if let SyncOutcome::Failed { day, message } = &outcome {
            log::warn!("External calendar sync for {} failed: {}", day, message);
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::external_event::ExternalTime;
    use crate::services::calendar_sync::client::MockExternalCalendarClient;
    use anyhow::anyhow;
    use chrono::FixedOffset;
    use std::sync::{Barrier, Mutex};
    use std::time::{Duration, Instant};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn range() -> DayRange {
        DayRange::for_day_in(day(), &FixedOffset::east_opt(0).unwrap())
    }

    fn wait(worker: &mut SyncWorker) -> SyncOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = worker.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "sync worker timed out");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_successful_fetch() {
        let mut client = MockExternalCalendarClient::new();
        client
            .expect_list_events()
            .withf(|range| range.date == NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
            .times(1)
            .returning(|range| {
                Ok(vec![ExternalEvent::new(
                    "e1",
                    Some("Standup".to_string()),
                    ExternalTime::AllDay(range.date),
                    ExternalTime::AllDay(range.date),
                )])
            });

        let mut worker = SyncWorker::new(Arc::new(client));
        assert!(worker.request_range(range()));
        assert_eq!(worker.in_flight_day(), Some(day()));

        match wait(&mut worker) {
            SyncOutcome::Fetched { day: fetched_day, events } => {
                assert_eq!(fetched_day, day());
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].id, "e1");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!worker.is_in_flight());
    }

    #[test]
    fn test_failure_is_reported_with_context() {
        let mut client = MockExternalCalendarClient::new();
        client
            .expect_list_events()
            .returning(|_| Err(anyhow!("HTTP 500").context("Failed to fetch")));

        let mut worker = SyncWorker::new(Arc::new(client));
        worker.request_range(range());

        let outcome = wait(&mut worker);
        assert_eq!(
            outcome,
            SyncOutcome::Failed {
                day: day(),
                message: "Failed to fetch: HTTP 500".to_string(),
            }
        );
    }

    #[test]
    fn test_second_request_while_in_flight_is_ignored() {
        let gate = Arc::new(Barrier::new(2));
        let calls = Arc::new(Mutex::new(0));

        let mut client = MockExternalCalendarClient::new();
        let client_gate = Arc::clone(&gate);
        let client_calls = Arc::clone(&calls);
        client.expect_list_events().returning(move |_| {
            *client_calls.lock().unwrap() += 1;
            client_gate.wait();
            Ok(Vec::new())
        });

        let mut worker = SyncWorker::new(Arc::new(client));
        assert!(worker.request_range(range()));
        assert!(!worker.request_range(range()));
        assert!(worker.poll().is_none());

        gate.wait();
        assert!(matches!(wait(&mut worker), SyncOutcome::Fetched { .. }));
        assert_eq!(*calls.lock().unwrap(), 1);

        // A new request is accepted once the first has been collected.
        assert!(worker.request_range(range()));
        gate.wait();
        wait(&mut worker);
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[test]
    fn test_poll_without_request() {
        let client = MockExternalCalendarClient::new();
        let mut worker = SyncWorker::new(Arc::new(client));
        assert!(worker.poll().is_none());
    }
}
