//! Bounded-concurrency retrieval of one document per station.
//!
//! Stations are drained from a shared queue in waves. All fetches of a wave
//! are polled concurrently on the calling task and the next wave only starts
//! once every fetch of the current one has finished, so at most `concurrency`
//! requests are ever in flight.

use crate::fetching::error::FetchError;
use crate::fetching::source::DocumentSource;
use crate::request::query::station_url;
use crate::types::station::StationId;
use futures_util::future::join_all;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use url::Url;

/// Default number of simultaneous requests.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// The raw response for one station, or why there is none.
#[derive(Debug)]
pub struct StationDocument {
    pub station: StationId,
    pub body: Result<Value, FetchError>,
}

pub struct FetchDispatcher<S> {
    source: S,
    concurrency: usize,
}

impl<S: DocumentSource> FetchDispatcher<S> {
    /// A `concurrency` of zero is treated as one.
    pub fn new(source: S, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches every station in `stations` against `base_url`.
    ///
    /// Returns one [`StationDocument`] per station in completion order.
    /// Failures are logged and returned as documents with an `Err` body; they
    /// never stop the remaining stations from being fetched.
    pub async fn fetch_all(&self, stations: &[StationId], base_url: &Url) -> Vec<StationDocument> {
        let queue = Mutex::new(stations.iter().cloned().collect::<VecDeque<_>>());
        let results = Mutex::new(Vec::with_capacity(stations.len()));
        let mut wave_number = 0usize;

        loop {
            let wave: Vec<StationId> = {
                let mut queue = queue.lock().await;
                let take = self.concurrency.min(queue.len());
                queue.drain(..take).collect()
            };
            if wave.is_empty() {
                break;
            }
            wave_number += 1;
            debug!("Wave {} fetching {} stations", wave_number, wave.len());

            join_all(
                wave.into_iter()
                    .map(|station| self.fetch_station(station, base_url, &results)),
            )
            .await;
        }

        let documents = results.into_inner();
        let failed = documents.iter().filter(|d| d.body.is_err()).count();
        info!(
            "Fetched {} stations in {} waves ({} failed)",
            documents.len(),
            wave_number,
            failed
        );
        documents
    }

    async fn fetch_station(
        &self,
        station: StationId,
        base_url: &Url,
        results: &Mutex<Vec<StationDocument>>,
    ) {
        let url = station_url(base_url, &station);
        let body = self.source.fetch(&url).await;
        if let Err(e) = &body {
            warn!("Fetch failed for station {}: {}", station, e);
        }
        results.lock().await.push(StationDocument { station, body });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::query::station_of;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    /// Records how many fetches are in flight and how many had completed
    /// whenever a new one starts.
    #[derive(Default)]
    struct CountingSource {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        completed: AtomicUsize,
        completed_at_start: StdMutex<Vec<usize>>,
    }

    impl DocumentSource for CountingSource {
        async fn fetch(&self, url: &Url) -> Result<Value, FetchError> {
            let station = station_of(url).expect("station parameter");
            self.completed_at_start
                .lock()
                .unwrap()
                .push(self.completed.load(Ordering::SeqCst));
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            // Uneven latencies so completion order differs from start order.
            let delay = 1 + station.as_str().len() as u64 % 4;
            tokio::time::sleep(Duration::from_millis(delay)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.completed.fetch_add(1, Ordering::SeqCst);
            if station.as_str().starts_with("bad") {
                return Err(FetchError::Decode {
                    url: url.to_string(),
                    source: serde_json::from_str::<Value>("<html>").unwrap_err(),
                });
            }
            Ok(json!({ "data": [], "echo": station.as_str() }))
        }
    }

    fn stations(n: usize) -> Vec<StationId> {
        (0..n).map(|i| StationId::from(format!("{}", 8_000_000 + i * 37))).collect()
    }

    fn base() -> Url {
        Url::parse("http://localhost/api/prod/datagetter?product=predictions").unwrap()
    }

    #[tokio::test]
    async fn test_never_exceeds_ceiling() {
        for n in [0, 1, 3, 10, 11, 25] {
            let dispatcher = FetchDispatcher::new(CountingSource::default(), 10);
            let docs = dispatcher.fetch_all(&stations(n), &base()).await;
            assert_eq!(docs.len(), n);
            let max = dispatcher.source().max_in_flight.load(Ordering::SeqCst);
            assert!(max <= 10, "n={n} max={max}");
            if n > 0 {
                assert_eq!(max, n.min(10), "n={n}");
            }
        }
    }

    #[tokio::test]
    async fn test_waves_are_strictly_sequential() {
        let ceiling = 4;
        let dispatcher = FetchDispatcher::new(CountingSource::default(), ceiling);
        dispatcher.fetch_all(&stations(13), &base()).await;

        let starts = dispatcher.source().completed_at_start.lock().unwrap().clone();
        assert_eq!(starts.len(), 13);
        for (i, completed) in starts.into_iter().enumerate() {
            // The i-th fetch belongs to wave i / ceiling; every earlier wave must be done.
            assert_eq!(completed, (i / ceiling) * ceiling, "fetch {i}");
        }
    }

    #[tokio::test]
    async fn test_every_document_is_stamped() {
        let input = stations(7);
        let dispatcher = FetchDispatcher::new(CountingSource::default(), 3);
        let docs = dispatcher.fetch_all(&input, &base()).await;

        let mut seen: Vec<StationId> = docs.iter().map(|d| d.station.clone()).collect();
        seen.sort();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(seen, expected);

        for doc in docs {
            let body = doc.body.unwrap();
            assert_eq!(body["echo"], doc.station.as_str());
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_batch() {
        let mut input = stations(5);
        input.insert(2, StationId::from("bad-station"));
        let dispatcher = FetchDispatcher::new(CountingSource::default(), 2);
        let docs = dispatcher.fetch_all(&input, &base()).await;

        assert_eq!(docs.len(), 6);
        let failed: Vec<_> = docs.iter().filter(|d| d.body.is_err()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].station.as_str(), "bad-station");
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_drains() {
        let dispatcher = FetchDispatcher::new(CountingSource::default(), 0);
        assert_eq!(dispatcher.concurrency(), 1);
        let docs = dispatcher.fetch_all(&stations(3), &base()).await;
        assert_eq!(docs.len(), 3);
        assert_eq!(dispatcher.source().max_in_flight.load(Ordering::SeqCst), 1);
    }
}
