use super::sequence::RequestSequencer;
use super::traits::GeocodeTransport;
use super::types::GeocodeResult;
use crate::in_flight::InFlightCounter;
use tracing::{info, warn};

/// Outcome of [`Geocoder::resolve_latest`]
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Input was blank; nothing was requested
    Skipped,
    /// Newest request issued so far
    Current(GeocodeResult),
    /// Another request was issued while this one was in flight
    Superseded(GeocodeResult),
}

/// Single best-effort place lookup per call: no retries and no errors
/// surfaced to the caller.
pub struct Geocoder<T> {
    transport: T,
    in_flight: InFlightCounter,
    sequencer: RequestSequencer,
}

impl<T: GeocodeTransport> Geocoder<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            in_flight: InFlightCounter::new(),
            sequencer: RequestSequencer::new(),
        }
    }

    /// True while any lookup is waiting on the transport; search controls
    /// stay disabled meanwhile
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_active()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve `text` to a place name and position
    ///
    /// Blank input returns `None` without a request. When the service has
    /// no candidate, or the call fails in any way, the result carries the
    /// input text and no coordinate.
    pub async fn resolve(&self, text: &str) -> Option<GeocodeResult> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        let _guard = self.in_flight.enter();
        let result = match self.transport.search(query).await {
            Ok(response) => match response.best_match() {
                Some(found) => {
                    info!("Geocoded {:?} to {:?} at {:?}", query, found.label, found.coordinate);
                    found
                }
                None => {
                    info!("No {} results found for {:?}", self.transport.source_name(), query);
                    GeocodeResult::unresolved(text)
                }
            },
            Err(e) => {
                warn!("Geocoding error for {:?}: {:#}", query, e);
                GeocodeResult::unresolved(text)
            }
        };
        Some(result)
    }

    /// [`Self::resolve`], tagged so a response overtaken by a newer request
    /// is reported as superseded
    pub async fn resolve_latest(&self, text: &str) -> Resolution {
        if text.trim().is_empty() {
            return Resolution::Skipped;
        }

        let ticket = self.sequencer.issue();
        let Some(result) = self.resolve(text).await else {
            return Resolution::Skipped;
        };

        if self.sequencer.is_latest(ticket) {
            Resolution::Current(result)
        } else {
            info!("Discarding stale geocode response for {:?}", text.trim());
            Resolution::Superseded(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::types::{Feature, GeocodeResponse, Geometry};
    use crate::models::Coordinate;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers from a fixed table; unknown queries fail
    #[derive(Default)]
    struct TableTransport {
        places: Vec<(&'static str, &'static str, [f64; 2], u64)>,
        queries: Mutex<Vec<String>>,
    }

    impl TableTransport {
        fn with(mut self, query: &'static str, name: &'static str, coords: [f64; 2], delay_ms: u64) -> Self {
            self.places.push((query, name, coords, delay_ms));
            self
        }
    }

    #[async_trait]
    impl GeocodeTransport for TableTransport {
        async fn search(&self, query: &str) -> Result<GeocodeResponse> {
            self.queries.lock().unwrap().push(query.to_string());
            if query == "empty" {
                return Ok(GeocodeResponse::default());
            }
            let Some((_, name, coords, delay)) = self.places.iter().find(|p| p.0 == query) else {
                bail!("connection refused");
            };
            tokio::time::sleep(Duration::from_millis(*delay)).await;
            Ok(GeocodeResponse {
                features: vec![Feature {
                    place_name: name.to_string(),
                    geometry: Geometry {
                        coordinates: coords.to_vec(),
                    },
                }],
            })
        }

        fn source_name(&self) -> &'static str {
            "table"
        }
    }

    #[tokio::test]
    async fn test_blank_input_makes_no_request() {
        let geocoder = Geocoder::new(TableTransport::default());
        assert_eq!(geocoder.resolve("   ").await, None);
        assert_eq!(geocoder.resolve_latest("").await, Resolution::Skipped);
        assert!(geocoder.transport().queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_first_candidate_wins() {
        let transport = TableTransport::default().with("Austin", "Austin, Texas, United States", [-97.74, 30.27], 0);
        let geocoder = Geocoder::new(transport);

        let result = geocoder.resolve(" Austin ").await.unwrap();
        assert_eq!(result.label, "Austin, Texas, United States");
        assert_eq!(result.coordinate, Some(Coordinate::new(-97.74, 30.27)));
        assert_eq!(*geocoder.transport().queries.lock().unwrap(), vec!["Austin"]);
        assert!(!geocoder.is_in_flight());
    }

    #[tokio::test]
    async fn test_no_features_falls_back_to_input() {
        let geocoder = Geocoder::new(TableTransport::default());
        let result = geocoder.resolve("empty").await.unwrap();
        assert_eq!(result, GeocodeResult::unresolved("empty"));
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_to_input() {
        let geocoder = Geocoder::new(TableTransport::default());
        let result = geocoder.resolve("Atlantis").await.unwrap();
        assert_eq!(result, GeocodeResult::unresolved("Atlantis"));
        assert!(!geocoder.is_in_flight());
    }

    #[tokio::test]
    async fn test_in_flight_while_waiting() {
        let transport = TableTransport::default().with("Denver", "Denver, Colorado", [-104.99, 39.74], 50);
        let geocoder = Geocoder::new(transport);

        let lookup = geocoder.resolve("Denver");
        tokio::pin!(lookup);
        tokio::select! {
            _ = &mut lookup => panic!("lookup finished before its delay"),
            _ = tokio::time::sleep(Duration::from_millis(10)) => {}
        }
        assert!(geocoder.is_in_flight());

        lookup.await;
        assert!(!geocoder.is_in_flight());
    }

    #[tokio::test]
    async fn test_slow_stale_response_is_superseded() {
        let transport = TableTransport::default()
            .with("Seattle", "Seattle, Washington", [-122.33, 47.61], 80)
            .with("Miami", "Miami, Florida", [-80.19, 25.76], 0);
        let geocoder = Geocoder::new(transport);

        let slow = geocoder.resolve_latest("Seattle");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            geocoder.resolve_latest("Miami").await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(matches!(slow, Resolution::Superseded(ref r) if r.label == "Seattle, Washington"));
        assert!(matches!(fast, Resolution::Current(ref r) if r.label == "Miami, Florida"));
    }
}
