//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rental_scout::listings::ListingStore;
use rental_scout::models::{Listing, PetPolicy, PropertyType};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Builder for listings with only the fields a test cares about
pub struct ListingBuilder {
    listing: Listing,
}

impl ListingBuilder {
    pub fn new(id: u32) -> Self {
        Self {
            listing: Listing {
                id,
                title: format!("Listing {}", id),
                address: format!("{} Main St", id),
                location: "Springfield, IL".to_string(),
                price: 1_500,
                bedrooms: 1,
                bathrooms: 1.0,
                images: vec![format!("/images/{}.jpg", id)],
                offer: None,
                style: "Apartment".to_string(),
                property_type: PropertyType::Apartment,
                description: String::new(),
                amenities: Vec::new(),
                pets: Vec::new(),
                short_term_lease: false,
            },
        }
    }

    pub fn location(mut self, location: &str) -> Self {
        self.listing.location = location.to_string();
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.listing.address = address.to_string();
        self
    }

    pub fn price(mut self, price: u64) -> Self {
        self.listing.price = price;
        self
    }

    pub fn bedrooms(mut self, bedrooms: u8) -> Self {
        self.listing.bedrooms = bedrooms;
        self
    }

    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.listing.property_type = property_type;
        self
    }

    pub fn pets(mut self, pets: &[PetPolicy]) -> Self {
        self.listing.pets = pets.to_vec();
        self
    }

    pub fn build(self) -> Listing {
        self.listing
    }
}

/// One Austin listing plus four in other cities
pub fn austin_and_four_others() -> ListingStore {
    ListingStore::new(vec![
        ListingBuilder::new(1).location("Denver, CO").address("10 Larimer St, Denver, CO").build(),
        ListingBuilder::new(2).location("Austin, TX").address("20 Congress Ave, Austin, TX").build(),
        ListingBuilder::new(3).location("Seattle, WA").address("30 Pike St, Seattle, WA").build(),
        ListingBuilder::new(4).location("Chicago, IL").address("40 Wacker Dr, Chicago, IL").build(),
        ListingBuilder::new(5).location("Miami, FL").address("50 Ocean Dr, Miami, FL").build(),
    ])
    .expect("unique ids")
}

/// What the stub server saw
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub target: String,
    pub body: String,
}

/// Minimal HTTP/1.1 server answering every request with the same canned
/// JSON response
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        let body = Arc::new(body.to_string());
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, status, Arc::clone(&body), Arc::clone(&log)));
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(mut stream: TcpStream, status: u16, body: Arc<String>, log: Arc<Mutex<Vec<CapturedRequest>>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let end = buf.len().min(header_end + content_length);
    log.lock().unwrap().push(CapturedRequest {
        method: request_line.next().unwrap_or_default().to_string(),
        target: request_line.next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..end]).to_string(),
    });

    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
