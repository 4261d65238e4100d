#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::pin::Pin;
use std::sync::Arc;
use std::thread;

use chainfetch::{AsyncFetcher, ChainError, Fetcher};

/// The four documents of the reference chain used across tests.
pub fn sample_chain() -> Vec<(&'static str, &'static str)> {
    vec![
        ("reference.json", r#"{"data_location": "d1.json"}"#),
        (
            "d1.json",
            r#"{"data_location": "d2.json", "data": [{"name": "A B", "id": 1}]}"#,
        ),
        ("d2.json", r#"{"data_location": "none.json", "data": [{"name": "C D", "id": 2}]}"#),
        ("data3.json", r#"{"data": [{"name": "E F", "id": 3}]}"#),
    ]
}

/// In-memory fetcher usable in both blocking and async tests.
pub struct MapFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl MapFetcher {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            bodies: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
                .collect(),
        }
    }

    fn get(&self, location: &str) -> Result<Vec<u8>, ChainError> {
        self.bodies
            .get(location)
            .cloned()
            .ok_or_else(|| ChainError::Fetch {
                location: location.to_string(),
                reason: "HTTP status 404 Not Found".to_string(),
            })
    }
}

impl Fetcher for MapFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, ChainError> {
        self.get(location)
    }
}

impl AsyncFetcher for MapFetcher {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, ChainError>> + Send + 'a>> {
        Box::pin(async move { self.get(location) })
    }
}

/// Serve `routes` over HTTP/1.1 on an ephemeral loopback port.
///
/// Paths are matched without the leading `/`; anything else gets a 404.
/// The server thread lives until the test process exits.
pub fn spawn_http_server(routes: &[(&str, &str)]) -> String {
    let routes: Arc<HashMap<String, Vec<u8>>> = Arc::new(
        routes
            .iter()
            .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
            .collect(),
    );
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let routes = Arc::clone(&routes);
            thread::spawn(move || {
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    return;
                }
                // Drain headers up to the blank line.
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if line == "\r\n" || line == "\n" => break,
                        Ok(_) => {}
                    }
                }

                let path = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .trim_start_matches('/')
                    .to_string();

                let (status, body) = match routes.get(&path) {
                    Some(body) => ("200 OK", body.clone()),
                    None => ("404 Not Found", b"not found".to_vec()),
                };
                let headers = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(headers.as_bytes());
                let _ = stream.write_all(&body);
                let _ = stream.flush();
            });
        }
    });

    format!("http://{addr}")
}
