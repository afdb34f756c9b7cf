//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned responses by request path and records the raw header lines
//! of every request so tests can check what was sent.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Page {
    pub status: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Page {
    pub fn html(body: &str) -> Self {
        Self {
            status: "200 OK",
            headers: vec![("Content-Type".into(), "text/html; charset=utf-8".into())],
            body: body.to_string(),
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self {
            status: "301 Moved Permanently",
            headers: vec![("Location".into(), location.to_string())],
            body: String::new(),
        }
    }
}

/// Request lines received so far, one `Vec` per request.
pub type Requests = Arc<Mutex<Vec<Vec<String>>>>;

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345") and the request log. Unknown paths get 404.
/// The server runs until the process exits.
pub fn start(pages: Vec<(&str, Page)>) -> (String, Requests) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let pages: Arc<HashMap<String, Page>> = Arc::new(
        pages
            .into_iter()
            .map(|(path, page)| (path.to_string(), page))
            .collect(),
    );
    let requests: Requests = Arc::default();
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let pages = Arc::clone(&pages);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &pages, &log));
        }
    });
    (format!("http://127.0.0.1:{}", port), requests)
}

fn handle(mut stream: std::net::TcpStream, pages: &HashMap<String, Page>, log: &Requests) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let lines: Vec<String> = request
        .lines()
        .take_while(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect();
    let path = lines
        .first()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(lines);

    let page = pages
        .get(&path)
        .cloned()
        .unwrap_or_else(|| Page::status("404 Not Found"));
    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        page.status,
        page.body.len()
    );
    for (k, v) in &page.headers {
        response.push_str(&format!("{}: {}\r\n", k, v));
    }
    response.push_str("\r\n");
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(page.body.as_bytes());
}

/// Value of header `name` in a recorded request, case-insensitive.
pub fn header<'a>(request: &'a [String], name: &str) -> Option<&'a str> {
    request.iter().skip(1).find_map(|line| {
        let (k, v) = line.split_once(':')?;
        k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
    })
}
