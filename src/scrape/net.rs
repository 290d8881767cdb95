// src/scrape/net.rs

// HTTP/1.0 GET over TCP (std-only)

use std::{io::{Read, Write}, net::TcpStream, time::Duration};

use crate::error::{Result, TrackerError};

pub fn http_get(host: &str, path: &str) -> Result<String> {
    let mut s = TcpStream::connect((host, 80))?;
    s.set_read_timeout(Some(Duration::from_secs(15)))?;
    s.set_write_timeout(Some(Duration::from_secs(15)))?;

    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: epitrack/0.3\r\nConnection: close\r\n\r\n",
        path, host
    );
    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let status = resp.split("\r\n").next().unwrap_or("");
    if !status.contains("200") {
        let url = join!(host, path);
        return Err(TrackerError::Fetch(format!("HTTP error: {status} for {url}")));
    }
    let body_idx = resp
        .find("\r\n\r\n")
        .ok_or_else(|| TrackerError::Fetch(s!("malformed HTTP response")))?
        + 4;
    Ok(resp[body_idx..].to_string())
}
