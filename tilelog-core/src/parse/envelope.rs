use crate::parse::EnvelopeViolation;
use chrono::{DateTime, NaiveDateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The fixed-format parts of a syslog-wrapped CDN log line.
///
/// ```text
/// <134>2015-03-04T10:12:55Z cache-mad2120 fastly[308373]: 83.50.220.41 "-" "-" Wed, 04 Mar 2015 10:12:55 GMT "GET /path HTTP/1.1" MISS 200
/// ^pri ^timestamp           ^host         ^tag             ^client ip   ^quoted ^http date                     ^request            ^tail
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub timestamp: DateTime<Utc>,
    pub source_ip: &'a str,
    pub request_path: &'a str,
    /// Everything after the request line: cache chain and status.
    pub tail: &'a str,
}

pub fn split_envelope(line: &str) -> Result<Envelope<'_>, EnvelopeViolation> {
    let line = line.trim_end_matches(['\r', '\n']);

    //--------------------------------------------------------------------------
    // Syslog prefix
    //--------------------------------------------------------------------------
    let rest = strip_priority(line).ok_or(EnvelopeViolation::MissingPriority)?;

    let (timestamp, rest) = rest
        .split_once(' ')
        .ok_or(EnvelopeViolation::InvalidTimestamp)?;
    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|_| EnvelopeViolation::InvalidTimestamp)?
        .and_utc();

    let payload = strip_process_tag(rest).ok_or(EnvelopeViolation::MissingProcessTag)?;

    //--------------------------------------------------------------------------
    // Access log payload
    //--------------------------------------------------------------------------
    let (source_ip, rest) = payload
        .split_once(' ')
        .filter(|(ip, _)| !ip.is_empty() && !ip.starts_with('"'))
        .ok_or(EnvelopeViolation::MissingClientIp)?;

    let mut rest = rest;
    for _ in 0..2 {
        rest = skip_quoted(rest).ok_or(EnvelopeViolation::MissingQuotedField)?;
    }

    // The HTTP date runs up to the opening quote of the request line.
    let (_http_date, rest) = rest
        .split_once('"')
        .ok_or(EnvelopeViolation::MissingRequest)?;
    let (request_line, tail) = rest
        .split_once('"')
        .ok_or(EnvelopeViolation::MissingRequest)?;

    let request_path = request_target(request_line)?;

    Ok(Envelope {
        timestamp,
        source_ip,
        request_path,
        tail,
    })
}

fn strip_priority(line: &str) -> Option<&str> {
    let (priority, rest) = line.strip_prefix('<')?.split_once('>')?;
    is_digits(priority).then_some(rest)
}

/// Skips `host tag[pid]: ` and returns what follows.
fn strip_process_tag(rest: &str) -> Option<&str> {
    let end = rest.find("]: ")?;
    let (tag, pid) = rest[..end].rsplit_once('[')?;

    if tag.trim().is_empty() || !is_digits(pid) {
        return None;
    }

    Some(&rest[end + 3..])
}

fn skip_quoted(rest: &str) -> Option<&str> {
    let (_, after) = rest.trim_start().strip_prefix('"')?.split_once('"')?;
    Some(after)
}

fn request_target(request_line: &str) -> Result<&str, EnvelopeViolation> {
    let mut parts = request_line.split_whitespace();

    let method = parts.next().ok_or(EnvelopeViolation::MissingRequest)?;
    if method != "GET" {
        return Err(EnvelopeViolation::UnsupportedMethod);
    }

    let target = parts.next().ok_or(EnvelopeViolation::MissingRequest)?;

    match parts.next() {
        Some(protocol) if protocol.starts_with("HTTP") => Ok(target),
        _ => Err(EnvelopeViolation::MissingRequest),
    }
}

pub(crate) fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
