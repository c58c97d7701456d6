//! Line and token helpers for the request head.

use memchr::{memchr, memmem};

/// Location of the blank line that ends a header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadEnd {
    /// Offset of the first byte of the terminator.
    pub start: usize,
    /// Offset of the first byte after the terminator (where a body begins).
    pub body_start: usize,
}

/// Find the end of the header block.
///
/// Both `\r\n\r\n` and a bare `\n\n` end the head; whichever comes first wins.
pub fn find_header_end(buf: &[u8]) -> Option<HeadEnd> {
    let crlf = memmem::find(buf, b"\r\n\r\n").map(|start| HeadEnd { start, body_start: start + 4 });
    let lf = memmem::find(buf, b"\n\n").map(|start| HeadEnd { start, body_start: start + 2 });

    match (crlf, lf) {
        (Some(crlf), Some(lf)) if lf.start < crlf.start => Some(lf),
        (Some(crlf), _) => Some(crlf),
        (None, lf) => lf,
    }
}

/// Offset of the first `\n` in `buf`.
pub fn find_line_end(buf: &[u8]) -> Option<usize> {
    memchr(b'\n', buf)
}

/// Remove a single trailing `\r`, if any.
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Iterate over the lines of `head`, split on `\n` with `\r` stripped.
pub fn lines(head: &str) -> impl Iterator<Item = &str> {
    head.split('\n').map(strip_line_ending)
}

/// Split a request line on single spaces, skipping empty tokens.
///
/// Consecutive spaces behave like one delimiter.
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(' ').filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_terminator() {
        let buf = b"GET / HTTP/1.1\r\nHost: x\r\n\r\nbody";
        let end = find_header_end(buf).unwrap();
        assert_eq!(&buf[end.body_start..], b"body");
        assert_eq!(end.start, 23);
    }

    #[test]
    fn test_lf_terminator_is_tolerated() {
        let buf = b"GET / HTTP/1.1\nHost: x\n\nrest";
        let end = find_header_end(buf).unwrap();
        assert_eq!(&buf[end.body_start..], b"rest");
    }

    #[test]
    fn test_earliest_terminator_wins() {
        let buf = b"POST /a HTTP/1.1\nContent-Length: 4\n\nab\r\n\r\ncd";
        let end = find_header_end(buf).unwrap();
        assert_eq!(&buf[end.body_start..], b"ab\r\n\r\ncd");

        let buf = b"GET / HTTP/1.1\r\nHost: x\r\n\r\nbody\n\nmore";
        let end = find_header_end(buf).unwrap();
        assert_eq!(&buf[end.body_start..], b"body\n\nmore");
    }

    #[test]
    fn test_missing_terminator() {
        assert!(find_header_end(b"GET / HTTP/1.1\r\nHost: x\r\n").is_none());
        assert!(find_header_end(b"").is_none());
    }

    #[test]
    fn test_lines_strip_carriage_returns() {
        let collected: Vec<&str> = lines("a\r\nb\nc\r").collect();
        assert_eq!(collected, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tokens() {
        let collected: Vec<&str> = tokens("GET  /x HTTP/1.1").collect();
        assert_eq!(collected, vec!["GET", "/x", "HTTP/1.1"]);
        assert_eq!(find_line_end(b"ab\ncd"), Some(2));
    }
}
