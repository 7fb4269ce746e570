//! Shared URL/form parsing and percent-encoding helpers.

/// Parse URL-encoded form body into key-value pairs.
/// Handles `key=value&key2=value2` format (from POST bodies).
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let val = parts.next().unwrap_or("");
            Some((percent_decode(key), percent_decode(val)))
        })
        .collect()
}

/// Parse a query string into key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    parse_form_body(q)
}

/// Helper to get a value by key from a list of key-value pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// The still-encoded value of `key` in a query string.
pub fn raw_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    let q = query.strip_prefix('?').unwrap_or(query);
    q.split('&').find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        (parts.next()? == key).then(|| parts.next().unwrap_or(""))
    })
}

/// Percent-decode a form value. `+` is a space; bad escapes are kept
/// literally and invalid UTF-8 is replaced.
pub fn percent_decode(input: &str) -> String {
    let mut bytes = Vec::with_capacity(input.len());
    let raw = input.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'%' => match hex_pair(raw.get(i + 1..i + 3)) {
                Some(val) => {
                    bytes.push(val);
                    i += 3;
                    continue;
                }
                None => bytes.push(b'%'),
            },
            b'+' => bytes.push(b' '),
            b => bytes.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Percent-decode a URL component, rejecting bad escapes and invalid UTF-8.
pub fn percent_decode_strict(input: &str) -> Result<String, String> {
    let mut bytes = Vec::with_capacity(input.len());
    let raw = input.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'%' => {
                let val = hex_pair(raw.get(i + 1..i + 3))
                    .ok_or_else(|| format!("bad escape at offset {}", i))?;
                bytes.push(val);
                i += 3;
            }
            b'+' => {
                bytes.push(b' ');
                i += 1;
            }
            b => {
                bytes.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {}", e))
}

/// Percent-encode everything except the `encodeURIComponent` unreserved set.
pub fn percent_encode(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(input.len() * 3);
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0f) as usize] as char);
            }
        }
    }
    out
}

fn hex_pair(pair: Option<&[u8]>) -> Option<u8> {
    let pair = pair?;
    if !pair.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let s = core::str::from_utf8(pair).ok()?;
    u8::from_str_radix(s, 16).ok()
}
