use shared::types::{RawService, ServiceRecord};

/// Decode DNS presentation-format escapes in an advertised name.
///
/// `\DDD` with a decimal value up to 255 becomes that byte, `\X` becomes `X`,
/// and a trailing lone backslash is dropped. Malformed escapes never fail;
/// they fall back to the single-character rule.
pub fn unescape_dns_name(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        if let Some(value) = decimal_escape(&bytes[i + 1..]) {
            out.push(value);
            i += 4;
        } else if let Some(&next) = bytes.get(i + 1) {
            out.push(next);
            i += 2;
        } else {
            i += 1;
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn decimal_escape(rest: &[u8]) -> Option<u8> {
    let digits = rest.get(..3)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));
    u8::try_from(value).ok()
}

/// Turn a raw discovery result into the record the display consumes.
/// Width budgets start at zero; the layout assigns them on insertion.
pub fn normalize(raw: RawService) -> ServiceRecord {
    ServiceRecord {
        name: unescape_dns_name(&raw.advertised_name),
        host: raw.host,
        address_v4: raw.ipv4,
        address_v6: raw.ipv6,
        port: raw.port,
        info_text: raw.info_text,
        info_fields: raw.info_fields,
        list_width: 0,
        detail_width: 0,
    }
}
