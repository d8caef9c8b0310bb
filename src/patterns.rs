//! Compiled patterns and constant tables shared by the validators.
//!
//! Every pattern is compiled once, on first use, and is read-only afterwards.
//! The `regex` crate guarantees linear-time matching, so none of these can
//! backtrack catastrophically on adversarial input.

use regex::Regex;

use std::sync::LazyLock;

/// Names reserved by RFC 6761 which are accepted without label validation.
pub(crate) const SPECIAL_USE_DOMAIN_NAMES: &[&str] = &["localhost", "invalid", "test", "example"];

/// Characters that may never appear in a host.
pub(crate) const URL_UNSAFE_CHARACTERS: &[char] = &['[', ']', '{', '}', '|', '^', '%', '~'];

/// Protocols recognised by the URL validator, lower-case.
pub(crate) const URL_PROTOCOLS: &[&str] = &["http://", "https://", "ftp://"];

/// "Labels must be 63 characters or less."
pub(crate) const MAX_LABEL_LENGTH: usize = 63;

/// Letters accepted in host labels: ASCII lower-case plus everything from
/// U+00A1 up to the end of the basic multilingual plane.
const UNICODE_ALPHA: &str = r"a-z\x{a1}-\x{ffff}";

const HEX_GROUP: &str = "[0-9a-f]{1,4}";

const DOTTED_QUAD: &str = r"(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])";

pub(crate) static MAC_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(?:[0-9a-f]{2}:){5}[0-9a-f]{2}$").expect("mac address regex must compile")
});

/// Every textual IPv6 form: the uncompressed address, one alternative per
/// `::` position, the same again with an embedded IPv4 tail, and an optional
/// zone index.
pub(crate) static IPV6: LazyLock<Regex> = LazyLock::new(|| {
  let h = HEX_GROUP;
  let v4 = DOTTED_QUAD;

  let mut forms: Vec<String> = Vec::with_capacity(16);
  forms.push(format!("(?:{h}:){{7}}{h}"));
  forms.push(format!("(?:{h}:){{1,7}}:"));
  forms.push(format!("(?:{h}:){{1,6}}:{h}"));
  for head in (2..=5).rev() {
    let tail = 7 - head;
    forms.push(format!("(?:{h}:){{1,{head}}}(?::{h}){{1,{tail}}}"));
  }
  forms.push(format!("{h}:(?::{h}){{1,6}}"));
  forms.push(format!(":(?:(?::{h}){{1,7}}|:)"));

  forms.push(format!("(?:{h}:){{6}}{v4}"));
  forms.push(format!("::(?:{h}:){{0,5}}{v4}"));
  for head in 1..=4 {
    let tail = 5 - head;
    forms.push(format!("(?:{h}:){{{head}}}:(?:{h}:){{0,{tail}}}{v4}"));
  }
  forms.push(format!("(?:{h}:){{5}}:{v4}"));

  let pattern = format!("^(?:{})(?:%[0-9a-z._~-]+)?$", forms.join("|"));
  Regex::new(&pattern).expect("ipv6 regex must compile")
});

/// Domain label/TLD structure over a lower-cased value. Label lengths and
/// numeric-only top-level labels are checked separately.
pub(crate) static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
  let a = UNICODE_ALPHA;
  let pattern = format!(
    r"^(?:(?:xn--)?[{a}0-9]+(?:-[{a}0-9]+)*\.)+(?:[{a}]{{2,63}}|xn--[{a}0-9]{{2,59}})$"
  );
  Regex::new(&pattern).expect("domain regex must compile")
});

fn url_pattern(ipv4_host: &str) -> String {
  let a = UNICODE_ALPHA;
  let hostname = format!(
    r"(?:(?:[{a}0-9]-?)*[{a}0-9]+)(?:\.(?:[{a}0-9]-?)*[{a}0-9]+)*(?:\.(?:[{a}]{{2,}}))"
  );
  format!(
    concat!(
      r"^(?:(?:https?|ftp)://)",
      r"(?:\S+(?::\S*)?@)?",
      r"(?P<host>(?P<ipv4>{ipv4})|(?P<ipv6>\[[0-9a-f:.]+(?:%[0-9a-z._~-]+)?\])|{hostname}|localhost)",
      r"(?::\d{{2,5}})?",
      r"(?:/\S*)?$",
    ),
    ipv4 = ipv4_host,
    hostname = hostname,
  )
}

/// The default URL grammar. Dotted-quad hosts are limited to public unicast
/// shapes; hosts starting with a private, loopback or link-local quad are
/// filtered after the match with [`SPECIAL_IPV4_PREFIX`], because the
/// grammar cannot express negative lookahead.
pub(crate) static URL: LazyLock<Regex> = LazyLock::new(|| {
  let ipv4 = concat!(
    r"(?:[1-9]\d?|1\d\d|2[01]\d|22[0-3])",
    r"(?:\.(?:1?\d{1,2}|2[0-4]\d|25[0-5])){2}",
    r"(?:\.(?:[1-9]\d?|1\d\d|2[0-4]\d|25[0-4]))",
  );
  Regex::new(&url_pattern(ipv4)).expect("url regex must compile")
});

/// The URL grammar used when special IP addresses are allowed: any
/// dotted-quad host is accepted.
pub(crate) static URL_SPECIAL_IP: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&url_pattern(DOTTED_QUAD)).expect("special ip url regex must compile")
});

/// A host starting with a private (`10/8`, `172.16/12`, `192.168/16`),
/// loopback (`127/8`) or link-local (`169.254/16`) dotted quad. Only the
/// prefix is anchored, so `10.1.1.1.com` matches as well.
pub(crate) static SPECIAL_IPV4_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(concat!(
    r"^(?:(?:10|127)(?:\.\d{1,3}){3}",
    r"|(?:169\.254|192\.168)(?:\.\d{1,3}){2}",
    r"|172\.(?:1[6-9]|2\d|3[01])(?:\.\d{1,3}){2})",
  ))
  .expect("special ipv4 prefix regex must compile")
});

/// What may follow the host of a URL: an optional port and an optional path.
pub(crate) static URL_TAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(?::\d{2,5})?(?:/\S*)?$").expect("url tail regex must compile")
});

/// An RFC 5322 inspired address: dot-atom or quoted local part, followed by
/// a hostname or a bracketed literal.
pub(crate) static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  let atext = r"[a-z0-9!#$%&'*+/=?^_`{|}~-]";
  let qtext = r"[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]";
  let quoted_pair = r"\\[\x01-\x09\x0b\x0c\x0e-\x7f]";
  let label = "[a-z0-9](?:[a-z0-9-]*[a-z0-9])?";
  let octet = "(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
  let dtext = r"[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]";

  let pattern = format!(
    concat!(
      r"(?i)(?:{atext}+(?:\.{atext}+)*|",
      r#""(?:{qtext}|{quoted_pair})*")"#,
      r"@(?:(?:{label}\.)+{label}|",
      r"\[(?:{octet}\.){{3}}(?:{octet}|[a-z0-9-]*[a-z0-9]:(?:{dtext}|{quoted_pair})+)\])",
    ),
    atext = atext,
    qtext = qtext,
    quoted_pair = quoted_pair,
    label = label,
    octet = octet,
    dtext = dtext,
  );
  Regex::new(&pattern).expect("email regex must compile")
});

/// Returns `true` if `value` contains one of the [`URL_UNSAFE_CHARACTERS`].
#[inline]
pub(crate) fn has_unsafe_character(value: &str) -> bool {
  value.contains(URL_UNSAFE_CHARACTERS)
}

/// Returns the remainder of `value` after a recognised protocol prefix,
/// compared case-insensitively.
pub(crate) fn strip_protocol(value: &str) -> Option<&str> {
  URL_PROTOCOLS.iter().find_map(|protocol| {
    let prefix = value.get(..protocol.len())?;
    if prefix.eq_ignore_ascii_case(protocol) {
      value.get(protocol.len()..)
    } else {
      None
    }
  })
}

/// Lower-cases and trims `value`.
#[inline]
pub(crate) fn normalize(value: &str) -> String {
  value.trim().to_lowercase()
}

/// Returns `true` if any dot-separated label of `value` is longer than
/// [`MAX_LABEL_LENGTH`] characters.
pub(crate) fn label_too_long(value: &str) -> bool {
  value
    .split('.')
    .any(|label| label.chars().count() > MAX_LABEL_LENGTH)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_patterns_compile() {
    LazyLock::force(&MAC_ADDRESS);
    LazyLock::force(&IPV6);
    LazyLock::force(&DOMAIN);
    LazyLock::force(&URL);
    LazyLock::force(&URL_SPECIAL_IP);
    LazyLock::force(&URL_TAIL);
    LazyLock::force(&SPECIAL_IPV4_PREFIX);
    LazyLock::force(&EMAIL);
  }

  #[test]
  fn test_strip_protocol() {
    assert_eq!(strip_protocol("http://example.com"), Some("example.com"));
    assert_eq!(strip_protocol("HTTPS://example.com"), Some("example.com"));
    assert_eq!(strip_protocol("ftp://"), Some(""));
    assert_eq!(strip_protocol("ftps://example.com"), None);
    assert_eq!(strip_protocol("example.com"), None);
    assert_eq!(strip_protocol("ht"), None);
  }

  #[test]
  fn test_unsafe_characters() {
    assert!(has_unsafe_character("exa%mple.com"));
    assert!(has_unsafe_character("[::1]"));
    assert!(!has_unsafe_character("example.com"));
  }
}
