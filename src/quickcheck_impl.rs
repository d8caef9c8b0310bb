use core::net::{Ipv4Addr, Ipv6Addr};

use quickcheck::{Arbitrary, Gen};

use super::{ip, mac, Domain, Ipv4, Ipv6, MacAddress};

const LABEL_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn label(g: &mut Gen, max: usize) -> String {
  let len = (usize::arbitrary(g) % max) + 1;
  let mut label = String::with_capacity(len);
  for i in 0..len {
    // single hyphens only, never at either end
    if i > 0 && i + 1 < len && !label.ends_with('-') && u8::arbitrary(g) % 8 == 0 {
      label.push('-');
      continue;
    }
    label.push(LABEL_CHARS[usize::arbitrary(g) % LABEL_CHARS.len()] as char);
  }
  label
}

fn tld(g: &mut Gen) -> String {
  let len = (usize::arbitrary(g) % 8) + 2;
  (0..len)
    .map(|_| (b'a' + (u8::arbitrary(g) % 26)) as char)
    .collect()
}

impl Arbitrary for Domain {
  fn arbitrary(g: &mut Gen) -> Self {
    let size = (usize::arbitrary(g) % 3) + 1; // 1-3 labels before the tld

    let mut domain = String::new();
    for _ in 0..size {
      domain.push_str(&label(g, 20));
      domain.push('.');
    }
    domain.push_str(&tld(g));

    domain
      .parse()
      .unwrap_or_else(|_| Domain(String::from("example.com")))
  }
}

impl Arbitrary for Ipv4 {
  fn arbitrary(g: &mut Gen) -> Self {
    let addr = Ipv4Addr::arbitrary(g);
    ip::parse_ipv4(&addr.to_string()).unwrap_or_else(|_| Ipv4::unchecked("0.0.0.0"))
  }
}

impl Arbitrary for Ipv6 {
  fn arbitrary(g: &mut Gen) -> Self {
    let addr = Ipv6Addr::arbitrary(g);
    ip::parse_ipv6(&addr.to_string()).unwrap_or_else(|_| Ipv6::unchecked("::"))
  }
}

impl Arbitrary for MacAddress {
  fn arbitrary(g: &mut Gen) -> Self {
    let sep = if bool::arbitrary(g) { ':' } else { '-' };
    let repr = (0..6)
      .map(|_| format!("{:02x}", u8::arbitrary(g)))
      .collect::<Vec<_>>()
      .join(&sep.to_string());
    mac::parse_mac_address(&repr).unwrap_or_else(|_| MacAddress::unchecked("00:00:00:00:00:00"))
  }
}
