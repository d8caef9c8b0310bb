use core::net::{Ipv4Addr, Ipv6Addr};

use arbitrary::{Arbitrary, Result, Unstructured};

use super::{ip, mac, Domain, Ipv4, Ipv6, MacAddress};

fn label(u: &mut Unstructured<'_>, out: &mut String) -> Result<()> {
  let len = u.int_in_range(1..=63usize)?;

  for i in 0..len {
    let edge = i == 0 || i + 1 == len;
    let c = match u.int_in_range(0..=3u8)? {
      0 => u.int_in_range(b'0'..=b'9')?,
      // No hyphen at either end, and never two in a row
      3 if !edge && !out.ends_with('-') => b'-',
      _ => u.int_in_range(b'a'..=b'z')?,
    };
    out.push(c as char);
  }
  Ok(())
}

impl<'a> Arbitrary<'a> for Domain {
  fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
    // Between 1 and 3 labels, then a letters-only top-level label
    let label_count = u.int_in_range(1..=3)?;
    let mut domain = String::new();

    for _ in 0..label_count {
      label(u, &mut domain)?;
      domain.push('.');
    }

    let tld_len = u.int_in_range(2..=10)?;
    for _ in 0..tld_len {
      domain.push(u.int_in_range(b'a'..=b'z')? as char);
    }

    domain.parse().map_err(|_| arbitrary::Error::IncorrectFormat)
  }
}

impl<'a> Arbitrary<'a> for Ipv4 {
  fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
    let addr = Ipv4Addr::arbitrary(u)?;
    ip::parse_ipv4(&addr.to_string()).map_err(|_| arbitrary::Error::IncorrectFormat)
  }
}

impl<'a> Arbitrary<'a> for Ipv6 {
  fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
    let addr = Ipv6Addr::arbitrary(u)?;
    ip::parse_ipv6(&addr.to_string()).map_err(|_| arbitrary::Error::IncorrectFormat)
  }
}

impl<'a> Arbitrary<'a> for MacAddress {
  fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
    let octets = <[u8; 6]>::arbitrary(u)?;
    let sep = if u.arbitrary::<bool>()? { ":" } else { "-" };
    let repr = octets
      .iter()
      .map(|o| format!("{o:02x}"))
      .collect::<Vec<_>>()
      .join(sep);
    mac::parse_mac_address(&repr).map_err(|_| arbitrary::Error::IncorrectFormat)
  }
}
