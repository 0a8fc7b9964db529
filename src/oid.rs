//! Object identifier codec and the OIDs used by the redemption envelope.

use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use crate::errors::{Error, Result};

/// `id-isismtt-at-admission`: professional admission extension (ISIS-MTT).
pub const ID_ISISMTT_AT_ADMISSION: const_oid::ObjectIdentifier =
    const_oid::ObjectIdentifier::new_unwrap("1.3.36.8.3.3");

/// Recipient e-mail / Telematik-ID attribute of gemSpec_KOMLE.
pub const ID_RECIPIENT_EMAILS: const_oid::ObjectIdentifier =
    const_oid::ObjectIdentifier::new_unwrap("1.2.276.0.76.4.173");

/// `id-ct-authEnvelopedData` (RFC 5083).
pub const ID_CT_AUTH_ENVELOPED_DATA: const_oid::ObjectIdentifier =
    const_oid::ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.1.23");

/// An object identifier of arbitrary length and arc size.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ObjectIdentifier {
    arcs: Vec<u64>,
}

impl ObjectIdentifier {
    /// Create an OID from its arcs.
    ///
    /// Requires at least two arcs, a first arc of 0, 1 or 2, and a second arc
    /// below 40 unless the first arc is 2.
    pub fn new(arcs: impl Into<Vec<u64>>) -> Result<Self> {
        let arcs = arcs.into();
        match arcs[..] {
            [first, second, ..] if first < 2 && second < 40 => {}
            [2, second, ..] if second <= u64::MAX - 80 => {}
            _ => return Err(Error::InvalidOid),
        }
        Ok(Self { arcs })
    }

    /// Arcs of this OID.
    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }

    /// Parse the content octets of a DER `OBJECT IDENTIFIER`.
    pub fn from_der_content(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::InvalidOidEncoding);
        }

        let mut subidentifiers = Vec::new();
        let mut value: u64 = 0;
        let mut in_progress = false;
        for &octet in bytes {
            if !in_progress && octet == 0x80 {
                // leading zero group
                return Err(Error::InvalidOidEncoding);
            }
            if value > (u64::MAX >> 7) {
                return Err(Error::InvalidOidEncoding);
            }
            value = (value << 7) | u64::from(octet & 0x7f);
            if octet & 0x80 == 0 {
                subidentifiers.push(value);
                value = 0;
                in_progress = false;
            } else {
                in_progress = true;
            }
        }
        if in_progress {
            return Err(Error::InvalidOidEncoding);
        }

        let first = subidentifiers[0];
        let mut arcs = Vec::with_capacity(subidentifiers.len() + 1);
        match first {
            0..=39 => arcs.extend([0, first]),
            40..=79 => arcs.extend([1, first - 40]),
            _ => arcs.extend([2, first - 80]),
        }
        arcs.extend_from_slice(&subidentifiers[1..]);

        Ok(Self { arcs })
    }

    /// Content octets of the DER `OBJECT IDENTIFIER` encoding.
    pub fn to_der_content(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.arcs.len() + 4);
        // `new` guarantees at least two arcs and no overflow here.
        encode_subidentifier(self.arcs[0] * 40 + self.arcs[1], &mut out);
        for &arc in &self.arcs[2..] {
            encode_subidentifier(arc, &mut out);
        }
        out
    }
}

fn encode_subidentifier(value: u64, out: &mut Vec<u8>) {
    let bits = 64 - value.leading_zeros() as usize;
    let groups = core::cmp::max(1, bits.div_ceil(7));
    for i in (0..groups).rev() {
        let mut octet = ((value >> (7 * i)) & 0x7f) as u8;
        if i != 0 {
            octet |= 0x80;
        }
        out.push(octet);
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let arcs = s
            .split('.')
            .map(|arc| {
                if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::InvalidOid);
                }
                arc.parse::<u64>().map_err(|_| Error::InvalidOid)
            })
            .collect::<Result<Vec<u64>>>()?;
        Self::new(arcs)
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs.iter().enumerate() {
            if i != 0 {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}

impl From<&const_oid::ObjectIdentifier> for ObjectIdentifier {
    fn from(oid: &const_oid::ObjectIdentifier) -> Self {
        Self {
            arcs: oid.arcs().map(u64::from).collect(),
        }
    }
}

impl From<const_oid::ObjectIdentifier> for ObjectIdentifier {
    fn from(oid: const_oid::ObjectIdentifier) -> Self {
        Self::from(&oid)
    }
}

impl PartialEq<const_oid::ObjectIdentifier> for ObjectIdentifier {
    fn eq(&self, other: &const_oid::ObjectIdentifier) -> bool {
        self.to_der_content() == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use hex_literal::hex;

    fn oid(s: &str) -> ObjectIdentifier {
        s.parse().unwrap()
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(oid("1.3.36.8.3.3").to_der_content(), hex!("2b24080303"));
        assert_eq!(
            oid("1.2.276.0.76.4.173").to_der_content(),
            hex!("2a8214004c04812d")
        );
        assert_eq!(oid("2.5.4.3").to_der_content(), hex!("550403"));
        assert_eq!(
            oid("1.2.840.113549.1.7.1").to_der_content(),
            hex!("2a864886f70d010701")
        );
    }

    #[test]
    fn test_roundtrip() {
        for s in [
            "1.2.276.0.76.4.173",
            "1.3.36.8.3.3",
            "2.5.4.3",
            "1.2.840.113549.1.7.1",
            "0.0",
            "2.999.1",
            "1.2.18446744073709551615",
        ] {
            let oid = oid(s);
            let decoded = ObjectIdentifier::from_der_content(&oid.to_der_content()).unwrap();
            assert_eq!(decoded, oid);
            assert_eq!(decoded.to_string(), s);
        }
    }

    #[test]
    fn test_first_subidentifier_above_80() {
        // 2.999 -> 1079 -> 0x88 0x37
        assert_eq!(oid("2.999").to_der_content(), hex!("8837"));
        assert_eq!(
            ObjectIdentifier::from_der_content(&hex!("8837")).unwrap().arcs(),
            &[2, 999]
        );
        assert_eq!(
            ObjectIdentifier::from_der_content(&hex!("55")).unwrap().arcs(),
            &[2, 5]
        );
    }

    #[test]
    fn test_matches_const_oid() {
        for known in [ID_ISISMTT_AT_ADMISSION, ID_RECIPIENT_EMAILS, ID_CT_AUTH_ENVELOPED_DATA] {
            let ours = ObjectIdentifier::from(&known);
            assert_eq!(ours.to_der_content(), known.as_bytes());
            assert_eq!(ours, known);
            assert_eq!(ours.to_string(), known.to_string());
        }
    }

    #[test]
    fn test_reject_truncated_encoding() {
        assert_eq!(
            ObjectIdentifier::from_der_content(&hex!("2b2408 83")),
            Err(Error::InvalidOidEncoding)
        );
        assert_eq!(
            ObjectIdentifier::from_der_content(&[]),
            Err(Error::InvalidOidEncoding)
        );
    }

    #[test]
    fn test_reject_non_minimal_encoding() {
        assert_eq!(
            ObjectIdentifier::from_der_content(&hex!("2b 8003")),
            Err(Error::InvalidOidEncoding)
        );
    }

    #[test]
    fn test_reject_overflowing_arc() {
        assert_eq!(
            ObjectIdentifier::from_der_content(&hex!("2b 82808080808080808000")),
            Err(Error::InvalidOidEncoding)
        );
    }

    #[test]
    fn test_reject_invalid_dotted() {
        for s in ["", "1", "1.", ".1.2", "1..2", "3.1", "1.40", "1.2.x", "1.+2", "0.99999999999999999999"] {
            assert_eq!(s.parse::<ObjectIdentifier>(), Err(Error::InvalidOid), "{s}");
        }
    }
}
