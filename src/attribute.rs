//! Recipient attribute carried in `unauthAttrs` (gemSpec_KOMLE).
//!
//! ```text
//! SEQUENCE {
//!   OBJECT IDENTIFIER 1.2.276.0.76.4.173
//!   SET OF SEQUENCE {
//!     IA5String  registrationNumber
//!     SEQUENCE { issuer Name, INTEGER serialNumber }
//!   }
//! }
//! ```

use alloc::{string::String, vec::Vec};

use crate::{
    der::{Asn1Node, DecodeOptions},
    errors::Result,
    oid::{self, ObjectIdentifier},
};

/// Context-specific tag number of `unauthAttrs` in `AuthEnvelopedData`.
pub const UNAUTH_ATTRS_TAG_NUMBER: u32 = 2;

/// Addressing data for one recipient pharmacy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistrationEntry {
    /// Telematik-ID taken from the admission extension.
    pub registration_number: String,

    /// DER encoding of the certificate issuer `Name`.
    pub issuer_der: Vec<u8>,

    /// Certificate serial number.
    pub serial_number: i64,
}

impl RegistrationEntry {
    fn to_node(&self, options: &DecodeOptions) -> Result<Asn1Node> {
        let issuer = Asn1Node::from_der_with(&self.issuer_der, options)?;
        Ok(Asn1Node::sequence(vec![
            Asn1Node::ia5_string(&self.registration_number),
            Asn1Node::sequence(vec![issuer, Asn1Node::integer(self.serial_number)]),
        ]))
    }
}

/// Build the recipient attribute for `entries`, in the order given.
///
/// Fails only if an entry's `issuer_der` is not a single DER value.
#[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
pub fn recipient_emails_attribute(entries: &[RegistrationEntry]) -> Result<Asn1Node> {
    recipient_emails_attribute_with(entries, &DecodeOptions::default())
}

/// [`recipient_emails_attribute`] with explicit decoder options.
pub fn recipient_emails_attribute_with(
    entries: &[RegistrationEntry],
    options: &DecodeOptions,
) -> Result<Asn1Node> {
    let recipients = entries
        .iter()
        .map(|entry| entry.to_node(options))
        .collect::<Result<Vec<_>>>()?;

    Ok(Asn1Node::sequence(vec![
        Asn1Node::object_identifier(&ObjectIdentifier::from(&oid::ID_RECIPIENT_EMAILS)),
        Asn1Node::set(recipients),
    ]))
}

/// Wrap attributes into the `[2]` node that becomes `unauthAttrs`.
pub fn unauth_attrs(attributes: Vec<Asn1Node>) -> Asn1Node {
    Asn1Node::context_specific(UNAUTH_ATTRS_TAG_NUMBER, attributes)
}
