#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Usage
//!
//! The encryption itself is done by an [`EncryptionProvider`], typically a
//! binding to an existing CMS implementation. This crate takes its
//! `AuthEnvelopedData` output, reads the Telematik-ID of every recipient
//! certificate and appends the recipient attribute as `unauthAttrs`.
//!
//! ```
//! use avs_envelope::{build_redemption_envelope, DerCertificate, EncryptionProvider};
//!
//! struct Provider;
//!
//! impl EncryptionProvider<DerCertificate> for Provider {
//!     type Error = core::convert::Infallible;
//!
//!     fn encrypt(&self, _: &[u8], _: &[DerCertificate]) -> Result<Vec<u8>, Self::Error> {
//!         // ContentInfo { id-ct-authEnvelopedData, [0] { SEQUENCE { INTEGER 0 } } }
//!         Ok(vec![
//!             0x30, 0x14, 0x06, 0x0b, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x10,
//!             0x01, 0x17, 0xa0, 0x05, 0x30, 0x03, 0x02, 0x01, 0x00,
//!         ])
//!     }
//! }
//!
//! let recipients: Vec<DerCertificate> = Vec::new();
//! let envelope = build_redemption_envelope(&Provider, br#"{"version":"2"}"#, &recipients)?;
//! assert_eq!(envelope[0], 0x30);
//! # Ok::<(), avs_envelope::EnvelopeError>(())
//! ```
//!
//! # Low-level building blocks
//!
//! The codec and the certificate reader are public because callers need them
//! to implement [`CertificateAccessor`] for their own certificate types and
//! to inspect the envelope they get back. Functions that build or splice the
//! recipient attribute without encrypting stay behind `hazmat`.
//!
//! - [`der`]: schema-less DER decoder and encoder over [`der::Asn1Node`] trees
//! - [`oid`]: object identifier codec and the OIDs used here
//! - [`cert`]: Telematik-ID extraction from the ISIS-MTT admission extension
//! - `hazmat` (feature `hazmat`): attribute builder and envelope splicer

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use const_oid;
pub use num_bigint::BigInt;

mod attribute;
pub mod cert;
pub mod der;
mod envelope;
pub mod errors;
pub mod oid;
pub mod redeem;

#[cfg(test)]
mod test_support;

pub use crate::{
    attribute::RegistrationEntry,
    cert::{extract_registration_number, CertificateAccessor, DerCertificate},
    der::{Asn1Node, DecodeOptions},
    errors::{CertError, EnvelopeError, Error, Result},
    oid::ObjectIdentifier,
    redeem::{build_redemption_envelope, AvsMessageConverter, EncryptionProvider, CONTENT_TYPE},
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
