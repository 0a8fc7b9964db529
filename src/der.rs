//! Generic ASN.1 DER codec over tagged value trees.
//!
//! Values are decoded into [`Asn1Node`] trees without any schema. Encoding a
//! decoded tree reproduces the input byte-for-byte: the decoder only accepts
//! definite, minimally encoded lengths and tag numbers, so every accepted
//! input already is the canonical encoding.
//!
//! ```
//! use avs_envelope::der::{Asn1Node, Tag};
//!
//! let der = [0x30, 0x06, 0x02, 0x01, 0x05, 0x16, 0x01, 0x41];
//! let node = Asn1Node::from_der(&der)?;
//! assert!(node.is(Tag::SEQUENCE));
//! assert_eq!(node.first_child(), Some(&Asn1Node::integer(5)));
//! assert_eq!(node.to_der(), der);
//! # Ok::<(), avs_envelope::Error>(())
//! ```

mod decoder;
pub(crate) mod encoder;
mod node;
mod tag;

pub use self::{
    decoder::{decode_at, decode_at_with, DecodeOptions, DEFAULT_MAX_DEPTH},
    node::{Asn1Node, Content},
    tag::{Class, Tag},
};
