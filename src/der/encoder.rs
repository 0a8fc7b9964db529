//! DER encoding of [`Asn1Node`] trees.

use alloc::vec::Vec;

use super::{Asn1Node, Content};

impl Asn1Node {
    /// Encode this value as DER.
    pub fn to_der(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }

    /// Append the DER encoding of this value to `out`.
    ///
    /// Children are written in their stored order; nothing is sorted.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        self.tag().encode_into(out);
        encode_length(self.content_len(), out);
        match self.content() {
            Content::Primitive(bytes) => out.extend_from_slice(bytes),
            Content::Constructed(children) => {
                for child in children {
                    child.encode_into(out);
                }
            }
        }
    }

    /// Length of the full DER encoding (identifier, length and content).
    pub fn encoded_len(&self) -> usize {
        let content_len = self.content_len();
        self.tag().encoded_len() + length_len(content_len) + content_len
    }

    fn content_len(&self) -> usize {
        match self.content() {
            Content::Primitive(bytes) => bytes.len(),
            Content::Constructed(children) => children.iter().map(Asn1Node::encoded_len).sum(),
        }
    }
}

/// Write `len` in minimal short or long form.
pub(crate) fn encode_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }

    let octets = length_len(len) - 1;
    out.push(0x80 | octets as u8);
    for i in (0..octets).rev() {
        out.push((len >> (8 * i)) as u8);
    }
}

/// Number of octets `encode_length` writes for `len`.
pub(crate) fn length_len(len: usize) -> usize {
    if len < 0x80 {
        1
    } else {
        let bits = usize::BITS - len.leading_zeros();
        1 + bits.div_ceil(8) as usize
    }
}
