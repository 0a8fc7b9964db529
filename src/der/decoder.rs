//! DER decoding into [`Asn1Node`] trees.

use alloc::vec::Vec;

use super::{Asn1Node, Tag};
use crate::errors::{Error, Result};

/// Default nesting limit applied by [`DecodeOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest number of length octets accepted in long form.
const MAX_LENGTH_OCTETS: usize = 4;

/// Decoder configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeOptions {
    /// Maximum nesting of constructed values. The top-level value has depth 1.
    ///
    /// DER itself places no bound on nesting; this limit keeps hostile input
    /// from exhausting the stack.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Options with the given nesting limit.
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

/// Decode one value starting at `offset`, returning it together with the
/// number of bytes it occupied.
pub fn decode_at(bytes: &[u8], offset: usize) -> Result<(Asn1Node, usize)> {
    decode_at_with(bytes, offset, &DecodeOptions::default())
}

/// [`decode_at`] with explicit options.
pub fn decode_at_with(
    bytes: &[u8],
    offset: usize,
    options: &DecodeOptions,
) -> Result<(Asn1Node, usize)> {
    let input = bytes.get(offset..).ok_or(Error::UnexpectedEnd)?;
    decode_value(input, 1, options)
}

impl Asn1Node {
    /// Decode a buffer holding exactly one DER value.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Self::from_der_with(bytes, &DecodeOptions::default())
    }

    /// [`Asn1Node::from_der`] with explicit options.
    pub fn from_der_with(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        let (node, consumed) = decode_value(bytes, 1, options)?;
        if consumed != bytes.len() {
            return Err(Error::TrailingData);
        }
        Ok(node)
    }
}

fn decode_value(input: &[u8], depth: usize, options: &DecodeOptions) -> Result<(Asn1Node, usize)> {
    if depth > options.max_depth {
        return Err(Error::DepthLimitExceeded {
            max_depth: options.max_depth,
        });
    }

    let (tag, tag_len) = Tag::decode(input)?;
    let (len, len_len) = decode_length(&input[tag_len..])?;
    let header_len = tag_len + len_len;

    let end = header_len
        .checked_add(len)
        .ok_or(Error::TruncatedOrOverrunContent)?;
    let content = input
        .get(header_len..end)
        .ok_or(Error::TruncatedOrOverrunContent)?;

    let node = if tag.is_constructed() {
        Asn1Node::constructed(tag, decode_children(content, depth + 1, options)?)
    } else {
        Asn1Node::primitive(tag, content)
    };

    Ok((node, end))
}

/// Decode children until `content` is used up exactly.
fn decode_children(content: &[u8], depth: usize, options: &DecodeOptions) -> Result<Vec<Asn1Node>> {
    let mut children = Vec::new();
    let mut pos = 0;
    while pos < content.len() {
        let (child, consumed) = decode_value(&content[pos..], depth, options).map_err(|err| {
            // A child header cut off by the parent boundary is an overrun of
            // the parent, not an end of input.
            match err {
                Error::UnexpectedEnd => Error::TruncatedOrOverrunContent,
                other => other,
            }
        })?;
        children.push(child);
        pos += consumed;
    }
    Ok(children)
}

/// Parse definite-length octets, returning the length and octets consumed.
fn decode_length(input: &[u8]) -> Result<(usize, usize)> {
    let first = *input.first().ok_or(Error::UnexpectedEnd)?;
    if first < 0x80 {
        return Ok((usize::from(first), 1));
    }

    let count = usize::from(first & 0x7f);
    if count == 0 {
        return Err(Error::UnsupportedIndefiniteLength);
    }
    if count > MAX_LENGTH_OCTETS {
        return Err(Error::LengthOverflow);
    }

    let octets = input.get(1..=count).ok_or(Error::UnexpectedEnd)?;
    if octets[0] == 0 {
        return Err(Error::NonCanonicalLength);
    }

    let len = octets
        .iter()
        .fold(0usize, |acc, &octet| (acc << 8) | usize::from(octet));
    if len < 0x80 {
        return Err(Error::NonCanonicalLength);
    }

    Ok((len, 1 + count))
}
