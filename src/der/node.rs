//! Tagged ASN.1 value tree.

use alloc::{string::String, vec::Vec};
use num_bigint::BigInt;

use super::Tag;
use crate::oid::ObjectIdentifier;

/// Content octets of an [`Asn1Node`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Content {
    /// Raw content octets of a primitive value.
    Primitive(Vec<u8>),

    /// Children of a constructed value, in encoding order.
    Constructed(Vec<Asn1Node>),
}

/// A decoded (or hand-built) ASN.1 value.
///
/// The tag's constructed bit always matches the [`Content`] variant; the
/// constructors below enforce this, which is why the fields are private.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Asn1Node {
    tag: Tag,
    content: Content,
}

impl Asn1Node {
    /// Primitive value with the given content octets.
    ///
    /// The constructed bit of `tag` is cleared.
    pub fn primitive(tag: Tag, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: tag.with_constructed(false),
            content: Content::Primitive(bytes.into()),
        }
    }

    /// Constructed value with the given children.
    ///
    /// The constructed bit of `tag` is set.
    pub fn constructed(tag: Tag, children: Vec<Asn1Node>) -> Self {
        Self {
            tag: tag.with_constructed(true),
            content: Content::Constructed(children),
        }
    }

    /// `SEQUENCE { children }`
    pub fn sequence(children: Vec<Asn1Node>) -> Self {
        Self::constructed(Tag::SEQUENCE, children)
    }

    /// `SET { children }`, kept in the given order.
    pub fn set(children: Vec<Asn1Node>) -> Self {
        Self::constructed(Tag::SET, children)
    }

    /// Constructed context-specific `[number] { children }`.
    pub fn context_specific(number: u32, children: Vec<Asn1Node>) -> Self {
        Self::constructed(Tag::context_specific(number, true), children)
    }

    /// `INTEGER` in minimal two's complement form.
    pub fn integer(value: i64) -> Self {
        Self::primitive(Tag::INTEGER, BigInt::from(value).to_signed_bytes_be())
    }

    /// `OCTET STRING`
    pub fn octet_string(bytes: impl Into<Vec<u8>>) -> Self {
        Self::primitive(Tag::OCTET_STRING, bytes)
    }

    /// `IA5String` holding `value` verbatim.
    pub fn ia5_string(value: &str) -> Self {
        Self::primitive(Tag::IA5_STRING, value.as_bytes())
    }

    /// `PrintableString` holding `value` verbatim.
    pub fn printable_string(value: &str) -> Self {
        Self::primitive(Tag::PRINTABLE_STRING, value.as_bytes())
    }

    /// `OBJECT IDENTIFIER`
    pub fn object_identifier(oid: &ObjectIdentifier) -> Self {
        Self::primitive(Tag::OBJECT_IDENTIFIER, oid.to_der_content())
    }

    /// Tag of this value.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Content of this value.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Split into tag and content.
    pub fn into_parts(self) -> (Tag, Content) {
        (self.tag, self.content)
    }

    /// Does this value carry exactly `tag` (class, number and form)?
    pub fn is(&self, tag: Tag) -> bool {
        self.tag == tag
    }

    /// Children, if constructed.
    pub fn children(&self) -> Option<&[Asn1Node]> {
        match &self.content {
            Content::Constructed(children) => Some(children),
            Content::Primitive(_) => None,
        }
    }

    /// Children by value, if constructed.
    pub fn into_children(self) -> Option<Vec<Asn1Node>> {
        match self.content {
            Content::Constructed(children) => Some(children),
            Content::Primitive(_) => None,
        }
    }

    /// Content octets, if primitive.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.content {
            Content::Primitive(bytes) => Some(bytes),
            Content::Constructed(_) => None,
        }
    }

    /// First child, if constructed and non-empty.
    pub fn first_child(&self) -> Option<&Asn1Node> {
        self.children()?.first()
    }

    /// Last child, if constructed and non-empty.
    pub fn last_child(&self) -> Option<&Asn1Node> {
        self.children()?.last()
    }

    /// First child carrying `tag`.
    pub fn find_child(&self, tag: Tag) -> Option<&Asn1Node> {
        self.children()?.iter().find(|child| child.is(tag))
    }

    /// Decode content octets as an object identifier, if this is an
    /// `OBJECT IDENTIFIER` value.
    pub fn as_object_identifier(&self) -> Option<crate::Result<ObjectIdentifier>> {
        if !self.is(Tag::OBJECT_IDENTIFIER) {
            return None;
        }
        self.bytes().map(ObjectIdentifier::from_der_content)
    }

    /// Content octets as text, if primitive and valid UTF-8.
    pub fn as_text(&self) -> Option<String> {
        let bytes = self.bytes()?;
        core::str::from_utf8(bytes).ok().map(String::from)
    }
}
