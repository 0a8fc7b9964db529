//! Splicing `unauthAttrs` into an encrypted CMS `AuthEnvelopedData`.
//!
//! ```text
//! ContentInfo ::= SEQUENCE {
//!   contentType   OBJECT IDENTIFIER,       -- id-ct-authEnvelopedData
//!   content  [0]  EXPLICIT AuthEnvelopedData }
//!
//! AuthEnvelopedData ::= SEQUENCE {
//!   version, originatorInfo [0] OPTIONAL, recipientInfos,
//!   authEncryptedContentInfo, authAttrs [1] OPTIONAL, mac,
//!   unauthAttrs [2] IMPLICIT UnauthAttributes OPTIONAL }
//! ```
//!
//! `unauthAttrs` ([RFC 5083] section 2.1) is not covered by the MAC, so it
//! can be appended after encryption. Every other value is re-encoded from
//! its decoded form and therefore stays byte-identical.
//!
//! [RFC 5083]: https://www.rfc-editor.org/rfc/rfc5083

use alloc::vec::Vec;

use crate::{
    attribute::UNAUTH_ATTRS_TAG_NUMBER,
    der::{Asn1Node, DecodeOptions, Tag},
    errors::EnvelopeError,
    oid,
};

/// Append `unauth_attrs_node` as the last field of the `AuthEnvelopedData`
/// inside `base_cms_der` and return the re-encoded `ContentInfo`.
#[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
pub fn inject_unauth_attrs(
    base_cms_der: &[u8],
    unauth_attrs_node: Asn1Node,
) -> Result<Vec<u8>, EnvelopeError> {
    inject_unauth_attrs_with(base_cms_der, unauth_attrs_node, &DecodeOptions::default())
}

/// [`inject_unauth_attrs`] with explicit decoder options.
pub fn inject_unauth_attrs_with(
    base_cms_der: &[u8],
    unauth_attrs_node: Asn1Node,
    options: &DecodeOptions,
) -> Result<Vec<u8>, EnvelopeError> {
    let content_info = Asn1Node::from_der_with(base_cms_der, options)?;
    let (content_type, mut fields) = split_content_info(content_info)?;

    if fields
        .last()
        .is_some_and(|field| field.is(Tag::context_specific(UNAUTH_ATTRS_TAG_NUMBER, true)))
    {
        return Err(EnvelopeError::UnexpectedStructure(
            "AuthEnvelopedData already carries unauthAttrs",
        ));
    }
    fields.push(unauth_attrs_node);

    let content_info = Asn1Node::sequence(vec![
        content_type,
        Asn1Node::context_specific(0, vec![Asn1Node::sequence(fields)]),
    ]);
    Ok(content_info.to_der())
}

/// Take a `ContentInfo` apart into its content type OID and the fields of
/// the enclosed `AuthEnvelopedData`.
fn split_content_info(content_info: Asn1Node) -> Result<(Asn1Node, Vec<Asn1Node>), EnvelopeError> {
    use EnvelopeError::UnexpectedStructure;

    if !content_info.is(Tag::SEQUENCE) {
        return Err(UnexpectedStructure("ContentInfo is not a SEQUENCE"));
    }
    let items = content_info
        .into_children()
        .ok_or(UnexpectedStructure("ContentInfo is not a SEQUENCE"))?;
    let [content_type, content]: [Asn1Node; 2] = items
        .try_into()
        .map_err(|_| UnexpectedStructure("ContentInfo does not have exactly two fields"))?;

    match content_type.as_object_identifier() {
        Some(Ok(id)) if id == oid::ID_CT_AUTH_ENVELOPED_DATA => {}
        _ => return Err(UnexpectedStructure("content type is not id-ct-authEnvelopedData")),
    }

    if !content.is(Tag::context_specific(0, true)) {
        return Err(UnexpectedStructure("content is not wrapped in [0]"));
    }
    let children = content
        .into_children()
        .ok_or(UnexpectedStructure("content is not wrapped in [0]"))?;
    let [auth_enveloped_data]: [Asn1Node; 1] = children
        .try_into()
        .map_err(|_| UnexpectedStructure("[0] does not hold exactly one value"))?;

    if !auth_enveloped_data.is(Tag::SEQUENCE) {
        return Err(UnexpectedStructure("AuthEnvelopedData is not a SEQUENCE"));
    }
    let fields = auth_enveloped_data
        .into_children()
        .ok_or(UnexpectedStructure("AuthEnvelopedData is not a SEQUENCE"))?;

    Ok((content_type, fields))
}
