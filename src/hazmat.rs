//! ⚠️ Low-level envelope construction.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! These functions build and splice the recipient attribute without going
//! through an [`EncryptionProvider`](crate::redeem::EncryptionProvider). They
//! do not check that the attribute matches the recipients the content was
//! encrypted for; a mismatch makes the pharmacy endpoint route the message to
//! the wrong recipient or reject it. Use
//! [`build_redemption_envelope`](crate::build_redemption_envelope) unless you
//! are testing or bridging another CMS implementation.

pub use crate::{
    attribute::{
        recipient_emails_attribute, recipient_emails_attribute_with, unauth_attrs,
        UNAUTH_ATTRS_TAG_NUMBER,
    },
    envelope::{inject_unauth_attrs, inject_unauth_attrs_with},
    redeem::registration_entries,
};
