//! Redemption envelope: encrypt, address, splice.

use alloc::{boxed::Box, vec::Vec};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::{
    attribute::{recipient_emails_attribute_with, unauth_attrs, RegistrationEntry},
    cert::{extract_registration_number_with, CertificateAccessor},
    der::DecodeOptions,
    envelope::inject_unauth_attrs_with,
    errors::{CertError, EnvelopeError},
};

/// Media type of the envelope when posted to the pharmacy endpoint.
pub const CONTENT_TYPE: &str = "application/pkcs7-mime";

/// Produces a CMS `AuthEnvelopedData` for a set of recipient certificates.
pub trait EncryptionProvider<C> {
    /// Error reported by the provider.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Encrypt `plaintext` for `recipients`, returning a DER `ContentInfo`
    /// of type `id-ct-authEnvelopedData`.
    fn encrypt(&self, plaintext: &[u8], recipients: &[C]) -> Result<Vec<u8>, Self::Error>;
}

impl<C, P: EncryptionProvider<C> + ?Sized> EncryptionProvider<C> for &P {
    type Error = P::Error;

    fn encrypt(&self, plaintext: &[u8], recipients: &[C]) -> Result<Vec<u8>, Self::Error> {
        P::encrypt(self, plaintext, recipients)
    }
}

/// Builds redemption envelopes with a given encryption provider.
#[derive(Clone, Debug)]
pub struct AvsMessageConverter<P> {
    provider: P,
    options: DecodeOptions,
}

impl<P> AvsMessageConverter<P> {
    /// Converter with default decoder options.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            options: DecodeOptions::default(),
        }
    }

    /// Use `options` for every DER value this converter decodes.
    pub fn with_decode_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// The encryption provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Encrypt `message` for `recipients` and attach the recipient attribute.
    ///
    /// Recipients whose certificate carries no Telematik-ID, no issuer or a
    /// serial number outside `i64` are left out of the attribute. When no
    /// recipient remains, the provider's output is returned unchanged.
    pub fn convert<C>(&self, message: &[u8], recipients: &[C]) -> Result<Vec<u8>, EnvelopeError>
    where
        C: CertificateAccessor,
        P: EncryptionProvider<C>,
    {
        let base_cms_der = self
            .provider
            .encrypt(message, recipients)
            .map_err(|err| EnvelopeError::Encryption(Box::new(err)))?;

        let entries = registration_entries(recipients, &self.options)?;
        debug!(
            recipients = recipients.len(),
            addressed = entries.len(),
            "collected recipient registration entries"
        );
        if entries.is_empty() {
            return Ok(base_cms_der);
        }

        let attribute = recipient_emails_attribute_with(&entries, &self.options)?;
        inject_unauth_attrs_with(&base_cms_der, unauth_attrs(vec![attribute]), &self.options)
    }
}

/// Encrypt `message_bytes` for `recipients` with `provider` and attach the
/// recipient attribute, using default decoder options.
pub fn build_redemption_envelope<P, C>(
    provider: &P,
    message_bytes: &[u8],
    recipients: &[C],
) -> Result<Vec<u8>, EnvelopeError>
where
    P: EncryptionProvider<C> + ?Sized,
    C: CertificateAccessor,
{
    AvsMessageConverter::new(provider).convert(message_bytes, recipients)
}

/// Registration entries for every recipient that can be addressed.
pub fn registration_entries<C: CertificateAccessor>(
    recipients: &[C],
    options: &DecodeOptions,
) -> Result<Vec<RegistrationEntry>, CertError> {
    let mut entries = Vec::with_capacity(recipients.len());
    for recipient in recipients {
        if let Some(entry) = registration_entry(recipient, options)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn registration_entry<C: CertificateAccessor>(
    recipient: &C,
    options: &DecodeOptions,
) -> Result<Option<RegistrationEntry>, CertError> {
    let Some(registration_number) =
        extract_registration_number_with(recipient.der_bytes(), options)?
    else {
        return Ok(None);
    };
    let Some(issuer_der) = recipient.issuer_der() else {
        debug!(%registration_number, "recipient certificate has no issuer");
        return Ok(None);
    };
    let Some(serial_number) = recipient.serial_number()?.to_i64() else {
        debug!(%registration_number, "recipient serial number does not fit into i64");
        return Ok(None);
    };

    Ok(Some(RegistrationEntry {
        registration_number,
        issuer_der,
        serial_number,
    }))
}
