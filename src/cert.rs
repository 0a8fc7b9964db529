//! Recipient certificate access and Telematik-ID extraction.
//!
//! Pharmacy certificates (SMC-B) carry the pharmacy's registration number in
//! the ISIS-MTT `Admission` extension:
//!
//! ```text
//! AdmissionSyntax ::= SEQUENCE {
//!     admissionAuthority    GeneralName OPTIONAL,
//!     contentsOfAdmissions  SEQUENCE OF Admissions }
//!
//! Admissions ::= SEQUENCE {
//!     admissionAuthority  [0] EXPLICIT GeneralName OPTIONAL,
//!     namingAuthority     [1] EXPLICIT NamingAuthority OPTIONAL,
//!     professionInfos     SEQUENCE OF ProfessionInfo }
//!
//! ProfessionInfo ::= SEQUENCE {
//!     namingAuthority     [0] EXPLICIT NamingAuthority OPTIONAL,
//!     professionItems     SEQUENCE OF DirectoryString,
//!     professionOIDs      SEQUENCE OF OBJECT IDENTIFIER OPTIONAL,
//!     registrationNumber  PrintableString OPTIONAL,
//!     addProfessionInfo   OCTET STRING OPTIONAL }
//! ```
//!
//! Only the first admission and its first profession info are looked at.

use alloc::{string::String, vec::Vec};
use num_bigint::BigInt;
use tracing::{debug, trace};
use x509_cert::{
    der::{Decode, Encode},
    Certificate,
};

use crate::{
    der::{Asn1Node, DecodeOptions, Tag},
    errors::CertError,
    oid::{self, ObjectIdentifier},
};

/// Access to the parts of a recipient certificate the envelope needs.
pub trait CertificateAccessor {
    /// DER encoding of the whole certificate.
    fn der_bytes(&self) -> &[u8];

    /// Certificate serial number.
    fn serial_number(&self) -> Result<BigInt, CertError>;

    /// DER encoding of the issuer `Name`, if available.
    fn issuer_der(&self) -> Option<Vec<u8>>;
}

/// [`CertificateAccessor`] over a parsed X.509 certificate and the DER it
/// was parsed from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DerCertificate {
    der: Vec<u8>,
    certificate: Certificate,
}

impl DerCertificate {
    /// Parse a DER-encoded X.509 certificate.
    pub fn from_der(der: impl Into<Vec<u8>>) -> Result<Self, CertError> {
        let der = der.into();
        let certificate = Certificate::from_der(&der)?;
        Ok(Self { der, certificate })
    }

    /// The parsed certificate.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }
}

impl TryFrom<Certificate> for DerCertificate {
    type Error = CertError;

    fn try_from(certificate: Certificate) -> Result<Self, CertError> {
        let der = certificate.to_der()?;
        Ok(Self { der, certificate })
    }
}

impl CertificateAccessor for DerCertificate {
    fn der_bytes(&self) -> &[u8] {
        &self.der
    }

    fn serial_number(&self) -> Result<BigInt, CertError> {
        let serial = &self.certificate.tbs_certificate.serial_number;
        Ok(BigInt::from_signed_bytes_be(serial.as_bytes()))
    }

    fn issuer_der(&self) -> Option<Vec<u8>> {
        match self.certificate.tbs_certificate.issuer.to_der() {
            Ok(issuer) => Some(issuer),
            Err(err) => {
                debug!(%err, "cannot re-encode certificate issuer");
                None
            }
        }
    }
}

/// Extract the Telematik-ID (`registrationNumber`) from the certificate's
/// ISIS-MTT admission extension.
///
/// Returns `Ok(None)` when the certificate has no extensions, no single
/// admission extension, or an admission without a registration number.
/// Only bytes that do not form a DER `Certificate` SEQUENCE are an error.
pub fn extract_registration_number(cert_der: &[u8]) -> Result<Option<String>, CertError> {
    extract_registration_number_with(cert_der, &DecodeOptions::default())
}

/// [`extract_registration_number`] with explicit decoder options.
pub fn extract_registration_number_with(
    cert_der: &[u8],
    options: &DecodeOptions,
) -> Result<Option<String>, CertError> {
    let certificate = decode_certificate(cert_der, options)?;

    let Some(extensions) = extensions(&certificate) else {
        trace!("certificate carries no extensions");
        return Ok(None);
    };

    let Some(admission) = admission_extension(extensions) else {
        trace!("certificate carries no single admission extension");
        return Ok(None);
    };

    let Some(admission_syntax) = extension_value(admission, options) else {
        return Ok(None);
    };

    let registration_number = registration_number(&admission_syntax);
    if registration_number.is_none() {
        trace!("admission extension carries no registration number");
    }
    Ok(registration_number)
}

fn decode_certificate(cert_der: &[u8], options: &DecodeOptions) -> Result<Asn1Node, CertError> {
    let certificate = Asn1Node::from_der_with(cert_der, options)
        .map_err(|err| CertError::InvalidCertificate { source: Some(err) })?;
    if !certificate.is(Tag::SEQUENCE) {
        return Err(CertError::InvalidCertificate { source: None });
    }
    Ok(certificate)
}

/// `Extension` entries of `tbsCertificate.extensions`, i.e. the children of
/// the `SEQUENCE OF Extension` wrapped by `[3]`.
fn extensions(certificate: &Asn1Node) -> Option<&[Asn1Node]> {
    let tbs_certificate = certificate.first_child()?;
    let wrapper = tbs_certificate.last_child()?;
    if !wrapper.is(Tag::context_specific(3, true)) {
        return None;
    }
    wrapper.first_child()?.children()
}

/// The one extension whose `extnID` is `id-isismtt-at-admission`.
///
/// Several matching extensions are treated like none.
fn admission_extension(extensions: &[Asn1Node]) -> Option<&Asn1Node> {
    let admission = ObjectIdentifier::from(&oid::ID_ISISMTT_AT_ADMISSION);
    let mut matches = extensions
        .iter()
        .filter(|extension| extension_id(extension).as_ref() == Some(&admission));

    let first = matches.next()?;
    if matches.next().is_some() {
        debug!("certificate carries more than one admission extension");
        return None;
    }
    Some(first)
}

fn extension_id(extension: &Asn1Node) -> Option<ObjectIdentifier> {
    if !extension.is(Tag::SEQUENCE) {
        return None;
    }
    match extension.first_child()?.as_object_identifier()? {
        Ok(oid) => Some(oid),
        Err(err) => {
            debug!(%err, "skipping extension with malformed extnID");
            None
        }
    }
}

/// Decode the DER carried in the extension's `extnValue` OCTET STRING.
fn extension_value(extension: &Asn1Node, options: &DecodeOptions) -> Option<Asn1Node> {
    let extn_value = extension.last_child()?;
    if !extn_value.is(Tag::OCTET_STRING) {
        return None;
    }
    match Asn1Node::from_der_with(extn_value.bytes()?, options) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(%err, "admission extension value is not valid DER");
            None
        }
    }
}

fn registration_number(admission_syntax: &Asn1Node) -> Option<String> {
    let contents_of_admissions = admission_syntax.last_child()?;
    let admissions = contents_of_admissions.first_child()?;
    let profession_infos = admissions.last_child()?;
    let profession_info = profession_infos.first_child()?;
    profession_info
        .find_child(Tag::PRINTABLE_STRING)?
        .as_text()
}
