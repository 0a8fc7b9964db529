//! Error types.

use alloc::boxed::Box;
use core::fmt;

/// Alias for [`core::result::Result`] with the `avs-envelope` DER error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while decoding DER or object identifiers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Input ended inside a tag or length header.
    UnexpectedEnd,

    /// Malformed or non-minimal high-tag-number form.
    InvalidTag,

    /// Indefinite length (`0x80`) is not DER.
    UnsupportedIndefiniteLength,

    /// Long-form length that is not the minimal encoding.
    NonCanonicalLength,

    /// Length field does not fit into four octets.
    LengthOverflow,

    /// Content runs past its enclosing boundary, or children do not fill a
    /// constructed value exactly.
    TruncatedOrOverrunContent,

    /// Bytes left over after the top-level value.
    TrailingData,

    /// Nesting deeper than the configured limit.
    DepthLimitExceeded {
        /// Limit that was hit.
        max_depth: usize,
    },

    /// Dotted object identifier string or arc values are not valid.
    InvalidOid,

    /// Object identifier content octets are malformed.
    InvalidOidEncoding,
}

impl core::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEnd => write!(f, "unexpected end of DER input"),
            Error::InvalidTag => write!(f, "invalid tag encoding"),
            Error::UnsupportedIndefiniteLength => write!(f, "indefinite length is not supported"),
            Error::NonCanonicalLength => write!(f, "length is not minimally encoded"),
            Error::LengthOverflow => write!(f, "length too large"),
            Error::TruncatedOrOverrunContent => {
                write!(f, "content truncated or overruns its enclosing value")
            }
            Error::TrailingData => write!(f, "trailing data after DER value"),
            Error::DepthLimitExceeded { max_depth } => {
                write!(f, "nesting exceeds maximum depth of {max_depth}")
            }
            Error::InvalidOid => write!(f, "invalid object identifier"),
            Error::InvalidOidEncoding => write!(f, "invalid object identifier encoding"),
        }
    }
}

/// Errors raised while reading recipient certificates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum CertError {
    /// Certificate bytes are not a DER `Certificate` SEQUENCE.
    InvalidCertificate {
        /// Decode error, if decoding itself failed.
        source: Option<Error>,
    },

    /// X.509 decoding or encoding error.
    X509(x509_cert::der::Error),
}

impl core::error::Error for CertError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            CertError::InvalidCertificate { source: Some(err) } => Some(err),
            #[cfg(feature = "std")]
            CertError::X509(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for CertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertError::InvalidCertificate { source: Some(err) } => {
                write!(f, "invalid certificate: {err}")
            }
            CertError::InvalidCertificate { source: None } => {
                write!(f, "invalid certificate: top level is not a SEQUENCE")
            }
            CertError::X509(err) => write!(f, "X.509 error: {err}"),
        }
    }
}

/// Errors raised while building the redemption envelope.
#[derive(Debug)]
#[non_exhaustive]
pub enum EnvelopeError {
    /// The CMS structure returned by the encryption provider has an
    /// unexpected shape.
    UnexpectedStructure(&'static str),

    /// DER decode error.
    Asn1(Error),

    /// Recipient certificate error.
    Certificate(CertError),

    /// Error reported by the encryption provider.
    Encryption(Box<dyn core::error::Error + Send + Sync>),
}

impl core::error::Error for EnvelopeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            EnvelopeError::UnexpectedStructure(_) => None,
            EnvelopeError::Asn1(err) => Some(err),
            EnvelopeError::Certificate(err) => Some(err),
            EnvelopeError::Encryption(err) => Some(err.as_ref()),
        }
    }
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::UnexpectedStructure(reason) => {
                write!(f, "unexpected CMS structure: {reason}")
            }
            EnvelopeError::Asn1(err) => write!(f, "ASN.1 error: {err}"),
            EnvelopeError::Certificate(err) => write!(f, "certificate error: {err}"),
            EnvelopeError::Encryption(err) => write!(f, "encryption error: {err}"),
        }
    }
}

impl From<x509_cert::der::Error> for CertError {
    fn from(err: x509_cert::der::Error) -> CertError {
        CertError::X509(err)
    }
}

impl From<Error> for EnvelopeError {
    fn from(err: Error) -> EnvelopeError {
        EnvelopeError::Asn1(err)
    }
}

impl From<CertError> for EnvelopeError {
    fn from(err: CertError) -> EnvelopeError {
        EnvelopeError::Certificate(err)
    }
}
