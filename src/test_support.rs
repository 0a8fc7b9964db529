//! Synthetic certificates and CMS structures for unit tests.

use alloc::vec::Vec;

use crate::{
    der::{Asn1Node, Tag},
    oid::{self, ObjectIdentifier},
};

pub(crate) const TELEMATIK_ID: &str = "3-SMC-B-Testkarte-883110000116873";

fn oid(s: &str) -> Asn1Node {
    Asn1Node::object_identifier(&s.parse().unwrap())
}

/// `Name` with a country and an organization RDN.
pub(crate) fn name(organization: &str) -> Asn1Node {
    Asn1Node::sequence(vec![
        Asn1Node::set(vec![Asn1Node::sequence(vec![
            oid("2.5.4.6"),
            Asn1Node::printable_string("DE"),
        ])]),
        Asn1Node::set(vec![Asn1Node::sequence(vec![
            oid("2.5.4.10"),
            Asn1Node::primitive(Tag::UTF8_STRING, organization),
        ])]),
    ])
}

/// ISIS-MTT admission extension carrying `registration_number`.
pub(crate) fn admission_extension(registration_number: &str) -> Asn1Node {
    let profession_info = Asn1Node::sequence(vec![
        Asn1Node::sequence(vec![Asn1Node::primitive(
            Tag::UTF8_STRING,
            "Öffentliche Apotheke",
        )]),
        Asn1Node::sequence(vec![oid("1.2.276.0.76.4.54")]),
        Asn1Node::printable_string(registration_number),
    ]);
    let admission_syntax = Asn1Node::sequence(vec![
        Asn1Node::context_specific(4, vec![name("gematik Berlin")]),
        Asn1Node::sequence(vec![Asn1Node::sequence(vec![Asn1Node::sequence(vec![
            profession_info,
        ])])]),
    ]);

    Asn1Node::sequence(vec![
        Asn1Node::object_identifier(&ObjectIdentifier::from(&oid::ID_ISISMTT_AT_ADMISSION)),
        Asn1Node::octet_string(admission_syntax.to_der()),
    ])
}

/// v3 certificate with the given serial, issuer and extensions.
pub(crate) fn certificate(
    serial: &[u8],
    issuer: Asn1Node,
    extensions: Option<Vec<Asn1Node>>,
) -> Vec<u8> {
    let signature_algorithm = Asn1Node::sequence(vec![
        oid("1.2.840.113549.1.1.11"),
        Asn1Node::primitive(Tag::NULL, vec![]),
    ]);

    let mut tbs = vec![
        Asn1Node::context_specific(0, vec![Asn1Node::integer(2)]),
        Asn1Node::primitive(Tag::INTEGER, serial),
        signature_algorithm.clone(),
        issuer,
        Asn1Node::sequence(vec![
            Asn1Node::primitive(Tag::universal(23, false), "230101000000Z"),
            Asn1Node::primitive(Tag::universal(23, false), "280101000000Z"),
        ]),
        name("Apotheke am Markt"),
        Asn1Node::sequence(vec![
            Asn1Node::sequence(vec![
                oid("1.2.840.113549.1.1.1"),
                Asn1Node::primitive(Tag::NULL, vec![]),
            ]),
            Asn1Node::primitive(Tag::BIT_STRING, vec![0x00, 0x30, 0x00]),
        ]),
    ];
    if let Some(extensions) = extensions {
        tbs.push(Asn1Node::context_specific(3, vec![Asn1Node::sequence(extensions)]));
    }

    Asn1Node::sequence(vec![
        Asn1Node::sequence(tbs),
        signature_algorithm,
        Asn1Node::primitive(Tag::BIT_STRING, vec![0x00, 0xde, 0xad]),
    ])
    .to_der()
}

/// `ContentInfo` of type `id-ct-authEnvelopedData` shaped like the output of
/// the encryption provider.
pub(crate) fn auth_enveloped_data() -> Vec<u8> {
    let recipient_info = Asn1Node::sequence(vec![
        Asn1Node::integer(0),
        Asn1Node::sequence(vec![name("gematik Berlin"), Asn1Node::integer(4711)]),
        Asn1Node::sequence(vec![oid("1.2.840.113549.1.1.7")]),
        Asn1Node::octet_string(vec![0x5a; 256]),
    ]);
    let auth_encrypted_content_info = Asn1Node::sequence(vec![
        oid("1.2.840.113549.1.7.1"),
        Asn1Node::sequence(vec![
            oid("2.16.840.1.101.3.4.1.46"),
            Asn1Node::sequence(vec![Asn1Node::octet_string(vec![0x01; 12])]),
        ]),
        Asn1Node::primitive(Tag::context_specific(0, false), vec![0xc3; 200]),
    ]);

    Asn1Node::sequence(vec![
        Asn1Node::object_identifier(&ObjectIdentifier::from(&oid::ID_CT_AUTH_ENVELOPED_DATA)),
        Asn1Node::context_specific(
            0,
            vec![Asn1Node::sequence(vec![
                Asn1Node::integer(0),
                Asn1Node::set(vec![recipient_info]),
                auth_encrypted_content_info,
                Asn1Node::octet_string(vec![0x77; 16]),
            ])],
        ),
    ])
    .to_der()
}
