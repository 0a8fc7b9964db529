#![feature(test)]

extern crate test;

use avs_envelope::{
    der::{Asn1Node, Tag},
    extract_registration_number, oid, ObjectIdentifier,
};
use test::Bencher;

fn name() -> Asn1Node {
    Asn1Node::sequence(vec![Asn1Node::set(vec![Asn1Node::sequence(vec![
        Asn1Node::object_identifier(&"2.5.4.3".parse().unwrap()),
        Asn1Node::primitive(Tag::UTF8_STRING, "GEM.SMCB-CA9 TEST-ONLY"),
    ])])])
}

fn certificate() -> Vec<u8> {
    let admission = Asn1Node::sequence(vec![
        Asn1Node::context_specific(4, vec![name()]),
        Asn1Node::sequence(vec![Asn1Node::sequence(vec![Asn1Node::sequence(vec![
            Asn1Node::sequence(vec![
                Asn1Node::sequence(vec![Asn1Node::primitive(Tag::UTF8_STRING, "Apotheke")]),
                Asn1Node::sequence(vec![Asn1Node::object_identifier(
                    &"1.2.276.0.76.4.54".parse().unwrap(),
                )]),
                Asn1Node::printable_string("3-SMC-B-Testkarte-883110000116873"),
            ]),
        ])])]),
    ]);
    let extension = Asn1Node::sequence(vec![
        Asn1Node::object_identifier(&ObjectIdentifier::from(&oid::ID_ISISMTT_AT_ADMISSION)),
        Asn1Node::octet_string(admission.to_der()),
    ]);
    let algorithm = Asn1Node::sequence(vec![Asn1Node::object_identifier(
        &"1.2.840.10045.4.3.2".parse().unwrap(),
    )]);

    Asn1Node::sequence(vec![
        Asn1Node::sequence(vec![
            Asn1Node::context_specific(0, vec![Asn1Node::integer(2)]),
            Asn1Node::integer(0x1234_5678),
            algorithm.clone(),
            name(),
            Asn1Node::sequence(vec![]),
            name(),
            Asn1Node::sequence(vec![
                algorithm.clone(),
                Asn1Node::primitive(Tag::BIT_STRING, vec![0; 66]),
            ]),
            Asn1Node::context_specific(3, vec![Asn1Node::sequence(vec![extension])]),
        ]),
        algorithm,
        Asn1Node::primitive(Tag::BIT_STRING, vec![0; 72]),
    ])
    .to_der()
}

#[bench]
fn bench_decode_certificate(b: &mut Bencher) {
    let der = certificate();
    b.iter(|| {
        let node = Asn1Node::from_der(&der).unwrap();
        test::black_box(node);
    });
}

#[bench]
fn bench_encode_certificate(b: &mut Bencher) {
    let node = Asn1Node::from_der(&certificate()).unwrap();
    b.iter(|| {
        let der = node.to_der();
        test::black_box(der);
    });
}

#[bench]
fn bench_extract_registration_number(b: &mut Bencher) {
    let der = certificate();
    b.iter(|| {
        let id = extract_registration_number(&der).unwrap();
        test::black_box(id);
    });
}
