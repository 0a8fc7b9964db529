//! Property-based tests.

use avs_envelope::{
    der::{Asn1Node, Class, Tag},
    DecodeOptions, ObjectIdentifier,
};
use proptest::prelude::*;

fn tag() -> impl Strategy<Value = Tag> {
    let class = prop_oneof![
        Just(Class::Universal),
        Just(Class::Application),
        Just(Class::ContextSpecific),
        Just(Class::Private),
    ];
    let number = prop_oneof![0u32..31, 31u32..0x4000, any::<u32>()];
    (class, number).prop_map(|(class, number)| Tag::new(class, number, false))
}

fn node() -> impl Strategy<Value = Asn1Node> {
    let leaf = (tag(), prop::collection::vec(any::<u8>(), 0..300))
        .prop_map(|(tag, bytes)| Asn1Node::primitive(tag, bytes));
    leaf.prop_recursive(6, 64, 8, |inner| {
        (tag(), prop::collection::vec(inner, 0..8))
            .prop_map(|(tag, children)| Asn1Node::constructed(tag, children))
    })
}

prop_compose! {
    fn oid()(
        first in 0u64..3,
        second in 0u64..40,
        large in any::<u32>(),
        rest in prop::collection::vec(any::<u64>(), 0..10),
    ) -> ObjectIdentifier {
        let second = if first == 2 { second + u64::from(large) } else { second };
        let mut arcs = vec![first, second];
        arcs.extend(rest);
        ObjectIdentifier::new(arcs).unwrap()
    }
}

proptest! {
    #[test]
    fn der_roundtrip(node in node()) {
        let der = node.to_der();
        prop_assert_eq!(der.len(), node.encoded_len());
        prop_assert_eq!(Asn1Node::from_der(&der).unwrap(), node);
    }

    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        if let Ok(node) = Asn1Node::from_der_with(&bytes, &DecodeOptions::with_max_depth(8)) {
            // accepted input is canonical
            prop_assert_eq!(node.to_der(), bytes);
        }
    }

    #[test]
    fn oid_roundtrip(id in oid()) {
        let content = id.to_der_content();
        prop_assert_eq!(ObjectIdentifier::from_der_content(&content).unwrap(), id.clone());
        prop_assert_eq!(id.to_string().parse::<ObjectIdentifier>().unwrap(), id);
    }
}
