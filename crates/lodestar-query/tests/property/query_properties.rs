use std::collections::HashSet;
use std::sync::Arc;

use lodestar_core::models::AddressKind;
use lodestar_query::{Dictionaries, EntityExtractor, QueryEnhancer};
use proptest::prelude::*;

fn dicts() -> Arc<Dictionaries> {
    Arc::new(Dictionaries::embedded().unwrap())
}

fn ipv4() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![" ", " and ", "，", "网段", " via "])
}

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,10}",
        prop::sample::select(vec![
            "pfc", "ECN", "RoCE", "bgp", "huawei", "配置", "如何", "访问控制列表", "nv", "show",
            "the", "网段", "交换机", "swp1", "lossless", "then", "允许",
        ])
        .prop_map(str::to_string),
        ipv4(),
        (ipv4(), 0u8..=32).prop_map(|(ip, p)| format!("{ip}/{p}")),
    ]
}

proptest! {
    #[test]
    fn cidr_and_ipv4_never_share_a_span(
        entries in prop::collection::vec((ipv4(), prop::option::of(0u8..=32)), 1..6),
        sep in separator(),
    ) {
        let mut seen = HashSet::new();
        let entries: Vec<_> = entries.into_iter().filter(|(ip, _)| seen.insert(ip.clone())).collect();
        let query = entries
            .iter()
            .map(|(ip, prefix)| match prefix {
                Some(p) => format!("{ip}/{p}"),
                None => ip.clone(),
            })
            .collect::<Vec<_>>()
            .join(sep);

        let found = EntityExtractor::new(dicts()).extract(&query).network_addresses;
        let cidrs: HashSet<String> = found
            .iter()
            .filter(|a| a.kind == AddressKind::Cidr)
            .map(|a| a.address.split('/').next().unwrap_or_default().to_string())
            .collect();
        let bare: HashSet<String> = found
            .iter()
            .filter(|a| a.kind == AddressKind::Ipv4)
            .map(|a| a.address.clone())
            .collect();

        prop_assert!(cidrs.is_disjoint(&bare), "overlap in {:?}", found);
        prop_assert_eq!(found.len(), entries.len(), "query {:?} gave {:?}", query, found);
        for (ip, prefix) in &entries {
            match prefix {
                Some(_) => prop_assert!(cidrs.contains(ip)),
                None => prop_assert!(bare.contains(ip)),
            }
        }
    }

    #[test]
    fn enhanced_query_covers_every_keyword(words in prop::collection::vec(word(), 1..12)) {
        let query = words.join(" ");
        let d = dicts();
        let entities = EntityExtractor::new(d.clone()).extract(&query);
        let enhanced = QueryEnhancer::new(d).enhance(&entities);
        let out: HashSet<String> = enhanced.split_whitespace().map(str::to_lowercase).collect();
        for keyword in &entities.keywords {
            for token in keyword.split_whitespace() {
                prop_assert!(out.contains(&token.to_lowercase()), "{} missing from {:?}", token, enhanced);
            }
        }
    }

    #[test]
    fn extraction_is_deterministic(words in prop::collection::vec(word(), 1..12)) {
        let query = words.join(" ");
        let extractor = EntityExtractor::new(dicts());
        prop_assert_eq!(extractor.extract(&query), extractor.extract(&query));
    }

    #[test]
    fn keywords_are_lowercase_and_unique(words in prop::collection::vec(word(), 1..12)) {
        let entities = EntityExtractor::new(dicts()).extract(&words.join(" "));
        let unique: HashSet<&String> = entities.keywords.iter().collect();
        prop_assert_eq!(unique.len(), entities.keywords.len());
        for k in &entities.keywords {
            prop_assert_eq!(k, &k.to_lowercase());
        }
    }
}
