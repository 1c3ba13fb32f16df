//! Tests for the navigation primitives (`first_child`,
//! `next_sibling_or_following`, `Children`) and the structural invariants
//! that hold for every parsed token array.

use alloc::{format, vec, vec::Vec};

use crate::{first_child, next_sibling_or_following, Children, Parser, TokenKind};

#[test]
fn first_child_of_empty_array_equals_next() {
    let mut parser = Parser::new();
    parser.parse(b"[[],1]").unwrap();
    let tokens = parser.tokens();
    // token 1: outer array, token 2: inner empty array, token 3: number 1
    assert_eq!(tokens.at(2).kind, TokenKind::Array);
    assert_eq!(tokens.at(2).children, 0);
    assert_eq!(first_child(tokens, 2), tokens.at(2).next);
}

#[test]
fn children_iterator_walks_immediate_members_only() {
    let mut parser = Parser::new();
    parser.parse(br#"{"a":1,"b":{"c":2},"d":[3,4]}"#).unwrap();
    let tokens = parser.tokens();
    let root = 1;
    let names: Vec<&[u8]> = Children::new(tokens, root)
        .map(|i| {
            let t = tokens.at(i);
            &parser_input()[t.name_range()]
        })
        .collect();
    assert_eq!(names, vec![b"a".as_slice(), b"b".as_slice(), b"d".as_slice()]);

    fn parser_input() -> &'static [u8] {
        br#"{"a":1,"b":{"c":2},"d":[3,4]}"#
    }
}

#[test]
fn next_sibling_or_following_skips_entire_subtree() {
    let mut parser = Parser::new();
    parser.parse(br#"[{"a":[1,2,3]},99]"#).unwrap();
    let tokens = parser.tokens();
    // token 1: outer array, token 2: object, token 3: inner array,
    // tokens 4-6: 1,2,3, token 7: 99.
    assert_eq!(tokens.at(2).kind, TokenKind::Object);
    let after_object = next_sibling_or_following(tokens, 2);
    assert_eq!(after_object, 7);
    assert_eq!(tokens.at(after_object).kind, TokenKind::Number);
}

#[test]
fn parent_chain_terminates_at_sentinel_for_every_token() {
    let mut parser = Parser::new();
    parser.parse(br#"{"a":[1,{"b":2}],"c":[[3]]}"#).unwrap();
    let tokens = parser.tokens();
    for i in 1..=parser.last() {
        let mut cursor = tokens.at(i).parent;
        let mut steps = 0;
        while cursor != 0 {
            assert!(tokens.at(cursor).kind.is_container());
            cursor = tokens.at(cursor).parent;
            steps += 1;
            assert!(steps <= parser.last());
        }
    }
}

#[test]
fn container_check_invariants_passes_on_varied_shapes() {
    for input in [
        b"[]".as_slice(),
        b"{}".as_slice(),
        br#"[1,[2,[3,[4]]],5]"#.as_slice(),
        br#"{"a":{"b":{"c":[1,2,3]}},"d":[]}"#.as_slice(),
    ] {
        let mut parser = Parser::new();
        parser.parse(input).unwrap();
        parser.tokens().check_invariants();
    }
}

/// A small generator of well-formed JSON documents, used only to drive
/// the reuse-safety property below. Depth is capped so generated
/// documents can't blow the stack building themselves.
#[derive(Clone, Debug)]
struct JsonDoc(Vec<u8>);

fn gen_json(g: &mut quickcheck::Gen, depth: u32) -> Vec<u8> {
    use quickcheck::Arbitrary;

    let max_choice = if depth >= 3 { 2 } else { 4 };
    match u8::arbitrary(g) % (max_choice + 1) {
        0 => Vec::from(&b"null"[..]),
        1 => Vec::from(if bool::arbitrary(g) { &b"true"[..] } else { &b"false"[..] }),
        2 => format!("{}", i32::arbitrary(g)).into_bytes(),
        3 => {
            let n = u8::arbitrary(g) % 4;
            let mut out = Vec::from(&b"["[..]);
            for i in 0..n {
                if i > 0 {
                    out.push(b',');
                }
                out.extend(gen_json(g, depth + 1));
            }
            out.push(b']');
            out
        }
        _ => {
            let n = u8::arbitrary(g) % 4;
            let mut out = Vec::from(&b"{"[..]);
            for i in 0..n {
                if i > 0 {
                    out.push(b',');
                }
                out.extend(format!("\"k{i}\":").into_bytes());
                out.extend(gen_json(g, depth + 1));
            }
            out.push(b'}');
            out
        }
    }
}

impl quickcheck::Arbitrary for JsonDoc {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self(gen_json(g, 0))
    }
}

#[test]
fn reuse_safety_matches_fresh_context_property() {
    use quickcheck::{QuickCheck, TestResult};

    fn prop(doc: JsonDoc) -> TestResult {
        let mut reused = Parser::new();
        reused.parse(b"\"priming value\"").unwrap();
        let Ok(reused_count) = reused.parse(&doc.0) else {
            return TestResult::discard();
        };

        let mut fresh = Parser::new();
        let Ok(fresh_count) = fresh.parse(&doc.0) else {
            return TestResult::discard();
        };

        if reused_count != fresh_count {
            return TestResult::from_bool(false);
        }
        for i in 0..=reused_count {
            if reused.tokens().at(i) != fresh.tokens().at(i) {
                return TestResult::from_bool(false);
            }
        }
        TestResult::from_bool(true)
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 2_000 } else { 200 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new().tests(tests).quickcheck(prop as fn(JsonDoc) -> TestResult);
}
