//! Black-box conformance tests, exercised through the public API only.

use jsontok::{unescape, Parser, TokenKind};
use rstest::rstest;

#[rstest]
#[case(br#"[]"#.as_slice(), 1)]
#[case(br#"{}"#.as_slice(), 1)]
#[case(br#"{"a":1,"b":[true,null]}"#.as_slice(), 5)]
#[case(br#"[1,[2,[3,[4,[5]]]]]"#.as_slice(), 6)]
fn token_count_equals_value_count(#[case] input: &[u8], #[case] expected: usize) {
    let mut parser = Parser::new();
    assert_eq!(parser.parse(input).unwrap(), expected);
}

#[test]
fn capacity_exhaustion_is_distinguishable_from_syntax_error() {
    // 9 raw slots == 8 usable token slots once the sentinel at index 0
    // is accounted for.
    let mut buf = [jsontok::Token::default(); 9];
    let mut parser = Parser::from_buffer(&mut buf);
    let err = parser.parse(b"[[[[[[[[0]]]]]]]]").unwrap_err();
    assert!(matches!(err, jsontok::ParseError::CapacityExhausted));
    assert_eq!(parser.last(), parser.capacity());
}

#[test]
fn reuse_across_inputs_matches_fresh_context() {
    let mut reused = Parser::new();
    reused.parse(br#"{"x":1}"#).unwrap();
    reused.parse(br#"[1,2,3,4]"#).unwrap();

    let mut fresh = Parser::new();
    fresh.parse(br#"[1,2,3,4]"#).unwrap();

    assert_eq!(reused.last(), fresh.last());
    for i in 0..=reused.last() {
        assert_eq!(reused.tokens().at(i), fresh.tokens().at(i));
    }
}

#[test]
fn full_document_walk_matches_expected_shape() {
    let input = br#"{"name":"jsontok","tags":["json","parser"],"strict":true}"#;
    let mut parser = Parser::new();
    parser.parse(input).unwrap();
    let tokens = parser.tokens();

    let root = 1;
    assert_eq!(tokens.at(root).kind, TokenKind::Object);

    let mut names = Vec::new();
    let mut cursor = jsontok::first_child(tokens, root);
    let end = jsontok::next_sibling_or_following(tokens, root);
    while cursor < end {
        let t = tokens.at(cursor);
        names.push(String::from_utf8(input[t.name_range()].to_vec()).unwrap());
        cursor = jsontok::next_sibling_or_following(tokens, cursor);
    }
    assert_eq!(names, vec!["name", "tags", "strict"]);
}

#[test]
fn unescape_through_public_api_decodes_surrogate_pair() {
    let input = br#""\uD83D\uDE00""#;
    let mut parser = Parser::new();
    parser.parse(input).unwrap();
    let t = parser.tokens().at(1);
    assert!(t.value_escaped);

    let mut sink = Vec::new();
    let result = unescape(input, t.value_range(), t.value_escaped, &mut sink);
    assert!(result.is_valid());
    assert_eq!(result.bytes.as_bytes(), "😀".as_bytes());
}

#[test]
fn rejects_every_jsontestsuite_style_malformation_sample() {
    let bad_inputs: &[&[u8]] = &[
        b"",
        b"[",
        b"{",
        b"[1,]",
        b"{\"a\":1,}",
        b"tru",
        b"01",
        b"-",
        b"\"\\q\"",
        b"[1 2]",
        b"{\"a\" 1}",
    ];
    for input in bad_inputs {
        let mut parser = Parser::new();
        assert!(parser.parse(input).is_err(), "expected {input:?} to be rejected");
    }
}
