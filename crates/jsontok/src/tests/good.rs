//! Inputs that must parse successfully, named after the JSONTestSuite
//! identifier convention (`y_*` well-formed, `i_*`
//! implementation-defined-but-accepted).

use rstest::rstest;

use crate::Parser;

#[rstest]
#[case::y_array_empty(b"[]".as_slice())]
#[case::y_array_empty_with_whitespace(b"[  ]".as_slice())]
#[case::y_array_booleans(b"[true, false, null]".as_slice())]
#[case::y_array_heterogeneous(b"[1, 2.5, \"three\", [4], {\"five\":5}]".as_slice())]
#[case::y_object_empty(b"{}".as_slice())]
#[case::y_object_basic(b"{\"a\":1}".as_slice())]
#[case::y_object_duplicate_keys(b"{\"a\":1,\"a\":2}".as_slice())]
#[case::y_string_escaped_chars(br#""\"\\\/\b\f\n\r\t""#.as_slice())]
#[case::y_string_unicode_escape(br#""Aé""#.as_slice())]
#[case::y_string_nonascii_bytes(b"\"caf\xc3\xa9\"".as_slice())]
#[case::y_number_zero(b"0".as_slice())]
#[case::y_number_negative_zero(b"-0".as_slice())]
#[case::y_number_negative(b"-42".as_slice())]
#[case::y_number_fraction(b"3.1415".as_slice())]
#[case::y_number_exponent(b"1e10".as_slice())]
#[case::y_number_exponent_signed(b"1.5E-10".as_slice())]
#[case::y_structure_nested(b"[[[[[[[[1]]]]]]]]".as_slice())]
#[case::y_structure_trailing_whitespace(b"  {\"a\":1}  \n".as_slice())]
#[case::i_number_huge_exponent(
    b"0.4e00669999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999969999999006"
        .as_slice()
)]
#[case::i_structure_utf8_bom(b"\xEF\xBB\xBF{}".as_slice())]
fn accepts(#[case] input: &[u8]) {
    let mut parser = Parser::new();
    let result = parser.parse(input);
    assert!(result.is_ok(), "expected {input:?} to parse, got {result:?}");
}

#[rstest]
#[case::array_vs_serde(b"[1,2,3]".as_slice())]
#[case::object_vs_serde(br#"{"a":1,"b":[true,null]}"#.as_slice())]
#[case::nested_vs_serde(br#"{"a":{"b":{"c":[1,2,[3,4]]}}}"#.as_slice())]
fn agrees_with_serde_json_oracle_on_acceptance(#[case] input: &[u8]) {
    let mut parser = Parser::new();
    assert!(parser.parse(input).is_ok());
    assert!(serde_json::from_slice::<serde_json::Value>(input).is_ok());
}
