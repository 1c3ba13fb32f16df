#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsontok::{Parser, TokenKind};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

/// A JSON document generator: builds a well-formed `serde_json::Value`
/// from fuzzer-supplied bytes so the structured half of this harness has
/// a known-good document to serialize and check against.
#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self(arbitrary_value(u, 0)?))
    }
}

fn arbitrary_value(u: &mut Unstructured<'_>, depth: u32) -> arbitrary::Result<Value> {
    // Cap recursion so deeply-nested fuzz inputs don't blow the stack
    // building the oracle document itself.
    let choices = if depth >= 6 { 3 } else { 21 };
    let value = match u.choose_index(choices)? {
        0 => Value::Null,
        1 => Value::Bool(u.arbitrary()?),
        2 => {
            let n: f64 = u.arbitrary()?;
            Value::Number(serde_json::Number::from_f64(n).unwrap_or_else(|| 0.into()))
        }
        3..=10 => Value::String(u.arbitrary()?),
        11..=15 => {
            let len: usize = u.int_in_range(0..=4)?;
            let mut elems = Vec::with_capacity(len);
            for _ in 0..len {
                elems.push(arbitrary_value(u, depth + 1)?);
            }
            Value::Array(elems)
        }
        16..=20 => {
            let len: usize = u.int_in_range(0..=4)?;
            let mut map = Map::new();
            for _ in 0..len {
                let key: String = u.arbitrary()?;
                map.insert(key, arbitrary_value(u, depth + 1)?);
            }
            Value::Object(map)
        }
        _ => unreachable!(),
    };
    Ok(value)
}

/// Recursively counts the number of JSON values in `v`: every scalar,
/// array, and object is exactly one token, and an object member's name
/// rides along on its value's token rather than getting one of its own.
fn value_count(v: &Value) -> usize {
    match v {
        Value::Array(items) => 1 + items.iter().map(value_count).sum::<usize>(),
        Value::Object(map) => 1 + map.values().map(value_count).sum::<usize>(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 1,
    }
}

fn fuzz(data: &[u8]) {
    // 1. Raw-byte fuzzing: the parser must never panic on arbitrary
    // bytes, whether it accepts or rejects them. On acceptance, the
    // `fuzzing` feature compiles in `TokenStore::check_invariants`,
    // so a structural invariant violation aborts the fuzz run here.
    let mut parser = Parser::new();
    let _ = parser.parse(data);

    // 2. Structured fuzzing: build a valid JSON document from the same
    // bytes and confirm jsontok accepts it, agrees with serde_json, and
    // produces exactly as many tokens as there are JSON values.
    let mut u = Unstructured::new(data);
    let Ok(ArbitraryValue(value)) = ArbitraryValue::arbitrary(&mut u) else {
        return;
    };
    let Ok(serialized) = serde_json::to_vec(&value) else {
        return;
    };

    let mut parser = Parser::new();
    let parsed = parser.parse(&serialized);
    assert!(
        parsed.is_ok(),
        "jsontok rejected a document serde_json just produced: {:?}, error: {:?}",
        String::from_utf8_lossy(&serialized),
        parsed.err(),
    );
    assert!(serde_json::from_slice::<Value>(&serialized).is_ok());
    assert_eq!(parsed.unwrap(), value_count(&value));

    let root = parser.tokens().at(1);
    let expected_kind = match &value {
        Value::Null => TokenKind::Null,
        Value::Bool(_) => TokenKind::Bool,
        Value::Number(_) => TokenKind::Number,
        Value::String(_) => TokenKind::String,
        Value::Array(_) => TokenKind::Array,
        Value::Object(_) => TokenKind::Object,
    };
    assert_eq!(root.kind, expected_kind);
}

fuzz_target!(|data: &[u8]| fuzz(data));
