//! Behaviour of the directive dispatch table.

use rstest::rstest;
use serde_json::{Value, json};

use super::{MergeKey, Operator, Overlay, blend};

fn blended(mut dest: Value, src: &Value) -> Value {
    blend(&mut dest, src, Operator::Default);
    dest
}

#[rstest]
#[case::number_append(json!({"n": 5}), json!({"+n": 3}), json!({"n": 8}))]
#[case::number_remove(json!({"n": 5}), json!({"-n": 3}), json!({"n": 2}))]
#[case::float_append(json!({"n": 1.5}), json!({"+n": 1}), json!({"n": 2.5}))]
#[case::float_append_integral(json!({"n": 1.5}), json!({"+n": 1.5}), json!({"n": 3}))]
#[case::float_remove_integral(json!({"n": 2.5}), json!({"-n": 0.5}), json!({"n": 2}))]
#[case::string_append(json!({"tag": "a"}), json!({"+tag": "b"}), json!({"tag": "a b"}))]
#[case::string_remove(json!({"tag": "a b"}), json!({"-tag": "b"}), json!({"tag": "a "}))]
#[case::string_remove_first_only(
    json!({"tag": "x-y-x"}),
    json!({"-tag": "x"}),
    json!({"tag": "-y-x"})
)]
#[case::string_remove_equal_deletes(json!({"tag": "a", "k": 1}), json!({"-tag": "a"}), json!({"k": 1}))]
#[case::string_remove_absent_keeps(json!({"tag": "abc"}), json!({"-tag": "z"}), json!({"tag": "abc"}))]
#[case::string_append_number(json!({"tag": "v"}), json!({"+tag": 2}), json!({"tag": "v 2"}))]
#[case::string_replace(json!({"tag": "a"}), json!({"=tag": "b"}), json!({"tag": "b"}))]
#[case::string_default(json!({"tag": "a"}), json!({"tag": "b"}), json!({"tag": "b"}))]
#[case::sequence_append_dedup(
    json!({"xs": [1, 2]}),
    json!({"+xs": [2, 3, 3]}),
    json!({"xs": [1, 2, 3]})
)]
#[case::sequence_append_single(json!({"xs": [1]}), json!({"+xs": 1}), json!({"xs": [1, 1]}))]
#[case::sequence_remove_many(
    json!({"xs": [1, 2, 1, 3]}),
    json!({"-xs": [1, 3]}),
    json!({"xs": [2, 1]})
)]
#[case::sequence_remove_single(json!({"xs": ["a", "b"]}), json!({"-xs": "a"}), json!({"xs": ["b"]}))]
#[case::sequence_replace(json!({"xs": [1, 2]}), json!({"xs": [9]}), json!({"xs": [9]}))]
#[case::mapping_append_recurses(
    json!({"db": {"host": "a", "port": 1}}),
    json!({"+db": {"port": 2, "user": "u"}}),
    json!({"db": {"host": "a", "port": 3, "user": "u"}})
)]
#[case::mapping_append_scalar_ignored(json!({"db": {"a": 1}}), json!({"+db": 7}), json!({"db": {"a": 1}}))]
#[case::mapping_remove_deletes(json!({"db": {"a": 1}, "k": 0}), json!({"-db": {}}), json!({"k": 0}))]
#[case::mapping_default_replaces(
    json!({"db": {"host": "a", "port": 1}}),
    json!({"db": {"host": "b"}}),
    json!({"db": {"host": "b"}})
)]
#[case::bool_append_overwrites(json!({"on": false}), json!({"+on": true}), json!({"on": true}))]
#[case::bool_remove_deletes(json!({"on": true, "k": 0}), json!({"-on": true}), json!({"k": 0}))]
#[case::null_remove_deletes(json!({"n": null}), json!({"-n": 1}), json!({}))]
#[case::number_append_string_joins(json!({"n": 5}), json!({"+n": "x"}), json!({"n": "5x"}))]
#[case::number_append_bool_replaces(json!({"n": 5}), json!({"+n": true}), json!({"n": true}))]
#[case::number_remove_string_keeps(json!({"n": 5}), json!({"-n": "x"}), json!({"n": 5}))]
#[case::number_remove_sequence_keeps(json!({"n": 5}), json!({"-n": [5]}), json!({"n": 5}))]
#[case::missing_remove_skips(json!({}), json!({"-gone": 1}), json!({}))]
#[case::missing_append_inserts(json!({}), json!({"+xs": [1]}), json!({"xs": [1]}))]
fn dispatch_table(#[case] dest: Value, #[case] src: Value, #[case] expected: Value) {
    assert_eq!(blended(dest, &src), expected);
}

#[test]
fn skip_if_present_never_overwrites() {
    let dest = json!({"k": {"nested": [1]}});
    for incoming in [json!(null), json!(5), json!({"other": true}), json!([2])] {
        let out = blended(dest.clone(), &json!({"?k": incoming}));
        assert_eq!(out, dest);
    }
}

#[test]
fn skip_if_present_inserts_missing_keys() {
    assert_eq!(blended(json!({}), &json!({"?k": 1})), json!({"k": 1}));
}

#[rstest]
#[case(json!("s"))]
#[case(json!(3))]
#[case(json!(true))]
fn replace_is_idempotent(#[case] scalar: Value) {
    let src = json!({"=k": scalar});
    let once = blended(json!({"k": "original"}), &src);
    let twice = blended(once.clone(), &src);
    assert_eq!(once.get("k"), twice.get("k"));
}

#[test]
fn remove_undoes_append_on_sets() {
    let start = json!({"xs": ["a", "b"]});
    let appended = blended(start.clone(), &json!({"+xs": ["c", "d"]}));
    assert_eq!(appended, json!({"xs": ["a", "b", "c", "d"]}));
    assert_eq!(blended(appended, &json!({"-xs": ["c", "d"]})), start);
}

#[test]
fn merged_output_does_not_alias_source() {
    let mut src = json!({"db": {"hosts": ["a"], "opts": {"tls": true}}});
    let dest = blended(json!({}), &src);
    if let Some(hosts) = src.pointer_mut("/db/hosts") {
        *hosts = json!(["mutated"]);
    }
    if let Some(tls) = src.pointer_mut("/db/opts/tls") {
        *tls = json!(false);
    }
    assert_eq!(dest, json!({"db": {"hosts": ["a"], "opts": {"tls": true}}}));
}

#[test]
fn source_is_not_mutated() {
    let src = json!({"+xs": [3], "-n": 1, "db": {"+x": 1}});
    let snapshot = src.clone();
    let _ = blended(json!({"xs": [1], "n": 2}), &src);
    assert_eq!(src, snapshot);
}

#[rstest]
#[case(json!([1, 2]))]
#[case(json!("scalar"))]
#[case(json!(null))]
fn non_mapping_destination_is_untouched(#[case] dest: Value) {
    assert_eq!(blended(dest.clone(), &json!({"k": 1})), dest);
}

#[rstest]
#[case(json!(null))]
#[case(json!(""))]
#[case(json!(false))]
#[case(json!([["k", 1]]))]
fn non_mapping_source_is_a_no_op(#[case] src: Value) {
    assert_eq!(blended(json!({"k": 0}), &src), json!({"k": 0}));
}

#[test]
fn inserted_mappings_are_directive_free() {
    let out = blended(json!({}), &json!({"db": {"+hosts": ["a"], "-gone": 1, "=port": 5}}));
    assert_eq!(out, json!({"db": {"hosts": ["a"], "port": 5}}));
}

#[test]
fn profiles_table_keeps_directive_keys() {
    let profiles = json!({"dev": {"+tags": ["debug"], "-gone": 1, "=port": 5}});
    let out = blended(json!({}), &json!({"profiles": profiles.clone()}));
    assert_eq!(out, json!({"profiles": profiles}));
}

#[test]
fn nested_profiles_table_keeps_directive_keys() {
    let out = blended(json!({}), &json!({"app": {"+xs": [1], "profiles": {"qa": {"+xs": [2]}}}}));
    assert_eq!(out, json!({"app": {"xs": [1], "profiles": {"qa": {"+xs": [2]}}}}));
}

#[test]
fn appended_profiles_merge_by_raw_key() {
    let dest = json!({"profiles": {"dev": {"+a": [1]}}});
    let src = json!({"+profiles": {"dev": {"-c": true}, "prod": {"=b": 2}}});
    assert_eq!(
        blended(dest, &src),
        json!({"profiles": {"dev": {"+a": [1], "-c": true}, "prod": {"=b": 2}}})
    );
}

#[test]
fn replaced_profiles_table_keeps_directive_keys() {
    let dest = json!({"profiles": {"dev": {"a": 1}}});
    let out = blended(dest, &json!({"profiles": {"prod": {"+b": [2]}}}));
    assert_eq!(out, json!({"profiles": {"prod": {"+b": [2]}}}));
}

#[test]
fn ambient_append_reaches_nested_keys() {
    let mut dest = json!({"db": {"port": 10, "name": "a"}});
    blend(&mut dest, &json!({"db": {"port": 1, "=name": "b"}}), Operator::Append);
    assert_eq!(dest, json!({"db": {"port": 11, "name": "b"}}));
}

#[test]
fn integer_overflow_falls_back_to_float() {
    let out = blended(json!({"n": i64::MAX}), &json!({"+n": 1}));
    let n = out.get("n").and_then(Value::as_f64).unwrap_or_default();
    assert!(n > 9.2e18, "expected float result, got {out}");
}

#[test]
fn deletion_preserves_remaining_order() {
    let out = blended(json!({"a": 1, "b": true, "c": 3}), &json!({"-b": true}));
    let keys: Vec<_> = out
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    assert_eq!(keys, ["a", "c"]);
}

#[test]
fn entries_apply_in_source_order() {
    let mut overlay = Overlay::default();
    overlay.push(MergeKey::new("xs", Operator::Replace), json!([1]));
    overlay.push(MergeKey::new("xs", Operator::Append), json!([2]));
    let mut dest = json!({"xs": [0]});
    super::blend_overlay(&mut dest, &overlay, Operator::Default);
    assert_eq!(dest, json!({"xs": [1, 2]}));
}
