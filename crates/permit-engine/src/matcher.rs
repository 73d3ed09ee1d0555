use crate::value::{lookup_or_absent, Value, ANY, MANY};

/// Check whether a single `required` value is satisfied by a `permission`.
///
/// Rules are tried in order and the first that applies decides:
///
/// * A wildcard (or the text `"_"`) on either side matches.
/// * Structurally equal values match.  Numbers and char sequences compare
///   type-strictly, so `1` never matches `1.0` and `'abc'` never matches
///   `"abc"`.
/// * `[any]` and `[]` deny.
/// * A required label matches a permission text with the same content.  The
///   reverse direction does not.
/// * `[any, a, b, ...]` matches if `required` matches any alternative, tried
///   left to right.
/// * `[many, a, b, ...]` matches if every element of `required` (a scalar is
///   treated as a one-element sequence) matches at least one alternative.
/// * Plain sequences of equal length match positionally.
/// * Mappings match if every key of `required` matches the permission value
///   under the same key (label/text equivalent), absent keys being
///   [`Value::Absent`].
///
/// Everything else is a non-match.
pub fn match_value(required: &Value, permission: &Value) -> bool {
    if required.is_wildcard() || permission.is_wildcard() {
        return true;
    }
    if required == permission {
        return true;
    }

    match (required, permission) {
        (_, Value::Sequence(perms)) if is_degenerate_alternation(perms) => false,
        (Value::Label(label), Value::Text(text)) => label == text,
        (_, Value::Sequence(perms)) => match split_combinator(perms) {
            Some((Combinator::Any, alternatives)) => alternatives
                .iter()
                .any(|alternative| match_value(required, alternative)),
            Some((Combinator::Many, alternatives)) => match_many(required, alternatives),
            None => match required {
                Value::Sequence(items) => {
                    items.len() == perms.len()
                        && items.iter().zip(perms).all(|(r, p)| match_value(r, p))
                }
                _ => false,
            },
        },
        (Value::Mapping(entries), Value::Mapping(permitted)) => entries
            .iter()
            .all(|(key, value)| match_value(value, lookup_or_absent(permitted, key))),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Any,
    Many,
}

/// `[]` and `[any]`: alternation with nothing to alternate over.
fn is_degenerate_alternation(perms: &[Value]) -> bool {
    match perms {
        [] => true,
        [Value::Label(marker)] => marker == ANY,
        _ => false,
    }
}

/// Split a marker-headed sequence into its combinator and the alternatives.
/// The marker may be written as a label or as text.
fn split_combinator(perms: &[Value]) -> Option<(Combinator, &[Value])> {
    let (head, rest) = perms.split_first()?;
    match head.as_symbol()? {
        ANY => Some((Combinator::Any, rest)),
        MANY => Some((Combinator::Many, rest)),
        _ => None,
    }
}

fn match_many(required: &Value, alternatives: &[Value]) -> bool {
    let any_alternative =
        |item: &Value| alternatives.iter().any(|alternative| match_value(item, alternative));
    match required {
        Value::Sequence(items) => items.iter().all(any_alternative),
        scalar => any_alternative(scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Key, Mapping};

    fn label(s: &str) -> Value {
        Value::label(s)
    }

    fn map(pairs: &[(&str, Value)]) -> Value {
        pairs
            .iter()
            .map(|(k, v)| (Key::label(*k), v.clone()))
            .collect::<Mapping>()
            .into()
    }

    // ---- wildcards ----

    #[test]
    fn wildcard_required_matches_anything() {
        assert!(match_value(&Value::Wildcard, &label("show")));
        assert!(match_value(&Value::Wildcard, &Value::Absent));
        assert!(match_value(&Value::Wildcard, &Value::Sequence(vec![])));
        assert!(match_value(&Value::text("_"), &Value::from(42)));
    }

    #[test]
    fn wildcard_permission_matches_anything() {
        assert!(match_value(&label("show"), &Value::Wildcard));
        assert!(match_value(&Value::Absent, &Value::text("_")));
        assert!(match_value(&map(&[("a", Value::from(1))]), &Value::Wildcard));
    }

    #[test]
    fn absent_is_not_a_wildcard() {
        assert!(match_value(&Value::Absent, &Value::Absent));
        assert!(!match_value(&label("show"), &Value::Absent));
        assert!(!match_value(&Value::Absent, &label("show")));
    }

    // ---- equality ----

    #[test]
    fn leaf_values_match_themselves() {
        for v in [
            Value::Boolean(true),
            Value::Boolean(false),
            label("show"),
            Value::text("show"),
            Value::from(1),
            Value::from(2.5),
            Value::chars("test"),
        ] {
            assert!(match_value(&v, &v), "{v:?} should match itself");
        }
    }

    #[test]
    fn numbers_are_type_strict() {
        assert!(!match_value(&Value::from(1), &Value::from(1.0)));
        assert!(!match_value(&Value::from(1.0), &Value::from(1)));
    }

    #[test]
    fn char_sequence_never_matches_text() {
        assert!(!match_value(&Value::chars("test"), &Value::text("test")));
        assert!(!match_value(&Value::text("test"), &Value::chars("test")));
    }

    #[test]
    fn boolean_true_is_not_a_field_wildcard() {
        assert!(!match_value(&label("show"), &Value::Boolean(true)));
    }

    // ---- label / text ----

    #[test]
    fn required_label_matches_permission_text() {
        assert!(match_value(&label("show"), &Value::text("show")));
        assert!(!match_value(&label("show"), &Value::text("edit")));
    }

    #[test]
    fn required_text_does_not_match_permission_label() {
        assert!(!match_value(&Value::text("show"), &label("show")));
    }

    // ---- any ----

    #[test]
    fn any_matches_one_of_the_alternatives() {
        let perm = Value::any_of([label("edit"), label("show")]);
        assert!(match_value(&label("show"), &perm));

        let perm = Value::any_of([label("edit"), label("otherwise")]);
        assert!(!match_value(&label("show"), &perm));
    }

    #[test]
    fn degenerate_alternations_deny() {
        assert!(!match_value(&label("show"), &Value::any_of([])));
        assert!(!match_value(&label("show"), &Value::Sequence(vec![])));
        assert!(!match_value(&label("any"), &Value::Sequence(vec![Value::text("any")])));
    }

    #[test]
    fn empty_sequences_are_equal() {
        assert!(match_value(&Value::Sequence(vec![]), &Value::Sequence(vec![])));
    }

    #[test]
    fn bare_any_matches_itself() {
        assert!(match_value(&Value::any_of([]), &Value::any_of([])));
    }

    #[test]
    fn text_any_marker_is_accepted() {
        let perm = Value::Sequence(vec![Value::text("any"), Value::text("show")]);
        assert!(match_value(&label("show"), &perm));
    }

    #[test]
    fn any_alternatives_may_nest() {
        let perm = Value::any_of([
            label("edit"),
            Value::any_of([label("index"), label("show")]),
        ]);
        assert!(match_value(&label("show"), &perm));
        assert!(!match_value(&label("delete"), &perm));
    }

    #[test]
    fn any_alternatives_may_be_wildcards() {
        let perm = Value::any_of([label("edit"), Value::Wildcard]);
        assert!(match_value(&label("delete"), &perm));
    }

    // ---- many ----

    #[test]
    fn many_requires_every_element_to_match() {
        let perm = Value::many_of([label("read"), label("write")]);
        assert!(match_value(
            &Value::Sequence(vec![label("read"), label("write")]),
            &perm
        ));
        assert!(match_value(&Value::Sequence(vec![label("read")]), &perm));
        assert!(!match_value(
            &Value::Sequence(vec![label("read"), label("delete")]),
            &perm
        ));
    }

    #[test]
    fn many_wraps_scalar_requirement() {
        let perm = Value::Sequence(vec![Value::text("many"), label("read"), label("write")]);
        assert!(match_value(&label("write"), &perm));
        assert!(!match_value(&label("delete"), &perm));
    }

    #[test]
    fn many_elements_may_use_nested_alternation() {
        let perm = Value::many_of([Value::any_of([label("a"), label("b")]), label("c")]);
        assert!(match_value(
            &Value::Sequence(vec![label("b"), label("c"), label("a")]),
            &perm
        ));
    }

    #[test]
    fn many_without_alternatives_denies_non_empty_requirement() {
        let perm = Value::many_of([]);
        assert!(!match_value(&label("read"), &perm));
        assert!(!match_value(&Value::Sequence(vec![label("read")]), &perm));
    }

    // ---- positional sequences ----

    #[test]
    fn sequences_match_positionally() {
        let req = Value::Sequence(vec![label("a"), Value::from(1)]);
        assert!(match_value(
            &req,
            &Value::Sequence(vec![label("a"), Value::Wildcard])
        ));
        assert!(!match_value(
            &req,
            &Value::Sequence(vec![Value::from(1), label("a")])
        ));
    }

    #[test]
    fn sequences_of_different_length_do_not_match() {
        let req = Value::Sequence(vec![label("a")]);
        assert!(!match_value(
            &req,
            &Value::Sequence(vec![label("a"), label("b")])
        ));
    }

    #[test]
    fn scalar_does_not_match_plain_sequence() {
        assert!(!match_value(&label("a"), &Value::Sequence(vec![label("a")])));
    }

    // ---- mappings ----

    #[test]
    fn mapping_matches_per_key() {
        let req = map(&[("kind", label("post")), ("id", Value::from(3))]);
        let perm = map(&[("kind", Value::text("post")), ("id", Value::Wildcard)]);
        assert!(match_value(&req, &perm));
    }

    #[test]
    fn mapping_missing_key_denies() {
        let req = map(&[("kind", label("post")), ("id", Value::from(3))]);
        let perm = map(&[("kind", label("post"))]);
        assert!(!match_value(&req, &perm));
    }

    #[test]
    fn mapping_lookup_uses_key_equivalence() {
        let req = map(&[("kind", label("post"))]);
        let mut permitted = Mapping::new();
        permitted.insert(Key::text("kind"), label("post"));
        assert!(match_value(&req, &Value::Mapping(permitted)));
    }

    #[test]
    fn permission_may_carry_extra_keys() {
        let req = map(&[("kind", label("post"))]);
        let perm = map(&[("kind", label("post")), ("owner", label("me"))]);
        assert!(match_value(&req, &perm));
    }

    // ---- fallthrough ----

    #[test]
    fn unmatched_shapes_deny() {
        assert!(!match_value(&Value::from(1), &label("one")));
        assert!(!match_value(&map(&[]), &Value::Sequence(vec![label("x")])));
        assert!(!match_value(&Value::Boolean(true), &Value::Boolean(false)));
    }
}
