use crate::matcher::match_value;
use crate::record::Requirement;
use crate::value::{lookup_or_absent, Mapping, Value};

/// Check whether a whole requirement record satisfies a permission spec.
///
/// * `_` or `true` allows regardless of fields.
/// * `false`, absent, `[]` and `{}` deny.  An empty spec never means "nothing
///   to check".
/// * A non-empty sequence is a list of alternative specs, tried in order.
/// * A mapping constrains fields: every field of `required` must match the
///   spec value under the same name, a missing entry being
///   [`Value::Absent`].
/// * Any other shape denies.
pub fn match_spec<R: Requirement + ?Sized>(required: &R, spec: &Value) -> bool {
    spec_matches(&required.fields(), spec)
}

/// [`match_spec`] over an already extracted field view.
pub(crate) fn spec_matches(fields: &Mapping, spec: &Value) -> bool {
    match spec {
        Value::Wildcard | Value::Boolean(true) => true,
        Value::Sequence(alternatives) => alternatives
            .iter()
            .any(|alternative| spec_matches(fields, alternative)),
        Value::Mapping(constraints) if !constraints.is_empty() => fields
            .iter()
            .all(|(name, value)| match_value(value, lookup_or_absent(constraints, name))),
        Value::Boolean(false)
        | Value::Absent
        | Value::Mapping(_)
        | Value::Label(_)
        | Value::Text(_)
        | Value::Number(_)
        | Value::CharSequence(_) => false,
    }
}
