use tracing::trace;

use crate::aggregate::spec_matches;
use crate::decision::Grant;
use crate::record::Requirement;
use crate::value::{lookup, lookup_or_absent, Key, Mapping, Value, ABSENT};

/// Reserved document key carrying the administrative override.
pub const ADMIN: &str = "admin";

/// Check whether `required` is permitted by a tagged policy document.
///
/// The document maps requirement tags (as labels or text) to permission
/// specs.  An optional `admin` entry is consulted first: `admin: true` allows
/// everything, and an admin document is tried before the ordinary entry.  A
/// failed admin check falls through; it never denies on its own.
pub fn match_tagged_policy<R: Requirement + ?Sized>(required: &R, doc: &Mapping) -> bool {
    resolve(required, doc).is_some()
}

/// Like [`match_tagged_policy`], but reports which channel granted access.
pub fn resolve<R: Requirement + ?Sized>(required: &R, doc: &Mapping) -> Option<Grant> {
    let tag = required.tag();
    let fields = required.fields();

    match admin_entry(doc) {
        Some(Value::Boolean(true)) => return Some(Grant::AdminOverride),
        Some(Value::Mapping(admin_doc)) => {
            if spec_matches(&fields, lookup_or_absent(admin_doc, &tag)) {
                return Some(Grant::AdminEntry);
            }
        }
        Some(other) => trace!(kind = other.kind(), "ignoring malformed admin entry"),
        None => {}
    }

    spec_matches(&fields, tag_entry(doc, &tag)).then_some(Grant::TagEntry)
}

/// The document's `admin` entry, written as a label or as text.
pub(crate) fn admin_entry(doc: &Mapping) -> Option<&Value> {
    lookup(doc, &Key::label(ADMIN))
}

/// Spec registered for `tag` in the document itself.  A tag named `admin`
/// never resolves to the reserved entry.
fn tag_entry<'a>(doc: &'a Mapping, tag: &Key) -> &'a Value {
    if tag.as_str() == ADMIN {
        return &ABSENT;
    }
    lookup_or_absent(doc, tag)
}
