use anyhow::{bail, Context, Result};
use tracing::{debug, trace};

use crate::decision::PolicyDecision;
use crate::dispatch::{admin_entry, resolve, ADMIN};
use crate::record::Requirement;
use crate::value::{Key, Mapping, Value};

/// Holds a validated tagged policy document for repeated evaluation.
///
/// [`match_tagged_policy`](crate::match_tagged_policy) accepts any document
/// and quietly ignores a malformed `admin` entry; `PolicyEngine::new`
/// rejects such documents up front so configuration mistakes surface as
/// errors instead of silent denials.
pub struct PolicyEngine {
    document: Mapping,
}

impl std::fmt::Debug for PolicyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEngine")
            .field("num_entries", &self.document.len())
            .field("has_admin", &admin_entry(&self.document).is_some())
            .finish()
    }
}

impl PolicyEngine {
    /// Create a new engine from a tagged policy document.
    ///
    /// Fails if the `admin` entry is neither `true` nor a document, or if
    /// either document names the same tag both as a label and as text.  An
    /// `admin` key inside the admin document is an ordinary tag entry.
    pub fn new(document: Mapping) -> Result<Self> {
        validate(&document)?;
        Ok(Self { document })
    }

    /// Return a reference to the underlying document.
    pub fn document(&self) -> &Mapping {
        &self.document
    }

    /// Evaluate `required` and explain the outcome.
    pub fn evaluate<R: Requirement + ?Sized>(&self, required: &R) -> PolicyDecision {
        let tag = required.tag();
        debug!(tag = %tag, "evaluating requirement against policy");

        match resolve(required, &self.document) {
            Some(grant) => {
                trace!(tag = %tag, ?grant, "requirement granted");
                PolicyDecision::allow(grant, format!("'{}' allowed by {}", tag, grant.describe()))
            }
            None => PolicyDecision::deny(format!("no policy entry permits '{}'", tag)),
        }
    }

    pub fn is_allowed<R: Requirement + ?Sized>(&self, required: &R) -> bool {
        resolve(required, &self.document).is_some()
    }
}

/// Run structural checks on a document before it is used.
fn validate(document: &Mapping) -> Result<()> {
    check_unique_tags(document)?;

    match admin_entry(document) {
        None | Some(Value::Boolean(true)) => {}
        Some(Value::Mapping(admin_doc)) => {
            check_unique_tags(admin_doc).context("invalid admin document")?;
        }
        Some(other) => bail!(
            "'{ADMIN}' entry must be true or a document of tags, found {}",
            other.kind()
        ),
    }

    Ok(())
}

/// A tag written both as a label and as text makes lookups ambiguous.
fn check_unique_tags(document: &Mapping) -> Result<()> {
    for key in document.keys() {
        if let Key::Label(name) = key {
            if document.contains_key(&Key::text(name.as_str())) {
                bail!("tag '{name}' appears both as a label and as text");
            }
        }
    }
    Ok(())
}
