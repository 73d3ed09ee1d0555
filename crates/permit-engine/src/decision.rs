use serde::Serialize;

/// The outcome of evaluating a requirement against a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyDecision {
    /// The resolved action to take.
    pub action: ResolvedAction,
    /// The policy channel that granted access, if any.
    pub granted_by: Option<Grant>,
    /// Human-readable reason explaining the decision.
    pub reason: String,
}

/// The action the caller should take after policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedAction {
    Allow,
    Deny,
}

/// Which part of a tagged policy document granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grant {
    /// `admin: true`.
    AdminOverride,
    /// The requirement's tag entry inside the admin document.
    AdminEntry,
    /// The requirement's tag entry in the document itself.
    TagEntry,
}

impl Grant {
    pub fn describe(&self) -> &'static str {
        match self {
            Grant::AdminOverride => "admin override",
            Grant::AdminEntry => "admin policy entry",
            Grant::TagEntry => "policy entry",
        }
    }
}

impl PolicyDecision {
    pub fn allow(grant: Grant, reason: impl Into<String>) -> Self {
        Self {
            action: ResolvedAction::Allow,
            granted_by: Some(grant),
            reason: reason.into(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            action: ResolvedAction::Deny,
            granted_by: None,
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.action == ResolvedAction::Allow
    }
}
