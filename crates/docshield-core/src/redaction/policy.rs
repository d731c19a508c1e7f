//! Policy tables: which fields to drop, and when.
//!
//! A [`PolicyMap`] is an ordered list of entries. Each entry names the
//! capability that lets an actor keep some fields, or [`Requirement::Always`]
//! when the fields are never shown to anyone.
//!
//! Entries only ever remove fields, so the outcome does not depend on entry
//! order. An entry kind that re-adds or rewrites fields would break that and
//! must not be introduced without revisiting [`PolicyMap::fields_to_remove`].

use crate::actor::Actor;

/// Capability string meaning "no capability lifts this entry".
pub const ALWAYS: &str = "";

/// Condition under which an entry's fields are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Removed for every actor.
    Always,
    /// Removed unless the actor holds this capability.
    Capability(String),
}

impl Requirement {
    /// Parses the capability column of a policy table; `""` is the always sentinel.
    pub fn parse(raw: &str) -> Self {
        if raw == ALWAYS {
            Requirement::Always
        } else {
            Requirement::Capability(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Requirement::Always => ALWAYS,
            Requirement::Capability(c) => c,
        }
    }

    /// True when the entry's fields must be stripped for `actor`.
    pub fn applies_to<A: Actor + ?Sized>(&self, actor: &A) -> bool {
        match self {
            Requirement::Always => true,
            Requirement::Capability(c) => !actor.has_capability(c),
        }
    }
}

/// One row of a policy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEntry {
    pub requirement: Requirement,
    pub fields: Vec<String>,
}

/// Ordered table of redaction entries for one entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyMap {
    entries: Vec<PolicyEntry>,
}

impl PolicyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry that strips `fields` for everyone.
    #[must_use]
    pub fn always<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry(Requirement::Always, fields)
    }

    /// Adds an entry that strips `fields` unless the actor holds `capability`.
    #[must_use]
    pub fn unless<I, S>(self, capability: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry(Requirement::parse(capability), fields)
    }

    #[must_use]
    pub fn entry<I, S>(mut self, requirement: Requirement, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push(PolicyEntry {
            requirement,
            fields: fields.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fields to strip for `actor`, in table order, without duplicates.
    ///
    /// Capability queries happen once per call, not once per document.
    pub fn fields_to_remove<A: Actor + ?Sized>(&self, actor: &A) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in &self.entries {
            if !e.requirement.applies_to(actor) {
                continue;
            }
            for f in &e.fields {
                if !out.contains(&f.as_str()) {
                    out.push(f);
                }
            }
        }
        out
    }
}
