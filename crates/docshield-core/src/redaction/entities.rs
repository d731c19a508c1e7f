//! Fixed redaction tables per stored entity type.

use std::sync::OnceLock;

use crate::actor::Actor;
use crate::capabilities::{MANAGE_USERS, SEE_LOGS};

use super::engine::Redact;
use super::policy::PolicyMap;

/// Entity types with a redaction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    File,
    Module,
    Repository,
    Analysis,
}

impl Entity {
    pub const ALL: [Entity; 5] = [
        Entity::User,
        Entity::File,
        Entity::Module,
        Entity::Repository,
        Entity::Analysis,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Entity::User => "user",
            Entity::File => "file",
            Entity::Module => "module",
            Entity::Repository => "repository",
            Entity::Analysis => "analysis",
        }
    }

    /// Storage collection holding this entity.
    pub fn collection(self) -> &'static str {
        match self {
            Entity::User => "users",
            Entity::File => "files",
            Entity::Module => "modules",
            Entity::Repository => "repositories",
            Entity::Analysis => "analyses",
        }
    }

    /// The table applied to documents of this entity.
    pub fn policy(self) -> &'static PolicyMap {
        static USER: OnceLock<PolicyMap> = OnceLock::new();
        static FILE: OnceLock<PolicyMap> = OnceLock::new();
        static MODULE: OnceLock<PolicyMap> = OnceLock::new();
        static REPOSITORY: OnceLock<PolicyMap> = OnceLock::new();
        static ANALYSIS: OnceLock<PolicyMap> = OnceLock::new();

        match self {
            Entity::User => USER.get_or_init(|| {
                PolicyMap::new().always(["auth_token", "pwd_hash"]).unless(
                    MANAGE_USERS,
                    ["api_key", "default_sharing", "groups", "permissions"],
                )
            }),
            Entity::File => FILE.get_or_init(|| PolicyMap::new().always(["filepath"])),
            Entity::Module => MODULE.get_or_init(|| PolicyMap::new().always(["diffs"])),
            Entity::Repository => REPOSITORY.get_or_init(|| PolicyMap::new().always(["ssh_cmd"])),
            Entity::Analysis => ANALYSIS.get_or_init(|| PolicyMap::new().unless(SEE_LOGS, ["logs"])),
        }
    }

    pub fn clean<T: Redact, A: Actor + ?Sized>(self, documents: T, actor: &A) -> T {
        tracing::trace!(entity = self.as_str(), "applying entity policy");
        documents.redact(self.policy(), actor)
    }
}

pub fn clean_users<T: Redact, A: Actor + ?Sized>(documents: T, actor: &A) -> T {
    Entity::User.clean(documents, actor)
}

pub fn clean_files<T: Redact, A: Actor + ?Sized>(documents: T, actor: &A) -> T {
    Entity::File.clean(documents, actor)
}

pub fn clean_modules<T: Redact, A: Actor + ?Sized>(documents: T, actor: &A) -> T {
    Entity::Module.clean(documents, actor)
}

pub fn clean_repositories<T: Redact, A: Actor + ?Sized>(documents: T, actor: &A) -> T {
    Entity::Repository.clean(documents, actor)
}

pub fn clean_analyses<T: Redact, A: Actor + ?Sized>(documents: T, actor: &A) -> T {
    Entity::Analysis.clean(documents, actor)
}
