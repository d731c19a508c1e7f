//! Capability names checked by the built-in policies and routes.

/// Lets an actor list users and see their account settings.
pub const MANAGE_USERS: &str = "manage_users";

/// Lets an actor read analysis logs.
pub const SEE_LOGS: &str = "see_logs";

/// Lets an actor post comments on files.
pub const ADD_COMMENTS: &str = "add_comments";

/// Lets an actor inspect installed modules and their repositories.
pub const MANAGE_MODULES: &str = "manage_modules";
