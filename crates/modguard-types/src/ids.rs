//! Stable identifiers for checks and issue codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_MODULES_BLOCKED: &str = "modules.blocked";
pub const CHECK_SOURCE_SYNTAX: &str = "source.syntax";

// Codes: modules.blocked
pub const CODE_NOT_ALLOWED: &str = "not_allowed";
pub const CODE_BLOCKED_MODULE: &str = "blocked_module";
pub const CODE_BLOCKED_VERSION: &str = "blocked_version";
pub const CODE_INVALID_VERSION_CONSTRAINT: &str = "invalid_version_constraint";
pub const CODE_LOCAL_REPLACE: &str = "local_replace";

// Codes: source.syntax
pub const CODE_INVALID_SYNTAX: &str = "invalid_syntax";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
