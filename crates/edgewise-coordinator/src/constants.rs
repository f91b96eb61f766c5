//! Shared tuning constants for the inset coordinator.

/// Maximum number of parent hops the ownership walk will follow.
///
/// Real container hierarchies stay well under this depth; the bound exists
/// to keep malformed or cyclic parent chains from hanging the walk. When
/// the bound is exceeded the walk reports "no claiming ancestor", so the
/// node absorbs the edge itself. That fail-open choice can double-pad a
/// pathological tree but never leaves content under system chrome.
pub const MAX_ANCESTOR_HOPS: usize = 15;

/// Initial slot capacity of the node registry.
///
/// Typical windows register a handful of inset-aware containers; 16 slots
/// cover the common case without reallocation.
pub const INITIAL_REGISTRY_CAPACITY: usize = 16;
