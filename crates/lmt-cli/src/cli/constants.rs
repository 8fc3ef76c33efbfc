//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Tree source
pub const LMT_HASHER: &str = "LMT_HASHER";
pub const LMT_ELEMENTS: &str = "LMT_ELEMENTS";
pub const LMT_SERIAL_LEN: &str = "LMT_SERIAL_LEN";

// Proofs
pub const LMT_PROOF: &str = "LMT_PROOF";
pub const LMT_OUT: &str = "LMT_OUT";

// -------------------------
// Defaults
// -------------------------

pub const DEFAULT_HASHER: &str = "sha256";
