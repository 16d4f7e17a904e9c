//! Shared UI icons.
//!
//! Each icon falls back to a plain-ASCII tag on terminals without emoji support.

use console::Emoji;

// Record results
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR] ");
pub static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "[SKIP] ");

// Batch progress
pub static PAUSE: Emoji<'_, '_> = Emoji("⏸️  ", "[PAUSE] ");
pub static RESUME: Emoji<'_, '_> = Emoji("▶️  ", "[>] ");
pub static CLIPBOARD: Emoji<'_, '_> = Emoji("📋 ", "");
