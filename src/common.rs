//! Common functionality and types.

use console::Emoji;

pub static STARTING: Emoji<'_, '_> = Emoji("📦", "");
pub static SUCCESS: Emoji<'_, '_> = Emoji("✅", "");
pub static SERVER: Emoji<'_, '_> = Emoji("📡", "");
