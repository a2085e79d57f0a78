//! First-pass mechanic tagging from rules text.
//!
//! Tags are plain lowercase strings so evaluators can be registered for any
//! mechanic without touching this table.

use std::collections::BTreeSet;

pub const FLYING: &str = "flying";
pub const TOKEN: &str = "token";
pub const DRAW: &str = "draw";
pub const BUFF: &str = "buff";
pub const ENERGY: &str = "energy";
pub const DEBUFF: &str = "debuff";

/// Every tag `classify` can produce
pub const ALL: [&str; 6] = [FLYING, TOKEN, DRAW, BUFF, ENERGY, DEBUFF];

pub fn classify(text: &str) -> BTreeSet<String> {
    let mut mechanics = BTreeSet::new();

    // Reach counts as an answer to flyers
    if text.contains("Flying") || text.contains("Reach") {
        mechanics.insert(FLYING.to_string());
    }
    if text.contains("token") {
        mechanics.insert(TOKEN.to_string());
    }
    if text.contains("draw") {
        mechanics.insert(DRAW.to_string());
    }
    if contains_stat_change(text, '+') {
        mechanics.insert(BUFF.to_string());
    }
    if text.contains("{E}") {
        mechanics.insert(ENERGY.to_string());
    }
    if contains_stat_change(text, '-') {
        mechanics.insert(DEBUFF.to_string());
    }

    mechanics
}

/// Finds `<sign><digit>/<sign><digit>`, e.g. `+1/+1` or `-2/-2`
fn contains_stat_change(text: &str, sign: char) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(5).any(|w| {
        w[0] == sign && w[1].is_ascii_digit() && w[2] == '/' && w[3] == sign && w[4].is_ascii_digit()
    })
}
