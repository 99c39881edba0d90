//! XP rank ladder.
//!
//! Ranks are a static ascending ladder. The current rank is the highest
//! rank whose threshold does not exceed the XP total; it is always
//! recomputed from XP, never tracked separately.

use serde::Serialize;

/// Rank definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub level: u32,
    pub title: &'static str,
    pub glyph: &'static str,
    pub min_xp: u32,
}

/// All ranks (must be sorted by `min_xp`, first threshold 0).
pub static RANKS: &[Rank] = &[
    Rank {
        level: 1,
        title: "Working Holiday Dreamer",
        glyph: "🥚",
        min_xp: 0,
    },
    Rank {
        level: 2,
        title: "Preparer",
        glyph: "🐣",
        min_xp: 30,
    },
    Rank {
        level: 3,
        title: "Applicant",
        glyph: "🐥",
        min_xp: 80,
    },
    Rank {
        level: 4,
        title: "Holidaymaker-to-be",
        glyph: "🐤",
        min_xp: 140,
    },
    Rank {
        level: 5,
        title: "Working Holiday Master",
        glyph: "🦅",
        min_xp: 190,
    },
];

/// Current rank for an XP total.
pub fn rank_for_xp(xp: u32) -> &'static Rank {
    RANKS
        .iter()
        .rev()
        .find(|r| r.min_xp <= xp)
        .unwrap_or(&RANKS[0])
}

/// The rank immediately above `rank`, or `None` at the top of the ladder.
pub fn next_rank(rank: &Rank) -> Option<&'static Rank> {
    let idx = RANKS.iter().position(|r| r.level == rank.level)?;
    RANKS.get(idx + 1)
}

/// XP still needed to reach the next rank; 0 at the top.
pub fn xp_to_next_rank(xp: u32) -> u32 {
    next_rank(rank_for_xp(xp))
        .map(|next| next.min_xp.saturating_sub(xp))
        .unwrap_or(0)
}

/// Progress through the current rank band, 0..=100.
///
/// 100 at the top of the ladder and for zero-width bands.
pub fn xp_progress(xp: u32) -> u8 {
    let current = rank_for_xp(xp);
    let Some(next) = next_rank(current) else {
        return 100;
    };
    let range = next.min_xp.saturating_sub(current.min_xp);
    if range == 0 {
        return 100;
    }
    crate::rules::percentage((xp - current.min_xp) as usize, range as usize)
}
