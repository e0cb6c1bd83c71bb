//! Analysis engine - pure, deterministic views over a reconciled member list
//!
//! No I/O happens here. The input is a member list already enriched with the
//! locally owned `is_exited` flag; the output is grouped/sorted views plus
//! aggregate counts taken from the remote snapshot (authoritative over any
//! locally derived count, even when exited-filtering makes them diverge).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ExternalCharacter, Guild, GuildMember};

/// Default level threshold for the above/below partition
pub const LEVEL_THRESHOLD: i32 = 400;

/// Vocation tiers collapsed to their base class
///
/// Vocations not listed map to themselves.
const VOCATION_TIERS: &[(&str, &[&str])] = &[
    ("Druid", &["Druid", "Elder Druid"]),
    ("Knight", &["Knight", "Elite Knight"]),
    ("Sorcerer", &["Sorcerer", "Master Sorcerer"]),
    ("Paladin", &["Paladin", "Royal Paladin"]),
    ("Monk", &["Monk", "Exalted Monk"]),
];

/// Map a vocation to its canonical base class
pub fn collapse_vocation(vocation: &str) -> &str {
    for (base, tiers) in VOCATION_TIERS {
        if tiers.contains(&vocation) {
            return base;
        }
    }
    vocation
}

/// One vocation bucket, in first-seen insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocationGroup {
    pub vocation: String,
    pub members: Vec<GuildMember>,
}

/// Partition of members around a level threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSplit {
    pub above: Vec<GuildMember>,
    pub below: Vec<GuildMember>,
}

/// Aggregate counts, sourced from the remote snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildInfo {
    pub name: String,
    pub online: i32,
    pub offline: i32,
    pub total: i32,
}

/// Full derived analysis of one guild snapshot
///
/// Active members (online, not exited) and exited-but-online members are
/// reported as separate buckets, each with vocation groups, level partitions
/// and a level-sorted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildAnalysis {
    pub info: GuildInfo,
    pub vocations: Vec<VocationGroup>,
    pub exited_vocations: Vec<VocationGroup>,
    pub by_level: LevelSplit,
    pub exited_by_level: LevelSplit,
    pub sorted: Vec<GuildMember>,
    pub exited_sorted: Vec<GuildMember>,
    pub generated_at: DateTime<Utc>,
}

/// Keep only members that are online and not exited
pub fn filter_online(members: &[GuildMember]) -> Vec<GuildMember> {
    members.iter().filter(|m| m.is_active()).cloned().collect()
}

/// Group members by vocation, preserving first-seen group order
///
/// With `collapse_tiers` the promoted vocation names fold into their base
/// class; without it, grouping is by the literal vocation string.
pub fn group_by_vocation(members: &[GuildMember], collapse_tiers: bool) -> Vec<VocationGroup> {
    let mut groups: Vec<VocationGroup> = Vec::new();

    for member in members {
        let key = if collapse_tiers {
            collapse_vocation(&member.vocation)
        } else {
            member.vocation.as_str()
        };

        match groups.iter_mut().find(|g| g.vocation == key) {
            Some(group) => group.members.push(member.clone()),
            None => groups.push(VocationGroup {
                vocation: key.to_string(),
                members: vec![member.clone()],
            }),
        }
    }

    groups
}

/// Partition members into above (level >= threshold) and below
///
/// Relative order within each partition is preserved.
pub fn split_by_level(members: &[GuildMember], threshold: i32) -> LevelSplit {
    let (above, below) = members
        .iter()
        .cloned()
        .partition(|m| m.level >= threshold);

    LevelSplit { above, below }
}

/// Sort members by level, highest first
///
/// Stable: ties keep their original relative order. Operates on a copy.
pub fn sort_by_level_desc(members: &[GuildMember]) -> Vec<GuildMember> {
    let mut sorted = members.to_vec();
    sorted.sort_by(|a, b| b.level.cmp(&a.level));
    sorted
}

/// Compose the full analysis for one guild snapshot
pub fn full_analysis(guild: &Guild) -> GuildAnalysis {
    let active: Vec<GuildMember> = guild
        .members
        .iter()
        .filter(|m| m.is_active())
        .cloned()
        .collect();
    let exited: Vec<GuildMember> = guild
        .members
        .iter()
        .filter(|m| m.status.is_online() && m.is_exited)
        .cloned()
        .collect();

    GuildAnalysis {
        info: GuildInfo {
            name: guild.name.clone(),
            online: guild.players_online,
            offline: guild.players_offline,
            total: guild.members_total,
        },
        vocations: group_by_vocation(&active, true),
        exited_vocations: group_by_vocation(&exited, true),
        by_level: split_by_level(&active, LEVEL_THRESHOLD),
        exited_by_level: split_by_level(&exited, LEVEL_THRESHOLD),
        sorted: sort_by_level_desc(&active),
        exited_sorted: sort_by_level_desc(&exited),
        generated_at: Utc::now(),
    }
}

/// Aggregate totals of the combined guild + external view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedTotals {
    pub members_total: i32,
    pub external_total: i32,
    pub combined_total: i32,
}

/// Guild analysis merged with the external character roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedAnalysis {
    pub guild: GuildAnalysis,
    pub external_characters: Vec<ExternalCharacter>,
    /// Active external characters, level-sorted like the guild's `sorted` list
    pub external_sorted: Vec<GuildMember>,
    pub totals: CombinedTotals,
    pub generated_at: DateTime<Utc>,
}

/// Merge the main guild analysis with the external character roster
///
/// External character counts are appended to the guild's aggregate total.
/// External characters also get a level-sorted active view, built from their
/// member projections so the same filtering rules apply.
pub fn combined_analysis(
    guild: GuildAnalysis,
    external_characters: Vec<ExternalCharacter>,
) -> CombinedAnalysis {
    let members_total = guild.info.total;
    let external_total = external_characters.len() as i32;

    let projected: Vec<GuildMember> = external_characters
        .iter()
        .map(ExternalCharacter::as_member)
        .collect();
    let external_sorted = sort_by_level_desc(&filter_online(&projected));

    CombinedAnalysis {
        guild,
        external_characters,
        external_sorted,
        totals: CombinedTotals {
            members_total,
            external_total,
            combined_total: members_total + external_total,
        },
        generated_at: Utc::now(),
    }
}
