//! Reaction vote tallying.
//!
//! Polls map reaction emojis to option slots through a fixed table. Tallying is a pure
//! function of the poll record and a reaction snapshot, so it can be rerun any number of
//! times against fresh snapshots.

use crate::model::poll::{OptionTally, PollRecord, ReactionSnapshot};

/// Reaction emoji for each option slot, in slot order.
pub const REACTION_EMOJIS: [&str; 15] = [
    "1\u{fe0f}\u{20e3}",
    "2\u{fe0f}\u{20e3}",
    "3\u{fe0f}\u{20e3}",
    "4\u{fe0f}\u{20e3}",
    "5\u{fe0f}\u{20e3}",
    "6\u{fe0f}\u{20e3}",
    "7\u{fe0f}\u{20e3}",
    "8\u{fe0f}\u{20e3}",
    "9\u{fe0f}\u{20e3}",
    "\u{1f51f}",
    "\u{1f194}",
    "\u{1f192}",
    "\u{1f195}",
    "\u{1f193}",
    "\u{1f197}",
];

/// Slot of a reaction emoji.
///
/// Clients sometimes drop the variation selector from keycap emojis, so it is ignored on
/// both sides.
pub fn slot_of(emoji: &str) -> Option<usize> {
    let wanted = strip_variation(emoji);
    REACTION_EMOJIS
        .iter()
        .position(|candidate| strip_variation(candidate) == wanted)
}

fn strip_variation(emoji: &str) -> String {
    emoji.chars().filter(|c| *c != '\u{fe0f}').collect()
}

/// Groups reactors by poll option.
///
/// Every option appears in the output, in option order, even without voters. Reactors keep
/// the order of the snapshot. Emojis without a slot, or whose slot is past the last option,
/// are ignored, and `exclude` (the bot itself) never counts as a voter.
pub fn tally(
    poll: &PollRecord,
    snapshot: &[ReactionSnapshot],
    exclude: Option<u64>,
) -> Vec<OptionTally> {
    let mut tallies: Vec<OptionTally> = poll
        .options
        .iter()
        .map(|label| OptionTally {
            label: label.clone(),
            voters: Vec::new(),
        })
        .collect();

    for reaction in snapshot {
        let Some(slot) = slot_of(&reaction.emoji) else {
            continue;
        };
        let Some(option) = tallies.get_mut(slot) else {
            continue;
        };

        for user_id in &reaction.user_ids {
            if Some(*user_id) == exclude || option.voters.contains(user_id) {
                continue;
            }
            option.voters.push(*user_id);
        }
    }

    tallies
}

/// Voter list per option for `/get_votes`.
pub fn render_voters(tallies: &[OptionTally]) -> String {
    if tallies.iter().all(|t| t.voters.is_empty()) {
        return "Reaction results:\nNo votes yet!".to_string();
    }

    let lines: Vec<String> = tallies
        .iter()
        .map(|t| {
            let voters = if t.voters.is_empty() {
                "No votes".to_string()
            } else {
                t.voters
                    .iter()
                    .map(|id| format!("<@{}>", id))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            format!("**{}**: {}", t.label, voters)
        })
        .collect();

    format!("Reaction results:\n{}", lines.join("\n"))
}

/// Vote count per option, in option order.
pub fn vote_counts(tallies: &[OptionTally]) -> Vec<(&str, usize)> {
    tallies
        .iter()
        .map(|t| (t.label.as_str(), t.voters.len()))
        .collect()
}

/// Percentage bars per option for `/results_weekly_bosses`.
///
/// Each bar is 20 blocks, one per 5 %, rounded down.
pub fn render_vote_results(tallies: &[OptionTally]) -> String {
    let counts = vote_counts(tallies);
    let total: usize = counts.iter().map(|(_, votes)| votes).sum();

    counts
        .into_iter()
        .map(|(label, votes)| {
            let percentage = if total > 0 {
                votes as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let filled = ((percentage / 5.0) as usize).min(20);
            format!(
                "{}\n{}{} {:.2}% ({} votes)",
                label,
                "\u{2588}".repeat(filled),
                "\u{2591}".repeat(20 - filled),
                percentage,
                votes
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Option list shown in a poll message, one `emoji label` line per option.
pub fn render_options(options: &[String], separator: &str, bold: bool) -> String {
    options
        .iter()
        .zip(REACTION_EMOJIS)
        .map(|(label, emoji)| {
            if bold {
                format!("{} **{}**", emoji, label)
            } else {
                format!("{} {}", emoji, label)
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}
