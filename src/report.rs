use std::fmt::Write;

use pythagoras_distance::{RankOrder, RankedPair, rank_targets};
use tracing::{debug, info};

use crate::scene::{Host, select_sources, select_targets};

/// Render one source's ranked pairs as a chat message.
///
/// Each line reads `PHB / floored Euclidean / DMG`, in the scene's unit.
pub fn render_report(pairs: &[RankedPair<'_>], unit_label: &str) -> String {
    let mut html = format!("<p>Distances in PHB / Euclidean / DMG {}.</p>", unit_label);
    for pair in pairs {
        // Writing into a String cannot fail.
        let _ = write!(
            html,
            "<p>{} is {} / {} / {} from {}</p>",
            pair.source.name,
            pair.distances.phb,
            pair.distances.euclid.floor(),
            pair.distances.dmg,
            pair.target.name
        );
    }
    html
}

/// Measure every selected source against every target and whisper one
/// report per source to the current user.
///
/// Returns the number of messages sent. Missing sources or targets are
/// reported to the user by the selection step and produce no messages.
pub fn run_report(host: &mut impl Host, order: RankOrder) -> anyhow::Result<usize> {
    let sources = select_sources(host);
    let targets = select_targets(host);
    if sources.is_empty() || targets.is_empty() {
        info!(sources = sources.len(), targets = targets.len(), "Nothing to measure");
        return Ok(0);
    }

    let grid = host.grid().clone();
    let recipient = host.user().name.clone();
    let mut sent = 0;

    for source in &sources {
        let pairs = rank_targets(source, &targets, &grid, order);
        for pair in &pairs {
            debug!(
                source = %pair.source.name,
                target = %pair.target.name,
                euclid = pair.distances.euclid,
                phb = pair.distances.phb,
                dmg = pair.distances.dmg,
                "Measured pair"
            );
        }

        let html = render_report(&pairs, grid.unit_label());
        host.whisper(&recipient, &html)?;
        sent += 1;
    }

    info!(messages = sent, ?order, "Distance report sent");
    Ok(sent)
}
