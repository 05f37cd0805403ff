//! Literal substring search over live text-bearing entities, with persisted
//! counters and live visual highlighting.

use tracing::{debug, info};

use cadlink_document::{DocumentError, LiveDocument};
use cadlink_store::SnapshotStore;
use cadlink_types::{ColorCode, PatternStat};

use crate::{EngineError, EngineResult};

/// Matches reported in detail; the count always reflects the true total.
pub const MATCH_PREVIEW_LIMIT: usize = 10;

/// Well-known selection set holding the current pattern highlight. Fixed
/// per operation, so concurrent invocations against the same document
/// collide by design.
pub const PATTERN_SELECTION: &str = "TextMatches";

/// One matched text entity, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatch {
    pub handle: Option<String>,
    pub text: String,
    pub layer: String,
    pub position: Option<[f64; 3]>,
}

/// Outcome of one pattern count.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternReport {
    pub pattern: String,
    /// Drawing the count was computed against.
    pub drawing: String,
    /// True total of matching entities.
    pub count: u64,
    /// At most [`MATCH_PREVIEW_LIMIT`] match details.
    pub matches: Vec<PatternMatch>,
}

fn is_match(text: &str, pattern: &str) -> bool {
    // Case-sensitive, unanchored containment.
    text.contains(pattern)
}

/// Counts live text entities containing `pattern` and persists the result.
///
/// The stored row for this pattern is overwritten (last-write-wins), never
/// accumulated. Per-entity read failures are skipped.
pub fn count_pattern(
    doc: &dyn LiveDocument,
    store: &SnapshotStore,
    pattern: &str,
) -> EngineResult<PatternReport> {
    if !doc.is_open() {
        return Err(EngineError::DocumentUnavailable);
    }
    let drawing = doc.name()?;

    let mut count = 0u64;
    let mut matches = Vec::new();

    for entity in doc.entities()? {
        let live = match doc.read_entity(entity) {
            Ok(live) => live,
            Err(err) => {
                debug!(%entity, %err, "skipping unreadable entity");
                continue;
            }
        };
        let Some(text) = live.properties.text() else {
            continue;
        };
        if is_match(text, pattern) {
            count += 1;
            if matches.len() < MATCH_PREVIEW_LIMIT {
                matches.push(PatternMatch {
                    handle: live.handle.clone(),
                    text: text.to_string(),
                    layer: live.layer.clone(),
                    position: live.properties.insertion_point(),
                });
            }
        }
    }

    store.upsert_pattern_stat(&PatternStat {
        pattern: pattern.to_string(),
        count,
        drawing: drawing.clone(),
    })?;
    info!(pattern, count, %drawing, "pattern count persisted");

    Ok(PatternReport {
        pattern: pattern.to_string(),
        drawing,
        count,
        matches,
    })
}

/// Recolors every live text entity containing `pattern` and frames the
/// viewport around them.
///
/// Matches are collected into the fixed [`PATTERN_SELECTION`] set; any
/// stale set from a previous invocation is deleted first. With at least
/// one match the viewport is zoomed and the set is left in place; with
/// none the set is deleted. Previous colors are logged for reference but
/// not restored. Returns the number of entities recolored.
pub fn highlight_pattern(
    doc: &mut dyn LiveDocument,
    pattern: &str,
    color: ColorCode,
) -> EngineResult<usize> {
    if !doc.is_open() {
        return Err(EngineError::DocumentUnavailable);
    }

    // Replace any leftover selection from an earlier invocation.
    match doc.delete_selection(PATTERN_SELECTION) {
        Ok(()) | Err(DocumentError::SelectionNotFound(_)) => {}
        Err(err) => return Err(err.into()),
    }
    doc.create_selection(PATTERN_SELECTION)?;

    let mut highlighted = 0usize;
    for entity in doc.entities()? {
        let live = match doc.read_entity(entity) {
            Ok(live) => live,
            Err(err) => {
                debug!(%entity, %err, "skipping unreadable entity");
                continue;
            }
        };
        let Some(text) = live.properties.text() else {
            continue;
        };
        if !is_match(text, pattern) {
            continue;
        }
        let previous = match doc.set_color(entity, color) {
            Ok(previous) => previous,
            Err(err) => {
                debug!(%entity, %err, "skipping entity that failed to recolor");
                continue;
            }
        };
        debug!(%entity, previous, color, "recolored match");
        if let Err(err) = doc.add_to_selection(PATTERN_SELECTION, entity) {
            let _ = doc.delete_selection(PATTERN_SELECTION);
            return Err(err.into());
        }
        highlighted += 1;
    }

    if highlighted > 0 {
        if let Err(err) = doc.zoom_to_selection(PATTERN_SELECTION) {
            let _ = doc.delete_selection(PATTERN_SELECTION);
            return Err(err.into());
        }
        info!(pattern, highlighted, "pattern matches highlighted");
    } else {
        doc.delete_selection(PATTERN_SELECTION)?;
    }
    Ok(highlighted)
}
