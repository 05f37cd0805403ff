//! Query-driven re-selection: run caller-supplied SQL against the snapshot
//! store and project the result rows back onto the live drawing.

use tracing::{debug, info};
use uuid::Uuid;

use cadlink_document::{DocumentError, DocumentResult, EntityRef, LiveDocument};
use cadlink_store::SnapshotStore;
use cadlink_types::ColorCode;

use crate::{EngineError, EngineResult};

/// Identity column the query results must carry (matched case-insensitively).
pub const HANDLE_COLUMN: &str = "handle";

/// Well-known selection set holding the current correlation result. Fixed
/// per operation, so concurrent invocations against the same document
/// collide by design.
pub const QUERY_SELECTION: &str = "QueryResults";

/// Outcome of a query-and-highlight call. Empty results and fully stale
/// results are reported outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrelationOutcome {
    /// At least one row resolved; the viewport was framed around them.
    Highlighted {
        highlighted: usize,
        total_rows: usize,
    },
    /// The query returned zero rows; the document was not touched.
    NoRows,
    /// Rows came back but none of their handles resolve live anymore.
    NoneResolved { total_rows: usize },
}

/// Result of highlighting a single entity by handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityHighlight {
    pub handle: String,
    /// Color the entity had before (informational; not restored).
    pub previous: ColorCode,
    pub applied: ColorCode,
}

/// Executes `sql` against the store, extracts the `handle` column, and
/// recolors every row whose handle still resolves against the drawing.
///
/// Each handle is re-resolved independently through a transient scratch
/// selection (unique name, released before the next identity); stale
/// handles are counted, never fatal. With at least one resolution the
/// matches end up in [`QUERY_SELECTION`] and the viewport is framed around
/// them; with none the selection is deleted and a `NoneResolved` outcome
/// is reported.
pub fn query_and_highlight(
    doc: &mut dyn LiveDocument,
    store: &SnapshotStore,
    sql: &str,
    color: ColorCode,
) -> EngineResult<CorrelationOutcome> {
    let result = store.query(sql)?;
    let handle_index = result
        .columns
        .iter()
        .position(|c| c.eq_ignore_ascii_case(HANDLE_COLUMN))
        .ok_or(EngineError::NoHandleColumn)?;
    if result.rows.is_empty() {
        return Ok(CorrelationOutcome::NoRows);
    }
    if !doc.is_open() {
        return Err(EngineError::DocumentUnavailable);
    }

    // Replace any leftover selection from an earlier invocation.
    match doc.delete_selection(QUERY_SELECTION) {
        Ok(()) | Err(DocumentError::SelectionNotFound(_)) => {}
        Err(err) => return Err(err.into()),
    }
    doc.create_selection(QUERY_SELECTION)?;

    let total_rows = result.rows.len();
    let mut highlighted = 0usize;
    let mut unresolved = 0usize;

    for row in &result.rows {
        let Some(handle) = handle_cell(&row[handle_index]) else {
            unresolved += 1;
            continue;
        };
        match resolve_and_recolor(doc, &handle, color) {
            Ok(Some((entity, previous))) => {
                debug!(%handle, previous, color, "recolored query match");
                if let Err(err) = doc.add_to_selection(QUERY_SELECTION, entity) {
                    let _ = doc.delete_selection(QUERY_SELECTION);
                    return Err(err.into());
                }
                highlighted += 1;
            }
            Ok(None) => {
                debug!(%handle, "handle no longer resolves");
                unresolved += 1;
            }
            Err(err) => {
                debug!(%handle, %err, "resolution failed");
                unresolved += 1;
            }
        }
    }

    if highlighted > 0 {
        if let Err(err) = doc.zoom_to_selection(QUERY_SELECTION) {
            let _ = doc.delete_selection(QUERY_SELECTION);
            return Err(err.into());
        }
        info!(highlighted, unresolved, total_rows, "query results highlighted");
        Ok(CorrelationOutcome::Highlighted {
            highlighted,
            total_rows,
        })
    } else {
        doc.delete_selection(QUERY_SELECTION)?;
        Ok(CorrelationOutcome::NoneResolved { total_rows })
    }
}

/// Recolors one entity located by handle.
///
/// Resolution goes through a transient scratch selection released on every
/// path. A handle that no longer resolves is fatal here, unlike in the
/// batch correlator.
pub fn highlight_entity(
    doc: &mut dyn LiveDocument,
    handle: &str,
    color: ColorCode,
) -> EngineResult<EntityHighlight> {
    if !doc.is_open() {
        return Err(EngineError::DocumentUnavailable);
    }
    match resolve_and_recolor(doc, handle, color)? {
        Some((_, previous)) => Ok(EntityHighlight {
            handle: handle.to_string(),
            previous,
            applied: color,
        }),
        None => Err(EngineError::HandleUnresolved(handle.to_string())),
    }
}

/// Fresh lookup + recolor via a uniquely named scratch selection. Returns
/// the resolved entity and its previous color, or `None` when the handle
/// is stale.
fn resolve_and_recolor(
    doc: &mut dyn LiveDocument,
    handle: &str,
    color: ColorCode,
) -> DocumentResult<Option<(EntityRef, ColorCode)>> {
    let scratch = scratch_name();
    doc.create_selection(&scratch)?;
    let outcome = match doc.select_by_handle(&scratch, handle) {
        Ok(Some(entity)) => doc.set_color(entity, color).map(|prev| Some((entity, prev))),
        Ok(None) => Ok(None),
        Err(err) => Err(err),
    };
    // Released before the next identity, on every path.
    let _ = doc.delete_selection(&scratch);
    outcome
}

fn scratch_name() -> String {
    format!("Scratch_{}", Uuid::new_v4().simple())
}

/// Renders a query cell into a handle string. NULLs and structured values
/// cannot identify an entity and count as unresolved.
fn handle_cell(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
