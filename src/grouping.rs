//! Spatial grouping and export planning
//!
//! Partitions selected images by their enclosing frame, resolves frame
//! display names through the host, and produces the deterministic,
//! folder-major ordering the archive is assembled in.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::board::BoardHost;
use crate::error::Result;
use crate::naming::sanitize_name;
use crate::pacing::CallPacer;
use crate::types::{BoardItem, ContainerInfo, ExportPlanEntry, ItemId};

/// Vertical jitter tolerance for the position comparator, in board units.
///
/// Items whose y coordinates differ by no more than this are treated as one
/// row and ordered left-to-right; sub-pixel vertical offsets must not break
/// reading order.
pub const POSITION_Y_TOLERANCE: f64 = 1.0;

/// Order two board positions: rows top-to-bottom, columns left-to-right
///
/// Ascending y unless the two y values are within
/// [`POSITION_Y_TOLERANCE`] of each other, in which case ascending x. Used
/// for both containers and the images inside each scope, so folders and
/// files share one notion of reading order.
#[must_use]
pub fn position_order(a: (f64, f64), b: (f64, f64)) -> Ordering {
    let (ax, ay) = a;
    let (bx, by) = b;
    if (ay - by).abs() > POSITION_Y_TOLERANCE {
        ay.total_cmp(&by)
    } else {
        ax.total_cmp(&bx)
    }
}

/// A container after resolution, carrying its sanitized title (if any) and
/// its board position for ranking.
struct RankedContainer {
    id: ItemId,
    name: Option<String>,
    x: f64,
    y: f64,
}

/// Build the ordered export plan for a set of images
///
/// Implements the grouping algorithm:
/// 1. Partition by `parent_id` (absent = archive root).
/// 2. Resolve each distinct container through the host, sequentially, with
///    the pacer awaited after every call. A failed resolution degrades to
///    [`ContainerInfo::anonymous`] and the run continues.
/// 3. Rank containers by [`position_order`]; display name is the sanitized
///    title, or `Frame N` by rank for untitled containers.
/// 4. Sort images within each scope by the same comparator and assign
///    contiguous 1-based `index_in_folder` values.
/// 5. Emit root entries first, then one block per container in rank order.
///
/// Deterministic: the same multiset of images (in any order with stable
/// positions) yields the same plan. Two containers whose titles sanitize to
/// the same display name silently merge into one archive folder; callers
/// accept that as a known edge case.
///
/// # Errors
///
/// Never fails on container resolution. The `Result` exists for future host
/// contract growth and for signature symmetry with the other pipeline
/// stages.
pub async fn build_export_plan(
    host: &dyn BoardHost,
    pacer: &CallPacer,
    images: Vec<BoardItem>,
) -> Result<Vec<ExportPlanEntry>> {
    // 1. Partition by parent, remembering first-seen container order so the
    //    later stable sort is fully deterministic.
    let mut root: Vec<BoardItem> = Vec::new();
    let mut parent_order: Vec<ItemId> = Vec::new();
    let mut groups: HashMap<ItemId, Vec<BoardItem>> = HashMap::new();

    for item in images {
        match item.parent_id.clone() {
            None => root.push(item),
            Some(parent_id) => {
                if !groups.contains_key(&parent_id) {
                    parent_order.push(parent_id.clone());
                }
                groups.entry(parent_id).or_default().push(item);
            }
        }
    }

    // 2. Resolve container metadata, one call at a time.
    let mut containers: Vec<RankedContainer> = Vec::with_capacity(parent_order.len());
    for id in &parent_order {
        let info = match host.get_container(id).await {
            Ok(info) => info,
            Err(error) => {
                tracing::warn!(
                    container_id = %id,
                    error = %error,
                    "container lookup failed, grouping under anonymous frame"
                );
                ContainerInfo::anonymous()
            }
        };
        pacer.pause().await;

        let name = info
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(sanitize_name);
        containers.push(RankedContainer {
            id: id.clone(),
            name,
            x: info.x,
            y: info.y,
        });
    }

    // 3. Rank containers; untitled ones are named by rank.
    containers.sort_by(|a, b| position_order((a.x, a.y), (b.x, b.y)));

    // 4./5. Root entries first, then each container block in rank order.
    let mut plan: Vec<ExportPlanEntry> = Vec::new();
    push_scope_entries(&mut plan, root, String::new());

    for (rank, container) in containers.into_iter().enumerate() {
        let folder_name = container
            .name
            .unwrap_or_else(|| format!("Frame {}", rank + 1));
        let in_frame = groups.remove(&container.id).unwrap_or_default();
        push_scope_entries(&mut plan, in_frame, folder_name);
    }

    tracing::debug!(entries = plan.len(), "export plan built");
    Ok(plan)
}

/// Sort one scope's images and append them to the plan with contiguous
/// 1-based indices.
fn push_scope_entries(
    plan: &mut Vec<ExportPlanEntry>,
    mut items: Vec<BoardItem>,
    folder_name: String,
) {
    items.sort_by(|a, b| position_order((a.x, a.y), (b.x, b.y)));
    for (idx, item) in items.into_iter().enumerate() {
        plan.push(ExportPlanEntry {
            item,
            folder_name: folder_name.clone(),
            index_in_folder: idx + 1,
        });
    }
}
