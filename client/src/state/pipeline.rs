//! Pipeline board store: stage metadata, per-stage items and drag reordering.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`PipelineState`] lives in an `RwSignal` for as long as a pipeline is
//! on screen. The stage query seeds it through [`PipelineAction::Reset`];
//! stage columns load their items lazily and report back through
//! [`PipelineAction::StageLoaded`]; drag gestures arrive as
//! [`PipelineAction::DragEnd`].
//!
//! DESIGN
//! ======
//! Reordering is done by pure functions ([`reorder`], [`apply_item_drag`],
//! [`apply_stage_drag`]) that return a new mapping. [`PipelineState::dispatch`]
//! swaps the result in and hands back [`PipelineCommand`]s describing the
//! persistence mutations the caller must send. The local update is
//! optimistic; nothing here waits on the server. A cross-stage move also
//! shifts the card's count and amounts between the two stage headers.
//!
//! Item drops onto a column whose first page has not arrived are refused,
//! since that page replaces the column's items wholesale.
//!
//! Invariant: every key of `stage_map` has an entry in `item_map` and in
//! `stage_load_map`, and every item sits under its own `stage_id`.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use std::collections::HashMap;

use serde::Serialize;

use crate::net::types::{Item, Stage};

/// Stage id → ordered items.
pub type ItemMap = HashMap<String, Vec<Item>>;
/// Stage id → stage metadata.
pub type StageMap = HashMap<String, Stage>;

/// Droppable id of the horizontal stage container.
pub const PIPELINE_DROPPABLE_ID: &str = "pipeline";

/// Page size of the items query.
pub const ITEMS_PAGE_SIZE: usize = 20;

/// Lazy-load progress of one stage column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StageLoad {
    #[default]
    Unloaded,
    Loading,
    Loaded,
}

/// What is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    /// An item card between or within stage columns.
    Item,
    /// A whole stage column inside the pipeline container.
    Stage,
}

/// A position inside a droppable: a stage id for items, [`PIPELINE_DROPPABLE_ID`] for stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragLocation {
    pub droppable_id: String,
    pub index: usize,
}

impl DragLocation {
    #[must_use]
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self { droppable_id: droppable_id.into(), index }
    }
}

/// Result of a completed drag gesture.
///
/// `destination` is `None` when the drop happened outside any valid target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragResult {
    pub kind: DragKind,
    pub draggable_id: String,
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

/// A drag in progress, recorded on `dragstart` and resolved on `drop` or
/// `dragend`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub kind: DragKind,
    pub draggable_id: String,
    pub source: DragLocation,
    /// Card slot last dragged over; lives and dies with the session.
    pub hover: Option<DragLocation>,
}

impl DragSession {
    #[must_use]
    pub fn new(kind: DragKind, draggable_id: impl Into<String>, source: DragLocation) -> Self {
        Self { kind, draggable_id: draggable_id.into(), source, hover: None }
    }

    pub fn hover_over(&mut self, location: DragLocation) {
        self.hover = Some(location);
    }

    /// Forget the hovered slot if it belongs to `droppable_id`.
    pub fn clear_hover(&mut self, droppable_id: &str) {
        if self.hover.as_ref().is_some_and(|h| h.droppable_id == droppable_id) {
            self.hover = None;
        }
    }

    /// Index an item drop on `stage_id` lands at: the hovered slot when it is
    /// in that column, otherwise the end of the column's `len` items.
    #[must_use]
    pub fn item_drop_index(&self, stage_id: &str, len: usize) -> usize {
        match &self.hover {
            Some(hover) if hover.droppable_id == stage_id => hover.index.min(len),
            _ => len,
        }
    }

    /// Close the gesture; `None` means it ended outside every drop target.
    #[must_use]
    pub fn finish(self, destination: Option<DragLocation>) -> DragResult {
        DragResult { kind: self.kind, draggable_id: self.draggable_id, source: self.source, destination }
    }
}

/// Position of one entity after a reorder, as the order mutations expect it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub order: usize,
}

/// Persistence side effects requested by a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineCommand {
    /// The item moved to another stage.
    PersistItemStage { item_id: String, stage_id: String },
    /// The item order of one stage changed.
    PersistItemOrder { stage_id: String, orders: Vec<OrderItem> },
    /// The stage order of the pipeline changed.
    PersistStageOrder { orders: Vec<OrderItem> },
}

/// Fresh maps built from one stage query response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StageMaps {
    pub stage_map: StageMap,
    pub item_map: ItemMap,
    /// Stage ids in response order.
    pub stage_ids: Vec<String>,
}

/// Build a stage map and an empty item map (one entry per stage).
///
/// Duplicate stage ids keep their first position.
#[must_use]
pub fn build_stage_maps(stages: Vec<Stage>) -> StageMaps {
    let mut maps = StageMaps::default();
    for stage in stages {
        if maps.stage_map.contains_key(&stage.id) {
            log::debug!("duplicate stage {} in stage response", stage.id);
            continue;
        }
        maps.stage_ids.push(stage.id.clone());
        maps.item_map.insert(stage.id.clone(), Vec::new());
        maps.stage_map.insert(stage.id.clone(), stage);
    }
    maps
}

/// Inputs accepted by [`PipelineState::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineAction {
    /// Replace everything with a fresh stage query result.
    Reset(StageMaps),
    /// A column is about to fetch its first page.
    BeginStageLoad(String),
    /// First page of a column arrived.
    StageLoaded { stage_id: String, items: Vec<Item> },
    /// A further page of a column arrived.
    StageMoreLoaded { stage_id: String, items: Vec<Item> },
    /// The column fetch failed; the column may try again.
    StageLoadFailed(String),
    DragEnd(DragResult),
}

/// Transient UI state of one pipeline board.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineState {
    pub stage_map: StageMap,
    pub item_map: ItemMap,
    pub stage_ids: Vec<String>,
    pub stage_load_map: HashMap<String, StageLoad>,
}

impl PipelineState {
    #[must_use]
    pub fn new(maps: StageMaps) -> Self {
        let mut state = Self::default();
        state.reset(maps);
        state
    }

    /// Apply `action` and return the persistence commands it produced.
    pub fn dispatch(&mut self, action: PipelineAction) -> Vec<PipelineCommand> {
        match action {
            PipelineAction::Reset(maps) => {
                self.reset(maps);
                Vec::new()
            }
            PipelineAction::BeginStageLoad(stage_id) => {
                self.begin_load(&stage_id);
                Vec::new()
            }
            PipelineAction::StageLoaded { stage_id, items } => {
                self.finish_load(&stage_id, items, false);
                Vec::new()
            }
            PipelineAction::StageMoreLoaded { stage_id, items } => {
                self.finish_load(&stage_id, items, true);
                Vec::new()
            }
            PipelineAction::StageLoadFailed(stage_id) => {
                if let Some(load) = self.stage_load_map.get_mut(&stage_id) {
                    *load = StageLoad::Unloaded;
                }
                Vec::new()
            }
            PipelineAction::DragEnd(drag) => self.drag_end(&drag),
        }
    }

    /// Mark `stage_id` as loading. Returns `true` only on the
    /// `Unloaded → Loading` transition, i.e. when the caller should fetch.
    pub fn begin_load(&mut self, stage_id: &str) -> bool {
        let Some(load) = self.stage_load_map.get_mut(stage_id) else {
            log::debug!("load requested for unknown stage {stage_id}");
            return false;
        };
        if *load != StageLoad::Unloaded {
            return false;
        }
        *load = StageLoad::Loading;
        true
    }

    #[must_use]
    pub fn load_state(&self, stage_id: &str) -> StageLoad {
        self.stage_load_map.get(stage_id).copied().unwrap_or_default()
    }

    /// Items of `stage_id` in display order.
    #[must_use]
    pub fn items(&self, stage_id: &str) -> &[Item] {
        self.item_map.get(stage_id).map_or(&[], Vec::as_slice)
    }

    /// Whether the pipeline has any stage column to render.
    #[must_use]
    pub fn has_stages(&self) -> bool {
        !self.stage_ids.is_empty()
    }

    /// Whether more items exist server-side than are loaded for `stage_id`.
    #[must_use]
    pub fn has_more(&self, stage_id: &str) -> bool {
        let Some(stage) = self.stage_map.get(stage_id) else {
            return false;
        };
        usize::try_from(stage.items_total_count).map_or(false, |total| self.items(stage_id).len() < total)
    }

    /// Stages in display order, skipping ids absent from the stage map.
    ///
    /// A missing entry is a tolerated transient state (for example between a
    /// stage reorder and the next stage query), not an error.
    #[must_use]
    pub fn visible_stages(&self) -> Vec<&Stage> {
        self.stage_ids
            .iter()
            .filter_map(|id| {
                let stage = self.stage_map.get(id);
                if stage.is_none() {
                    log::debug!("stage {id} has no metadata; skipping column");
                }
                stage
            })
            .collect()
    }

    fn reset(&mut self, maps: StageMaps) {
        self.stage_load_map = maps.stage_ids.iter().map(|id| (id.clone(), StageLoad::Unloaded)).collect();
        self.stage_map = maps.stage_map;
        self.item_map = maps.item_map;
        self.stage_ids = maps.stage_ids;
    }

    fn finish_load(&mut self, stage_id: &str, items: Vec<Item>, append: bool) {
        let Some(slot) = self.item_map.get_mut(stage_id) else {
            log::debug!("items arrived for unknown stage {stage_id}; dropping");
            return;
        };
        let items = items.into_iter().filter(|item| {
            let belongs = item.stage_id == stage_id;
            if !belongs {
                log::debug!("item {} reports stage {}, expected {stage_id}", item.id, item.stage_id);
            }
            belongs
        });
        if append {
            for item in items {
                if !slot.iter().any(|existing| existing.id == item.id) {
                    slot.push(item);
                }
            }
        } else {
            *slot = items.collect();
        }
        self.stage_load_map.insert(stage_id.to_owned(), StageLoad::Loaded);
    }

    fn drag_end(&mut self, drag: &DragResult) -> Vec<PipelineCommand> {
        match drag.kind {
            DragKind::Item => {
                if let Some(destination) = &drag.destination {
                    let load = self.load_state(&destination.droppable_id);
                    if load != StageLoad::Loaded {
                        log::debug!("drop onto stage {} refused while {load:?}", destination.droppable_id);
                        return Vec::new();
                    }
                }
                match apply_item_drag(&self.item_map, drag) {
                    Some(outcome) => {
                        self.move_stage_totals(drag);
                        self.item_map = outcome.item_map;
                        outcome.commands
                    }
                    None => Vec::new(),
                }
            }
            DragKind::Stage => match apply_stage_drag(&self.stage_ids, drag) {
                Some((stage_ids, commands)) => {
                    for (order, id) in stage_ids.iter().enumerate() {
                        if let Some(stage) = self.stage_map.get_mut(id) {
                            stage.order = i64::try_from(order).unwrap_or(i64::MAX);
                        }
                    }
                    self.stage_ids = stage_ids;
                    commands
                }
                None => Vec::new(),
            },
        }
    }

    /// Shift the dragged item's count and amounts from its source stage to
    /// the destination stage. Must run before the new item map is swapped in.
    fn move_stage_totals(&mut self, drag: &DragResult) {
        let Some(destination) = &drag.destination else {
            return;
        };
        let source = &drag.source;
        if source.droppable_id == destination.droppable_id {
            return;
        }
        let Some(item) = self.items(&source.droppable_id).get(source.index).cloned() else {
            return;
        };
        if let Some(stage) = self.stage_map.get_mut(&source.droppable_id) {
            stage.items_total_count = (stage.items_total_count - 1).max(0);
            for (currency, value) in &item.amount {
                let Some(total) = stage.amount.get_mut(currency) else {
                    continue;
                };
                *total -= value;
                if total.abs() < f64::EPSILON {
                    stage.amount.remove(currency);
                }
            }
        }
        if let Some(stage) = self.stage_map.get_mut(&destination.droppable_id) {
            stage.items_total_count += 1;
            for (currency, value) in &item.amount {
                *stage.amount.entry(currency.clone()).or_insert(0.0) += value;
            }
        }
    }
}

/// A new item map plus the commands that persist it.
#[derive(Clone, Debug, PartialEq)]
pub struct DragOutcome {
    pub item_map: ItemMap,
    pub commands: Vec<PipelineCommand>,
}

/// Move the element at `from` to `to`, returning a new sequence.
///
/// `to` is clamped to the last position; an out-of-range `from` returns an
/// unchanged copy.
#[must_use]
pub fn reorder<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = list.to_vec();
    if from >= out.len() {
        return out;
    }
    let moved = out.remove(from);
    let to = to.min(out.len());
    out.insert(to, moved);
    out
}

/// Apply an item drag to `item_map`.
///
/// Returns `None` when nothing changes: no destination, a drop back onto the
/// same position, an unknown stage, or a source index that does not hold
/// the dragged item.
#[must_use]
pub fn apply_item_drag(item_map: &ItemMap, drag: &DragResult) -> Option<DragOutcome> {
    let destination = drag.destination.as_ref()?;
    let source = &drag.source;

    let Some(source_items) = item_map.get(&source.droppable_id) else {
        log::debug!("drag from unknown stage {}", source.droppable_id);
        return None;
    };
    match source_items.get(source.index) {
        Some(item) if item.id == drag.draggable_id => {}
        _ => {
            log::warn!(
                "drag source {}[{}] does not hold item {}",
                source.droppable_id,
                source.index,
                drag.draggable_id
            );
            return None;
        }
    }

    if source.droppable_id == destination.droppable_id {
        if source.index == destination.index {
            return None;
        }
        let reordered = reorder(source_items, source.index, destination.index);
        let commands = vec![PipelineCommand::PersistItemOrder {
            stage_id: source.droppable_id.clone(),
            orders: order_items(reordered.iter().map(|i| i.id.as_str())),
        }];
        let mut item_map = item_map.clone();
        item_map.insert(source.droppable_id.clone(), reordered);
        return Some(DragOutcome { item_map, commands });
    }

    let Some(target_items) = item_map.get(&destination.droppable_id) else {
        log::debug!("drop onto unknown stage {}", destination.droppable_id);
        return None;
    };

    let mut remaining = source_items.clone();
    let mut moved = remaining.remove(source.index);
    moved.stage_id.clone_from(&destination.droppable_id);

    let mut target = target_items.clone();
    let insert_at = destination.index.min(target.len());
    target.insert(insert_at, moved);

    let commands = vec![
        PipelineCommand::PersistItemStage {
            item_id: drag.draggable_id.clone(),
            stage_id: destination.droppable_id.clone(),
        },
        PipelineCommand::PersistItemOrder {
            stage_id: destination.droppable_id.clone(),
            orders: order_items(target.iter().map(|i| i.id.as_str())),
        },
        PipelineCommand::PersistItemOrder {
            stage_id: source.droppable_id.clone(),
            orders: order_items(remaining.iter().map(|i| i.id.as_str())),
        },
    ];

    let mut item_map = item_map.clone();
    item_map.insert(source.droppable_id.clone(), remaining);
    item_map.insert(destination.droppable_id.clone(), target);
    Some(DragOutcome { item_map, commands })
}

/// Apply a stage-column drag to the ordered stage ids.
///
/// Returns `None` when nothing changes or the drop target is not the
/// pipeline container.
#[must_use]
pub fn apply_stage_drag(stage_ids: &[String], drag: &DragResult) -> Option<(Vec<String>, Vec<PipelineCommand>)> {
    let destination = drag.destination.as_ref()?;
    if destination.droppable_id != PIPELINE_DROPPABLE_ID || drag.source.droppable_id != PIPELINE_DROPPABLE_ID {
        return None;
    }
    if stage_ids.get(drag.source.index) != Some(&drag.draggable_id) {
        log::warn!("stage drag source {} does not hold {}", drag.source.index, drag.draggable_id);
        return None;
    }
    if drag.source.index == destination.index {
        return None;
    }
    let reordered = reorder(stage_ids, drag.source.index, destination.index);
    let commands = vec![PipelineCommand::PersistStageOrder {
        orders: order_items(reordered.iter().map(String::as_str)),
    }];
    Some((reordered, commands))
}

fn order_items<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<OrderItem> {
    ids.enumerate()
        .map(|(order, id)| OrderItem { id: id.to_owned(), order })
        .collect()
}
