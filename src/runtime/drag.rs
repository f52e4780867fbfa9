//! Drag/drop controller
//!
//! A pure state machine turning a pointer or keyboard gesture into a
//! [`DropCommand`]. It never touches the document: the session applies the
//! command through the document store, so a drop goes through the same commit
//! path as every other mutation.
//!
//! ```text
//! Idle ──start──▶ Dragging ──drop──▶ Committed
//!                    │   └──drop (no-op)──▶ Idle
//!                    └──cancel──▶ Idle
//! ```
//!
//! Insertion targets are *gaps*: gap `g` sits just before the block at index
//! `g`, gap `len` is after the last block. The gap under the pointer is the
//! number of blocks whose vertical midpoint is at or above the pointer, so a
//! pointer exactly on a midpoint inserts after that block.
//!
//! Bounds only cover the blocks the canvas shows, which on a narrow viewport
//! may skip hidden ones. A gap is therefore remembered by its neighbouring
//! block id and turned into a document position only at drop time.

use tracing::debug;

use crate::core::{BlockId, Document};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A block already in the document (move)
    ExistingBlock(BlockId),
    /// A palette entry (insert a new block of this type)
    PaletteTemplate(String),
}

/// Vertical extent of a rendered top-level block, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct BlockBounds {
    pub id: BlockId,
    pub top: f64,
    pub height: f64,
}

impl BlockBounds {
    pub fn new(id: impl Into<BlockId>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Gap index under a pointer at `pointer_y`
pub fn nearest_insertion_index(bounds: &[BlockBounds], pointer_y: f64) -> usize {
    bounds.iter().filter(|b| b.midpoint() <= pointer_y).count()
}

/// Final index of a block moved from `from` into gap `gap`
pub fn gap_to_index(from: usize, gap: usize) -> usize {
    if gap > from {
        gap - 1
    } else {
        gap
    }
}

/// Gap expressed by its neighbours in the bounds it was computed from
#[derive(Debug, Clone, PartialEq)]
enum GapAnchor {
    /// Just before this block
    Before(BlockId),
    /// Just after this block (the last bounded one)
    After(BlockId),
    /// No bounded block at all
    End,
}

impl GapAnchor {
    fn new(bounds: &[BlockBounds], gap: usize) -> Self {
        match (bounds.get(gap), bounds.last()) {
            (Some(next), _) => GapAnchor::Before(next.id.clone()),
            (None, Some(last)) => GapAnchor::After(last.id.clone()),
            (None, None) => GapAnchor::End,
        }
    }

    /// Gap in `document`'s top-level list; `fallback` when the neighbour is
    /// not a top-level block of it
    fn document_gap(&self, document: &Document, fallback: usize) -> usize {
        let position = match self {
            GapAnchor::Before(id) => document.position(id),
            GapAnchor::After(id) => document.position(id).map(|i| i + 1),
            GapAnchor::End => Some(document.len()),
        };
        position.unwrap_or(fallback).min(document.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Committed,
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    /// Pointer drag; inactive until it travels the activation distance
    Pointer {
        origin: (f64, f64),
        position: (f64, f64),
        active: bool,
        gap: Option<usize>,
        anchor: Option<GapAnchor>,
    },
    /// Keyboard drag; the target is the block's final index
    Keyboard { from: usize, to: usize, len: usize },
}

/// In-progress gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    source: DragSource,
    gesture: Gesture,
}

impl DragSession {
    pub fn source(&self) -> &DragSource {
        &self.source
    }

    /// Pointer position for the drag ghost (pointer gestures only)
    pub fn ghost_position(&self) -> Option<(f64, f64)> {
        match self.gesture {
            Gesture::Pointer { position, active: true, .. } => Some(position),
            _ => None,
        }
    }

    /// Current insertion target, as a gap index for pointer gestures or a
    /// final index for keyboard gestures
    pub fn target(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Pointer { gap, .. } => gap,
            Gesture::Keyboard { to, .. } => Some(to),
        }
    }
}

/// Outcome of a drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropCommand {
    /// Create a block of `block_type` at `index`
    Insert { block_type: String, index: usize },
    /// Move an existing top-level block to final index `to`
    Move { id: BlockId, to: usize },
    /// Nothing to apply
    None(NoDrop),
}

impl DropCommand {
    pub fn is_noop(&self) -> bool {
        matches!(self, DropCommand::None(_))
    }
}

/// Why a drop produced no command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDrop {
    NotDragging,
    /// Pointer never travelled the activation distance
    NotActivated,
    /// Released outside every drop target
    OutsideTarget,
    /// Block released at its own position
    Unchanged,
    /// The dragged block is no longer a top-level block of the document
    SourceMissing,
}

#[derive(Debug, Clone)]
pub struct DragController {
    activation_distance: f64,
    phase: DragPhase,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            activation_distance,
            phase: DragPhase::Idle,
            session: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Begin a pointer drag at `(x, y)`; replaces any unfinished gesture
    pub fn start_pointer(&mut self, source: DragSource, x: f64, y: f64) {
        debug!(?source, "pointer drag started");
        self.session = Some(DragSession {
            source,
            gesture: Gesture::Pointer {
                origin: (x, y),
                position: (x, y),
                active: false,
                gap: None,
                anchor: None,
            },
        });
        self.phase = DragPhase::Dragging;
    }

    /// Begin a keyboard drag of an existing top-level block
    ///
    /// Returns `false` (and stays idle) when `id` is not a top-level block.
    pub fn start_keyboard(&mut self, id: &BlockId, document: &Document) -> bool {
        let Some(from) = document.position(id) else {
            return false;
        };
        debug!(block = %id, from, "keyboard drag started");
        self.session = Some(DragSession {
            source: DragSource::ExistingBlock(id.clone()),
            gesture: Gesture::Keyboard {
                from,
                to: from,
                len: document.len(),
            },
        });
        self.phase = DragPhase::Dragging;
        true
    }

    /// Track the pointer over the document; returns the current gap
    pub fn drag_over(&mut self, x: f64, y: f64, bounds: &[BlockBounds]) -> Option<usize> {
        let threshold = self.activation_distance;
        let session = self.session.as_mut()?;
        let Gesture::Pointer {
            origin,
            position,
            active,
            gap,
            anchor,
        } = &mut session.gesture
        else {
            return None;
        };

        *position = (x, y);
        if !*active {
            let travelled = ((x - origin.0).powi(2) + (y - origin.1).powi(2)).sqrt();
            if travelled < threshold {
                return None;
            }
            *active = true;
        }
        let index = nearest_insertion_index(bounds, y);
        *anchor = Some(GapAnchor::new(bounds, index));
        *gap = Some(index);
        *gap
    }

    /// Pointer left every drop target
    pub fn drag_leave(&mut self) {
        if let Some(DragSession {
            gesture: Gesture::Pointer { gap, anchor, .. },
            ..
        }) = self.session.as_mut()
        {
            *gap = None;
            *anchor = None;
        }
    }

    /// Move a keyboard drag target one step; returns the new target
    pub fn nudge(&mut self, direction: Direction) -> Option<usize> {
        let session = self.session.as_mut()?;
        let Gesture::Keyboard { to, len, .. } = &mut session.gesture else {
            return None;
        };
        *to = match direction {
            Direction::Up => to.saturating_sub(1),
            Direction::Down => (*to + 1).min(len.saturating_sub(1)),
        };
        Some(*to)
    }

    /// Finish the gesture and compute what to apply to `document`
    pub fn drop(&mut self, document: &Document) -> DropCommand {
        let Some(session) = self.session.take() else {
            return DropCommand::None(NoDrop::NotDragging);
        };
        let command = Self::resolve(session, document);
        self.phase = if command.is_noop() {
            DragPhase::Idle
        } else {
            DragPhase::Committed
        };
        debug!(?command, "drop");
        command
    }

    fn resolve(session: DragSession, document: &Document) -> DropCommand {
        match (session.source, session.gesture) {
            (_, Gesture::Pointer { active: false, .. }) => DropCommand::None(NoDrop::NotActivated),
            (_, Gesture::Pointer { gap: None, .. } | Gesture::Pointer { anchor: None, .. }) => {
                DropCommand::None(NoDrop::OutsideTarget)
            }
            (
                DragSource::PaletteTemplate(block_type),
                Gesture::Pointer {
                    gap: Some(gap),
                    anchor: Some(anchor),
                    ..
                },
            ) => DropCommand::Insert {
                block_type,
                index: anchor.document_gap(document, gap),
            },
            (
                DragSource::ExistingBlock(id),
                Gesture::Pointer {
                    gap: Some(gap),
                    anchor: Some(anchor),
                    ..
                },
            ) => {
                let Some(from) = document.position(&id) else {
                    return DropCommand::None(NoDrop::SourceMissing);
                };
                let to = gap_to_index(from, anchor.document_gap(document, gap));
                if to == from {
                    DropCommand::None(NoDrop::Unchanged)
                } else {
                    DropCommand::Move { id, to }
                }
            }
            (DragSource::ExistingBlock(id), Gesture::Keyboard { to, .. }) => match document.position(&id) {
                None => DropCommand::None(NoDrop::SourceMissing),
                Some(from) if from == to => DropCommand::None(NoDrop::Unchanged),
                Some(_) => DropCommand::Move { id, to },
            },
            (DragSource::PaletteTemplate(_), Gesture::Keyboard { .. }) => DropCommand::None(NoDrop::OutsideTarget),
        }
    }

    /// Abandon the gesture without a command
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            debug!("drag cancelled");
        }
        self.phase = DragPhase::Idle;
    }

    /// Cancel whatever is in progress; used when the document is swapped under
    /// the gesture (undo/redo, reload)
    pub fn force_cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.cancel();
        was_dragging
    }

    /// Return to idle after a committed drop
    pub fn acknowledge(&mut self) {
        if self.phase == DragPhase::Committed {
            self.phase = DragPhase::Idle;
        }
    }
}
