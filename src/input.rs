//! Input model: tools, modifier keys, the gesture state machine, and the
//! simultaneous-keys shortcut tracker.
//!
//! A gesture is the span from pointer-down to pointer-up. Everything the up
//! handler needs — the down position, the deep copy of the committed
//! structure, and the hit-test results established at down time — travels in
//! [`GestureState`] as plain data. Aborting a gesture is a reset to `Idle`,
//! which is idempotent: resetting with nothing in progress is always safe.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{Label, Structure};
use crate::geometry::Vector;
use crate::hit::{ArrowHit, AtomHit, BondHit};
use crate::templates::{ArrowCluster, StructureCluster};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// No tool selected; gestures do nothing.
    #[default]
    None,
    /// Rectangle selection.
    Select,
    /// Drag selected members around.
    Move,
    /// Draw the chosen structure template (bond or ring).
    Structure,
    /// Draw the chosen arrow.
    Arrow,
    /// Apply the chosen predefined label.
    Label,
    /// Apply the typed custom label.
    CustomLabel,
    /// Strip a label from an atom.
    RemoveLabel,
    /// Delete the atom, bond, or arrow under the cursor.
    Delete,
    /// Drag an arrow's start or end handle.
    ResizeArrow,
    /// Place free text.
    TextArea,
}

impl Tool {
    /// Parses the host-facing tool name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let tool = match name {
            "none" => Self::None,
            "select" => Self::Select,
            "moveStructure" => Self::Move,
            "structure" => Self::Structure,
            "arrow" => Self::Arrow,
            "label" => Self::Label,
            "customLabel" => Self::CustomLabel,
            "removeLabel" => Self::RemoveLabel,
            "delete" => Self::Delete,
            "resizeArrow" => Self::ResizeArrow,
            "textArea" => Self::TextArea,
            _ => return None,
        };
        Some(tool)
    }

    /// True for the tools whose mouse-down needs hit-test results.
    #[must_use]
    pub fn wants_hit_test(self) -> bool {
        matches!(
            self,
            Self::Label | Self::RemoveLabel | Self::ResizeArrow | Self::CustomLabel | Self::Structure | Self::Delete
        )
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held; frees the bond angle from the preset directions.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Persistent UI state: the active tool and the shapes chosen for it.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    /// Template cluster the structure tool draws from.
    pub chosen_structure: Option<StructureCluster>,
    /// Arrow cluster the arrow tool draws from.
    pub chosen_arrow: Option<ArrowCluster>,
    /// Label the label tool applies.
    pub chosen_label: Option<Label>,
    /// Text the custom-label tool applies.
    pub custom_label: String,
    /// Text the text-area tool places.
    pub text_area: String,
}

/// The gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Pointer is down. Carries everything the paired move/up consumes.
    Down {
        /// Pointer position at mouse-down.
        down: Vector,
        /// Deep copy of the committed structure; `None` on an empty canvas.
        working: Option<Structure>,
        /// Atom under the down position, if the tool asked for hit-testing.
        atom: Option<AtomHit>,
        /// Bond under the down position.
        bond: Option<BondHit>,
        /// Arrow under the down position.
        arrow: Option<ArrowHit>,
    },
}

impl GestureState {
    /// Aborts whatever is in progress. Safe to call when idle.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

// ── Keyboard shortcuts ──────────────────────────────────────────

/// Document-editing commands fired by keyboard combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Undo,
    Redo,
    SelectAll,
    DeselectAll,
    DeleteSelected,
    DeleteAll,
    Copy,
    Cut,
    Paste,
    AlignUp,
    AlignDown,
    AlignLeft,
    AlignRight,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

struct Combination {
    command: EditCommand,
    /// Key name and whether it is currently held.
    keys: Vec<(String, bool)>,
}

/// Tracks simultaneously held keys and fires combinations on release.
///
/// Key-down sets a bit per physical key; key-up first fires every
/// combination whose keys were all down at that moment, then clears the
/// released key's bit. Combinations therefore fire exactly once per release
/// and the keys may be released in any order.
pub struct ShortcutTracker {
    combinations: Vec<Combination>,
}

impl ShortcutTracker {
    /// An empty tracker with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self { combinations: Vec::new() }
    }

    /// The stock bindings.
    #[must_use]
    pub fn with_default_bindings() -> Self {
        let mut tracker = Self::new();
        tracker.register("ctrl + z", EditCommand::Undo);
        tracker.register("ctrl + f", EditCommand::Redo);
        tracker.register("ctrl + a", EditCommand::SelectAll);
        tracker.register("ctrl + d", EditCommand::DeselectAll);
        tracker.register("del", EditCommand::DeleteSelected);
        tracker.register("ctrl + e", EditCommand::DeleteAll);
        tracker.register("ctrl + c", EditCommand::Copy);
        tracker.register("ctrl + x", EditCommand::Cut);
        tracker.register("ctrl + v", EditCommand::Paste);
        tracker.register("shift + q", EditCommand::AlignUp);
        tracker.register("shift + w", EditCommand::AlignDown);
        tracker.register("shift + e", EditCommand::AlignLeft);
        tracker.register("shift + r", EditCommand::AlignRight);
        tracker.register("uparrow", EditCommand::MoveUp);
        tracker.register("downarrow", EditCommand::MoveDown);
        tracker.register("leftarrow", EditCommand::MoveLeft);
        tracker.register("rightarrow", EditCommand::MoveRight);
        tracker
    }

    /// Registers a combination like `"ctrl + z"` or a single key like
    /// `"del"`.
    pub fn register(&mut self, combination: &str, command: EditCommand) {
        let keys = combination
            .split(" + ")
            .map(|key| (key.to_owned(), false))
            .collect();
        self.combinations.push(Combination { command, keys });
    }

    /// Translates a DOM `keyCode` into the key names used by bindings.
    #[must_use]
    pub fn key_from_code(code: u32) -> Option<String> {
        let name = match code {
            16 => "shift".to_owned(),
            17 => "ctrl".to_owned(),
            37 => "leftarrow".to_owned(),
            38 => "uparrow".to_owned(),
            39 => "rightarrow".to_owned(),
            40 => "downarrow".to_owned(),
            46 => "del".to_owned(),
            65..=90 => {
                let letter = char::from_u32(code + 32)?;
                letter.to_string()
            }
            _ => return None,
        };
        Some(name)
    }

    /// Marks a key as held.
    pub fn key_down(&mut self, key: &str) {
        self.set_key(key, true);
    }

    /// Fires every fully-held combination, then marks the key as released.
    pub fn key_up(&mut self, key: &str) -> Vec<EditCommand> {
        let fired = self
            .combinations
            .iter()
            .filter(|combination| combination.keys.iter().all(|(_, held)| *held))
            .map(|combination| combination.command)
            .collect();
        self.set_key(key, false);
        fired
    }

    fn set_key(&mut self, key: &str, held: bool) {
        for combination in &mut self.combinations {
            for (name, bit) in &mut combination.keys {
                if name == key {
                    *bit = held;
                }
            }
        }
    }
}

impl Default for ShortcutTracker {
    fn default() -> Self {
        Self::with_default_bindings()
    }
}
