//! Top-level editor: gesture dispatch, commands, and the wasm boundary.
//!
//! [`EditorCore`] holds all state and logic and is testable without a
//! browser; [`Editor`] is the thin `wasm-bindgen` wrapper the host
//! JavaScript drives with translated pointer coordinates and tool names.
//! The host owns DOM events, menus, and keyboard wiring; outcomes cross the
//! boundary as JSON so the host can decide what to refresh.
//!
//! Every gesture follows the same copy-on-write cycle: mouse-down deep-copies
//! the committed structure and hit-tests the down position, mouse-move
//! renders previews from throwaway copies, and mouse-up applies exactly one
//! mutation and commits the replacement — or nothing, when the gesture
//! turned out to be a no-op.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::prelude::wasm_bindgen;

use crate::cache::StructureCache;
use crate::consts::Consts;
use crate::doc::{Label, Member, Structure};
use crate::engine::{self, EditError};
use crate::geometry::Vector;
use crate::hit;
use crate::input::{EditCommand, GestureState, Modifiers, ShortcutTracker, Tool, UiState};
use crate::render::{self, Svg, SvgVariant};
use crate::templates::{ArrowCluster, BOND_TEMPLATES, RING_TEMPLATES, StructureCluster};

/// Group id used for the editor's own rendering.
const EDITOR_SVG_ID: &str = "cmpd1";

/// Margin around the tracked bounding box in the export viewBox.
const EXPORT_MARGIN: f64 = 30.0;

/// Offset applied to pasted members so they do not cover their source.
const PASTE_OFFSET: f64 = 50.0;

/// Distance of one keyboard-arrow move.
const KEY_MOVE_DISTANCE: f64 = 5.0;

/// What a gesture or command did, as reported to the host.
#[derive(Debug, Clone, Serialize)]
pub struct EditOutcome {
    /// Whether a new structure was committed.
    pub changed: bool,
    /// The refreshed editable markup, present when `changed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

impl EditOutcome {
    fn unchanged() -> Self {
        Self { changed: false, svg: None }
    }
}

/// One entry of the template catalog the host builds its menu from.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_size: Option<usize>,
    pub aromatic: bool,
}

/// The template catalog: every structure, arrow, and label the menus offer.
#[must_use]
pub fn template_catalog() -> Vec<TemplateInfo> {
    let mut catalog: Vec<TemplateInfo> = Vec::new();
    for template in &RING_TEMPLATES {
        catalog.push(TemplateInfo {
            name: template.name.to_owned(),
            kind: "ring",
            ring_size: Some(template.ring_size),
            aromatic: template.aromatic,
        });
    }
    for template in &BOND_TEMPLATES {
        catalog.push(TemplateInfo {
            name: template.name.to_owned(),
            kind: "bond",
            ring_size: None,
            aromatic: false,
        });
    }
    for name in ["one-way-arrow", "two-way-arrow", "equilibrium-arrow"] {
        catalog.push(TemplateInfo { name: name.to_owned(), kind: "arrow", ring_size: None, aromatic: false });
    }
    for symbol in ["O", "S", "P", "N", "C", "F", "Cl", "Br", "I", "H"] {
        catalog.push(TemplateInfo { name: symbol.to_owned(), kind: "label", ring_size: None, aromatic: false });
    }
    catalog
}

/// Core editor state, testable without WASM or a browser.
pub struct EditorCore {
    pub consts: Consts,
    pub cache: StructureCache,
    pub ui: UiState,
    pub gesture: GestureState,
    shortcuts: ShortcutTracker,
    clipboard: Option<Vec<Member>>,
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            consts: Consts::default(),
            cache: StructureCache::new(),
            ui: UiState::default(),
            gesture: GestureState::default(),
            shortcuts: ShortcutTracker::with_default_bindings(),
            clipboard: None,
        }
    }

    /// Reconfigures the base bond length. Must run before first use: every
    /// derived constant and template is a function of it, so the chosen
    /// clusters are dropped for the host to re-choose.
    pub fn set_bond_length(&mut self, length: f64) {
        debug!(length, "reconfiguring bond length");
        self.consts = Consts::new(length);
        self.ui.chosen_structure = None;
        self.ui.chosen_arrow = None;
        self.gesture.reset();
    }

    // ── Tool selection ───────────────────────────────────────

    /// Switches tools; aborts any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        debug!(?tool, "tool selected");
        self.ui.tool = tool;
        self.gesture.reset();
    }

    /// Picks a structure template by name and activates the structure tool.
    pub fn choose_structure(&mut self, name: &str) -> Result<(), EditError> {
        let cluster = StructureCluster::by_name(name, &self.consts)
            .ok_or_else(|| EditError::UnknownTemplate(name.to_owned()))?;
        self.ui.chosen_structure = Some(cluster);
        self.set_tool(Tool::Structure);
        Ok(())
    }

    /// Picks an arrow type by name and activates the arrow tool.
    pub fn choose_arrow(&mut self, name: &str) -> Result<(), EditError> {
        let cluster = ArrowCluster::by_name(name, &self.consts)
            .ok_or_else(|| EditError::UnknownTemplate(name.to_owned()))?;
        self.ui.chosen_arrow = Some(cluster);
        self.set_tool(Tool::Arrow);
        Ok(())
    }

    /// Picks a predefined label by element symbol and activates the label
    /// tool.
    pub fn choose_label(&mut self, symbol: &str) -> Result<(), EditError> {
        let label = Label::predefined(symbol).ok_or_else(|| EditError::UnknownTemplate(symbol.to_owned()))?;
        self.ui.chosen_label = Some(label);
        self.set_tool(Tool::Label);
        Ok(())
    }

    /// Sets the custom label text and activates the custom-label tool.
    pub fn set_custom_label(&mut self, text: impl Into<String>) {
        self.ui.custom_label = text.into();
        self.set_tool(Tool::CustomLabel);
    }

    /// Sets the text-area content and activates the text tool.
    pub fn set_text_area(&mut self, text: impl Into<String>) {
        self.ui.text_area = text.into();
        self.set_tool(Tool::TextArea);
    }

    // ── Gestures ─────────────────────────────────────────────

    /// Starts a gesture: deep-copies the committed structure and hit-tests
    /// the down position for the tools that need it.
    pub fn mouse_down(&mut self, position: Vector) {
        let working = self.cache.current().cloned();
        let mut atom = None;
        let mut bond = None;
        let mut arrow = None;
        if let Some(structure) = &working {
            if self.ui.tool.wants_hit_test() {
                atom = hit::atom_at(structure, position, &self.consts);
                if atom.is_none() {
                    bond = hit::bond_at(structure, position, &self.consts);
                }
                if atom.is_none() && bond.is_none() {
                    arrow = hit::arrow_at(structure, position, &self.consts);
                }
            }
        }
        self.gesture = GestureState::Down { down: position, working, atom, bond, arrow };
    }

    /// Renders a throwaway preview of what releasing here would do. Commits
    /// nothing.
    #[must_use]
    pub fn mouse_move(&mut self, position: Vector, modifiers: Modifiers) -> Option<Svg> {
        if matches!(self.ui.tool, Tool::Label | Tool::CustomLabel | Tool::Delete | Tool::None) {
            return None;
        }
        let GestureState::Down { down, working, .. } = &self.gesture else {
            return None;
        };
        let down = *down;
        let mut frozen = working.clone();

        let frozen_atom = frozen
            .as_ref()
            .and_then(|structure| hit::atom_at(structure, down, &self.consts));
        let frozen_arrow = match (&frozen, frozen_atom) {
            (Some(structure), None) => hit::arrow_at(structure, down, &self.consts),
            _ => None,
        };

        match self.ui.tool {
            Tool::Select => {
                frozen = Some(engine::make_selection(frozen.take(), position, down));
            }
            Tool::Move => {
                if let Some(structure) = &mut frozen {
                    engine::move_structure(structure, position, down);
                }
            }
            Tool::Arrow => {
                if let Some(cluster) = &self.ui.chosen_arrow {
                    frozen = Some(engine::add_arrow_on_empty(frozen.take(), position, down, cluster, &self.consts));
                }
            }
            Tool::Structure => {
                if let Some(cluster) = &self.ui.chosen_structure {
                    match (frozen_atom, &mut frozen) {
                        (Some(found), Some(structure)) => {
                            if let Err(error) = engine::modify_atom(
                                structure,
                                found.atom,
                                found.root,
                                found.abs_pos,
                                position,
                                cluster,
                                modifiers.ctrl,
                                &self.consts,
                            ) {
                                warn!(%error, "preview rejected");
                                return None;
                            }
                        }
                        _ => match engine::add_structure_on_empty(
                            frozen.take(),
                            position,
                            down,
                            cluster,
                            modifiers.ctrl,
                            &self.consts,
                        ) {
                            Ok(structure) => frozen = Some(structure),
                            Err(error) => {
                                warn!(%error, "preview rejected");
                                return None;
                            }
                        },
                    }
                }
            }
            Tool::ResizeArrow => {
                if let (Some(found), Some(structure)) = (frozen_arrow, &mut frozen) {
                    engine::resize_arrow(structure, &found, position, modifiers.ctrl);
                }
            }
            _ => {}
        }

        frozen.map(|structure| render::draw(&structure, EDITOR_SVG_ID, &self.consts))
    }

    /// Ends a gesture: applies exactly one mutation picked from the
    /// (tool, hit, modifier) table and commits the result when it changed
    /// anything.
    pub fn mouse_up(&mut self, position: Vector, modifiers: Modifiers) -> EditOutcome {
        let gesture = std::mem::take(&mut self.gesture);
        let GestureState::Down { down, working, atom, bond, arrow } = gesture else {
            return EditOutcome::unchanged();
        };
        if self.ui.tool == Tool::None {
            return EditOutcome::unchanged();
        }

        let mut working = working;
        let mut changed = true;

        if self.ui.tool == Tool::Select && working.is_some() {
            let mut structure = engine::make_selection(working.take(), position, down);
            structure.pop_selection();
            working = Some(structure);
        } else if self.ui.tool == Tool::Move && working.is_some() {
            if let Some(structure) = &mut working {
                engine::move_structure(structure, position, down);
            }
        } else if self.ui.tool == Tool::TextArea {
            working = Some(engine::add_text_area(working.take(), down, self.ui.text_area.clone()));
        } else if self.ui.tool == Tool::Arrow {
            match &self.ui.chosen_arrow {
                Some(cluster) => {
                    working = Some(engine::add_arrow_on_empty(working.take(), position, down, cluster, &self.consts));
                }
                None => changed = false,
            }
        } else if let (Some(found), Tool::RemoveLabel) = (atom, self.ui.tool) {
            if let Some(structure) = &mut working {
                engine::remove_label(structure, found.atom);
            }
        } else if let (Some(found), Tool::Delete) = (atom, self.ui.tool) {
            if let Some(structure) = &mut working {
                engine::delete_atom(structure, &found, &self.consts);
                engine::label_single_atoms(structure, &self.consts);
            }
        } else if let (Some(found), Tool::Label | Tool::CustomLabel) = (atom, self.ui.tool) {
            let label = match self.ui.tool {
                Tool::Label => self.ui.chosen_label.clone(),
                _ => Some(Label::custom(self.ui.custom_label.clone())),
            };
            match (label, &mut working) {
                (Some(label), Some(structure)) => engine::modify_label(structure, found.atom, label),
                _ => changed = false,
            }
        } else if let (Some(found), Tool::Structure) = (atom, self.ui.tool) {
            match (&self.ui.chosen_structure, &mut working) {
                (Some(cluster), Some(structure)) => {
                    if let Err(error) = engine::modify_atom(
                        structure,
                        found.atom,
                        found.root,
                        found.abs_pos,
                        position,
                        cluster,
                        modifiers.ctrl,
                        &self.consts,
                    ) {
                        warn!(%error, "edit rejected");
                        changed = false;
                    }
                }
                _ => changed = false,
            }
        } else if let (Some(found), Tool::Structure) = (bond, self.ui.tool) {
            match (&self.ui.chosen_structure, &mut working) {
                (Some(cluster), Some(structure)) => {
                    changed = engine::modify_bond(structure, &found, cluster);
                }
                _ => changed = false,
            }
        } else if let (Some(found), Tool::Delete) = (bond, self.ui.tool) {
            if let Some(structure) = &mut working {
                engine::delete_bond(structure, &found);
                engine::label_single_atoms(structure, &self.consts);
            }
        } else if let (Some(found), Tool::Delete) = (arrow, self.ui.tool) {
            if let Some(structure) = &mut working {
                engine::delete_arrow(structure, &found);
            }
        } else if let (Some(found), Tool::ResizeArrow) = (arrow, self.ui.tool) {
            if let Some(structure) = &mut working {
                engine::resize_arrow(structure, &found, position, modifiers.ctrl);
            }
        } else if self.ui.tool == Tool::Structure {
            match &self.ui.chosen_structure {
                Some(cluster) => match engine::add_structure_on_empty(
                    working.take(),
                    position,
                    down,
                    cluster,
                    modifiers.ctrl,
                    &self.consts,
                ) {
                    Ok(structure) => working = Some(structure),
                    Err(error) => {
                        warn!(%error, "edit rejected");
                        changed = false;
                    }
                },
                None => changed = false,
            }
        } else {
            changed = false;
        }

        if changed && working.is_some() {
            debug!(tool = ?self.ui.tool, "committing edit");
            self.cache.commit(working);
            EditOutcome { changed: true, svg: Some(self.current_svg()) }
        } else {
            EditOutcome::unchanged()
        }
    }

    // ── Commands ─────────────────────────────────────────────

    /// Forwards a key press to the combination tracker.
    pub fn key_down(&mut self, key: &str) {
        self.shortcuts.key_down(key);
    }

    /// Fires combinations complete at this release and applies them.
    pub fn key_up(&mut self, key: &str) -> EditOutcome {
        let fired = self.shortcuts.key_up(key);
        let mut changed = false;
        for command in fired {
            changed |= self.apply_command(command);
        }
        if changed {
            EditOutcome { changed: true, svg: Some(self.current_svg()) }
        } else {
            EditOutcome::unchanged()
        }
    }

    /// Applies one editing command. Returns whether the document changed
    /// (history moves count as changes: the host must refresh).
    pub fn apply_command(&mut self, command: EditCommand) -> bool {
        debug!(?command, "applying command");
        match command {
            EditCommand::Undo => {
                self.cache.undo();
                true
            }
            EditCommand::Redo => {
                self.cache.redo();
                true
            }
            EditCommand::SelectAll => self.commit_edited(|structure, _| {
                structure.select_all();
                true
            }),
            EditCommand::DeselectAll => self.commit_edited(|structure, _| {
                structure.deselect_all();
                true
            }),
            EditCommand::DeleteSelected => self.commit_edited(|structure, _| {
                structure.delete_selected();
                true
            }),
            EditCommand::DeleteAll => {
                self.cache.commit(None);
                true
            }
            EditCommand::Copy => {
                self.clipboard = self.selected_members();
                false
            }
            EditCommand::Cut => {
                self.clipboard = self.selected_members();
                self.commit_edited(|structure, _| {
                    structure.delete_selected();
                    true
                })
            }
            EditCommand::Paste => {
                let Some(clipboard) = self.clipboard.clone() else { return false };
                self.commit_edited(move |structure, _| {
                    structure.deselect_all();
                    for mut member in clipboard {
                        offset_member(&mut member, Vector::new(PASTE_OFFSET, PASTE_OFFSET));
                        refresh_member_ids(&mut member);
                        structure.add_member(member);
                    }
                    true
                })
            }
            EditCommand::AlignUp => self.commit_edited(|structure, _| {
                let min_max = structure.find_min_max();
                !min_max.is_empty() && structure.align_up(min_max.min_y)
            }),
            EditCommand::AlignDown => self.commit_edited(|structure, _| {
                let min_max = structure.find_min_max();
                !min_max.is_empty() && structure.align_down(min_max.max_y)
            }),
            EditCommand::AlignLeft => self.commit_edited(|structure, _| {
                let min_max = structure.find_min_max();
                !min_max.is_empty() && structure.align_left(min_max.min_x)
            }),
            EditCommand::AlignRight => self.commit_edited(|structure, _| {
                let min_max = structure.find_min_max();
                !min_max.is_empty() && structure.align_right(min_max.max_x)
            }),
            EditCommand::MoveUp => self.move_selected_by(Vector::new(0.0, -KEY_MOVE_DISTANCE)),
            EditCommand::MoveDown => self.move_selected_by(Vector::new(0.0, KEY_MOVE_DISTANCE)),
            EditCommand::MoveLeft => self.move_selected_by(Vector::new(-KEY_MOVE_DISTANCE, 0.0)),
            EditCommand::MoveRight => self.move_selected_by(Vector::new(KEY_MOVE_DISTANCE, 0.0)),
        }
    }

    fn move_selected_by(&mut self, delta: Vector) -> bool {
        self.commit_edited(move |structure, _| {
            structure.move_selected(delta);
            true
        })
    }

    /// Clones the committed structure, runs `edit` on it, and commits the
    /// copy when the edit reports a change.
    fn commit_edited<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut Structure, &Consts) -> bool,
    {
        let Some(mut structure) = self.cache.current().cloned() else { return false };
        if !edit(&mut structure, &self.consts) {
            return false;
        }
        self.cache.commit(Some(structure));
        true
    }

    fn selected_members(&self) -> Option<Vec<Member>> {
        let structure = self.cache.current()?;
        let members: Vec<Member> = structure.selected_members().into_iter().cloned().collect();
        if members.is_empty() { None } else { Some(members) }
    }

    // ── Rendering ────────────────────────────────────────────

    /// The committed structure, if any.
    #[must_use]
    pub fn current_structure(&self) -> Option<&Structure> {
        self.cache.current()
    }

    /// Full editable markup of the committed structure; empty on a blank
    /// canvas.
    #[must_use]
    pub fn current_svg(&self) -> String {
        match self.cache.current() {
            Some(structure) => render::draw(structure, EDITOR_SVG_ID, &self.consts)
                .wrap(SvgVariant::Full, "g", &[])
                .wrap(SvgVariant::Full, "svg", &[])
                .element_full,
            None => String::new(),
        }
    }

    /// Minified export markup with a fitted viewBox; empty on a blank
    /// canvas.
    #[must_use]
    pub fn export_svg(&self) -> String {
        let Some(structure) = self.cache.current() else {
            return String::new();
        };
        let drawn = render::draw(structure, EDITOR_SVG_ID, &self.consts);
        let b = drawn.min_max;
        let view_box = format!(
            "{:.2} {:.2} {:.2} {:.2}",
            b.min_x - EXPORT_MARGIN,
            b.min_y - EXPORT_MARGIN,
            b.max_x - b.min_x + 2.0 * EXPORT_MARGIN,
            b.max_y - b.min_y + 2.0 * EXPORT_MARGIN
        );
        let attrs = [
            ("viewBox", view_box),
            ("height", "100%".to_owned()),
            ("width", "100%".to_owned()),
            ("xmlns", "http://www.w3.org/2000/svg".to_owned()),
            ("xmlns:xlink", "http://www.w3.org/1999/xlink".to_owned()),
        ];
        drawn
            .wrap(SvgVariant::Mini, "g", &[])
            .wrap(SvgVariant::Mini, "svg", &attrs)
            .element_mini
    }
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new()
    }
}

fn offset_member(member: &mut Member, delta: Vector) {
    match member {
        Member::Atom(atom) => atom.coords = atom.coords.add(delta),
        Member::Arrow(arrow) => arrow.origin = arrow.origin.add(delta),
        Member::Text(text) => text.origin = text.origin.add(delta),
        Member::Selection(selection) => selection.origin = selection.origin.add(delta),
    }
}

fn refresh_member_ids(member: &mut Member) {
    fn refresh_atom(atom: &mut crate::doc::Atom) {
        atom.id = uuid::Uuid::new_v4();
        for bond in &mut atom.bonds {
            refresh_atom(&mut bond.atom);
        }
    }
    match member {
        Member::Atom(atom) => refresh_atom(atom),
        Member::Arrow(arrow) => arrow.id = uuid::Uuid::new_v4(),
        _ => {}
    }
}

// ── WASM boundary ───────────────────────────────────────────────

/// The browser-facing editor. Wraps [`EditorCore`] with string and number
/// typed methods; the host persists nothing but the returned markup.
#[wasm_bindgen]
pub struct Editor {
    core: EditorCore,
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self { core: EditorCore::new() }
    }

    /// Must be called before the first gesture; rebuilds all derived
    /// geometry.
    pub fn set_bond_length(&mut self, length: f64) {
        self.core.set_bond_length(length);
    }

    /// Activates a tool by name. Returns false for unknown names.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match Tool::from_name(name) {
            Some(tool) => {
                self.core.set_tool(tool);
                true
            }
            None => false,
        }
    }

    /// Picks a structure template by catalog name.
    pub fn choose_structure(&mut self, name: &str) -> bool {
        self.core.choose_structure(name).is_ok()
    }

    /// Picks an arrow type by catalog name.
    pub fn choose_arrow(&mut self, name: &str) -> bool {
        self.core.choose_arrow(name).is_ok()
    }

    /// Picks a predefined label by element symbol.
    pub fn choose_label(&mut self, symbol: &str) -> bool {
        self.core.choose_label(symbol).is_ok()
    }

    /// Sets the custom label text and activates that tool.
    pub fn set_custom_label(&mut self, text: &str) {
        self.core.set_custom_label(text);
    }

    /// Sets the text-area content and activates that tool.
    pub fn set_text_area(&mut self, text: &str) {
        self.core.set_text_area(text);
    }

    /// Pointer down, in editor-local coordinates.
    pub fn mouse_down(&mut self, x: f64, y: f64) {
        self.core.mouse_down(Vector::new(x, y));
    }

    /// Pointer move; returns preview markup when there is one.
    pub fn mouse_move(&mut self, x: f64, y: f64, ctrl: bool) -> Option<String> {
        let modifiers = Modifiers { ctrl, ..Modifiers::default() };
        self.core
            .mouse_move(Vector::new(x, y), modifiers)
            .map(|svg| svg.wrap(SvgVariant::Full, "g", &[]).wrap(SvgVariant::Full, "svg", &[]).element_full)
    }

    /// Pointer up; returns the JSON-serialized [`EditOutcome`].
    pub fn mouse_up(&mut self, x: f64, y: f64, ctrl: bool) -> String {
        let modifiers = Modifiers { ctrl, ..Modifiers::default() };
        let outcome = self.core.mouse_up(Vector::new(x, y), modifiers);
        serde_json::to_string(&outcome).unwrap_or_default()
    }

    /// Key down by DOM key code.
    pub fn key_down(&mut self, code: u32) {
        if let Some(key) = ShortcutTracker::key_from_code(code) {
            self.core.key_down(&key);
        }
    }

    /// Key up by DOM key code; returns the JSON-serialized outcome of any
    /// fired combinations.
    pub fn key_up(&mut self, code: u32) -> String {
        let outcome = match ShortcutTracker::key_from_code(code) {
            Some(key) => self.core.key_up(&key),
            None => EditOutcome::unchanged(),
        };
        serde_json::to_string(&outcome).unwrap_or_default()
    }

    /// Steps history back and returns the refreshed markup.
    pub fn undo(&mut self) -> String {
        self.core.apply_command(EditCommand::Undo);
        self.core.current_svg()
    }

    /// Steps history forward and returns the refreshed markup.
    pub fn redo(&mut self) -> String {
        self.core.apply_command(EditCommand::Redo);
        self.core.current_svg()
    }

    /// Clears the canvas (undoable).
    pub fn clear(&mut self) {
        self.core.apply_command(EditCommand::DeleteAll);
    }

    /// Full editable markup of the committed structure.
    #[must_use]
    pub fn svg(&self) -> String {
        self.core.current_svg()
    }

    /// Minified export markup with a fitted viewBox.
    #[must_use]
    pub fn export_svg(&self) -> String {
        self.core.export_svg()
    }

    /// JSON catalog of templates, arrows, and labels for menu construction.
    #[must_use]
    pub fn templates_json() -> String {
        serde_json::to_string(&template_catalog()).unwrap_or_default()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
