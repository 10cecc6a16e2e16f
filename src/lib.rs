//! Geometric and structural core of a browser-based chemical structure editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! molecule document (atoms linked by typed bonds into trees rooted at first
//! atoms, plus arrows and free text), hit-testing of mouse coordinates against
//! that document, the incremental edit operations behind every drawing
//! gesture, and deterministic SVG serialization of the result. The host
//! JavaScript layer is responsible only for wiring DOM events, menus, and
//! keyboard shortcuts to [`editor::Editor`] and for displaying the returned
//! markup.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Pure 2D vector math and fixed-decimal comparisons |
//! | [`consts`] | Derived geometry constants and the 24 compass directions |
//! | [`doc`] | Document model: atoms, bonds, labels, arrows, structures |
//! | [`templates`] | Pre-built per-direction bond and ring template clusters |
//! | [`hit`] | Hit-testing against atoms, bonds, and arrows |
//! | [`engine`] | Structural mutations: attach, delete, modify, label |
//! | [`path`] | SVG path data for each bond and arrow type |
//! | [`render`] | Walks a structure into editable and export SVG markup |
//! | [`input`] | Tools, modifiers, gesture state, keyboard combinations |
//! | [`cache`] | Bounded snapshot history for undo/redo |
//! | [`editor`] | Top-level editor and testable [`editor::EditorCore`] |

pub mod cache;
pub mod consts;
pub mod doc;
pub mod editor;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod path;
pub mod render;
pub mod templates;
