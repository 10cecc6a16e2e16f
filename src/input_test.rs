#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_parses_every_host_name() {
    let cases = [
        ("none", Tool::None),
        ("select", Tool::Select),
        ("moveStructure", Tool::Move),
        ("structure", Tool::Structure),
        ("arrow", Tool::Arrow),
        ("label", Tool::Label),
        ("customLabel", Tool::CustomLabel),
        ("removeLabel", Tool::RemoveLabel),
        ("delete", Tool::Delete),
        ("resizeArrow", Tool::ResizeArrow),
        ("textArea", Tool::TextArea),
    ];
    for (name, tool) in cases {
        assert_eq!(Tool::from_name(name), Some(tool));
    }
    assert_eq!(Tool::from_name("lasso"), None);
}

#[test]
fn default_tool_is_none() {
    assert_eq!(Tool::default(), Tool::None);
}

#[test]
fn hit_testing_tools() {
    assert!(Tool::Structure.wants_hit_test());
    assert!(Tool::Delete.wants_hit_test());
    assert!(Tool::Label.wants_hit_test());
    assert!(Tool::CustomLabel.wants_hit_test());
    assert!(Tool::RemoveLabel.wants_hit_test());
    assert!(Tool::ResizeArrow.wants_hit_test());
    assert!(!Tool::Select.wants_hit_test());
    assert!(!Tool::Move.wants_hit_test());
    assert!(!Tool::Arrow.wants_hit_test());
    assert!(!Tool::TextArea.wants_hit_test());
    assert!(!Tool::None.wants_hit_test());
}

// =============================================================
// GestureState
// =============================================================

#[test]
fn gesture_reset_is_idempotent() {
    let mut gesture = GestureState::default();
    assert!(gesture.is_idle());
    gesture.reset();
    assert!(gesture.is_idle());

    gesture = GestureState::Down {
        down: crate::geometry::Vector::new(1.0, 2.0),
        working: None,
        atom: None,
        bond: None,
        arrow: None,
    };
    assert!(!gesture.is_idle());
    gesture.reset();
    gesture.reset();
    assert!(gesture.is_idle());
}

// =============================================================
// ShortcutTracker
// =============================================================

#[test]
fn combination_fires_on_release_of_either_key() {
    let mut tracker = ShortcutTracker::with_default_bindings();
    tracker.key_down("ctrl");
    tracker.key_down("z");
    assert_eq!(tracker.key_up("z"), vec![EditCommand::Undo]);
    // ctrl alone completes nothing.
    assert!(tracker.key_up("ctrl").is_empty());
}

#[test]
fn combination_keys_release_in_any_order() {
    let mut tracker = ShortcutTracker::with_default_bindings();
    tracker.key_down("ctrl");
    tracker.key_down("z");
    // Releasing the modifier first still fires, exactly once.
    assert_eq!(tracker.key_up("ctrl"), vec![EditCommand::Undo]);
    assert!(tracker.key_up("z").is_empty());
}

#[test]
fn single_key_binding_fires_alone() {
    let mut tracker = ShortcutTracker::with_default_bindings();
    tracker.key_down("del");
    assert_eq!(tracker.key_up("del"), vec![EditCommand::DeleteSelected]);
}

#[test]
fn incomplete_combination_stays_silent() {
    let mut tracker = ShortcutTracker::with_default_bindings();
    tracker.key_down("z");
    assert!(tracker.key_up("z").is_empty());
}

#[test]
fn distinct_combinations_do_not_cross_fire() {
    let mut tracker = ShortcutTracker::with_default_bindings();
    tracker.key_down("ctrl");
    tracker.key_down("a");
    assert_eq!(tracker.key_up("a"), vec![EditCommand::SelectAll]);
    tracker.key_down("d");
    assert_eq!(tracker.key_up("d"), vec![EditCommand::DeselectAll]);
}

#[test]
fn arrow_keys_fire_moves() {
    let mut tracker = ShortcutTracker::with_default_bindings();
    tracker.key_down("leftarrow");
    assert_eq!(tracker.key_up("leftarrow"), vec![EditCommand::MoveLeft]);
    tracker.key_down("uparrow");
    assert_eq!(tracker.key_up("uparrow"), vec![EditCommand::MoveUp]);
}

#[test]
fn custom_registration_extends_the_table() {
    let mut tracker = ShortcutTracker::new();
    tracker.register("shift + x", EditCommand::DeleteAll);
    tracker.key_down("shift");
    tracker.key_down("x");
    assert_eq!(tracker.key_up("x"), vec![EditCommand::DeleteAll]);
}

#[test]
fn key_codes_translate_to_key_names() {
    assert_eq!(ShortcutTracker::key_from_code(16).as_deref(), Some("shift"));
    assert_eq!(ShortcutTracker::key_from_code(17).as_deref(), Some("ctrl"));
    assert_eq!(ShortcutTracker::key_from_code(37).as_deref(), Some("leftarrow"));
    assert_eq!(ShortcutTracker::key_from_code(38).as_deref(), Some("uparrow"));
    assert_eq!(ShortcutTracker::key_from_code(39).as_deref(), Some("rightarrow"));
    assert_eq!(ShortcutTracker::key_from_code(40).as_deref(), Some("downarrow"));
    assert_eq!(ShortcutTracker::key_from_code(46).as_deref(), Some("del"));
    assert_eq!(ShortcutTracker::key_from_code(65).as_deref(), Some("a"));
    assert_eq!(ShortcutTracker::key_from_code(90).as_deref(), Some("z"));
    assert_eq!(ShortcutTracker::key_from_code(13), None);
}
