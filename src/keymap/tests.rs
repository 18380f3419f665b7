//! Integration tests for the keymap system

use super::*;

fn ctx(editing: bool, has_focus: bool) -> KeyContext {
    KeyContext {
        editing,
        has_focus,
        can_undo: false,
    }
}

#[test]
fn test_embedded_yaml_parses() {
    let bindings = parse_keymap_yaml(get_default_keymap_yaml())
        .expect("Embedded keymap.yaml should parse successfully");

    assert!(!bindings.is_empty());
    for command in [
        Command::FocusUp,
        Command::StartEdit,
        Command::CommitEdit,
        Command::CancelEdit,
        Command::Undo,
    ] {
        assert!(
            bindings.iter().any(|b| b.command == command),
            "missing binding for {:?}",
            command
        );
    }
}

#[test]
fn test_embedded_matches_hardcoded_defaults() {
    let embedded = parse_keymap_yaml(get_default_keymap_yaml()).unwrap();
    let hardcoded = default_bindings();
    assert_eq!(embedded.len(), hardcoded.len());
    for binding in &hardcoded {
        assert!(embedded.contains(binding), "embedded keymap lacks {:?}", binding);
    }
}

#[test]
fn test_enter_depends_on_editing() {
    let keymap = Keymap::with_bindings(default_bindings());
    let enter = Keystroke::key(KeyCode::Enter);

    assert_eq!(
        keymap.lookup_with_context(&enter, Some(&ctx(false, true))),
        Some(Command::StartEdit)
    );
    assert_eq!(
        keymap.lookup_with_context(&enter, Some(&ctx(true, true))),
        Some(Command::CommitEdit)
    );
    // No focus, not editing: nothing to open
    assert_eq!(keymap.lookup_with_context(&enter, Some(&ctx(false, false))), None);
}

#[test]
fn test_arrows_inactive_while_editing() {
    let keymap = Keymap::with_bindings(default_bindings());
    let up = Keystroke::key(KeyCode::Up);
    assert_eq!(
        keymap.lookup_with_context(&up, Some(&ctx(false, true))),
        Some(Command::FocusUp)
    );
    assert_eq!(keymap.lookup_with_context(&up, Some(&ctx(true, true))), None);
}

#[test]
fn test_undo_only_when_not_editing() {
    let keymap = Keymap::with_bindings(default_bindings());
    let undo = Keystroke::new(KeyCode::Char('z'), Modifiers::cmd());
    assert_eq!(
        keymap.lookup_with_context(&undo, Some(&ctx(false, false))),
        Some(Command::Undo)
    );
    assert_eq!(keymap.lookup_with_context(&undo, Some(&ctx(true, true))), None);
}

#[test]
fn test_merge_user_override_and_unbind() {
    let user = parse_keymap_yaml(
        r#"
bindings:
  - key: "cmd+z"
    command: Unbound
  - key: "enter"
    command: CancelEdit
    when: [editing]
  - key: "ctrl+u"
    command: Undo
"#,
    )
    .unwrap();

    let keymap = Keymap::with_bindings(merge_bindings(default_bindings(), user));

    let undo = Keystroke::new(KeyCode::Char('z'), Modifiers::cmd());
    assert_eq!(keymap.lookup_with_context(&undo, Some(&ctx(false, false))), None);

    let enter = Keystroke::key(KeyCode::Enter);
    assert_eq!(
        keymap.lookup_with_context(&enter, Some(&ctx(true, true))),
        Some(Command::CancelEdit)
    );

    let ctrl_u = Keystroke::new(KeyCode::Char('u'), Modifiers::CTRL);
    assert_eq!(keymap.lookup(&ctrl_u), Some(Command::Undo));
}

#[test]
fn test_merge_user_keymap_missing_file() {
    let base = default_bindings();
    let merged = merge_user_keymap(base.clone(), std::path::Path::new("/nonexistent/keymap.yaml"));
    assert_eq!(merged, base);
}

#[test]
fn test_every_command_but_unbound_has_a_msg() {
    for binding in default_bindings() {
        assert!(binding.command.to_msg().is_some());
    }
    assert!(Command::Unbound.to_msg().is_none());
}
