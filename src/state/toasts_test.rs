use super::*;

fn messages(state: &ToastState) -> Vec<&str> {
    state.items().iter().map(|t| t.message.as_str()).collect()
}

#[test]
fn toast_state_default_is_empty() {
    assert!(ToastState::default().items().is_empty());
}

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Success, "one");
    let b = state.push(ToastKind::Error, "two");
    assert!(b > a);
    assert_eq!(state.items()[1].kind, ToastKind::Error);
}

#[test]
fn push_past_limit_drops_oldest() {
    let mut state = ToastState::default();
    for msg in ["a", "b", "c", "d", "e"] {
        state.push(ToastKind::Success, msg);
    }
    assert_eq!(state.items().len(), MAX_VISIBLE_NOTIFICATIONS);
    assert_eq!(messages(&state), vec!["c", "d", "e"]);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Success, "a");
    state.push(ToastKind::Success, "b");
    assert!(state.dismiss(a));
    assert_eq!(messages(&state), vec!["b"]);
    assert!(!state.dismiss(a));
}

#[test]
fn dismiss_of_evicted_toast_is_noop() {
    let mut state = ToastState::default();
    let first = state.push(ToastKind::Success, "a");
    for msg in ["b", "c", "d"] {
        state.push(ToastKind::Success, msg);
    }
    assert!(!state.dismiss(first));
    assert_eq!(messages(&state), vec!["b", "c", "d"]);
}

#[test]
fn toast_kind_css_modifier() {
    assert_eq!(ToastKind::Success.css_modifier(), "toast--success");
    assert_eq!(ToastKind::Error.css_modifier(), "toast--error");
}
