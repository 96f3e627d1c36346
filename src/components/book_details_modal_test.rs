use super::*;

#[test]
fn rating_message_for_new_rating() {
    assert_eq!(
        rating_message("Dune", Some(4)),
        (ToastKind::Success, "Rated \"Dune\" 4 stars!".to_owned())
    );
}

#[test]
fn rating_message_for_cleared_rating() {
    assert_eq!(
        rating_message("Dune", None),
        (ToastKind::Error, "Removed rating for \"Dune\"".to_owned())
    );
}

#[test]
fn newest_first_reverses_server_order() {
    let comments = vec![
        Comment { id: 1, comment: "first".to_owned(), username: "a".to_owned() },
        Comment { id: 2, comment: "second".to_owned(), username: "b".to_owned() },
    ];
    let ordered: Vec<_> = newest_first(&comments).into_iter().map(|c| c.comment).collect();
    assert_eq!(ordered, vec!["second", "first"]);
}
