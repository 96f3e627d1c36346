use super::*;

#[test]
fn next_rating_sets_clicked_value() {
    assert_eq!(next_rating(0, 4), Some(4));
    assert_eq!(next_rating(2, 5), Some(5));
}

#[test]
fn next_rating_clicking_current_clears() {
    assert_eq!(next_rating(3, 3), None);
}

#[test]
fn next_rating_caps_at_max() {
    assert_eq!(next_rating(1, 9), Some(MAX_STARS));
}
