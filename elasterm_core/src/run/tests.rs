use crate::color::Color;
use crate::style::Style;

use super::Run;

fn style() -> Style {
    Style::new(Color::indexed(0), Color::indexed(15))
}

fn run(text: &str) -> Run {
    Run::from_bytes(text.as_bytes().to_vec(), style())
}

#[test]
fn empty_run_has_no_characters() {
    let r = Run::new(style());
    assert_eq!(r.num_characters(), 0);
    assert!(r.is_empty());
    assert!(!r.is_tab());
}

#[test]
fn from_bytes_counts_characters() {
    assert_eq!(run("abc").num_characters(), 3);
    assert_eq!(run("a─b").num_characters(), 3);
}

#[test]
fn tab_run_is_one_character() {
    let r = Run::tab(style());
    assert!(r.is_tab());
    assert_eq!(r.num_characters(), 1);
    assert_eq!(r.bytes(), b"\t");
}

#[test]
fn append_extends_content() {
    let mut r = run("ab");
    r.append("cd".as_bytes());
    assert_eq!(r.text(), "abcd");
    assert_eq!(r.num_characters(), 4);
}

#[test]
fn append_spaces_pads() {
    let mut r = run("x");
    r.append_spaces(3);
    assert_eq!(r.text(), "x   ");
    assert_eq!(r.num_characters(), 4);
}

#[test]
fn insert_at_character_boundary() {
    let mut r = run("a─c");
    r.insert(2, b"XY");
    assert_eq!(r.text(), "a─XYc");
    assert_eq!(r.num_characters(), 5);
}

#[test]
fn insert_at_start_and_end() {
    let mut r = run("bc");
    r.insert(0, b"a");
    r.insert(3, b"d");
    assert_eq!(r.text(), "abcd");
}

#[test]
fn replace_same_width() {
    let mut r = run("abcdef");
    r.replace(2, b"XY");
    assert_eq!(r.text(), "abXYef");
    assert_eq!(r.num_characters(), 6);
}

#[test]
fn replace_multibyte_region() {
    let mut r = run("a──d");
    r.replace(1, b"bc");
    assert_eq!(r.text(), "abcd");
    assert_eq!(r.num_characters(), 4);
}

#[test]
fn delete_from_middle() {
    let mut r = run("abcde");
    r.delete(1, 3);
    assert_eq!(r.text(), "ae");
    assert_eq!(r.num_characters(), 2);
}

#[test]
fn delete_multibyte() {
    let mut r = run("a─│b");
    r.delete(1, 2);
    assert_eq!(r.text(), "ab");
    assert_eq!(r.num_characters(), 2);
}

#[test]
fn shorten_to_truncates() {
    let mut r = run("a─bc");
    r.shorten_to(2);
    assert_eq!(r.text(), "a─");
    assert_eq!(r.num_characters(), 2);

    // Shortening past the end is a no-op.
    r.shorten_to(10);
    assert_eq!(r.num_characters(), 2);
}

#[test]
fn delete_first_trims_left() {
    let mut r = run("─abc");
    r.delete_first(2);
    assert_eq!(r.text(), "bc");
    assert_eq!(r.num_characters(), 2);
}

#[test]
fn delete_first_everything() {
    let mut r = run("ab");
    r.delete_first(5);
    assert!(r.is_empty());
}

#[test]
fn split_off_divides_at_boundary() {
    let mut r = run("ab─cd");
    let tail = r.split_off(3);
    assert_eq!(r.text(), "ab─");
    assert_eq!(r.num_characters(), 3);
    assert_eq!(tail.text(), "cd");
    assert_eq!(tail.num_characters(), 2);
    assert_eq!(tail.style(), r.style());
}

#[test]
fn split_off_at_ends() {
    let mut r = run("abc");
    let tail = r.split_off(3);
    assert!(tail.is_empty());
    assert_eq!(r.num_characters(), 3);

    let mut r = run("abc");
    let tail = r.split_off(0);
    assert!(r.is_empty());
    assert_eq!(tail.num_characters(), 3);
}
