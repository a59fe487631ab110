use super::*;

#[test]
fn test_single_line() {
    let table = LineOffsetTable::build("hello world");
    assert_eq!(table.line_count(), 1);
    assert_eq!(table.line_from_offset(0), 1);
    assert_eq!(table.line_from_offset(10), 1);
    assert_eq!(table.line_and_column(4), (1, 5));
}

#[test]
fn test_multiple_lines() {
    let table = LineOffsetTable::build("abc\ndefgh\nij");
    assert_eq!(table.line_and_column(0), (1, 1));
    assert_eq!(table.line_and_column(3), (1, 4)); // the '\n' itself
    assert_eq!(table.line_and_column(4), (2, 1));
    assert_eq!(table.line_and_column(7), (2, 4));
    assert_eq!(table.line_and_column(10), (3, 1));
}

#[test]
fn test_line_start_offset() {
    let table = LineOffsetTable::build("a\nbb\nccc");
    assert_eq!(table.line_start_offset(0), None);
    assert_eq!(table.line_start_offset(1), Some(0));
    assert_eq!(table.line_start_offset(2), Some(2));
    assert_eq!(table.line_start_offset(3), Some(5));
    assert_eq!(table.line_start_offset(4), None);
}

#[test]
fn test_trailing_newline_opens_a_line() {
    let table = LineOffsetTable::build("x!\n");
    assert_eq!(table.line_count(), 2);
    assert_eq!(table.line_and_column(3), (2, 1));
}

#[test]
fn test_empty_source() {
    let table = LineOffsetTable::build("");
    assert_eq!(table.line_count(), 1);
    assert_eq!(table.line_and_column(0), (1, 1));
}
