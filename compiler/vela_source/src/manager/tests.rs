use super::*;

fn two_buffers() -> (SourceManager, BufferId, BufferId) {
    let mut sm = SourceManager::new();
    let a = sm.add_buffer("a.vela", "let x\nx!\n");
    let b = sm.add_buffer("b.vela", "print(1)");
    (sm, a, b)
}

#[test]
fn test_buffers_get_disjoint_ranges() {
    let (sm, a, b) = two_buffers();
    let a_start = sm.loc_for_buffer_start(a);
    let b_start = sm.loc_for_buffer_start(b);

    assert!(a_start.is_valid());
    assert_eq!(a_start.raw(), 1);
    // a holds 9 bytes, its end position is 10, then one spare offset.
    assert_eq!(b_start.raw(), 11);
    assert_eq!(sm.find_buffer_containing(a_start.advanced(9)), Some(a));
    assert_eq!(sm.find_buffer_containing(b_start), Some(b));
}

#[test]
fn test_re_adding_identifier_returns_existing_buffer() {
    let mut sm = SourceManager::new();
    let first = sm.add_buffer("main.vela", "one");
    let second = sm.add_buffer("main.vela", "two");
    assert_eq!(first, second);
    assert_eq!(sm.buffer_count(), 1);
    assert_eq!(sm.text(first), "one");
}

#[test]
fn test_invalid_and_out_of_range_locations() {
    let (sm, a, _) = two_buffers();
    assert_eq!(sm.find_buffer_containing(SourceLoc::INVALID), None);
    assert_eq!(sm.find_buffer_containing(SourceLoc::from_raw(10_000)), None);
    assert_eq!(sm.loc_offset_in_buffer(SourceLoc::INVALID, a), None);
    assert!(SourceLoc::INVALID.advanced(4).is_invalid());
}

#[test]
fn test_offset_in_wrong_buffer_is_rejected() {
    let (sm, a, b) = two_buffers();
    let in_b = sm.loc_for_buffer_start(b).advanced(2);
    assert_eq!(sm.loc_offset_in_buffer(in_b, b), Some(2));
    assert_eq!(sm.loc_offset_in_buffer(in_b, a), None);
}

#[test]
fn test_decompose_uses_zero_based_byte_column() {
    let (sm, a, _) = two_buffers();
    let bang = sm.loc_for_buffer_start(a).advanced(7);
    assert_eq!(
        sm.decompose(bang),
        Some(DecomposedLoc {
            buffer: a,
            line: 2,
            column: 1,
        })
    );
}

#[test]
fn test_decompose_treats_carriage_return_as_line_break() {
    let mut sm = SourceManager::new();
    let id = sm.add_buffer("crlf.vela", "ab\r\ncd");
    let d = sm.loc_for_buffer_start(id).advanced(5);
    let decomposed = sm.decompose(d).map(|loc| (loc.line, loc.column));
    assert_eq!(decomposed, Some((2, 1)));
}

#[test]
fn test_line_and_column_is_one_based() {
    let (sm, a, _) = two_buffers();
    let start = sm.loc_for_buffer_start(a);
    assert_eq!(sm.line_and_column(start), Some((1, 1)));
    assert_eq!(sm.line_and_column(start.advanced(7)), Some((2, 2)));
}

#[test]
fn test_range_bytes_is_inclusive() {
    let (sm, a, b) = two_buffers();
    let start = sm.loc_for_buffer_start(a);
    let range = SourceRange::new(start, start.advanced(2));
    assert_eq!(sm.range_bytes(range), Some(&b"let"[..]));

    let across = SourceRange::new(start, sm.loc_for_buffer_start(b));
    assert_eq!(sm.range_bytes(across), None);
}

#[test]
fn test_code_completion_loc() {
    let (mut sm, _, b) = two_buffers();
    assert!(sm.code_completion_loc().is_invalid());

    sm.set_code_completion_point(b, 6);
    let loc = sm.code_completion_loc();
    assert_eq!(sm.find_buffer_containing(loc), Some(b));
    assert_eq!(sm.loc_offset_in_buffer(loc, b), Some(6));
}
