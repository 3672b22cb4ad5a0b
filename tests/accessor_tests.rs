use growbuf::GrowBuf;

#[test]
fn test_buffer_initialization() {
    let mut inline = [0u8; 16];
    let buf = GrowBuf::new(&mut inline).unwrap();

    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert!(buf.is_inline());
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.free_space(), 16);
    assert_eq!(buf.as_slice(), b"");
}

#[test]
fn test_offsets_survive_growth() {
    let mut inline = [0u8; 8];
    let mut buf = GrowBuf::new(&mut inline).unwrap();

    let first = buf.allocate(3);
    buf.as_mut_slice()[first..first + 3].copy_from_slice(b"foo");
    let second = buf.allocate(4);
    buf.as_mut_slice()[second..second + 4].copy_from_slice(b"barr");
    assert!(buf.is_inline());

    buf.extend_from_slice(&[b'.'; 100]);

    assert!(!buf.is_inline());
    assert_eq!(first, 0);
    assert_eq!(second, 3);
    assert_eq!(buf.slice(first..first + 3), Some(&b"foo"[..]));
    assert_eq!(buf.slice(second..second + 4), Some(&b"barr"[..]));
    assert_eq!(buf.at(second), Some(&b'b'));
}

#[test]
fn test_at_bounds_checking() {
    let mut inline = [0u8; 8];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    buf.extend_from_slice(b"ab");

    assert_eq!(buf.at(1), Some(&b'b'));
    assert!(buf.at(2).is_none());
    assert!(buf.slice(1..3).is_none());

    *buf.at_mut(0).unwrap() = b'z';
    assert_eq!(buf.as_slice(), b"zb");
    assert!(buf.at_mut(5).is_none());
}

#[test]
fn test_pop_and_truncate() {
    let mut inline = [0u8; 4];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    assert_eq!(buf.pop(), None);

    buf.extend_from_slice(b"hello");
    assert_eq!(buf.pop(), Some(b'o'));
    assert_eq!(buf.as_slice(), b"hell");

    buf.truncate(10);
    assert_eq!(buf.len(), 4);
    buf.truncate(1);
    assert_eq!(buf.as_slice(), b"h");
    assert_eq!(buf.capacity(), 8);
}

#[test]
fn test_clear_keeps_capacity() {
    let mut inline = [0u8; 4];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    buf.extend_from_slice(b"0123456789");
    let capacity = buf.capacity();

    buf.clear();

    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), capacity);
    assert_eq!(buf.free_space(), capacity);
}

#[test]
fn test_allocate_zero_returns_end_offset() {
    let mut inline = [0u8; 4];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    buf.push(1);

    assert_eq!(buf.allocate(0), 1);
    assert_eq!(buf.len(), 1);
}

#[test]
fn test_debug_output() {
    let mut inline = [0u8; 4];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    buf.extend_from_slice(&[1, 2]);

    assert_eq!(
        format!("{buf:?}"),
        "GrowBuf { state: Inline, len: 2, capacity: 4, data: [1, 2] }"
    );
}
