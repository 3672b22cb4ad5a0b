use growbuf::{BufferState, GrowBuf};

#[test]
fn test_zero_minfree_is_noop() {
    let mut inline = [0u8; 4];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    buf.extend_from_slice(b"full");

    buf.ensure_capacity(0);

    assert_eq!(buf.capacity(), 4);
    assert_eq!(buf.free_space(), 0);
    assert!(buf.is_inline());
}

#[test]
fn test_exact_fit_does_not_grow() {
    let mut inline = [0u8; 8];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    buf.extend_from_slice(b"abc");

    buf.ensure_capacity(5);

    assert_eq!(buf.capacity(), 8);
    assert!(buf.is_inline());
}

#[test]
fn test_growth_is_idempotent() {
    let mut inline = [0u8; 8];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    buf.extend_from_slice(b"abcdef");

    buf.ensure_capacity(20);
    let capacity = buf.capacity();
    buf.ensure_capacity(20);
    buf.ensure_capacity(3);

    assert_eq!(capacity, 32);
    assert_eq!(buf.capacity(), capacity);
    assert_eq!(buf.stats().grows, 1);
}

#[test]
fn test_capacity_is_power_of_two_multiple_of_odd_initial() {
    let mut inline = [0u8; 3];
    let mut buf = GrowBuf::new(&mut inline).unwrap();

    buf.ensure_capacity(13);
    assert_eq!(buf.capacity(), 24);

    buf.extend_from_slice(&[9u8; 24]);
    buf.ensure_capacity(1);
    assert_eq!(buf.capacity(), 48);
    assert_eq!(buf.stats().initial_capacity, 3);
}

#[test]
fn test_heap_state_never_reverts() {
    let mut inline = [0u8; 4];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    buf.extend_from_slice(b"12345");
    assert_eq!(buf.state(), BufferState::Heap);

    buf.clear();
    buf.ensure_capacity(1);

    assert_eq!(buf.state(), BufferState::Heap);
    assert_eq!(buf.capacity(), 8);
}

#[test]
fn test_inline_region_untouched_after_leaving_it() {
    let mut inline = [0u8; 4];
    {
        let mut buf = GrowBuf::new(&mut inline).unwrap();
        buf.extend_from_slice(b"abcd");
        buf.extend_from_slice(b"efgh");
        buf.as_mut_slice()[0] = b'X';
        assert_eq!(buf.as_slice(), b"Xbcdefgh");
        buf.release();
    }
    assert_eq!(&inline, b"abcd");
}

#[test]
fn test_release_inline_buffer() {
    let mut inline = [0u8; 4];
    let mut buf = GrowBuf::new(&mut inline).unwrap();
    buf.push(1);
    buf.release();

    assert_eq!(inline[0], 1);
}
