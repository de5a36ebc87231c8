pub(crate) fn move_index(
  current: usize,
  len: usize,
  delta: i32
) -> usize {
  if len == 0 {
    return 0;
  }
  let last = (len - 1) as i64;
  (current as i64 + delta as i64)
    .clamp(0, last) as usize
}
