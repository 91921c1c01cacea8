/// Post-increment on the shared request counter.
pub fn next_id(req_id: &mut u64) -> u64 {
    let id = *req_id;
    *req_id = req_id.wrapping_add(1);
    id
}
