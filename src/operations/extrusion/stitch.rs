use crate::geometry::{ChunkBetweenIntersections, ChunkCollection};

/// Chains chunks whose start coincides exactly with the running end of a
/// chain, consuming `chunks`.
///
/// A chain stops growing once it closes on its own start. A chain made of a
/// single chunk without interior points is dropped.
#[must_use]
pub fn connect(mut chunks: Vec<ChunkBetweenIntersections>) -> Vec<ChunkCollection> {
    let mut collections = Vec::new();
    let mut index = 0;
    while index < chunks.len() {
        let start = chunks[index].start.position;
        let mut end = chunks[index].end.position;
        let mut chain = vec![chunks[index].clone()];

        let mut other = index + 1;
        while other < chunks.len() {
            if chunks[other].start.position == end {
                let next = chunks.remove(other);
                end = next.end.position;
                chain.push(next);
                if end == start {
                    break;
                }
            } else {
                other += 1;
            }
        }

        let only_endpoints = chain.len() == 1 && chain[0].points.is_empty();
        if !only_endpoints {
            collections.push(ChunkCollection::new(chain));
        }
        index += 1;
    }
    collections
}
