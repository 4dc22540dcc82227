//! Deduplication of regions found by both passes or by several rules.

use crate::domain::Region;

/// Clusters regions that cover the same text and merges each cluster.
///
/// Each unprocessed region collects every later unprocessed region on the
/// same page whose intersection with it exceeds `min_overlap` of the
/// smaller area. Output keeps the order of each cluster's first member.
pub fn merge_overlapping(regions: Vec<Region>, min_overlap: f32) -> Vec<Region> {
    let mut processed = vec![false; regions.len()];
    let mut merged = Vec::with_capacity(regions.len());

    for (i, anchor) in regions.iter().enumerate() {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        let anchor_box = anchor.bbox();
        let mut cluster = vec![anchor];
        for (j, other) in regions.iter().enumerate().skip(i + 1) {
            if processed[j] || other.page_number != anchor.page_number {
                continue;
            }
            if anchor_box.overlap_ratio(&other.bbox()) > min_overlap {
                processed[j] = true;
                cluster.push(other);
            }
        }

        merged.extend(merge_cluster(&cluster));
    }

    merged
}

/// Merges a cluster into one region covering every member.
///
/// Text and pattern come from the member with the longest matched text;
/// the first such member wins ties. A single-member cluster is returned
/// unchanged.
pub fn merge_cluster(cluster: &[&Region]) -> Option<Region> {
    let (first, rest) = cluster.split_first()?;
    if rest.is_empty() {
        return Some((*first).clone());
    }

    let mut representative = *first;
    for candidate in rest {
        if candidate.matched_text.chars().count() > representative.matched_text.chars().count() {
            representative = *candidate;
        }
    }

    let bbox = cluster
        .iter()
        .map(|r| r.bbox())
        .reduce(|acc, b| acc.union(&b))?;
    let mut region = representative.clone();
    region.set_bbox(bbox);
    Some(region)
}
