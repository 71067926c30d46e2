//! Ratcliff/Obershelp string similarity.
//!
//! `ratio = 2·M / T`, where `M` is the total length of the matching blocks
//! found by repeatedly taking the longest common substring and recursing on
//! the pieces to either side, and `T` is the combined length of both strings.

/// Similarity of `a` and `b` in [0.0, 1.0]. Two empty strings score 1.0.
///
/// Block selection is order-sensitive on ties: `a` is the reference string
/// (a vocabulary token), `b` the reported text.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Sum of the matching block sizes.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;

        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]` as
/// `(start_in_a, start_in_b, len)`. Earliest in `a`, then in `b`, on ties.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);

    // prev[j - blo]: length of the match ending at a[i - 1], b[j]
    let mut prev = vec![0usize; bhi - blo];
    let mut curr = vec![0usize; bhi - blo];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = if a[i] == b[j] {
                if j > blo {
                    prev[j - blo - 1] + 1
                } else {
                    1
                }
            } else {
                0
            };
            curr[j - blo] = k;

            if k > best_k {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_k = k;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_k)
}
