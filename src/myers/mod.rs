mod types;
pub use types::*;

use std::cmp::max;

#[derive(Clone)]
struct V {
    data: Vec<usize>,
    offset: isize,
}

impl V {
    fn new(size: usize) -> Self {
        V {
            data: vec![0; 2 * size + 1],
            offset: size as isize,
        }
    }

    fn get(&self, k: isize) -> usize {
        self.data[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, val: usize) {
        self.data[(k + self.offset) as usize] = val;
    }
}

/// Computes the shortest edit script between two sequences using the Myers
/// algorithm, expressed as positions in the old and new sequences.
///
/// Within a run of changes between two equal elements, every deletion comes
/// before every insertion.
///
/// # Examples
///
/// ```
/// use codeshift::myers::{diff, Edit};
///
/// let old = vec!["a", "b", "c"];
/// let new = vec!["a", "x", "c"];
/// assert_eq!(diff(&old, &new), vec![
///     Edit::Equal(0, 0),
///     Edit::Delete(1),
///     Edit::Insert(1),
///     Edit::Equal(2, 2),
/// ]);
/// ```
///
/// # Arguments
///
/// * `old` - The original sequence
/// * `new` - The new sequence
pub fn diff<T: Eq>(old: &[T], new: &[T]) -> Diff {
    if old.is_empty() {
        return (0..new.len()).map(Edit::Insert).collect();
    }
    if new.is_empty() {
        return (0..old.len()).map(Edit::Delete).collect();
    }

    let n = old.len();
    let m = new.len();
    let maxi = n + m;
    let mut v = V::new(maxi);
    // one snapshot of `v` per edit distance: memory grows as O((n + m) * d),
    // quadratic for blocks rewritten from scratch
    let mut trace: Vec<V> = Vec::new();
    let mut end_x = n;
    let mut end_y = m;
    'edits: for d in 0..=maxi as isize {
        for k in (-d..=d).step_by(2) {
            let mut x = if k == -d {
                v.get(k + 1)
            } else if k == d {
                v.get(k - 1) + 1
            } else {
                max(v.get(k + 1), v.get(k - 1) + 1)
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && old[x] == new[y] {
                x += 1;
                y += 1;
            }
            v.set(k, x);
            if x >= n && y >= m {
                end_x = x;
                end_y = y;
                trace.push(v.clone());
                break 'edits;
            }
        }
        trace.push(v.clone());
    }
    deletions_first(traceback(old, new, trace, end_x, end_y))
}

fn traceback<T: Eq>(old: &[T], new: &[T], trace: Vec<V>, mut x: usize, mut y: usize) -> Diff {
    let mut changes: Diff = Vec::new();
    for d in (0..trace.len()).rev() {
        let d = d as isize;
        let k = x as isize - y as isize;
        let prev_k = if k == -d {
            k + 1
        } else if k == d || trace[d as usize].get(k - 1) + 1 >= trace[d as usize].get(k + 1) {
            k - 1
        } else {
            k + 1
        };
        let prev_x = trace[d as usize].get(prev_k);
        let prev_y = prev_x as isize - prev_k;
        while x as isize > prev_x as isize && y as isize > prev_y && old[x - 1] == new[y - 1] {
            changes.push(Edit::Equal(x - 1, y - 1));
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if prev_k == k - 1 {
                changes.push(Edit::Delete(x - 1));
            } else {
                changes.push(Edit::Insert(y - 1));
            }
        }
        x = prev_x;
        y = prev_y as usize;
    }
    while x > 0 && y > 0 {
        changes.push(Edit::Equal(x - 1, y - 1));
        x -= 1;
        y -= 1;
    }

    changes.reverse();
    changes
}

/// Reorders each run of changes so deletions precede insertions, keeping
/// the relative order on each side.
fn deletions_first(edits: Diff) -> Diff {
    let mut result = Vec::with_capacity(edits.len());
    let mut inserts = Vec::new();
    for edit in edits {
        match edit {
            Edit::Insert(_) => inserts.push(edit),
            Edit::Delete(_) => result.push(edit),
            Edit::Equal(..) => {
                result.append(&mut inserts);
                result.push(edit);
            }
        }
    }
    result.append(&mut inserts);
    result
}
