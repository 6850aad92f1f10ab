/// `count` evenly spaced samples from `start` to `end`, both ends included.
///
/// `count == 1` yields `[start]`; `count == 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Row-major walk over the cartesian product of several value lists; the
/// last list varies fastest.
pub(crate) struct Odometer<'a> {
    lists: &'a [Vec<f64>],
    idx: Vec<usize>,
    done: bool,
}

impl<'a> Odometer<'a> {
    pub(crate) fn new(lists: &'a [Vec<f64>]) -> Self {
        Self {
            lists,
            idx: vec![0; lists.len()],
            done: lists.iter().any(|l| l.is_empty()),
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.lists.iter().map(|l| l.len()).product()
    }

    /// Writes the current combination into `out` and advances. Returns
    /// `false` once every combination has been produced.
    pub(crate) fn next_into(&mut self, out: &mut [f64]) -> bool {
        if self.done {
            return false;
        }
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = self.lists[k][self.idx[k]];
        }
        let mut k = self.idx.len();
        loop {
            if k == 0 {
                self.done = true;
                break;
            }
            k -= 1;
            self.idx[k] += 1;
            if self.idx[k] < self.lists[k].len() {
                break;
            }
            self.idx[k] = 0;
        }
        true
    }
}

/// Samples for a 2-D contour/surface plot: `z[i][j] = f(x[i], y[j])`.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
}
