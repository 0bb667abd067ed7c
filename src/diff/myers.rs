//! Diff Engine: shortest edit script between two texts.
//!
//! Implements Myers' O((N+M)·D) algorithm in its linear-space form: each
//! step finds the "middle snake" of an optimal path by running the greedy
//! search forward from the start and backward from the end until the two
//! frontiers overlap, then recurses on the halves on either side of it.
//! Common prefixes and suffixes are peeled off before every search, which
//! makes the usual cases (typing at the end of a line, small edits inside
//! large texts) close to linear.
//!
//! Tie-breaking is fixed, so the same inputs always produce the same script.

#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use super::{DiffKind, DiffSequence, Granularity};
use unicode_segmentation::UnicodeSegmentation;

/// Compute the character-level diff between `old` and `new`.
///
/// The result is a shortest edit script: reconstructing the Equal and
/// Delete spans yields `old`, the Equal and Insert spans yield `new`, and no
/// other script has fewer inserted plus deleted characters.
///
/// # Example
///
/// ```
/// use diffbench::diff::{compute_diff, DiffOp};
///
/// let diff = compute_diff("Hello", "Hello Go bro ");
/// assert_eq!(
///     diff.ops(),
///     &[DiffOp::Equal("Hello".into()), DiffOp::Insert(" Go bro ".into())]
/// );
/// ```
pub fn compute_diff(old: &str, new: &str) -> DiffSequence {
    compute_diff_with(old, new, Granularity::Char)
}

/// Compute the diff between `old` and `new` at the given granularity.
pub fn compute_diff_with(old: &str, new: &str, granularity: Granularity) -> DiffSequence {
    let old_tokens = tokenize(old, granularity);
    let new_tokens = tokenize(new, granularity);

    let mut script = Script::default();
    let mut search = Search::new(old_tokens.len() + new_tokens.len());
    search.conquer(&old_tokens, &new_tokens, &mut script);

    script.into_sequence(&old_tokens, &new_tokens)
}

/// Split `text` into the units the engine compares.
///
/// Concatenating the tokens always gives back `text`.
fn tokenize(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Char => text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect(),
        Granularity::Word => text.split_word_bounds().collect(),
        Granularity::Line => text.split_inclusive('\n').collect(),
    }
}

/// Edit script as runs of token counts, before text is attached.
#[derive(Debug, Default)]
struct Script {
    runs: Vec<(DiffKind, usize)>,
}

impl Script {
    fn push(&mut self, kind: DiffKind, count: usize) {
        if count == 0 {
            return;
        }
        match self.runs.last_mut() {
            Some((last, n)) if *last == kind => *n += count,
            _ => self.runs.push((kind, count)),
        }
    }

    /// Attach token text to the runs.
    ///
    /// Between two Equal spans, all deletions are emitted as one Delete
    /// followed by all insertions as one Insert. Reordering inside a change
    /// run keeps both sides in their original order and does not change the
    /// script's cost.
    fn into_sequence(self, old: &[&str], new: &[&str]) -> DiffSequence {
        let mut sequence = DiffSequence::new();
        let mut deleted = String::new();
        let mut inserted = String::new();
        let (mut i, mut j) = (0, 0);

        for (kind, count) in self.runs {
            match kind {
                DiffKind::Equal => {
                    sequence.push(DiffKind::Delete, &std::mem::take(&mut deleted));
                    sequence.push(DiffKind::Insert, &std::mem::take(&mut inserted));
                    sequence.push(DiffKind::Equal, &old[i..i + count].concat());
                    i += count;
                    j += count;
                }
                DiffKind::Delete => {
                    deleted.extend(old[i..i + count].iter().copied());
                    i += count;
                }
                DiffKind::Insert => {
                    inserted.extend(new[j..j + count].iter().copied());
                    j += count;
                }
            }
        }
        sequence.push(DiffKind::Delete, &deleted);
        sequence.push(DiffKind::Insert, &inserted);

        debug_assert_eq!((i, j), (old.len(), new.len()));
        sequence
    }
}

const UNREACHED: isize = -1;

/// Furthest-reaching x per diagonal `k = x - y` for one search direction.
struct Frontier {
    v: Vec<isize>,
    offset: isize,
}

impl Frontier {
    fn new(max: usize) -> Self {
        Self {
            v: vec![UNREACHED; 2 * max + 3],
            offset: max as isize + 1,
        }
    }

    /// Forget every diagonal a problem of `span` tokens can touch.
    fn reset(&mut self, span: usize) {
        let lo = (self.offset - span as isize - 1).max(0) as usize;
        let hi = ((self.offset + span as isize + 1) as usize).min(self.v.len() - 1);
        self.v[lo..=hi].fill(UNREACHED);
    }

    fn get(&self, k: isize) -> Option<usize> {
        usize::try_from(k + self.offset)
            .ok()
            .and_then(|i| self.v.get(i))
            .and_then(|&x| usize::try_from(x).ok())
    }

    fn set(&mut self, k: isize, x: usize) {
        self.v[(k + self.offset) as usize] = x as isize;
    }

    /// Starting x on diagonal `k` after one more edit, staying inside the
    /// `n` × `m` edit graph. `None` when neither neighbour diagonal can reach
    /// `k` without leaving the graph.
    ///
    /// A down move (insertion) comes from `k + 1`, a right move (deletion)
    /// from `k - 1`; the move reaching further wins, insertions on ties.
    fn step(&self, k: isize, n: usize, m: usize) -> Option<usize> {
        let down = self.get(k + 1).filter(|&x| x as isize - k <= m as isize);
        let right = self.get(k - 1).map(|x| x + 1).filter(|&x| x <= n);
        match (down, right) {
            (Some(down), Some(right)) => Some(if right > down { right } else { down }),
            (down, right) => down.or(right),
        }
    }
}

/// The diagonal run of matches in the middle of an optimal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snake {
    x_start: usize,
    y_start: usize,
    x_end: usize,
    y_end: usize,
}

/// Reusable frontiers for the forward and backward searches.
struct Search {
    forward: Frontier,
    backward: Frontier,
}

impl Search {
    fn new(max: usize) -> Self {
        Self {
            forward: Frontier::new(max),
            backward: Frontier::new(max),
        }
    }

    fn conquer<T: PartialEq>(&mut self, old: &[T], new: &[T], script: &mut Script) {
        let prefix = common_prefix(old, new);
        script.push(DiffKind::Equal, prefix);
        let (old, new) = (&old[prefix..], &new[prefix..]);

        let suffix = common_suffix(old, new);
        let (old, new) = (&old[..old.len() - suffix], &new[..new.len() - suffix]);

        if old.is_empty() {
            script.push(DiffKind::Insert, new.len());
        } else if new.is_empty() {
            script.push(DiffKind::Delete, old.len());
        } else if let Some(snake) = self.middle_snake(old, new) {
            self.conquer(&old[..snake.x_start], &new[..snake.y_start], script);
            script.push(DiffKind::Equal, snake.x_end - snake.x_start);
            self.conquer(&old[snake.x_end..], &new[snake.y_end..], script);
        } else {
            // The frontiers always meet; this keeps the script valid regardless.
            script.push(DiffKind::Delete, old.len());
            script.push(DiffKind::Insert, new.len());
        }

        script.push(DiffKind::Equal, suffix);
    }

    /// Find the middle snake of an optimal path through `old` × `new`.
    ///
    /// The backward search runs on the reversed sequences, so its frontier
    /// stores `u = n - x` on diagonal `delta - k`.
    fn middle_snake<T: PartialEq>(&mut self, old: &[T], new: &[T]) -> Option<Snake> {
        let (n, m) = (old.len(), new.len());
        let delta = n as isize - m as isize;
        let odd = delta % 2 != 0;

        self.forward.reset(n + m);
        self.backward.reset(n + m);

        for d in 0..=((n + m + 1) / 2) as isize {
            for k in (-d..=d).step_by(2) {
                let x = if d == 0 {
                    0
                } else {
                    match self.forward.step(k, n, m) {
                        Some(x) => x,
                        None => continue,
                    }
                };
                let y = (x as isize - k) as usize;
                let run = common_prefix(&old[x..], &new[y..]);
                self.forward.set(k, x + run);

                if odd {
                    if let Some(u) = self.backward.get(delta - k) {
                        if x + run + u >= n {
                            return Some(Snake {
                                x_start: x,
                                y_start: y,
                                x_end: x + run,
                                y_end: y + run,
                            });
                        }
                    }
                }
            }

            for k in (-d..=d).step_by(2) {
                let u = if d == 0 {
                    0
                } else {
                    match self.backward.step(k, n, m) {
                        Some(u) => u,
                        None => continue,
                    }
                };
                let w = (u as isize - k) as usize;
                let run = common_suffix(&old[..n - u], &new[..m - w]);
                self.backward.set(k, u + run);

                if !odd {
                    if let Some(x) = self.forward.get(delta - k) {
                        if x + u + run >= n {
                            return Some(Snake {
                                x_start: n - u - run,
                                y_start: m - w - run,
                                x_end: n - u,
                                y_end: m - w,
                            });
                        }
                    }
                }
            }
        }

        None
    }
}

fn common_prefix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
