//! Line-oriented unified diff, enough for a human to see what the rewrite
//! got wrong. Lines keep their terminators so a missing final newline or a
//! CRLF shows up as a difference.

const CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal,
    Delete,
    Insert,
}

/// Edit script over (expected, actual) lines, built from an LCS table.
/// Each entry also records the line positions *before* the op applies.
///
/// The table is a full `(n + 1) * (m + 1)` grid of `usize`, so memory grows
/// with the product of the line counts (two 10k-line files need ~800 MB).
/// Fine for fixture-sized snippets; switch to Myers before diffing anything
/// large.
fn edit_script(a: &[&str], b: &[&str]) -> Vec<(Op, usize, usize)> {
    let (n, m) = (a.len(), b.len());
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }
    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && a[i] == b[j] {
            ops.push((Op::Equal, i, j));
            i += 1;
            j += 1;
        } else if j == m || (i < n && lcs[i + 1][j] >= lcs[i][j + 1]) {
            ops.push((Op::Delete, i, j));
            i += 1;
        } else {
            ops.push((Op::Insert, i, j));
            j += 1;
        }
    }
    ops
}

fn format_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

fn push_line(out: &mut String, prefix: char, line: &str) {
    out.push(prefix);
    out.push_str(line);
    if !line.ends_with('\n') {
        out.push_str("\n\\ No newline at end of file\n");
    }
}

/// `None` when the texts are identical.
pub fn unified(expected: &str, actual: &str, from_name: &str, to_name: &str) -> Option<String> {
    if expected == actual {
        return None;
    }
    let a: Vec<&str> = expected.split_inclusive('\n').collect();
    let b: Vec<&str> = actual.split_inclusive('\n').collect();
    let ops = edit_script(&a, &b);

    let changes: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, (op, _, _))| *op != Op::Equal)
        .map(|(idx, _)| idx)
        .collect();

    // Merge changes whose separating run of equal lines fits in shared context.
    let mut groups: Vec<(usize, usize)> = Vec::new();
    for &c in &changes {
        if let Some((_, last)) = groups.last_mut() {
            if c - *last <= 2 * CONTEXT + 1 {
                *last = c;
                continue;
            }
        }
        groups.push((c, c));
    }

    let mut out = format!("--- {}\n+++ {}\n", from_name, to_name);
    for (first, last) in groups {
        let lo = first.saturating_sub(CONTEXT);
        let hi = (last + CONTEXT + 1).min(ops.len());
        let hunk = &ops[lo..hi];
        let (_, a_start, b_start) = hunk[0];
        let a_len = hunk.iter().filter(|(op, _, _)| *op != Op::Insert).count();
        let b_len = hunk.iter().filter(|(op, _, _)| *op != Op::Delete).count();
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(a_start, a_len),
            format_range(b_start, b_len)
        ));
        for &(op, i, j) in hunk {
            match op {
                Op::Equal => push_line(&mut out, ' ', a[i]),
                Op::Delete => push_line(&mut out, '-', a[i]),
                Op::Insert => push_line(&mut out, '+', b[j]),
            }
        }
    }
    Some(out)
}
