//! Box-drawing tree renderer for copse.
//!
//! Renders any two-child tree as centered labels connected by `┌─┴─┐`
//! rails, one level per line pair. Access to the tree goes through the
//! [`TreeSource`] trait so the renderer stays independent of the node
//! representation.

/// Structural access to a two-child tree, one node id at a time.
pub trait TreeSource {
    type Id: Copy;

    fn root(&self) -> Option<Self::Id>;
    fn left(&self, id: Self::Id) -> Option<Self::Id>;
    fn right(&self, id: Self::Id) -> Option<Self::Id>;

    /// Text shown for the node.
    fn label(&self, id: Self::Id) -> String;
}

/// Renders the tree into its graphical text layout.
///
/// An empty tree renders to an empty string. Every emitted line is
/// newline-terminated; label cells are sized from the widest label and
/// halve per level, so deep trees grow wide quickly.
pub fn render<S: TreeSource>(source: &S) -> String {
    let Some(root) = source.root() else {
        return String::new();
    };

    // Level-order collection of labels, with explicit holes so child
    // positions stay aligned under their parents.
    let mut lines: Vec<Vec<Option<String>>> = Vec::new();
    let mut level: Vec<Option<S::Id>> = vec![Some(root)];
    let mut widest = 0usize;
    let mut remaining = 1usize;

    while remaining > 0 {
        let mut line = Vec::with_capacity(level.len());
        let mut next = Vec::with_capacity(level.len() * 2);
        remaining = 0;

        for slot in &level {
            match slot {
                None => {
                    line.push(None);
                    next.push(None);
                    next.push(None);
                }
                Some(id) => {
                    let label = source.label(*id);
                    widest = widest.max(label.chars().count());
                    line.push(Some(label));

                    let left = source.left(*id);
                    let right = source.right(*id);
                    if left.is_some() {
                        remaining += 1;
                    }
                    if right.is_some() {
                        remaining += 1;
                    }
                    next.push(left);
                    next.push(right);
                }
            }
        }

        lines.push(line);
        level = next;
    }

    if widest % 2 == 1 {
        widest += 1;
    }

    let mut out = String::new();
    let mut perpiece = lines.last().map_or(0, Vec::len) * (widest + 4);

    for (depth, line) in lines.iter().enumerate() {
        let half = perpiece / 2;

        if depth > 0 {
            // Connector row: rails from each parent down to its children.
            for (j, cell) in line.iter().enumerate() {
                let mut joint = ' ';
                if j % 2 == 1 {
                    if line[j - 1].is_some() {
                        joint = if cell.is_some() { '┴' } else { '┘' };
                    } else if cell.is_some() {
                        joint = '└';
                    }
                }
                out.push(joint);

                match cell {
                    None => push_repeat(&mut out, ' ', perpiece.saturating_sub(1)),
                    Some(_) => {
                        let rail = half.saturating_sub(1);
                        if j % 2 == 0 {
                            push_repeat(&mut out, ' ', rail);
                            out.push('┌');
                            push_repeat(&mut out, '─', rail);
                        } else {
                            push_repeat(&mut out, '─', rail);
                            out.push('┐');
                            push_repeat(&mut out, ' ', rail);
                        }
                    }
                }
            }
            out.push('\n');
        }

        // Label row: each cell centered in its piece.
        for cell in line {
            let label = cell.as_deref().unwrap_or("");
            let slack = perpiece.saturating_sub(label.chars().count());
            push_repeat(&mut out, ' ', slack.div_ceil(2));
            out.push_str(label);
            push_repeat(&mut out, ' ', slack / 2);
        }
        out.push('\n');

        perpiece /= 2;
    }

    out
}

fn push_repeat(out: &mut String, ch: char, count: usize) {
    for _ in 0..count {
        out.push(ch);
    }
}
