use std::{collections::VecDeque, fmt};

use crate::{AvlTree, Balanced, Node, TreeNode};

impl<T> AvlTree<T>
where
    T: Ord + fmt::Display,
{
    /// Writes the tree as a Graphviz `digraph`, one `rank=same` row per level.
    ///
    /// Each node is labelled `value:balance_factor`; missing children are drawn as points.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
    {
        if self.root().is_empty() {
            return write!(w, "digraph \"graph-{name}\" {{}}");
        }

        enum Item<'a, T> {
            Node(&'a Node<T>),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(self.root()));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut missing = 0;
        let mut links = String::new();

        while !queue.is_empty() {
            use fmt::Write;

            write!(w, "{{rank=same; ")?;

            for _ in 0..queue.len() {
                let Some(item) = queue.pop_front() else {
                    break;
                };

                let (node, value) = match item {
                    Item::Node(node) => match node.value() {
                        Some(value) => (node, value),
                        None => continue,
                    },
                    Item::Missing(id) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                };

                let factor = node.balance_factor();
                write!(w, "\"graph{name}-{value}\" [label=\"{value}:{factor}\"]; ")?;

                for child in [node.left(), node.right()].into_iter().flatten() {
                    match child.value() {
                        Some(child_value) => {
                            queue.push_back(Item::Node(child));
                            writeln!(
                                links,
                                "\"graph{name}-{value}\" -> \"graph{name}-{child_value}\";"
                            )?;
                        }
                        None => {
                            queue.push_back(Item::Missing(missing));
                            writeln!(
                                links,
                                "\"graph{name}-{value}\" -> \"graph{name}-missing{missing}\";"
                            )?;
                            missing += 1;
                        }
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&links)?;

        w.write_str(" }\n}")
    }
}

#[cfg(test)]
mod tests {
    use crate::AvlTree;

    #[test]
    fn empty_graph() {
        let tree: AvlTree<u32> = AvlTree::new();
        let mut out = String::new();

        tree.dotgraph("empty", &mut out).unwrap();
        assert_eq!(out, "digraph \"graph-empty\" {}");
    }

    #[test]
    fn graph_lists_levels_and_links() {
        let tree: AvlTree<u32> = [2, 1, 3, 4].into_iter().collect();
        let mut out = String::new();

        tree.dotgraph("t", &mut out).unwrap();

        assert!(out.starts_with("digraph \"graph-t\" {\n subgraph \"subgraph-t\" {"));
        assert!(out.contains("{rank=same; \"grapht-2\" [label=\"2:-1\"]; }"));
        assert!(out.contains("\"grapht-3\" [label=\"3:-1\"]; }"));
        assert!(out.contains("\"grapht-2\" -> \"grapht-1\";"));
        assert!(out.contains("\"grapht-3\" -> \"grapht-4\";"));
        assert!(out.contains("\"grapht-1\" -> \"grapht-missing0\";"));
        assert!(out.ends_with(" }\n}"));
    }
}
