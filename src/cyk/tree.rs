use std::fmt::Display;

use super::table::{CellEntry, EntryId, Table};
use crate::grammar::Production;

/// A view of one table entry as the root of a derivation tree.
#[derive(Debug, Clone, Copy)]
pub struct Derivation<'t> {
    table: &'t Table,
    id: EntryId,
}

impl<'t> Derivation<'t> {
    pub fn new(table: &'t Table, id: EntryId) -> Self {
        Derivation { table, id }
    }

    fn entry(&self) -> &'t CellEntry {
        self.table.entry(self.id)
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn symbol(&self) -> &'t str {
        self.entry().symbol()
    }

    pub fn production(&self) -> &'t Production {
        &self.entry().production
    }

    pub fn span(&self) -> (usize, usize) {
        self.entry().span
    }

    pub fn split(&self) -> Option<usize> {
        self.entry().split
    }

    pub fn is_leaf(&self) -> bool {
        self.entry().is_leaf()
    }

    pub fn children(&self) -> Option<(Derivation<'t>, Derivation<'t>)> {
        self.entry()
            .children
            .map(|(left, right)| (Derivation::new(self.table, left), Derivation::new(self.table, right)))
    }

    /// The terminals at the leaves, left to right. This is the parsed input.
    pub fn leaves(&self) -> Vec<&'t str> {
        match self.children() {
            Some((left, right)) => {
                let mut leaves = left.leaves();
                leaves.extend(right.leaves());
                leaves
            }
            None => self.production().right().iter().map(|symbol| symbol.key()).collect(),
        }
    }

    /// Number of nodes on the longest path down to a leaf
    pub fn height(&self) -> usize {
        match self.children() {
            Some((left, right)) => 1 + left.height().max(right.height()),
            None => 1,
        }
    }

    /// Single-line form, `(S (NP she) (VP eats))`
    pub fn bracketed(&self) -> String {
        match self.children() {
            Some((left, right)) => format!("({} {} {})", self.symbol(), left.bracketed(), right.bracketed()),
            None => format!("({} {})", self.symbol(), self.leaves().join(" ")),
        }
    }

    fn write_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        match self.children() {
            Some((left, right)) => {
                writeln!(f, "{}{}", indent, self.symbol())?;
                left.write_indented(f, depth + 1)?;
                right.write_indented(f, depth + 1)
            }
            None => writeln!(f, "{}{}", indent, self.production()),
        }
    }
}

// One node per line, children indented under their parent
impl Display for Derivation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Symbol;

    // S -> A B over "a b", built by hand
    fn small_table() -> Table {
        let nt = Symbol::nonterminal;
        let mut table = Table::new(2);
        table.insert(CellEntry::leaf(Production::new("A", vec![Symbol::terminal("a")]), 0));
        table.insert(CellEntry::leaf(Production::new("B", vec![Symbol::terminal("b")]), 1));
        let a = table.cell(0, 0).and_then(|c| c.get("A")).unwrap();
        let b = table.cell(1, 1).and_then(|c| c.get("B")).unwrap();
        table.insert(CellEntry {
            production: Production::new("S", vec![nt("A"), nt("B")]),
            span: (0, 1),
            split: Some(0),
            children: Some((a, b)),
        });
        table
    }

    fn root(table: &Table) -> Derivation<'_> {
        Derivation::new(table, table.top_cell().and_then(|c| c.get("S")).unwrap())
    }

    #[test]
    fn walks_the_arena() {
        let table = small_table();
        let tree = root(&table);

        assert_eq!(tree.symbol(), "S");
        assert_eq!(tree.span(), (0, 1));
        assert_eq!(tree.split(), Some(0));
        assert!(!tree.is_leaf());
        assert_eq!(tree.height(), 2);

        let (left, right) = tree.children().unwrap();
        assert_eq!((left.symbol(), right.symbol()), ("A", "B"));
        assert!(left.is_leaf() && right.is_leaf());
        assert!(left.children().is_none());
        assert_eq!(tree.leaves(), vec!["a", "b"]);
    }

    #[test]
    fn renderings() {
        let table = small_table();
        let tree = root(&table);
        assert_eq!(tree.bracketed(), "(S (A a) (B b))");
        assert_eq!(tree.to_string(), "S\n  A -> a\n  B -> b\n");
    }
}
