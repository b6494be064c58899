use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::grammar::Production;

/// Position of an entry in the arena of its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

/// A nonterminal recorded in a cell, with the production and split point it
/// was derived by.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEntry {
    pub production: Production,
    pub span: (usize, usize),
    // None on the diagonal
    pub split: Option<usize>,
    pub children: Option<(EntryId, EntryId)>,
}

impl CellEntry {
    pub fn leaf(production: Production, position: usize) -> Self {
        CellEntry {
            production,
            span: (position, position),
            split: None,
            children: None,
        }
    }

    pub fn symbol(&self) -> &str {
        self.production.left().key()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// The nonterminals deriving one span of the input, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    entries: IndexMap<String, EntryId>,
}

impl Cell {
    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn get(&self, symbol: &str) -> Option<EntryId> {
        self.entries.get(symbol).copied()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, EntryId)> {
        self.entries.iter().map(|(symbol, &id)| (symbol.as_str(), id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{{{}}}", self.symbols().join(", "))
        }
    }
}

/// The upper triangle of an n×n chart. Cell (i, j) holds the nonterminals
/// deriving tokens i..=j.
#[derive(Debug, Clone)]
pub struct Table {
    size: usize,
    cells: Vec<Cell>,
    entries: Vec<CellEntry>,
    // Cells in the order they were completed
    finalized: Vec<(usize, usize)>,
}

impl Table {
    pub fn new(size: usize) -> Self {
        Table {
            size,
            cells: vec![Cell::default(); size * size],
            entries: Vec::new(),
            finalized: Vec::with_capacity(size * (size + 1) / 2),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, i: usize, j: usize) -> Option<usize> {
        (i <= j && j < self.size).then(|| i * self.size + j)
    }

    pub fn cell(&self, i: usize, j: usize) -> Option<&Cell> {
        self.index(i, j).map(|index| &self.cells[index])
    }

    /// The cell spanning the whole input
    pub fn top_cell(&self) -> Option<&Cell> {
        self.size.checked_sub(1).and_then(|last| self.cell(0, last))
    }

    pub fn entry(&self, id: EntryId) -> &CellEntry {
        &self.entries[id.0]
    }

    /// Records `entry` in the cell of its span unless the cell already has its
    /// symbol. Returns whether the entry was added.
    pub fn insert(&mut self, entry: CellEntry) -> bool {
        let (i, j) = entry.span;
        let Some(index) = self.index(i, j) else {
            return false;
        };
        if self.cells[index].contains(entry.symbol()) {
            return false;
        }

        let id = EntryId(self.entries.len());
        self.cells[index].entries.insert(entry.symbol().to_string(), id);
        self.entries.push(entry);
        true
    }

    pub fn finalize(&mut self, i: usize, j: usize) {
        self.finalized.push((i, j));
    }

    pub fn is_finalized(&self, i: usize, j: usize) -> bool {
        self.finalized.contains(&(i, j))
    }

    pub fn fill_order(&self) -> &[(usize, usize)] {
        &self.finalized
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

// One row per span length, the whole input first, cells left-aligned in
// columns of equal width
impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = (1..=self.size)
            .rev()
            .map(|length| {
                (0..=self.size - length)
                    .filter_map(|i| self.cell(i, i + length - 1))
                    .map(ToString::to_string)
                    .collect_vec()
            })
            .collect_vec();

        let width = rendered
            .iter()
            .flatten()
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(0);

        for row in rendered {
            let line = row.iter().map(|cell| format!("{:<width$}", cell)).join(" ");
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Symbol;

    fn leaf(left: &str, terminal: &str, position: usize) -> CellEntry {
        CellEntry::leaf(Production::new(left, vec![Symbol::terminal(terminal)]), position)
    }

    #[test]
    fn first_insert_wins() {
        let mut table = Table::new(2);
        assert!(table.insert(leaf("A", "a", 0)));
        assert!(table.insert(leaf("B", "a", 0)));
        assert!(!table.insert(leaf("A", "x", 0)));

        let cell = table.cell(0, 0).unwrap();
        assert_eq!(cell.symbols().collect_vec(), vec!["A", "B"]);
        let kept = table.entry(cell.get("A").unwrap());
        assert_eq!(kept.production.to_string(), "A -> a");
        assert!(kept.is_leaf());
        assert_eq!(table.entry_count(), 2);
    }

    #[test]
    fn only_the_upper_triangle_exists() {
        let table = Table::new(3);
        assert!(table.cell(0, 2).is_some());
        assert!(table.cell(2, 2).is_some());
        assert!(table.cell(2, 1).is_none());
        assert!(table.cell(0, 3).is_none());
        assert!(Table::new(0).top_cell().is_none());
    }

    #[test]
    fn finalization_is_recorded_in_order() {
        let mut table = Table::new(2);
        table.finalize(0, 0);
        table.finalize(1, 1);
        assert!(table.is_finalized(1, 1));
        assert!(!table.is_finalized(0, 1));
        table.finalize(0, 1);
        assert_eq!(table.fill_order(), &[(0, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn display_cells() {
        let mut table = Table::new(2);
        table.insert(leaf("A", "a", 0));
        table.insert(leaf("Bee", "a", 0));
        assert_eq!(table.cell(0, 0).unwrap().to_string(), "{A, Bee}");
        assert_eq!(table.cell(1, 1).unwrap().to_string(), "∅");
        assert_eq!(table.to_string(), "∅\n{A, Bee} ∅\n");
    }
}
