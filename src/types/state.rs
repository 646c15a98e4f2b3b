use super::{ClassId, Dataset, GroupId, TeacherId, TOTAL_ROWS};
use std::collections::{HashMap, HashSet};

/// `(row, col) -> class-id or empty`. Rows are the fixed 60-row weekly
/// grid; columns are room indices within one year's `Dataset`.
#[derive(Debug, Clone)]
pub struct Matrix {
    cols: usize,
    cells: Vec<Option<ClassId>>,
}

impl Matrix {
    pub fn new(cols: usize) -> Self {
        Self {
            cols,
            cells: vec![None; TOTAL_ROWS * cols],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<ClassId> {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<ClassId>) {
        self.cells[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[Option<ClassId>] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// All columns occupied at `row`, as `(col, class_id)` pairs.
    pub fn occupied_in_row(&self, row: usize) -> impl Iterator<Item = (usize, ClassId)> + '_ {
        self.row(row)
            .iter()
            .enumerate()
            .filter_map(|(c, v)| v.map(|id| (c, id)))
    }
}

/// Set of `(row, col)` cells currently unoccupied and within an allowed
/// placement window, disjoint from every cell referenced by `Filled`.
pub type FreeSet = HashSet<(usize, usize)>;

/// `class-id -> ordered list of (row, col)` cells it occupies. List length
/// always equals `class.duration`.
pub type Filled = HashMap<ClassId, Vec<(usize, usize)>>;

/// `group-idx -> multiset of occupied rows`, used to compute idle-gap cost.
pub type GroupsEmpty = HashMap<GroupId, Vec<usize>>;

/// `teacher-name -> multiset of occupied rows`, same purpose as `GroupsEmpty`.
pub type TeachersEmpty = HashMap<TeacherId, Vec<usize>>;

/// `(subject, group) -> triple of earliest start-rows` per kind
/// (lecture=0, tutorial=1, lab=2 slot), default `-1` meaning unset.
pub type SubjectsOrder = HashMap<(String, GroupId), [i32; 3]>;

/// Everything a year's construction mutates, bundled so placers, the
/// evolutionary repair loop, and the hardening pass can pass it around as
/// one unit without threading five separate arguments everywhere.
#[derive(Debug, Clone)]
pub struct PlacementState {
    pub matrix: Matrix,
    pub free: FreeSet,
    pub filled: Filled,
    pub groups_empty: GroupsEmpty,
    pub teachers_empty: TeachersEmpty,
    pub subjects_order: SubjectsOrder,
}

impl PlacementState {
    /// Builds the initial state for `dataset`: an empty matrix, every
    /// non-break cell free, and `SubjectsOrder` seeded to `[-1, -1, -1]`
    /// for every `(subject, group)` pair that has any class at all.
    pub fn new(dataset: &Dataset) -> Self {
        let cols = dataset.rooms.len();
        let mut free = HashSet::with_capacity(TOTAL_ROWS * cols);
        for row in 0..TOTAL_ROWS {
            if super::Slot::from_row(row).is_break() {
                continue;
            }
            for col in 0..cols {
                free.insert((row, col));
            }
        }

        let mut subjects_order: SubjectsOrder = HashMap::new();
        for class in &dataset.classes {
            for &g in &class.groups {
                subjects_order
                    .entry((class.subject.clone(), g))
                    .or_insert([-1, -1, -1]);
            }
        }

        Self {
            matrix: Matrix::new(cols),
            free,
            filled: HashMap::new(),
            groups_empty: HashMap::new(),
            teachers_empty: HashMap::new(),
            subjects_order,
        }
    }

    /// Places `class` at the given ordered cells, updating every index,
    /// including each `(subject, group)`'s earliest start-row for this
    /// class's kind. Caller is responsible for having verified the cells
    /// are legal.
    pub fn place(&mut self, dataset: &Dataset, class_id: ClassId, cells: Vec<(usize, usize)>) {
        let class = dataset.class(class_id);
        let first_row = cells.first().map(|&(row, _)| row as i32);
        let kind_index = match class.kind {
            super::ClassKind::Lecture => 0,
            super::ClassKind::Lab => 2,
        };

        for &(row, col) in &cells {
            self.matrix.set(row, col, Some(class_id));
            self.free.remove(&(row, col));
            for &g in &class.groups {
                self.groups_empty.entry(g).or_default().push(row);
            }
            self.teachers_empty
                .entry(class.teacher.clone())
                .or_default()
                .push(row);
        }

        if let Some(first_row) = first_row {
            for &g in &class.groups {
                let entry = self
                    .subjects_order
                    .entry((class.subject.clone(), g))
                    .or_insert([-1, -1, -1]);
                entry[kind_index] = match entry[kind_index] {
                    -1 => first_row,
                    existing => existing.min(first_row),
                };
            }
        }

        self.filled.insert(class_id, cells);
    }

    /// Reverses `place`: restores the cells to `FreeSet`, drops the class
    /// from `Matrix`, and scrubs the idle-gap bookkeeping maps.
    pub fn unplace(&mut self, dataset: &Dataset, class_id: ClassId) {
        let Some(cells) = self.filled.remove(&class_id) else {
            return;
        };
        let class = dataset.class(class_id);
        for &(row, col) in &cells {
            self.matrix.set(row, col, None);
            self.free.insert((row, col));
            for &g in &class.groups {
                if let Some(rows) = self.groups_empty.get_mut(&g) {
                    if let Some(pos) = rows.iter().position(|&r| r == row) {
                        rows.remove(pos);
                    }
                }
            }
            if let Some(rows) = self.teachers_empty.get_mut(&class.teacher) {
                if let Some(pos) = rows.iter().position(|&r| r == row) {
                    rows.remove(pos);
                }
            }
        }
    }
}
