use crate::types::{Class, Dataset, PlacementState};

/// True iff every class already occupying `row` neither shares `class`'s
/// teacher nor any of its groups. Shared by both placer phases, the
/// evolutionary mutation, and the hardening pass.
pub fn valid_teacher_group_row(
    dataset: &Dataset,
    state: &PlacementState,
    class: &Class,
    row: usize,
) -> bool {
    state.matrix.occupied_in_row(row).all(|(_, id)| {
        let resident = dataset.class(id);
        resident.teacher != class.teacher && !resident.shares_group(class)
    })
}

/// The `duration` consecutive `(row, col)` cells a block starting at
/// `(start_row, col)` would occupy.
pub fn block_cells(start_row: usize, col: usize, duration: usize) -> Vec<(usize, usize)> {
    (start_row..start_row + duration).map(|r| (r, col)).collect()
}
