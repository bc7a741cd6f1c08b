// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying reorder requests to a host-owned list.

/// Moves the element at `from` to `to`, shifting the elements in between by one.
///
/// This is the move `on_list_change(from, to)` asks for: equivalent to
/// `let item = items.remove(from); items.insert(to, item);` but done in place
/// with a single rotation.
///
/// # Panics
///
/// Panics if `from` or `to` is out of bounds.
///
/// ```
/// use understory_drag_reorder::move_item;
///
/// let mut items = ['A', 'B', 'C', 'D', 'E'];
/// move_item(&mut items, 2, 4);
/// assert_eq!(items, ['A', 'B', 'D', 'E', 'C']);
/// move_item(&mut items, 4, 0);
/// assert_eq!(items, ['C', 'A', 'B', 'D', 'E']);
/// ```
pub fn move_item<T>(items: &mut [T], from: usize, to: usize) {
    assert!(
        from < items.len() && to < items.len(),
        "move_item indices out of bounds: from={from}, to={to}, len={}",
        items.len()
    );
    if from < to {
        items[from..=to].rotate_left(1);
    } else if to < from {
        items[to..=from].rotate_right(1);
    }
}

#[cfg(test)]
mod tests {
    use super::move_item;

    #[test]
    fn same_index_is_a_no_op() {
        let mut items = [1, 2, 3];
        move_item(&mut items, 1, 1);
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn adjacent_moves_swap() {
        let mut items = [1, 2, 3];
        move_item(&mut items, 0, 1);
        assert_eq!(items, [2, 1, 3]);
        move_item(&mut items, 2, 1);
        assert_eq!(items, [2, 3, 1]);
    }

    #[test]
    #[should_panic(expected = "move_item indices out of bounds")]
    fn out_of_bounds_panics() {
        let mut items = [1, 2, 3];
        move_item(&mut items, 0, 3);
    }
}
