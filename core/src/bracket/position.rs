//! Pure bracket-position arithmetic shared by the cup and CL knockout
//! generators and by parent-slot advancement.
use crate::fixture::Stage;

/// Which slot of the parent match a position feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Home,
    Away,
}

/// The parent position of `p` and which of its slots `p` feeds: parent =
/// floor(p/2); `p` even feeds the home slot, `p` odd feeds the away slot.
///
/// Returns `None` for the root (`p == 1`), which has no parent.
pub fn parent_of(p: u32) -> Option<(u32, Slot)> {
    if p <= 1 {
        return None;
    }
    let parent = p / 2;
    let slot = if p % 2 == 0 { Slot::Home } else { Slot::Away };
    Some((parent, slot))
}

/// Depth of a bracket position: 0 for the final (position 1), 1 for the
/// semis (2-3), etc. Position `p` has depth `floor(log2(p))`.
pub fn depth_of(p: u32) -> u32 {
    assert!(p >= 1, "bracket positions are 1-indexed");
    31 - p.leading_zeros()
}

pub fn stage_for_position(p: u32) -> Stage {
    Stage::from_bracket_depth(depth_of(p))
}

/// Smallest power of two `>= n`.
pub fn next_power_of_two(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        n.next_power_of_two()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_and_slot() {
        assert_eq!(parent_of(1), None);
        assert_eq!(parent_of(2), Some((1, Slot::Home)));
        assert_eq!(parent_of(3), Some((1, Slot::Away)));
        assert_eq!(parent_of(4), Some((2, Slot::Home)));
        assert_eq!(parent_of(7), Some((3, Slot::Away)));
    }

    #[test]
    fn depth() {
        assert_eq!(depth_of(1), 0);
        assert_eq!(depth_of(2), 1);
        assert_eq!(depth_of(3), 1);
        assert_eq!(depth_of(4), 2);
        assert_eq!(depth_of(7), 2);
        assert_eq!(depth_of(8), 3);
    }

    #[test]
    fn power_of_two() {
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(2), 2);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(48), 64);
        assert_eq!(next_power_of_two(64), 64);
    }
}
