//! Course video-order list operations.
//!
//! A course stores its playback order as a single array of video ids. The
//! functions here compute new orderings in memory; `learnhub-db` reads the
//! current array, calls into this module, and writes the result back in one
//! statement. Uniqueness of ids within the array is an invariant maintained
//! by callers inserting each video at most once.

use crate::error::CoreError;
use crate::types::DbId;

/// Insert `video_id` at `position` in the ordering.
///
/// `position` is a zero-based index into the current sequence; a position
/// equal to the length appends. All elements at or after `position` shift
/// right. The id itself is not checked against the existing members, so
/// inserting an id that is already present produces a duplicate entry.
pub fn insert_at(order: &[DbId], video_id: DbId, position: usize) -> Result<Vec<DbId>, CoreError> {
    if position > order.len() {
        return Err(CoreError::InvalidPosition {
            position,
            len: order.len(),
        });
    }

    let mut next = Vec::with_capacity(order.len() + 1);
    next.extend_from_slice(&order[..position]);
    next.push(video_id);
    next.extend_from_slice(&order[position..]);
    Ok(next)
}

/// Remove `video_id` from the ordering, preserving the relative order of the
/// remaining elements.
///
/// Removing from an empty ordering is an error. Removing an id that is not
/// present from a non-empty ordering succeeds and returns the ordering
/// unchanged; both behaviors match the rest of the platform's expectations
/// and must not be "fixed" independently.
pub fn remove(order: &[DbId], video_id: DbId) -> Result<Vec<DbId>, CoreError> {
    if order.is_empty() {
        return Err(CoreError::EmptyList);
    }

    Ok(order.iter().copied().filter(|&v| v != video_id).collect())
}

/// Validate a proposed replacement ordering against the current one.
///
/// Every id in `proposed` must already be a member of `current`; the first
/// unknown id fails the whole request. The check is membership only:
/// `proposed` may omit current members, in which case the omitted videos are
/// silently dropped from the course when the caller persists the result.
pub fn validate_reorder(current: &[DbId], proposed: &[DbId]) -> Result<(), CoreError> {
    for &video_id in proposed {
        if !current.contains(&video_id) {
            return Err(CoreError::InvalidVideoReference(video_id));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    // -- insert_at -----------------------------------------------------------

    #[test]
    fn insert_into_empty_list() {
        assert_eq!(insert_at(&[], 7, 0).unwrap(), vec![7]);
    }

    #[test]
    fn insert_at_front_shifts_everything_right() {
        assert_eq!(insert_at(&[1, 2, 3], 9, 0).unwrap(), vec![9, 1, 2, 3]);
    }

    #[test]
    fn insert_in_middle_keeps_relative_order() {
        assert_eq!(insert_at(&[1, 2, 3], 9, 1).unwrap(), vec![1, 9, 2, 3]);
    }

    #[test]
    fn insert_at_len_appends() {
        assert_eq!(insert_at(&[1, 2, 3], 9, 3).unwrap(), vec![1, 2, 3, 9]);
    }

    #[test]
    fn insert_past_len_is_invalid() {
        let err = insert_at(&[1, 2, 3], 9, 4).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidPosition { position: 4, len: 3 }
        ));
    }

    #[test]
    fn insert_grows_list_by_exactly_one_at_every_valid_position() {
        let order = [10, 20, 30, 40];
        for position in 0..=order.len() {
            let next = insert_at(&order, 99, position).unwrap();
            assert_eq!(next.len(), order.len() + 1);
            assert_eq!(next[position], 99);
            // Previously-present ids keep their relative order.
            let rest: Vec<_> = next.iter().copied().filter(|&v| v != 99).collect();
            assert_eq!(rest, order);
        }
    }

    #[test]
    fn insert_does_not_reject_duplicates() {
        assert_eq!(insert_at(&[1, 2], 2, 0).unwrap(), vec![2, 1, 2]);
    }

    // -- remove --------------------------------------------------------------

    #[test]
    fn remove_from_empty_list_errors() {
        assert!(matches!(remove(&[], 1).unwrap_err(), CoreError::EmptyList));
    }

    #[test]
    fn remove_only_element_yields_empty_list() {
        assert_eq!(remove(&[5], 5).unwrap(), Vec::<DbId>::new());
    }

    #[test]
    fn remove_preserves_relative_order() {
        assert_eq!(remove(&[1, 2, 3, 4], 2).unwrap(), vec![1, 3, 4]);
    }

    #[test]
    fn remove_absent_id_is_a_no_op() {
        assert_eq!(remove(&[1, 2, 3], 9).unwrap(), vec![1, 2, 3]);
    }

    // -- validate_reorder ----------------------------------------------------

    #[test]
    fn reorder_permutation_is_valid() {
        assert!(validate_reorder(&[1, 2, 3], &[3, 1, 2]).is_ok());
    }

    #[test]
    fn reorder_subset_is_valid() {
        // Omitted members are silently dropped by the caller.
        assert!(validate_reorder(&[1, 2, 3], &[3, 1]).is_ok());
    }

    #[test]
    fn reorder_empty_proposal_is_valid() {
        assert!(validate_reorder(&[1, 2], &[]).is_ok());
    }

    #[test]
    fn reorder_with_unknown_id_fails() {
        let err = validate_reorder(&[1, 2, 3], &[1, 9]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidVideoReference(9)));
    }

    #[test]
    fn reorder_unknown_id_fails_even_when_rest_matches() {
        assert!(validate_reorder(&[], &[1]).is_err());
    }

    // -- combined scenario ---------------------------------------------------

    #[test]
    fn insert_remove_reorder_scenario() {
        let (a, b, c, z) = (1, 2, 3, 99);

        // Start: [A, B]; insert C at 1 -> [A, C, B].
        let order = insert_at(&[a, b], c, 1).unwrap();
        assert_eq!(order, vec![a, c, b]);

        // Remove A -> [C, B].
        let order = remove(&order, a).unwrap();
        assert_eq!(order, vec![c, b]);

        // Reorder to [B, C] is a valid permutation.
        validate_reorder(&order, &[b, c]).unwrap();

        // Reorder containing Z (never present) fails and leaves the stored
        // ordering untouched (validation happens before any write).
        let err = validate_reorder(&order, &[b, z]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidVideoReference(id) if id == z));
        assert_eq!(order, vec![c, b]);
    }
}
