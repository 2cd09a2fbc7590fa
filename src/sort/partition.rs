/// Where a partitioned slice splits into the two ranges that still need sorting.
///
/// The left range is `v[..left]` and the right one is `v[right..]`. Either
/// `left == right`, or `right == left + 1` and `v[left]` equals the pivot, which
/// is then already in its final place.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Split {
    /// Exclusive end of the left range; everything before it is `<=` the pivot.
    pub left: usize,
    /// Start of the right range; everything from it on is `>=` the pivot.
    pub right: usize,
}

/// Partitions `v` around the element at its midpoint with a Hoare scan.
///
/// A left cursor advances over elements strictly less than the pivot, a right
/// cursor retreats over elements strictly greater than it, and the two stopped
/// elements are exchanged until the cursors cross. Elements equal to the pivot
/// may end up on either side.
///
/// `v` needs at least two elements; both returned ranges are then strictly
/// shorter than `v`.
pub fn partition<T>(v: &mut [T]) -> Split
where
    T: Ord + Copy,
{
    debug_assert!(v.len() >= 2);

    let pivot = v[(v.len() - 1) / 2];
    let mut low = 0isize;
    let mut high = v.len() as isize - 1;

    // Both scans stay in bounds: the pivot stops them on the first pass, and
    // afterwards the elements just swapped behind each cursor do.
    while low <= high {
        while v[low as usize] < pivot {
            low += 1;
        }

        while v[high as usize] > pivot {
            high -= 1;
        }

        if low <= high {
            v.swap(low as usize, high as usize);
            low += 1;
            high -= 1;
        }
    }

    Split {
        left: (high + 1) as usize,
        right: low as usize,
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn check(mut v: Vec<i32>) {
        let pivot = v[(v.len() - 1) / 2];
        let mut expected = v.clone();
        expected.sort();

        let split = partition(&mut v);

        assert!(split.left <= split.right);
        assert!(split.right - split.left <= 1);
        assert!(split.left < v.len());
        assert!(split.right > 0);

        assert!(v[..split.left].iter().all(|&e| e <= pivot));
        assert!(v[split.right..].iter().all(|&e| e >= pivot));
        if split.right > split.left {
            assert_eq!(v[split.left], pivot);
        }

        v.sort();
        assert_eq!(v, expected);
    }

    #[test]
    fn basic() {
        let mut v = vec![5, 3, 8, 1, 9, 2];
        let split = partition(&mut v);
        assert_eq!(v, vec![5, 3, 2, 1, 9, 8]);
        assert_eq!(split, Split { left: 4, right: 4 });
    }

    #[test]
    fn pivot_in_place() {
        let mut v = vec![1, 2, 3];
        let split = partition(&mut v);
        assert_eq!(v, vec![1, 2, 3]);
        assert_eq!(split, Split { left: 1, right: 2 });
    }

    #[test]
    fn two_elements() {
        let mut v = vec![2, 1];
        assert_eq!(partition(&mut v), Split { left: 1, right: 1 });
        assert_eq!(v, vec![1, 2]);

        let mut v = vec![1, 2];
        assert_eq!(partition(&mut v), Split { left: 0, right: 1 });
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn duplicates() {
        let mut v = vec![1, 1, 1];
        assert_eq!(partition(&mut v), Split { left: 1, right: 2 });
        assert_eq!(v, vec![1, 1, 1]);

        check(vec![7; 64]);
        check(vec![3, 3, 1, 3, 3, 0, 3]);
    }

    #[test]
    fn random() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for len in 2..128 {
            let v: Vec<i32> = (0..len).map(|_| rng.gen_range(0..16)).collect();
            check(v);

            let v: Vec<i32> = (0..len).map(|_| rng.gen_range(-1000..1000)).collect();
            check(v);
        }
    }
}
