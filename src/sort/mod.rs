//! #### Parallel Quick Sort
//! An in-place quick sort whose recursion is expressed as jobs of a fork-join
//! `Scope`. Every partition step hands its two sub-slices to the scheduler as
//! independent jobs and returns at once; the only join is the one around the
//! whole sort, in `sort_in`.
//!
//! The pivot is always the midpoint element. Sorted and reverse-sorted inputs
//! split evenly, but crafted inputs may still degrade to linear depth.

mod partition;

pub use self::partition::{partition, Split};

use crate::sched::{ScheduleSystem, Scope};

lazy_static! {
    static ref SCHED: ScheduleSystem = {
        let num = num_cpus::get() as u32;
        ScheduleSystem::new(num, None).unwrap_or_else(|err| {
            warn!("[Sort] Failed to spawn {} workers, sorting on the caller. {}", num, err);
            ScheduleSystem::headless()
        })
    };
}

/// Sorts `v` in ascending order on a process-wide scheduler with one worker per
/// logical CPU. Blocks until `v` is sorted.
pub fn sort<T>(v: &mut [T])
where
    T: Ord + Copy + Send,
{
    sort_in(&SCHED, v);
}

/// Sorts `v` in ascending order with the workers of `sched`. Blocks until every
/// job spawned by the sort has completed.
pub fn sort_in<T>(sched: &ScheduleSystem, v: &mut [T])
where
    T: Ord + Copy + Send,
{
    if v.len() < 2 {
        return;
    }

    debug!("[Sort] Sorts {} elements with {} workers.", v.len(), sched.len());
    sched.scope(|s| s.spawn(move |s| quick_sort(s, v)));
}

/// Partitions `v` and spawns the sorting of both halves into `scope`, without
/// waiting for them.
pub fn quick_sort<'s, T>(scope: &Scope<'s>, v: &'s mut [T])
where
    T: Ord + Copy + Send + 's,
{
    if v.len() < 2 {
        return;
    }

    let split = partition(v);
    let (lo, hi) = v.split_at_mut(split.right);
    let lo = &mut lo[..split.left];

    scope.spawn(move |s| quick_sort(s, lo));
    scope.spawn(move |s| quick_sort(s, hi));
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn basic() {
        let mut v = vec![5, 3, 8, 1, 9, 2];
        sort(&mut v);
        assert_eq!(v, vec![1, 2, 3, 5, 8, 9]);

        let mut v = vec![1, 1, 1];
        sort(&mut v);
        assert_eq!(v, vec![1, 1, 1]);
    }

    #[test]
    fn trivial() {
        let mut v: Vec<i32> = vec![];
        sort(&mut v);
        assert!(v.is_empty());

        let mut v = vec![42];
        sort(&mut v);
        assert_eq!(v, vec![42]);
    }

    #[test]
    fn quick_sort_in_scope() {
        let sched = ScheduleSystem::new(4, None).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let mut data: Vec<i32> = (0..6 * 1024).collect();
        data.shuffle(&mut rng);

        let mut sorted_data = data.clone();
        sorted_data.sort();

        sched.scope(|s| quick_sort(s, &mut data));
        assert_eq!(data, sorted_data);
    }

    #[test]
    fn headless() {
        let sched = ScheduleSystem::headless();
        let mut v: Vec<i32> = (0..512).rev().collect();
        sort_in(&sched, &mut v);
        assert_eq!(v, (0..512).collect::<Vec<_>>());
    }
}
