use std::cmp::Ordering;

const INSERTION_THRESHOLD: usize = 24;

/// Stable top-down merge sort driven by a fallible comparator.
///
/// The first comparator error aborts the sort and is returned; the contents of
/// `data` are unspecified afterwards.
pub fn stable_sort_by<T, E, F>(data: &mut [T], mut cmp: F) -> Result<(), E>
where
    T: Clone,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let len = data.len();
    if len < 2 {
        return Ok(());
    }
    if is_sorted_by(data, &mut cmp)? {
        return Ok(());
    }

    let mut buf = data.to_vec();
    merge_sort_recursive(&mut buf, data, 0, len, &mut cmp)
}

fn is_sorted_by<T, E, F>(data: &[T], cmp: &mut F) -> Result<bool, E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    for pair in data.windows(2) {
        if cmp(&pair[0], &pair[1])? == Ordering::Greater {
            return Ok(false);
        }
    }
    Ok(true)
}

// Sorts `src[left..right]` into `dst[left..right]`; both hold the same
// elements on entry.
fn merge_sort_recursive<T, E, F>(
    src: &mut [T],
    dst: &mut [T],
    left: usize,
    right: usize,
    cmp: &mut F,
) -> Result<(), E>
where
    T: Clone,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let len = right - left;
    if len <= INSERTION_THRESHOLD {
        return insertion_sort(&mut dst[left..right], cmp);
    }

    let mid = left + (len >> 1);

    merge_sort_recursive(dst, src, left, mid, cmp)?;
    merge_sort_recursive(dst, src, mid, right, cmp)?;

    if cmp(&src[mid - 1], &src[mid])? != Ordering::Greater {
        dst[left..right].clone_from_slice(&src[left..right]);
        return Ok(());
    }

    merge_ranges(src, dst, left, mid, right, cmp)
}

fn insertion_sort<T, E, F>(data: &mut [T], cmp: &mut F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && cmp(&data[j - 1], &data[j])? == Ordering::Greater {
            data.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}

fn merge_ranges<T, E, F>(
    src: &[T],
    dst: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    cmp: &mut F,
) -> Result<(), E>
where
    T: Clone,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let mut i = left;
    let mut j = mid;
    let mut k = left;

    // Ties take from the left run.
    while i < mid && j < right {
        if cmp(&src[i], &src[j])? != Ordering::Greater {
            dst[k] = src[i].clone();
            i += 1;
        } else {
            dst[k] = src[j].clone();
            j += 1;
        }
        k += 1;
    }

    if i < mid {
        dst[k..(k + (mid - i))].clone_from_slice(&src[i..mid]);
    } else if j < right {
        dst[k..(k + (right - j))].clone_from_slice(&src[j..right]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn total<T: Ord>(a: &T, b: &T) -> Result<Ordering, ()> {
        Ok(a.cmp(b))
    }

    fn assert_matches_std(data: &[(u8, usize)]) {
        let mut actual = data.to_vec();
        stable_sort_by(&mut actual, |a, b| Ok::<_, ()>(a.0.cmp(&b.0))).unwrap();

        let mut expected = data.to_vec();
        expected.sort_by_key(|p| p.0);

        assert_eq!(actual, expected, "input_len={}", data.len());
    }

    #[test]
    fn edge_cases() {
        let cases: [Vec<u64>; 6] = [
            vec![],
            vec![42],
            vec![1, 2, 3, 4, 5, 6],
            vec![6, 5, 4, 3, 2, 1],
            vec![7; 128],
            vec![5, 5, 3, 3, 1, 1, 4, 4, 2, 2, 0, 0],
        ];

        for case in &cases {
            let mut actual = case.clone();
            stable_sort_by(&mut actual, total).unwrap();
            let mut expected = case.clone();
            expected.sort();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn fixed_seed_stability() {
        let mut rng = StdRng::seed_from_u64(0xD0D1_2026);
        for &size in &[2_usize, 3, 8, 31, 32, 63, 64, 127, 128, 511, 2048] {
            let data = (0..size)
                .map(|i| (rng.random_range(0..16_u8), i))
                .collect::<Vec<_>>();
            assert_matches_std(&data);
        }
    }

    #[test]
    fn sorting_sorted_input_is_identity() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        let mut data = (0..300).map(|_| rng.random::<i32>()).collect::<Vec<_>>();
        stable_sort_by(&mut data, total).unwrap();
        let once = data.clone();
        stable_sort_by(&mut data, total).unwrap();
        assert_eq!(data, once);
    }

    #[test]
    fn comparator_error_aborts() {
        let mut data = (0..100).rev().collect::<Vec<i32>>();
        let err = stable_sort_by(&mut data, |a, b| {
            if *a == 13 || *b == 13 {
                Err("thirteen")
            } else {
                Ok(a.cmp(b))
            }
        });
        assert_eq!(err, Err("thirteen"));
    }
}
