use crate::error::Result;
use crate::list::List;
use crate::matrix::Matrix;

pub fn even_numbers(numbers: &List<i64>) -> List<i64> {
    List::comprehension(numbers, |x| x, |x| x % 2 == 0)
}

/// New list of `words` ordered by ascending length; ties keep input order.
pub fn sort_by_length(words: &List<String>) -> Result<List<String>> {
    let sorted = words.shallow_copy();
    sorted.sort_by_key(|w| w.chars().count(), false)?;
    Ok(sorted)
}

pub fn matrix_sum(matrix: &Matrix<i64>) -> i64 {
    matrix
        .rows()
        .map(|row| row.with_borrow(|cells| cells.iter().sum::<i64>()))
        .sum()
}
