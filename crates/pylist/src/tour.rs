use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::error::ListError;
use crate::list::{List, range};
use crate::matrix::Matrix;
use crate::repr::repr;
use crate::slice::SliceSpec;

#[derive(Debug, Error)]
pub enum TourError {
    #[error("list operation failed: {0}")]
    List(#[from] ListError),
    #[error("failed to write transcript: {0}")]
    Io(#[from] io::Error),
}

pub fn run<W: Write>(out: &mut W) -> Result<(), TourError> {
    let words = basics_and_methods(out)?;
    slicing(out)?;
    iteration(out, &words)?;
    nested(out)?;
    copying(out)?;
    Ok(())
}

fn basics_and_methods<W: Write>(out: &mut W) -> Result<List<String>, TourError> {
    debug!(part = 1, "creation & basics");
    writeln!(out, "--- PART 1: CREATION & BASICS ---")?;

    let my_list = List::from(vec![10_i64, 20, 30, 40, 50]);
    writeln!(out, "Element at index 0: {}", my_list.get(0)?)?;
    writeln!(out, "Last element (-1): {}", my_list.get(-1)?)?;

    my_list.set(1, 99)?;
    writeln!(out, "Updated index 1 to 99: {my_list}")?;
    writeln!(out, "Length of list: {}", my_list.len())?;

    debug!(part = 2, "list methods");
    writeln!(out, "\n--- PART 2: LIST METHODS ---")?;

    writeln!(out, "[Adding Elements]")?;
    my_list.append(60);
    my_list.insert(1, 15);
    my_list.extend([70, 80]);
    writeln!(out, "After Additions: {my_list}")?;

    writeln!(out, "\n[Removing Elements]")?;
    if my_list.contains(&99) {
        my_list.remove(&99)?;
    }
    writeln!(out, "After remove(99): {my_list}")?;

    let popped = my_list.pop(Some(0))?;
    writeln!(out, "Popped index 0 (Value: {popped}): {my_list}")?;

    my_list.delete(0)?;
    writeln!(out, "After del my_list[0]: {my_list}")?;

    let temp_list = List::from(vec![1_i64, 2, 3]);
    temp_list.clear();
    writeln!(out, "After clear(): {temp_list}")?;

    writeln!(out, "\n[Searching & Info]")?;
    let search_list = List::from(vec![10_i64, 20, 30, 20, 40, 20]);
    writeln!(out, "Index of 30: {}", search_list.index(&30)?)?;
    writeln!(out, "Count of 20: {}", search_list.count(&20))?;
    writeln!(out, "Is 40 in list? {}", repr(&search_list.contains(&40)))?;

    writeln!(out, "\n[Sorting & Reversing]")?;
    let sort_list = List::from(vec![3_i64, 1, 4, 1, 5, 9, 2]);
    sort_list.reverse();
    writeln!(out, "Reversed: {sort_list}")?;
    sort_list.sort()?;
    writeln!(out, "Sorted (Ascending): {sort_list}")?;
    sort_list.sort_desc()?;
    writeln!(out, "Sorted (Descending): {sort_list}")?;

    let words = ["banana", "pie", "apple"]
        .into_iter()
        .map(String::from)
        .collect::<List<_>>();
    words.sort_by_key(String::len, false)?;
    writeln!(out, "Sorted by length: {words}")?;

    Ok(words)
}

fn slicing<W: Write>(out: &mut W) -> Result<(), TourError> {
    debug!(part = 3, "slicing");
    writeln!(out, "\n--- PART 3: SLICING ---")?;

    let data = List::comprehension(range(0, 100, 10)?, |x| x, |_| true);
    writeln!(out, "Original: {data}")?;
    writeln!(out, "Slice [2:5]: {}", data.slice(2..5)?)?;
    writeln!(out, "Slice [:3]:  {}", data.slice(..3)?)?;
    writeln!(out, "Slice [5:]:  {}", data.slice(5..)?)?;
    writeln!(
        out,
        "Step [::2]:  {}",
        data.slice(SliceSpec::full().with_step(2))?
    )?;
    writeln!(out, "Reverse [::-1]: {}", data.slice(SliceSpec::reversed())?)?;
    Ok(())
}

fn iteration<W: Write>(out: &mut W, words: &List<String>) -> Result<(), TourError> {
    debug!(part = 4, "iteration");
    writeln!(out, "\n--- PART 4: ITERATION ---")?;

    write!(out, "Standard Loop: ")?;
    for item in words {
        write!(out, "{item} ")?;
    }
    writeln!(out)?;

    write!(out, "Enumerate: ")?;
    for (i, val) in words.enumerate() {
        write!(out, "[{i}:{val}] ")?;
    }
    writeln!(out)?;

    let squares = List::comprehension(range(1, 6, 1)?, |x| x * x, |_| true);
    writeln!(out, "List Comprehension (Squares): {squares}")?;

    let evens = List::comprehension(range(0, 10, 1)?, |x| x, |x| x % 2 == 0);
    writeln!(out, "Comprehension (Evens): {evens}")?;
    Ok(())
}

fn nested<W: Write>(out: &mut W) -> Result<(), TourError> {
    debug!(part = 5, "nested lists");
    writeln!(out, "\n--- PART 5: NESTED LISTS ---")?;

    let matrix = Matrix::from_rows([[1_i64, 2, 3], [4, 5, 6], [7, 8, 9]])?;
    writeln!(out, "Element at Row 1, Col 2: {}", matrix.get(1, 2)?)?;

    writeln!(out, "Matrix Elements:")?;
    for row in matrix.rows() {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

fn copying<W: Write>(out: &mut W) -> Result<(), TourError> {
    debug!(part = 6, "copying");
    writeln!(out, "\n--- PART 6: COPYING ---")?;

    let original = List::from(vec![1_i64, 2, 3]);

    let ref_copy = original.alias();
    ref_copy.set(0, 99)?;
    writeln!(out, "Original changed via reference: {original}")?;

    let copy1 = original.shallow_copy();
    let copy2 = List::from_list(&original);
    let copy3 = original.slice(SliceSpec::full())?;
    debug!(
        distinct = !copy2.is_same(&original) && !copy3.is_same(&original),
        "shallow copies"
    );

    copy1.set(0, 100)?;
    writeln!(out, "Original remains safe after shallow copy: {original}")?;
    Ok(())
}
