use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{ListError, Result};
use crate::repr::{self, Repr};
use crate::slice::SliceSpec;
use crate::sort;

/// A growable, ordered sequence behind a shared handle.
///
/// Cloning a `List` produces an alias of the same storage, the way
/// assignment binds a second name to one list object. Use
/// [`List::shallow_copy`] for a new container.
pub struct List<T> {
    items: Rc<RefCell<Vec<T>>>,
}

#[inline]
fn resolve_index(index: isize, len: usize) -> Option<usize> {
    let pos = if index < 0 {
        index + len as isize
    } else {
        index
    };
    (0..len as isize).contains(&pos).then_some(pos as usize)
}

#[inline]
fn clamp_bound(bound: isize, len: usize) -> usize {
    let len = len as isize;
    let pos = if bound < 0 {
        (bound + len).max(0)
    } else {
        bound.min(len)
    };
    pos as usize
}

fn sorted_order<K: PartialOrd + Repr>(keys: &[K], reverse: bool) -> Result<Vec<usize>> {
    let mut order = (0..keys.len()).collect::<Vec<_>>();
    sort::stable_sort_by(&mut order, |&a, &b| {
        let (ka, kb) = (&keys[a], &keys[b]);
        let ord = ka.partial_cmp(kb).ok_or_else(|| ListError::Incomparable {
            left: ka.type_name(),
            right: kb.type_name(),
        })?;
        Ok::<_, ListError>(if reverse { ord.reverse() } else { ord })
    })?;
    Ok(order)
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    /// `[map(x) for x in source if predicate(x)]`
    pub fn comprehension<S, I, M, P>(source: I, map: M, predicate: P) -> Self
    where
        I: IntoIterator<Item = S>,
        M: FnMut(S) -> T,
        P: FnMut(&S) -> bool,
    {
        source.into_iter().filter(predicate).map(map).collect()
    }

    pub fn alias(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }

    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn with_borrow<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.borrow())
    }

    pub fn set(&self, index: isize, value: T) -> Result<()> {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        let pos = resolve_index(index, len).ok_or(ListError::IndexOutOfRange { index, len })?;
        let old = std::mem::replace(&mut items[pos], value);
        drop(items);
        drop(old);
        Ok(())
    }

    pub fn append(&self, value: T) {
        self.items.borrow_mut().push(value);
    }

    /// Inserts before `index`; out-of-range indices clamp to either end.
    pub fn insert(&self, index: isize, value: T) {
        let mut items = self.items.borrow_mut();
        let pos = clamp_bound(index, items.len());
        trace!(index, pos, len = items.len(), "insert");
        items.insert(pos, value);
    }

    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        // Collect first: the source may be a snapshot of this very list.
        let incoming = iter.into_iter().collect::<Vec<_>>();
        trace!(added = incoming.len(), "extend");
        self.items.borrow_mut().extend(incoming);
    }

    pub fn pop(&self, index: Option<isize>) -> Result<T> {
        let mut items = self.items.borrow_mut();
        if items.is_empty() {
            return Err(ListError::PopFromEmpty);
        }
        let len = items.len();
        let index = index.unwrap_or(-1);
        let pos = resolve_index(index, len).ok_or(ListError::IndexOutOfRange { index, len })?;
        trace!(index, pos, len, "pop");
        Ok(items.remove(pos))
    }

    pub fn delete(&self, index: isize) -> Result<()> {
        self.pop(Some(index)).map(drop).map_err(|err| match err {
            ListError::PopFromEmpty => ListError::IndexOutOfRange { index, len: 0 },
            other => other,
        })
    }

    pub fn delete_slice(&self, spec: impl Into<SliceSpec>) -> Result<()> {
        let spec = spec.into();
        let removed = {
            let mut items = self.items.borrow_mut();
            let mut doomed = vec![false; items.len()];
            for pos in spec.positions(items.len())? {
                doomed[pos] = true;
            }

            let mut kept = Vec::with_capacity(items.len());
            let mut removed = Vec::new();
            for (item, gone) in std::mem::take(&mut *items).into_iter().zip(doomed) {
                if gone {
                    removed.push(item);
                } else {
                    kept.push(item);
                }
            }
            *items = kept;
            removed
        };
        trace!(removed = removed.len(), ?spec, "delete slice");
        Ok(())
    }

    pub fn clear(&self) {
        let old = std::mem::take(&mut *self.items.borrow_mut());
        debug!(dropped = old.len(), "clear");
    }

    pub fn reverse(&self) {
        self.items.borrow_mut().reverse();
    }

    pub fn sort(&self) -> Result<()>
    where
        T: PartialOrd + Repr,
    {
        self.sort_in_place(false)
    }

    pub fn sort_desc(&self) -> Result<()>
    where
        T: PartialOrd + Repr,
    {
        self.sort_in_place(true)
    }

    /// Sorts by `key`, calling it exactly once per element. Equal keys keep
    /// their input order, also when `reverse` is set.
    pub fn sort_by_key<K, F>(&self, key: F, reverse: bool) -> Result<()>
    where
        K: PartialOrd + Repr,
        F: FnMut(&T) -> K,
    {
        let items = std::mem::take(&mut *self.items.borrow_mut());
        let keys = items.iter().map(key).collect::<Vec<_>>();
        let order = sorted_order(&keys, reverse);
        self.commit_order(items, order)
    }

    fn sort_in_place(&self, reverse: bool) -> Result<()>
    where
        T: PartialOrd + Repr,
    {
        let items = std::mem::take(&mut *self.items.borrow_mut());
        let order = sorted_order(&items, reverse);
        self.commit_order(items, order)
    }

    // While sorting, the storage is empty; anything that shows up there came
    // from a key function touching the list.
    fn commit_order(&self, items: Vec<T>, order: Result<Vec<usize>>) -> Result<()> {
        let mut slot = self.items.borrow_mut();
        if !slot.is_empty() {
            *slot = items;
            return Err(ListError::ModifiedDuringSort);
        }

        match order {
            Ok(order) => {
                let mut cells = items.into_iter().map(Some).collect::<Vec<_>>();
                *slot = order.iter().filter_map(|&i| cells[i].take()).collect();
                debug!(len = slot.len(), "sorted");
                Ok(())
            }
            Err(err) => {
                *slot = items;
                debug!(%err, "sort rejected");
                Err(err)
            }
        }
    }
}

impl<T: Clone> List<T> {
    pub fn from_list(other: &Self) -> Self {
        other.shallow_copy()
    }

    /// A new container holding clones of the element slots. Elements that are
    /// themselves lists stay shared with the original.
    pub fn shallow_copy(&self) -> Self {
        Self::from(self.to_vec())
    }

    pub fn get(&self, index: isize) -> Result<T> {
        let items = self.items.borrow();
        let len = items.len();
        resolve_index(index, len)
            .map(|pos| items[pos].clone())
            .ok_or(ListError::IndexOutOfRange { index, len })
    }

    pub fn slice(&self, spec: impl Into<SliceSpec>) -> Result<Self> {
        let items = self.items.borrow();
        let picked = spec
            .into()
            .positions(items.len())?
            .map(|pos| items[pos].clone())
            .collect::<Vec<_>>();
        Ok(Self::from(picked))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    /// Iterates over a snapshot, so the list may be mutated inside the loop.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.to_vec().into_iter()
    }

    pub fn enumerate(&self) -> impl Iterator<Item = (usize, T)> {
        self.iter().enumerate()
    }

    pub fn concat(&self, other: &Self) -> Self {
        let mut joined = self.to_vec();
        joined.extend(other.to_vec());
        Self::from(joined)
    }

    pub fn repeat(&self, times: usize) -> Self {
        let items = self.items.borrow();
        let mut out = Vec::with_capacity(items.len() * times);
        for _ in 0..times {
            out.extend_from_slice(&items);
        }
        Self::from(out)
    }
}

impl<T: PartialEq> List<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.items.borrow().iter().any(|item| item == value)
    }

    pub fn count(&self, value: &T) -> usize {
        self.items.borrow().iter().filter(|item| *item == value).count()
    }

    pub fn index(&self, value: &T) -> Result<usize> {
        self.index_in(value, None, None)
    }

    /// First position of `value` within `start..end`, bounds normalised like
    /// slice bounds.
    pub fn index_in(&self, value: &T, start: Option<isize>, end: Option<isize>) -> Result<usize> {
        let items = self.items.borrow();
        let len = items.len();
        let lo = start.map_or(0, |b| clamp_bound(b, len));
        let hi = end.map_or(len, |b| clamp_bound(b, len));
        if lo >= hi {
            return Err(ListError::ValueNotFound);
        }
        items[lo..hi]
            .iter()
            .position(|item| item == value)
            .map(|pos| lo + pos)
            .ok_or(ListError::ValueNotFound)
    }

    /// Removes the first element equal to `value`.
    pub fn remove(&self, value: &T) -> Result<()> {
        let pos = self
            .items
            .borrow()
            .iter()
            .position(|item| item == value)
            .ok_or(ListError::ValueNotFound)?;
        let removed = self.items.borrow_mut().remove(pos);
        trace!(pos, "remove");
        drop(removed);
        Ok(())
    }
}

impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        self.alias()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(items: [T; N]) -> Self {
        Self::from(Vec::from(items))
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Clone> IntoIterator for &List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other) || *self.items.borrow() == *other.items.borrow()
    }
}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (a, b) = (self.items.borrow(), other.items.borrow());
        for (x, y) in a.iter().zip(b.iter()) {
            if x != y {
                return x.partial_cmp(y);
            }
        }
        Some(a.len().cmp(&b.len()))
    }
}

impl<T: Repr> Repr for List<T> {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        repr::guard_recursion(Rc::as_ptr(&self.items).cast(), f, |f| {
            let items = self.items.borrow();
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                item.fmt_repr(f)?;
            }
            f.write_str("]")
        })
    }

    fn type_name(&self) -> &'static str {
        "list"
    }
}

impl<T: Repr> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_repr(f)
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.borrow().iter()).finish()
    }
}

/// The integers `start, start + step, ...` up to but excluding `stop`.
pub fn range(start: i64, stop: i64, step: i64) -> Result<impl Iterator<Item = i64>> {
    if step == 0 {
        return Err(ListError::ZeroStep);
    }

    let mut next = start;
    Ok(std::iter::from_fn(move || {
        let live = if step > 0 { next < stop } else { next > stop };
        if !live {
            return None;
        }
        let current = next;
        next = next.checked_add(step).unwrap_or(stop);
        Some(current)
    }))
}

#[macro_export]
macro_rules! list {
    () => {
        $crate::List::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::List::from(vec![$($item),+])
    };
}
