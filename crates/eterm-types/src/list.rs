use std::ops::Index;

/// Homogeneous list node: every element has schema `T`.
///
/// The element count is discovered from the wire header at decode time.
/// The list owns its elements; iteration hands out borrows only, and a
/// fresh call to [`iter`](Self::iter) restarts from the first element.
///
/// ```rust
/// use eterm_types::{Atom, List};
///
/// let list: List<Atom> = vec![Atom::from("ok"), Atom::from("error")].into();
/// let names: Vec<&str> = list.iter().map(Atom::as_str).collect();
/// assert_eq!(names, ["ok", "error"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct List<T> {
    items: Vec<T>,
}

impl<T> List<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for List<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_is_restartable() {
        let list: List<i64> = (1..=3).collect();
        let first: i64 = list.iter().sum();
        let second: i64 = list.iter().sum();
        assert_eq!(first, 6);
        assert_eq!(first, second);
    }

    #[test]
    fn nested_elements_are_borrowed() {
        let inner: List<i64> = vec![1, 2].into();
        let outer: List<List<i64>> = vec![inner.clone(), List::new()].into();
        let lens: Vec<usize> = outer.iter().map(List::len).collect();
        assert_eq!(lens, [2, 0]);
        assert_eq!(outer[0], inner);
        assert!(outer.get(2).is_none());
    }

    #[test]
    fn lists_order_structurally() {
        let a: List<i64> = vec![1, 2].into();
        let b: List<i64> = vec![1, 3].into();
        assert!(a < b);
    }
}
