use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::ops::Deref;
use std::ops::Index;
use std::ops::IndexMut;

/// An index that can only be compared with indices carrying the same `Tag`.
///
/// Used to keep state, symbol and block indices apart at the type level, while
/// still indexing plain vectors. Constructing one is not a proof that the index
/// is valid for any particular container.
pub struct TagIndex<T, Tag> {
    index: T,
    marker: PhantomData<fn() -> Tag>,
}

impl<T, Tag> TagIndex<T, Tag> {
    pub fn new(index: T) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }
}

impl<T: Copy, Tag> TagIndex<T, Tag> {
    /// Returns the underlying value, mostly used for indexing.
    pub fn value(&self) -> T {
        self.index
    }
}

impl<T: Default, Tag> Default for TagIndex<T, Tag> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: PartialEq, Tag> PartialEq for TagIndex<T, Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: PartialEq, Tag> Eq for TagIndex<T, Tag> {}

impl<T: PartialEq, Tag> PartialEq<T> for TagIndex<T, Tag> {
    fn eq(&self, other: &T) -> bool {
        self.index.eq(other)
    }
}

impl<T: Ord, Tag> Ord for TagIndex<T, Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T: Ord, Tag> PartialOrd for TagIndex<T, Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Hash, Tag> Hash for TagIndex<T, Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: Clone, Tag> Clone for TagIndex<T, Tag> {
    fn clone(&self) -> Self {
        Self::new(self.index.clone())
    }
}

impl<T: Copy, Tag> Copy for TagIndex<T, Tag> {}

impl<T: fmt::Debug, Tag> fmt::Debug for TagIndex<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.index.fmt(f)
    }
}

impl<T: fmt::Display, Tag> fmt::Display for TagIndex<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.index.fmt(f)
    }
}

impl<T, Tag> Deref for TagIndex<T, Tag> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.index
    }
}

impl<U, Tag> Index<TagIndex<usize, Tag>> for Vec<U> {
    type Output = U;

    fn index(&self, index: TagIndex<usize, Tag>) -> &Self::Output {
        &self[index.value()]
    }
}

impl<U, Tag> IndexMut<TagIndex<usize, Tag>> for Vec<U> {
    fn index_mut(&mut self, index: TagIndex<usize, Tag>) -> &mut Self::Output {
        &mut self[index.value()]
    }
}

impl<U, Tag> Index<TagIndex<usize, Tag>> for [U] {
    type Output = U;

    fn index(&self, index: TagIndex<usize, Tag>) -> &Self::Output {
        &self[index.value()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RedTag;
    type RedIndex = TagIndex<usize, RedTag>;

    #[test]
    fn test_tag_index_vec() {
        let mut values = vec!["a", "b", "c"];
        let index = RedIndex::new(1);

        assert_eq!(values[index], "b");
        values[index] = "d";
        assert_eq!(values.as_slice()[index], "d");
        assert_eq!(*index + 1, 2);
    }

    #[test]
    fn test_tag_index_order() {
        let mut indices = vec![RedIndex::new(3), RedIndex::new(0), RedIndex::new(2)];
        indices.sort();

        assert_eq!(indices, vec![RedIndex::new(0), RedIndex::new(2), RedIndex::new(3)]);
        assert!(RedIndex::new(4) == 4);
    }
}
