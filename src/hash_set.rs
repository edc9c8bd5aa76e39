use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DefaultHashBuilder;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// A hash set backed by the chained [`HashTable`].
///
/// `HashSet<T, S>` keeps one copy of each value under `Hash + Eq`, hashing
/// through a configurable builder `S`. Collisions land in per-bucket chains
/// and the bucket count doubles once the load factor reaches 0.7.
///
/// # Examples
///
/// ```rust
/// # #[cfg(any(feature = "std", feature = "foldhash"))]
/// # {
/// use chain_hash::HashSet;
///
/// let mut visited: HashSet<_> = HashSet::new();
/// assert!(visited.insert("start"));
/// assert!(!visited.insert("start"));
/// assert!(visited.contains(&"start"));
/// # }
/// ```
#[derive(Clone)]
pub struct HashSet<T, S = DefaultHashBuilder> {
    table: HashTable<T>,
    hash_builder: S,
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug + Hash + Eq,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash set with the given hasher builder and the default
    /// bucket count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::HashSet;
    ///
    /// let pool: HashSet<u64, _> = HashSet::with_hasher(RandomState::new());
    /// assert!(pool.is_empty());
    /// assert_eq!(pool.capacity(), 10);
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Creates a new hash set with the specified bucket count and hasher
    /// builder.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::HashSet;
    ///
    /// let pool: HashSet<u64, _> = HashSet::with_capacity_and_hasher(32, RandomState::new());
    /// assert_eq!(pool.capacity(), 32);
    /// # }
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Returns how many elements the set holds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut primes: HashSet<u32> = HashSet::new();
    /// assert_eq!(primes.len(), 0);
    /// primes.insert(2);
    /// primes.insert(3);
    /// assert_eq!(primes.len(), 2);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut seen: HashSet<u64> = HashSet::new();
    /// assert!(seen.is_empty());
    /// seen.insert(0xF00D);
    /// assert!(!seen.is_empty());
    /// # }
    /// ```
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets in the set's underlying table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::with_capacity(100);
    /// assert_eq!(set.capacity(), 100);
    /// # }
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all elements from the set, keeping the allocated buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut tags: HashSet<&str> = HashSet::new();
    /// tags.insert("draft");
    /// tags.insert("urgent");
    ///
    /// tags.clear();
    /// assert!(tags.is_empty());
    /// # }
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Shrinks the capacity of the set as much as possible.
    ///
    /// Rehashes into the smallest bucket count that keeps the current
    /// element count under the growth threshold. Automatic resizing only
    /// ever grows; this is the explicit way to return memory after
    /// removals.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::with_capacity(1000);
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// set.shrink_to_fit();
    /// assert!(set.capacity() < 1000);
    /// assert_eq!(set.len(), 2);
    /// # }
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Reserves capacity for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Adds a value to the set, returning whether it was newly inserted.
    ///
    /// A duplicate insert leaves the stored value alone and returns `false`;
    /// the element count does not change.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut visited: HashSet<u32> = HashSet::new();
    /// assert!(visited.insert(404));
    /// assert!(!visited.insert(404));
    /// assert_eq!(visited.len(), 1);
    /// # }
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            TableEntry::Occupied(_) => false,
            TableEntry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    /// Returns `true` if the set contains a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut words: HashSet<&str> = HashSet::new();
    /// words.insert("chain");
    /// assert!(words.contains(&"chain"));
    /// assert!(!words.contains(&"probe"));
    /// # }
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value).is_some()
    }

    /// Removes a value from the set, returning whether it was present.
    ///
    /// Removal never shrinks the underlying table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut ids: HashSet<u32> = HashSet::new();
    /// ids.insert(17);
    /// assert!(ids.remove(&17));
    /// assert!(!ids.remove(&17));
    /// # }
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value).is_some()
    }

    /// Adds a value to the set, swapping out and returning any stored value
    /// equal to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut names: HashSet<String> = HashSet::new();
    /// names.insert("ada".to_string());
    ///
    /// assert_eq!(names.replace("ada".to_string()), Some("ada".to_string()));
    /// assert_eq!(names.replace("grace".to_string()), None);
    /// assert_eq!(names.len(), 2);
    /// # }
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            TableEntry::Occupied(mut entry) => Some(core::mem::replace(entry.get_mut(), value)),
            TableEntry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Removes and returns the stored value equal to the given one, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut pool: HashSet<u32> = HashSet::new();
    /// pool.insert(9000);
    /// assert_eq!(pool.take(&9000), Some(9000));
    /// assert_eq!(pool.take(&9000), None);
    /// # }
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value)
    }

    /// Returns a reference to the stored value equal to the given one, if
    /// any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut interned: HashSet<String> = HashSet::new();
    /// interned.insert("symbol".to_string());
    ///
    /// assert_eq!(interned.get(&"symbol".to_string()), Some(&"symbol".to_string()));
    /// assert_eq!(interned.get(&"missing".to_string()), None);
    /// # }
    /// ```
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value)
    }

    /// Returns an iterator over the values of the set, in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let lengths: HashSet<usize> = ["a", "bc", "def"].iter().map(|s| s.len()).collect();
    ///
    /// for length in lengths.iter() {
    ///     println!("saw a string of length {}", length);
    /// }
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator that removes and yields all values from the
    /// set, leaving it empty.
    ///
    /// Dropping an unfinished iterator still empties the set. Leaking it
    /// with `mem::forget` leaks the values not yet yielded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut batch: HashSet<i32> = (0..6).collect();
    ///
    /// let flushed: Vec<i32> = batch.drain().collect();
    /// assert!(batch.is_empty());
    /// assert_eq!(flushed.len(), 6);
    /// # }
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Returns `true` if `self` and `other` have no elements in common.
    ///
    /// Iterates the smaller set and probes the larger.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let evens: HashSet<i32> = (0..10).filter(|n| n % 2 == 0).collect();
    /// let odds: HashSet<i32> = (0..10).filter(|n| n % 2 == 1).collect();
    ///
    /// assert!(evens.is_disjoint(&odds));
    /// # }
    /// ```
    pub fn is_disjoint(&self, other: &HashSet<T, S>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if every element of `self` is also in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let small: HashSet<i32> = (0..4).collect();
    /// let large: HashSet<i32> = (0..8).collect();
    ///
    /// assert!(small.is_subset(&large));
    /// assert!(!large.is_subset(&small));
    /// # }
    /// ```
    pub fn is_subset(&self, other: &HashSet<T, S>) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if every element of `other` is also in `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let large: HashSet<i32> = (0..8).collect();
    /// let small: HashSet<i32> = (0..4).collect();
    ///
    /// assert!(large.is_superset(&small));
    /// assert!(!small.is_superset(&large));
    /// # }
    /// ```
    pub fn is_superset(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Returns an iterator over elements in `self` or `other`, each
    /// yielded once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let low: HashSet<i32> = (0..5).collect();
    /// let high: HashSet<i32> = (3..8).collect();
    ///
    /// let combined: Vec<_> = low.union(&high).copied().collect();
    /// assert_eq!(combined.len(), 8);
    /// # }
    /// ```
    pub fn union<'a>(&'a self, other: &'a HashSet<T, S>) -> Union<'a, T, S> {
        // All of self, then whatever part of other self does not cover.
        Union {
            iter: self.iter().chain(other.difference(self)),
        }
    }

    /// Returns an iterator over elements present in both sets.
    ///
    /// Iterates the smaller set and probes the larger.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let low: HashSet<i32> = (0..5).collect();
    /// let high: HashSet<i32> = (3..8).collect();
    ///
    /// let mut shared: Vec<_> = low.intersection(&high).copied().collect();
    /// shared.sort_unstable();
    /// assert_eq!(shared, [3, 4]);
    /// # }
    /// ```
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, S>) -> Intersection<'a, T, S> {
        if self.len() <= other.len() {
            Intersection {
                iter: self.iter(),
                other,
            }
        } else {
            Intersection {
                iter: other.iter(),
                other: self,
            }
        }
    }

    /// Returns an iterator over elements in `self` that are not in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let low: HashSet<i32> = (0..5).collect();
    /// let high: HashSet<i32> = (3..8).collect();
    ///
    /// let mut only_low: Vec<_> = low.difference(&high).copied().collect();
    /// only_low.sort_unstable();
    /// assert_eq!(only_low, [0, 1, 2]);
    /// # }
    /// ```
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, S>) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Returns an iterator over elements in exactly one of the two sets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let low: HashSet<i32> = (0..5).collect();
    /// let high: HashSet<i32> = (3..8).collect();
    ///
    /// let mut exclusive: Vec<_> = low.symmetric_difference(&high).copied().collect();
    /// exclusive.sort_unstable();
    /// assert_eq!(exclusive, [0, 1, 2, 5, 6, 7]);
    /// # }
    /// ```
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<T, S>,
    ) -> SymmetricDifference<'a, T, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }

    /// Retains only the elements for which the predicate returns `true`.
    ///
    /// Elements are visited in an unspecified order. No rehash occurs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut scores: HashSet<i32> = (0..100).step_by(10).collect();
    ///
    /// scores.retain(|&s| s >= 50);
    /// assert_eq!(scores.len(), 5);
    /// assert!(scores.contains(&90));
    /// assert!(!scores.contains(&40));
    /// # }
    /// ```
    pub fn retain(&mut self, f: impl FnMut(&T) -> bool) {
        self.table.retain(f);
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new hash set using the default hasher builder and the
    /// default bucket count of 10.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new hash set with the specified bucket count using the
    /// default hasher builder.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::with_capacity(100);
    /// assert_eq!(set.capacity(), 100);
    /// # }
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the values of a `HashSet`.
pub struct Iter<'a, T> {
    inner: crate::hash_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A draining iterator over the values of a `HashSet`. Values not yielded by
/// the time it is dropped are removed and dropped as well.
pub struct Drain<'a, T> {
    inner: crate::hash_table::Drain<'a, T>,
}

/// A consuming iterator over the values of a `HashSet`.
pub struct IntoIter<T> {
    inner: crate::hash_table::IntoIter<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T, S> IntoIterator for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// An iterator over the union of two sets.
///
/// Yields all of the first set, then the part of the second set not present
/// in the first, so shared elements appear once.
pub struct Union<'a, T, S> {
    iter: core::iter::Chain<Iter<'a, T>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

/// An iterator over the intersection of two sets.
///
/// Walks one set and keeps the elements the other set also contains.
pub struct Intersection<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.iter.by_ref().find(|&v| other.contains(v))
    }
}

/// An iterator over the difference of two sets.
///
/// Walks the first set and skips the elements the second set contains.
pub struct Difference<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.iter.by_ref().find(|&v| !other.contains(v))
    }
}

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, T, S> {
    iter: core::iter::Chain<Difference<'a, T, S>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for SymmetricDifference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}
