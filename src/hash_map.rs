use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DefaultHashBuilder;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// A hash map implemented using the chained HashTable as the underlying
/// storage.
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement `Hash + Eq`
/// and uses a configurable hasher builder `S` to hash keys. The underlying
/// storage resolves collisions by separate chaining and doubles its bucket
/// count when the load factor reaches 0.7.
///
/// Inserting an existing key replaces its value in place and returns the old
/// one; the key count and capacity are unchanged. Looking up or removing an
/// absent key returns `None`.
///
/// # Examples
///
/// ```rust
/// # #[cfg(any(feature = "std", feature = "foldhash"))]
/// # {
/// use chain_hash::HashMap;
///
/// let mut inventory: HashMap<_, _> = HashMap::new();
/// inventory.insert("apple", 3);
/// inventory.insert("banana", 7);
///
/// assert_eq!(inventory.get(&"apple"), Some(&3));
/// assert_eq!(inventory.insert("apple", 5), Some(3));
/// assert_eq!(inventory.remove(&"banana"), Some(7));
/// assert_eq!(inventory.len(), 1);
/// # }
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash map with the given hasher builder and the default
    /// bucket count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use chain_hash::HashMap;
    /// #
    /// # struct FixedSip;
    /// # impl BuildHasher for FixedSip {
    /// #     type Hasher = SipHasher;
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new_with_keys(3, 14)
    /// #     }
    /// # }
    /// #
    /// let lookup: HashMap<u32, &str, _> = HashMap::with_hasher(FixedSip);
    /// assert!(lookup.is_empty());
    /// assert_eq!(lookup.capacity(), 10);
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Creates a new hash map with the specified bucket count and hasher
    /// builder.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use chain_hash::HashMap;
    /// #
    /// # struct FixedSip;
    /// # impl BuildHasher for FixedSip {
    /// #     type Hasher = SipHasher;
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new_with_keys(3, 14)
    /// #     }
    /// # }
    /// #
    /// let lookup: HashMap<u32, &str, _> = HashMap::with_capacity_and_hasher(64, FixedSip);
    /// assert_eq!(lookup.capacity(), 64);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Returns how many key-value pairs the map holds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut counts: HashMap<_, _> = HashMap::new();
    /// assert_eq!(counts.len(), 0);
    /// counts.insert("the", 12);
    /// assert_eq!(counts.len(), 1);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut routes: HashMap<_, _> = HashMap::new();
    /// assert!(routes.is_empty());
    /// routes.insert("/health", 200);
    /// assert!(!routes.is_empty());
    /// # }
    /// ```
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets in the map's underlying table.
    ///
    /// Capacity is the bucket count: additional keys fit past it in chains,
    /// but the table doubles once the key count reaches 0.7 of it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let map: HashMap<i32, String> = HashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 100);
    /// # }
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the current load factor of the underlying table.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all key-value pairs, keeping the allocated buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut sessions: HashMap<_, _> = HashMap::new();
    /// sessions.insert(17u64, "alice");
    /// sessions.insert(41u64, "bob");
    /// sessions.clear();
    /// assert!(sessions.is_empty());
    /// assert_eq!(sessions.capacity(), 10);
    /// # }
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Shrinks the capacity of the map as much as possible.
    ///
    /// Rehashes into the smallest bucket count that keeps the current key
    /// count under the growth threshold. Automatic resizing only ever grows;
    /// this is the explicit way to return memory after removals.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut cache: HashMap<_, _> = HashMap::with_capacity(100);
    /// cache.insert("etag", "3c2a");
    /// cache.insert("vary", "accept");
    ///
    /// cache.shrink_to_fit();
    /// assert!(cache.capacity() < 100);
    /// assert_eq!(cache.len(), 2);
    /// # }
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Reserves capacity for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned and the
    /// pair is linked at the head of its bucket's chain. If the map did have
    /// this key present, the value is updated in place and the old value is
    /// returned; an update never triggers a resize.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut ports: HashMap<_, _> = HashMap::new();
    /// assert_eq!(ports.insert("http", 80), None);
    /// assert_eq!(ports.insert("http", 8080), Some(80));
    /// assert_eq!(ports.get(&"http"), Some(&8080));
    /// # }
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => {
                let old_value = core::mem::replace(&mut entry.get_mut().1, value);
                Some(old_value)
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Returns a reference to the value stored under `key`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut ids: HashMap<_, _> = HashMap::new();
    /// ids.insert("alpha", 1);
    /// assert_eq!(ids.get(&"alpha"), Some(&1));
    /// assert_eq!(ids.get(&"beta"), None);
    /// # }
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the stored key-value pair corresponding to the key.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, |(k, _)| k == key).map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value stored under `key`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut counts: HashMap<_, _> = HashMap::new();
    /// counts.insert("hits", 9);
    /// if let Some(n) = counts.get_mut(&"hits") {
    ///     *n += 1;
    /// }
    /// assert_eq!(counts.get(&"hits"), Some(&10));
    /// # }
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find_mut(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut seen: HashMap<_, _> = HashMap::new();
    /// seen.insert("welcome", true);
    /// assert!(seen.contains_key(&"welcome"));
    /// assert!(!seen.contains_key(&"farewell"));
    /// # }
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// An absent key leaves the map unchanged. Removal never shrinks the
    /// underlying table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut leases: HashMap<_, _> = HashMap::new();
    /// leases.insert("10.0.0.7", 3600);
    /// assert_eq!(leases.remove(&"10.0.0.7"), Some(3600));
    /// assert_eq!(leases.remove(&"10.0.0.7"), None);
    /// # }
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if
    /// present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut owners: HashMap<_, _> = HashMap::new();
    /// owners.insert(7, "maintainer");
    /// assert_eq!(owners.remove_entry(&7), Some((7, "maintainer")));
    /// assert_eq!(owners.remove_entry(&7), None);
    /// # }
    /// ```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key)
    }

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut tally: HashMap<_, _> = HashMap::new();
    ///
    /// for word in ["to", "be", "or", "not", "to", "be"] {
    ///     *tally.entry(word).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(tally.get(&"to"), Some(&2));
    /// assert_eq!(tally.get(&"not"), Some(&1));
    /// # }
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(slot) => Entry::Occupied(OccupiedEntry { slot }),
            TableEntry::Vacant(slot) => Entry::Vacant(VacantEntry { slot, key }),
        }
    }

    /// Retains only the pairs for which the predicate returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut map: HashMap<i32, i32> = (0..8).map(|n| (n, n * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert_eq!(map.len(), 4);
    /// # }
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&K, &V) -> bool) {
        self.table.retain(|(k, v)| f(k, v));
    }

    /// Returns an iterator over the key-value pairs of the map, as
    /// `(&K, &V)` in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut sizes: HashMap<_, _> = HashMap::new();
    /// sizes.insert("small", 8);
    /// sizes.insert("large", 64);
    ///
    /// let total: u32 = sizes.iter().map(|(_, bytes)| bytes).sum();
    /// assert_eq!(total, 72);
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the keys of the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut headers: HashMap<_, _> = HashMap::new();
    /// headers.insert("host", "example.net");
    /// headers.insert("accept", "*/*");
    ///
    /// let mut names: Vec<_> = headers.keys().collect();
    /// names.sort();
    /// assert_eq!(names, [&"accept", &"host"]);
    /// # }
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the values of the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut weights: HashMap<_, _> = HashMap::new();
    /// weights.insert("edge-a", 3);
    /// weights.insert("edge-b", 5);
    ///
    /// let heaviest = weights.values().max();
    /// assert_eq!(heaviest, Some(&5));
    /// # }
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator that removes and yields all key-value pairs,
    /// leaving the map empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let mut queue: HashMap<_, _> = HashMap::new();
    /// queue.insert(101, "pending");
    /// queue.insert(102, "pending");
    ///
    /// let flushed: Vec<_> = queue.drain().collect();
    /// assert_eq!(flushed.len(), 2);
    /// assert!(queue.is_empty());
    /// # }
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new hash map using the default hasher builder and the
    /// default bucket count of 10.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// # use chain_hash::HashMap;
    /// #
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 10);
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new hash map with the specified bucket count using the
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
    /// # use chain_hash::HashMap;
    /// #
    /// let map: HashMap<i32, String> = HashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 100);
    /// # }
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// If the key has no value yet, stores `default`; either way, returns a
    /// mutable reference to the stored value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        self.or_insert_with(|| default)
    }

    /// Like [`or_insert`](Entry::or_insert), but the default is computed
    /// lazily; the closure only runs when the entry is vacant.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Runs `f` on the stored value if there is one, then hands the entry
    /// back for chaining with the insert methods.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            vacant => vacant,
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Stores `V::default()` if the key has no value yet, then returns a
    /// mutable reference to the stored value.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A vacant [`Entry`]. The looked-up key is held here until it is either
/// inserted or handed back with [`into_key`](VacantEntry::into_key).
pub struct VacantEntry<'a, K, V> {
    slot: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Returns the key that would be stored on insert.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Gives the looked-up key back without inserting anything.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Stores `value` under the held key and returns a mutable reference to
    /// it.
    pub fn insert(self, value: V) -> &'a mut V {
        let (_, value) = self.slot.insert((self.key, value));
        value
    }
}

/// An occupied [`Entry`], pointing at an existing key-value pair.
pub struct OccupiedEntry<'a, K, V> {
    slot: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Returns the stored key.
    pub fn key(&self) -> &K {
        &self.slot.get().0
    }

    /// Returns the stored value.
    pub fn get(&self) -> &V {
        &self.slot.get().1
    }

    /// Returns the stored value mutably, borrowing the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.slot.get_mut().1
    }

    /// Consumes the entry, returning a value reference tied to the map.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.slot.into_mut().1
    }

    /// Swaps in `value` and returns the value it replaced.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Unlinks the pair from the map and returns its value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Unlinks the pair from the map and returns both key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.slot.remove()
    }
}

/// Borrowing iterator over a map's pairs, created by [`HashMap::iter`].
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.inner.next()?;
        Some((key, value))
    }
}

/// Iterator over a map's keys, created by [`HashMap::keys`].
pub struct Keys<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        Some(&self.inner.next()?.0)
    }
}

/// Iterator over a map's values, created by [`HashMap::values`].
pub struct Values<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        Some(&self.inner.next()?.1)
    }
}

/// Draining iterator created by [`HashMap::drain`]. Pairs not yielded by the
/// time it is dropped are removed and dropped as well.
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Drain<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Consuming iterator created by [`HashMap`]'s `IntoIterator` impl.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k0: u64,
        k1: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap_or(0),
                k1: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    fn word_map(words: &[&str]) -> HashMap<String, usize, SipHashBuilder> {
        words
            .iter()
            .enumerate()
            .map(|(n, w)| (w.to_string(), n))
            .collect()
    }

    #[test]
    fn construction() {
        let fresh: HashMap<u32, String, SipHashBuilder> = HashMap::new();
        assert!(fresh.is_empty());
        assert_eq!(fresh.capacity(), crate::hash_table::DEFAULT_CAPACITY);

        let defaulted: HashMap<u32, String, SipHashBuilder> = HashMap::default();
        assert_eq!(defaulted.len(), 0);

        let keyed = HashMap::<u32, String, _>::with_hasher(SipHashBuilder::default());
        assert_eq!(keyed.capacity(), crate::hash_table::DEFAULT_CAPACITY);

        let sized = HashMap::<u32, String, _>::with_capacity_and_hasher(
            64,
            SipHashBuilder::default(),
        );
        assert_eq!(sized.capacity(), 64);
        assert!(sized.is_empty());
    }

    #[test]
    #[should_panic(expected = "capacity must be at least one bucket")]
    fn zero_capacity_rejected() {
        let _: HashMap<u32, String, SipHashBuilder> = HashMap::with_capacity(0);
    }

    #[test]
    fn insert_then_lookup() {
        let mut ports = HashMap::with_hasher(SipHashBuilder::default());

        assert_eq!(ports.insert("ssh", 22), None);
        assert_eq!(ports.insert("dns", 53), None);
        assert_eq!(ports.len(), 2);

        assert_eq!(ports.get(&"ssh"), Some(&22));
        assert_eq!(ports.get_key_value(&"dns"), Some((&"dns", &53)));
        assert!(ports.contains_key(&"ssh"));

        assert_eq!(ports.get(&"smtp"), None);
        assert!(!ports.contains_key(&"smtp"));
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut ports = HashMap::with_hasher(SipHashBuilder::default());
        ports.insert("http", 80);

        assert_eq!(ports.insert("http", 8080), Some(80));
        assert_eq!(ports.len(), 1);
        assert_eq!(ports.get(&"http"), Some(&8080));
    }

    #[test]
    fn update_through_get_mut() {
        let mut greeting = HashMap::with_hasher(SipHashBuilder::default());
        greeting.insert(1u8, "hi".to_string());

        greeting.get_mut(&1).unwrap().push_str(" there");
        assert_eq!(greeting.get(&1).map(String::as_str), Some("hi there"));
        assert_eq!(greeting.get_mut(&2), None);
    }

    #[test]
    fn remove_returns_the_value() {
        let mut leases = HashMap::with_hasher(SipHashBuilder::default());
        leases.insert("10.0.0.7", 3600);
        leases.insert("10.0.0.8", 7200);

        assert_eq!(leases.remove(&"10.0.0.7"), Some(3600));
        assert_eq!(leases.remove(&"10.0.0.7"), None);
        assert_eq!(leases.len(), 1);

        assert_eq!(leases.remove_entry(&"10.0.0.8"), Some(("10.0.0.8", 7200)));
        assert!(leases.is_empty());
        assert_eq!(leases.remove_entry(&"10.0.0.9"), None);
    }

    #[test]
    fn clear_keeps_buckets() {
        let mut sessions = HashMap::with_capacity_and_hasher(40, SipHashBuilder::default());
        for id in 0..20u64 {
            sessions.insert(id, id * id);
        }

        sessions.clear();
        assert!(sessions.is_empty());
        assert_eq!(sessions.capacity(), 40);
        assert_eq!(sessions.get(&3), None);
    }

    #[test]
    fn reserve_then_shrink() {
        let mut map = HashMap::<u64, u64, _>::with_hasher(SipHashBuilder::default());
        map.reserve(1000);
        let reserved = map.capacity();
        assert!(reserved > 1000);

        for n in 0..1000 {
            map.insert(n, n);
        }
        assert_eq!(map.capacity(), reserved);

        map.retain(|&k, _| k < 4);
        map.shrink_to_fit();
        assert!(map.capacity() < reserved);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn seventh_key_doubles_the_buckets() {
        let mut map = HashMap::<u32, u32, _>::with_capacity_and_hasher(
            10,
            SipHashBuilder::default(),
        );
        for n in 0..6 {
            map.insert(n, n + 100);
        }
        assert_eq!(map.capacity(), 10);
        assert!((map.load_factor() - 0.6).abs() < f64::EPSILON);

        map.insert(6, 106);
        assert_eq!(map.capacity(), 20);
        assert_eq!(map.len(), 7);

        for n in 0..7 {
            assert_eq!(map.get(&n), Some(&(n + 100)));
        }
    }

    #[test]
    fn replacing_at_the_threshold_never_grows() {
        let mut map = HashMap::<u32, u32, _>::with_capacity_and_hasher(
            10,
            SipHashBuilder::default(),
        );
        for n in 0..6 {
            map.insert(n, n);
        }

        assert_eq!(map.insert(0, 999), Some(0));
        assert_eq!(map.capacity(), 10);
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn growth_preserves_string_pairs() {
        let words = [
            "chain", "bucket", "node", "hash", "table", "probe", "slot", "load", "factor",
            "rehash", "iter", "drain",
        ];
        let map = word_map(&words);

        assert_eq!(map.len(), words.len());
        assert_eq!(map.capacity(), 20);
        for (n, w) in words.iter().enumerate() {
            assert_eq!(map.get(&w.to_string()), Some(&n));
        }
    }

    #[test]
    fn entry_counts_words() {
        let mut tally = HashMap::with_hasher(SipHashBuilder::default());
        for word in ["red", "green", "red", "blue", "red", "green"] {
            *tally.entry(word).or_insert(0) += 1;
        }

        assert_eq!(tally.get(&"red"), Some(&3));
        assert_eq!(tally.get(&"green"), Some(&2));
        assert_eq!(tally.get(&"blue"), Some(&1));
    }

    #[test]
    fn or_insert_with_is_lazy() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert("cached", 1);

        let mut computed = false;
        map.entry("cached").or_insert_with(|| {
            computed = true;
            2
        });
        assert!(!computed);
        assert_eq!(map.get(&"cached"), Some(&1));

        map.entry("fresh").or_insert_with(|| {
            computed = true;
            3
        });
        assert!(computed);
        assert_eq!(map.get(&"fresh"), Some(&3));
    }

    #[test]
    fn and_modify_then_or_insert() {
        let mut retries = HashMap::with_hasher(SipHashBuilder::default());

        retries.entry("job-7").and_modify(|n| *n += 1).or_insert(1u32);
        assert_eq!(retries.get(&"job-7"), Some(&1));

        retries.entry("job-7").and_modify(|n| *n += 1).or_insert(1);
        assert_eq!(retries.get(&"job-7"), Some(&2));
    }

    #[test]
    fn or_default_accumulates() {
        let mut groups: HashMap<char, Vec<&str>, SipHashBuilder> =
            HashMap::with_hasher(SipHashBuilder::default());

        for name in ["ash", "birch", "alder", "beech"] {
            let initial = name.chars().next().unwrap();
            groups.entry(initial).or_default().push(name);
        }

        assert_eq!(groups.get(&'a'), Some(&alloc::vec!["ash", "alder"]));
        assert_eq!(groups.get(&'b'), Some(&alloc::vec!["birch", "beech"]));
    }

    #[test]
    fn entry_key_access() {
        let mut map: HashMap<u32, u32, _> = HashMap::with_hasher(SipHashBuilder::default());
        assert_eq!(map.entry(5).key(), &5);

        match map.entry(5) {
            Entry::Vacant(slot) => assert_eq!(slot.into_key(), 5),
            Entry::Occupied(_) => unreachable!("nothing was inserted under 5"),
        }
        assert!(map.is_empty());
    }

    #[test]
    fn occupied_entry_surface() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert("state", "init".to_string());

        let Entry::Occupied(mut slot) = map.entry("state") else {
            unreachable!("key was just inserted");
        };
        assert_eq!(slot.key(), &"state");
        assert_eq!(slot.get(), "init");

        slot.get_mut().push_str("ialized");
        assert_eq!(slot.insert("running".to_string()), "initialized");

        assert_eq!(slot.remove_entry(), ("state", "running".to_string()));
        assert!(map.is_empty());
    }

    #[test]
    fn vacant_entry_insert_links_the_pair() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());

        let Entry::Vacant(slot) = map.entry(9u32) else {
            unreachable!("map starts empty");
        };
        assert_eq!(slot.key(), &9);
        *slot.insert(10) += 1;

        assert_eq!(map.get(&9), Some(&11));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn iterators_visit_every_pair() {
        let map = word_map(&["north", "east", "south", "west"]);

        let mut pairs: Vec<(String, usize)> =
            map.iter().map(|(w, n)| (w.clone(), *n)).collect();
        pairs.sort();
        assert_eq!(
            pairs,
            [
                ("east".to_string(), 1),
                ("north".to_string(), 0),
                ("south".to_string(), 2),
                ("west".to_string(), 3),
            ]
        );

        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        assert_eq!(keys.len(), 4);
        assert_eq!(keys[0].as_str(), "east");

        let mut indices: Vec<usize> = map.values().copied().collect();
        indices.sort_unstable();
        assert_eq!(indices, [0, 1, 2, 3]);
    }

    #[test]
    fn drain_moves_pairs_out() {
        let mut map = word_map(&["alpha", "beta", "gamma"]);

        let mut drained: Vec<(String, usize)> = map.drain().collect();
        drained.sort();
        assert_eq!(drained.len(), 3);
        assert_eq!(drained[0].0, "alpha");
        assert!(map.is_empty());

        map.insert("delta".to_string(), 0);
        drop(map.drain());
        assert!(map.is_empty());
    }

    #[test]
    fn into_iter_consumes_the_map() {
        let squares: HashMap<u32, u32, SipHashBuilder> =
            (0..10).map(|n| (n, n * n)).collect();

        let mut pairs: Vec<(u32, u32)> = squares.into_iter().collect();
        pairs.sort_unstable();
        assert_eq!(pairs.first(), Some(&(0, 0)));
        assert_eq!(pairs.last(), Some(&(9, 81)));
    }

    #[test]
    fn retain_keeps_matching_pairs() {
        let mut map: HashMap<u32, u32, SipHashBuilder> = (0..20).map(|n| (n, n)).collect();

        map.retain(|&k, _| k % 4 == 0);
        assert_eq!(map.len(), 5);
        assert!(map.contains_key(&16));
        assert!(!map.contains_key(&15));
    }

    #[test]
    fn extend_merges_pairs() {
        let mut config = word_map(&["host", "port"]);
        config.extend([("timeout".to_string(), 30), ("port".to_string(), 99)]);

        assert_eq!(config.len(), 3);
        assert_eq!(config.get(&"timeout".to_string()), Some(&30));
        assert_eq!(config.get(&"port".to_string()), Some(&99));
    }

    #[test]
    fn many_pairs_round_trip() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());

        for n in 0..1000u64 {
            map.insert(n, n.wrapping_mul(0x9e37_79b9));
        }
        assert_eq!(map.len(), 1000);

        for n in (0..1000).step_by(2) {
            assert_eq!(map.remove(&n), Some(n.wrapping_mul(0x9e37_79b9)));
        }
        assert_eq!(map.len(), 500);

        for n in (1..1000).step_by(2) {
            assert_eq!(map.get(&n), Some(&n.wrapping_mul(0x9e37_79b9)));
        }
    }

    #[test]
    fn owned_collection_values() {
        let mut adjacency = HashMap::with_hasher(SipHashBuilder::default());
        adjacency.insert("a", alloc::vec!["b", "c"]);
        adjacency.insert("b", alloc::vec!["a"]);

        adjacency.get_mut(&"b").unwrap().push("c");
        assert_eq!(adjacency.get(&"b"), Some(&alloc::vec!["a", "c"]));
        assert_eq!(adjacency.get(&"a").map(Vec::len), Some(2));
    }
}
