use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

/// Number of buckets in a table created with [`HashTable::new`].
pub const DEFAULT_CAPACITY: usize = 10;

#[inline(always)]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

/// Growth trigger: `len / capacity >= 0.7`, kept in integer form. Widened
/// through `u128` so the multiplication cannot overflow on 64-bit targets.
#[inline(always)]
fn over_threshold(len: usize, capacity: usize) -> bool {
    len as u128 * 10 >= capacity as u128 * 7
}

struct Node<V> {
    hash: u64,
    value: V,
    next: Option<Box<Node<V>>>,
}

/// Chain-length statistics for hash table analysis.
///
/// Produced by [`HashTable::stats`] (feature `stats`).
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct TableStats {
    /// Number of elements currently in the table
    pub len: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Load factor (len / capacity)
    pub load_factor: f64,
    /// Number of buckets holding at least one element
    pub occupied_buckets: usize,
    /// Length of the longest collision chain
    pub longest_chain: usize,
}

#[cfg(feature = "stats")]
impl TableStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Statistics ===");
        println!(
            "Population: {} entries / {} buckets ({:.2}% load factor)",
            self.len,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Occupied Buckets: {}/{} ({:.2}%)",
            self.occupied_buckets,
            self.capacity,
            if self.capacity == 0 {
                0.0
            } else {
                (self.occupied_buckets as f64 / self.capacity as f64) * 100.0
            }
        );
        println!("Longest Chain: {} entries", self.longest_chain);
    }
}

/// A hash table using separate chaining with load-factor-driven growth.
///
/// `HashTable<V>` stores values of type `V` in an array of buckets, each
/// holding a singly linked chain of entries whose hashes select that bucket.
/// Unlike standard hash maps, this implementation requires you to provide
/// both the hash value and an equality predicate for each operation; the
/// hash is cached per entry so a rehash never re-invokes the hash function.
///
/// New entries are linked at the head of their bucket's chain. Once
/// `len / capacity` reaches 0.7 after an insert, the bucket count doubles
/// and every entry is relinked into the bucket its cached hash selects under
/// the new capacity. Removal never shrinks the table.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use chain_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::with_capacity(100);
/// let hash = hash_id(123);
///
/// // Insert a person
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     chain_hash::hash_table::Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     chain_hash::hash_table::Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// ```
pub struct HashTable<V> {
    buckets: Vec<Option<Box<Node<V>>>>,
    len: usize,
}

impl<V: Debug> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct Chain<'a, V>(&'a Option<Box<Node<V>>>);

        impl<V: Debug> Debug for Chain<'_, V> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let mut list = f.debug_list();
                let mut node = self.0.as_deref();
                while let Some(n) = node {
                    list.entry(&n.value);
                    node = n.next.as_deref();
                }
                list.finish()
            }
        }

        f.debug_struct("HashTable")
            .field("len", &self.len)
            .field("capacity", &self.buckets.len())
            .field(
                "buckets",
                &self.buckets.iter().map(Chain).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<V> Clone for HashTable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut buckets: Vec<Option<Box<Node<V>>>> = Vec::new();
        buckets.resize_with(self.buckets.len(), || None);

        for (index, slot) in self.buckets.iter().enumerate() {
            let mut entries: Vec<(u64, V)> = Vec::new();
            let mut node = slot.as_deref();
            while let Some(n) = node {
                entries.push((n.hash, n.value.clone()));
                node = n.next.as_deref();
            }

            // Head-insert in reverse so the clone's chain order matches.
            for (hash, value) in entries.into_iter().rev() {
                let next = buckets[index].take();
                buckets[index] = Some(Box::new(Node { hash, value, next }));
            }
        }

        HashTable {
            buckets,
            len: self.len,
        }
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        // Iterative teardown; the default recursive Box drop could exhaust
        // the stack on a pathological chain.
        self.clear();
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::new();
    /// assert_eq!(table.capacity(), 10);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with exactly `capacity` buckets.
    ///
    /// Capacity is the bucket count, not an entry count: the table accepts
    /// inserts until the entry count reaches 0.7 of the bucket count, then
    /// doubles.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. A table with no buckets has no valid
    /// index for any hash, so the request is rejected before any state is
    /// created.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be at least one bucket");

        let mut buckets = Vec::new();
        buckets.resize_with(capacity, || None);

        Self { buckets, len: 0 }
    }

    /// Returns the number of elements in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// assert_eq!(table.len(), 0);
    ///
    /// table.entry(hash_u64(1), |&n: &u64| n == 1).or_insert(1);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<i32> = HashTable::with_capacity(10);
    /// assert!(table.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<i32> = HashTable::with_capacity(64);
    /// assert_eq!(table.capacity(), 64);
    /// ```
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor, `len / capacity`.
    ///
    /// Always strictly below 0.7 between operations; crossing that threshold
    /// during an insert doubles the bucket count before the insert returns.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Removes all elements from the table.
    ///
    /// The bucket count is preserved. All values are dropped; teardown walks
    /// each chain iteratively.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(hash_u64(1), |&n: &u64| n == 1).or_insert(1);
    /// table.entry(hash_u64(2), |&n: &u64| n == 2).or_insert(2);
    /// assert_eq!(table.len(), 2);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 10);
    /// ```
    pub fn clear(&mut self) {
        for slot in self.buckets.iter_mut() {
            let mut head = slot.take();
            while let Some(mut node) = head {
                head = node.next.take();
            }
        }
        self.len = 0;
    }

    /// Rehashes into the smallest bucket count that keeps the load factor
    /// under the growth threshold.
    ///
    /// The automatic policy only ever grows; this is the explicit,
    /// caller-invoked way to give memory back after a burst of removals. It
    /// never increases the bucket count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// for n in 0..100u64 {
    ///     table.entry(hash_u64(n), |&v: &u64| v == n).or_insert(n);
    /// }
    /// let grown = table.capacity();
    ///
    /// for n in 0..100u64 {
    ///     table.remove(hash_u64(n), |&v: &u64| v == n);
    /// }
    /// assert_eq!(table.capacity(), grown);
    ///
    /// table.shrink_to_fit();
    /// assert!(table.capacity() < grown);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let mut capacity = 1;
        while over_threshold(self.len, capacity) {
            capacity *= 2;
        }

        if capacity < self.buckets.len() {
            self.rehash(capacity);
        }
    }

    /// Grows the table so that `additional` more elements fit without
    /// crossing the growth threshold.
    ///
    /// Growth proceeds by capacity doubling, the same rule the automatic
    /// policy uses. Does nothing if the current capacity already suffices.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<u64> = HashTable::with_capacity(10);
    /// table.reserve(1000);
    /// assert!(table.capacity() > 1000);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let target = self.len.saturating_add(additional);
        let mut capacity = self.buckets.len();
        while over_threshold(target, capacity) {
            capacity *= 2;
        }

        if capacity != self.buckets.len() {
            self.rehash(capacity);
        }
    }

    /// Returns a reference to the value matching `hash` and `eq`, if any.
    ///
    /// Walks the chain of the bucket the hash selects, comparing cached
    /// hashes first and calling `eq` only on a hash match. Average O(1) with
    /// chains kept short by the growth policy; worst case O(len) if every
    /// key collides.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table
    ///     .entry(hash_str("key"), |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// assert_eq!(
    ///     table.find(hash_str("key"), |s| s == "key"),
    ///     Some(&"key".to_string())
    /// );
    /// assert_eq!(table.find(hash_str("missing"), |s| s == "missing"), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let bucket = bucket_index(hash, self.buckets.len());
        let mut node = self.buckets[bucket].as_deref();
        while let Some(n) = node {
            if n.hash == hash && eq(&n.value) {
                return Some(&n.value);
            }
            node = n.next.as_deref();
        }

        None
    }

    /// Returns a mutable reference to the value matching `hash` and `eq`,
    /// if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table
    ///     .entry(hash_u64(1), |&(k, _): &(u64, i32)| k == 1)
    ///     .or_insert((1, 10));
    ///
    /// if let Some((_, v)) = table.find_mut(hash_u64(1), |&(k, _)| k == 1) {
    ///     *v += 1;
    /// }
    /// assert_eq!(table.find(hash_u64(1), |&(k, _)| k == 1), Some(&(1, 11)));
    /// ```
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let bucket = bucket_index(hash, self.buckets.len());
        let mut node = self.buckets[bucket].as_deref_mut();
        while let Some(n) = node {
            if n.hash == hash && eq(&n.value) {
                return Some(&mut n.value);
            }
            node = n.next.as_deref_mut();
        }

        None
    }

    /// Removes and returns the value matching `hash` and `eq`, if any.
    ///
    /// The matching node is unlinked from its chain (head or interior) and
    /// its value returned. An absent key leaves the table unchanged and
    /// returns `None`. Removal never shrinks the table — the automatic
    /// policy only grows, so interleaved inserts and removals near the
    /// threshold cannot oscillate between capacities.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table
    ///     .entry(hash_str("key"), |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// assert_eq!(
    ///     table.remove(hash_str("key"), |s| s == "key"),
    ///     Some("key".to_string())
    /// );
    /// assert_eq!(table.remove(hash_str("key"), |s| s == "key"), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let bucket = bucket_index(hash, self.buckets.len());
        let depth = self.locate(bucket, hash, &eq)?;
        Some(self.unlink_at(bucket, depth).value)
    }

    /// Gets the entry matching `hash` and `eq` for in-place manipulation.
    ///
    /// Returns [`Entry::Occupied`] if a matching value is already stored, or
    /// [`Entry::Vacant`] if not. Inserting through the vacant entry links
    /// the value at the head of its bucket's chain and then evaluates the
    /// growth policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("key".to_string());
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Occupied(entry) => assert_eq!(entry.get(), "key"),
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        let bucket = bucket_index(hash, self.buckets.len());
        match self.locate(bucket, hash, &eq) {
            Some(depth) => Entry::Occupied(OccupiedEntry {
                table: self,
                bucket,
                depth,
            }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Retains only the values for which the predicate returns `true`.
    ///
    /// Visits every chain, unlinking and dropping rejected values. Chain
    /// order among retained values is preserved. No rehash occurs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// for n in 0..10u64 {
    ///     table.entry(hash_u64(n), |&v: &u64| v == n).or_insert(n);
    /// }
    ///
    /// table.retain(|&v| v % 2 == 0);
    /// assert_eq!(table.len(), 5);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&V) -> bool) {
        for slot in self.buckets.iter_mut() {
            let mut kept: Option<Box<Node<V>>> = None;
            let mut head = slot.take();
            while let Some(mut node) = head {
                head = node.next.take();
                if f(&node.value) {
                    node.next = kept.take();
                    kept = Some(node);
                } else {
                    self.len -= 1;
                }
            }

            // The keep pass reversed the chain; reverse again to restore
            // head-to-tail order.
            let mut restored: Option<Box<Node<V>>> = None;
            while let Some(mut node) = kept {
                kept = node.next.take();
                node.next = restored.take();
                restored = Some(node);
            }
            *slot = restored;
        }
    }

    /// Returns an iterator over all values in the table.
    ///
    /// Yields every value exactly once: buckets in index order, each chain
    /// head to tail (most recently inserted among colliders first). The
    /// order is not stable across any mutating operation, since a rehash
    /// redistributes chains.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table
    ///     .entry(hash_str("key1"), |s: &String| s == "key1")
    ///     .or_insert("key1".to_string());
    /// table
    ///     .entry(hash_str("key2"), |s: &String| s == "key2")
    ///     .or_insert("key2".to_string());
    ///
    /// assert_eq!(table.iter().count(), 2);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            bucket_index: 0,
            node: None,
        }
    }

    /// Returns an iterator that removes and yields all values from the
    /// table.
    ///
    /// The bucket count is preserved. Dropping an unfinished `Drain` still
    /// empties the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table
    ///     .entry(hash_str("key1"), |s: &String| s == "key1")
    ///     .or_insert("key1".to_string());
    ///
    /// let values: Vec<String> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(values.len(), 1);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            table: self,
            bucket_index: 0,
        }
    }

    /// Chain-length statistics for the current table state.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> TableStats {
        let histogram = self.chain_histogram();
        let occupied_buckets = self.buckets.len() - histogram.first().copied().unwrap_or(0);
        let longest_chain = histogram.len().saturating_sub(1);

        TableStats {
            len: self.len,
            capacity: self.buckets.len(),
            load_factor: self.load_factor(),
            occupied_buckets,
            longest_chain,
        }
    }

    /// Histogram of chain lengths: entry `i` is the number of buckets whose
    /// chain holds exactly `i` values.
    #[cfg(feature = "stats")]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let mut histogram = Vec::new();
        for slot in &self.buckets {
            let mut length = 0;
            let mut node = slot.as_deref();
            while let Some(n) = node {
                length += 1;
                node = n.next.as_deref();
            }

            if histogram.len() <= length {
                histogram.resize(length + 1, 0);
            }
            histogram[length] += 1;
        }

        histogram
    }

    /// Scan `bucket`'s chain for a value matching `hash` and `eq`,
    /// returning its depth in the chain.
    fn locate(&self, bucket: usize, hash: u64, eq: &impl Fn(&V) -> bool) -> Option<usize> {
        let mut depth = 0;
        let mut node = self.buckets[bucket].as_deref();
        while let Some(n) = node {
            if n.hash == hash && eq(&n.value) {
                return Some(depth);
            }
            depth += 1;
            node = n.next.as_deref();
        }

        None
    }

    /// Unlink and return the node at `depth` in `bucket`'s chain.
    fn unlink_at(&mut self, bucket: usize, depth: usize) -> Box<Node<V>> {
        let mut cursor = &mut self.buckets[bucket];
        for _ in 0..depth {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => unreachable!("chain is shorter than the located depth"),
            }
        }

        let mut node = cursor.take().expect("located node is no longer linked");
        *cursor = node.next.take();
        self.len -= 1;
        node
    }

    fn grow(&mut self) {
        self.rehash(self.buckets.len() * 2);
    }

    /// Relink every node into a fresh bucket array of `new_capacity` slots.
    ///
    /// The new array is allocated up front (the only fallible step) and
    /// fully populated before the single assignment that replaces the old
    /// one. Nodes are moved, not recreated, using their cached hashes.
    fn rehash(&mut self, new_capacity: usize) {
        let mut new_buckets: Vec<Option<Box<Node<V>>>> = Vec::new();
        new_buckets.resize_with(new_capacity, || None);

        for slot in self.buckets.iter_mut() {
            let mut head = slot.take();
            while let Some(mut node) = head {
                head = node.next.take();
                let index = bucket_index(node.hash, new_capacity);
                node.next = new_buckets[index].take();
                new_buckets[index] = Some(node);
            }
        }

        self.buckets = new_buckets;
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A view into a single entry in the table, which may be vacant or occupied.
///
/// This enum is constructed by the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
///
/// # Examples
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use chain_hash::hash_table::Entry;
/// # use chain_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # fn hash_str(s: &str) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     s.hash(&mut hasher);
/// #     hasher.finish()
/// # }
/// #
/// let mut table = HashTable::with_capacity(10);
/// let hash = hash_str("key");
///
/// match table.entry(hash, |s: &String| s == "key") {
///     Entry::Vacant(entry) => {
///         entry.insert("value".to_string());
///     }
///     Entry::Occupied(entry) => {
///         println!("Key already exists with value: {}", entry.get());
///     }
/// }
/// ```
pub enum Entry<'a, V> {
    /// A vacant entry - no stored value matched
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a stored value matched
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    ///
    /// If the entry is occupied, returns a mutable reference to the existing
    /// value instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    ///
    /// let value = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    /// assert_eq!(value, "key");
    ///
    /// // Second call returns the existing value
    /// let existing = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("other".to_string());
    /// assert_eq!(existing, "key");
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    ///
    /// The closure is only called when the entry is vacant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    ///
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert_with(|| "key".to_string());
    ///
    /// let existing = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert_with(|| panic!("should not be called"));
    /// assert_eq!(existing, "key");
    /// ```
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry.
    ///
    /// If the entry is vacant, returns `None` without inserting anything.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_u64(42);
    ///
    /// let result = table
    ///     .entry(hash, |&n: &u64| n == 42)
    ///     .and_modify(|v| *v += 1);
    /// assert_eq!(result, None);
    ///
    /// table.entry(hash, |&n: &u64| n == 42).or_insert(42);
    ///
    /// let result = table
    ///     .entry(hash, |&n: &u64| n == 42)
    ///     .and_modify(|v| *v += 1);
    /// assert_eq!(result, Some(&mut 43));
    /// ```
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the hash table.
///
/// This struct is created by the [`entry`] method on [`HashTable`] when no
/// stored value matched.
///
/// [`entry`]: HashTable::entry
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value into the vacant entry and returns a mutable
    /// reference to it.
    ///
    /// The value becomes the new head of its bucket's chain. The growth
    /// policy runs after the mutation: if the insert pushed the load factor
    /// to 0.7, the bucket count doubles and every entry is relinked before
    /// this method returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Vacant(entry) => {
    ///         let value_ref = entry.insert("value".to_string());
    ///         assert_eq!(value_ref, "value");
    ///     }
    ///     Entry::Occupied(_) => unreachable!("entry should be vacant"),
    /// }
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        let index = bucket_index(self.hash, table.buckets.len());
        let node = Box::new(Node {
            hash: self.hash,
            value,
            next: table.buckets[index].take(),
        });
        let raw: *const Node<V> = &*node;
        table.buckets[index] = Some(node);
        table.len += 1;

        if over_threshold(table.len, table.buckets.len()) {
            table.grow();
        }

        // A rehash relinks chain boxes without reallocating them, so the
        // fresh node can be re-found by identity in whichever bucket its
        // hash now selects.
        let index = bucket_index(self.hash, table.buckets.len());
        let mut node = table.buckets[index].as_deref_mut();
        while let Some(n) = node {
            if core::ptr::eq(n as *const Node<V>, raw) {
                return &mut n.value;
            }
            node = n.next.as_deref_mut();
        }

        unreachable!("freshly inserted node is always linked in its hash's bucket")
    }
}

/// A view into an occupied entry in the hash table.
///
/// This struct is created by the [`entry`] method on [`HashTable`] when a
/// stored value matched. It provides methods to access, modify, or remove
/// the existing value.
///
/// [`entry`]: HashTable::entry
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    bucket: usize,
    depth: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    fn node(&self) -> &Node<V> {
        let mut node = self.table.buckets[self.bucket]
            .as_deref()
            .expect("occupied entry points at an empty bucket");
        for _ in 0..self.depth {
            node = node
                .next
                .as_deref()
                .expect("occupied entry chain ended before its depth");
        }
        node
    }

    fn node_mut(&mut self) -> &mut Node<V> {
        let mut node = self.table.buckets[self.bucket]
            .as_deref_mut()
            .expect("occupied entry points at an empty bucket");
        for _ in 0..self.depth {
            node = node
                .next
                .as_deref_mut()
                .expect("occupied entry chain ended before its depth");
        }
        node
    }

    /// Gets a reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Occupied(entry) => {
    ///         assert_eq!(entry.get(), "key");
    ///     }
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    /// ```
    pub fn get(&self) -> &V {
        &self.node().value
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// For a reference that outlives the entry, see
    /// [`into_mut`](OccupiedEntry::into_mut).
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.node_mut().value
    }

    /// Converts the entry into a mutable reference to its value, bound to
    /// the table's borrow.
    pub fn into_mut(self) -> &'a mut V {
        let mut node = self.table.buckets[self.bucket]
            .as_deref_mut()
            .expect("occupied entry points at an empty bucket");
        for _ in 0..self.depth {
            node = node
                .next
                .as_deref_mut()
                .expect("occupied entry chain ended before its depth");
        }
        &mut node.value
    }

    /// Removes the entry from the table, returning the value.
    ///
    /// The node is unlinked from its chain; no rehash occurs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Occupied(entry) => {
    ///         assert_eq!(entry.remove(), "key");
    ///     }
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(self) -> V {
        self.table.unlink_at(self.bucket, self.depth).value
    }
}

/// An iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    table: &'a HashTable<V>,
    bucket_index: usize,
    node: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                return Some(&node.value);
            }

            if self.bucket_index >= self.table.buckets.len() {
                return None;
            }

            self.node = self.table.buckets[self.bucket_index].as_deref();
            self.bucket_index += 1;
        }
    }
}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`]. It
/// yields owned `V` values and empties the table as it iterates; dropping
/// an unfinished `Drain` still empties the table.
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    table: &'a mut HashTable<V>,
    bucket_index: usize,
}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket_index < self.table.buckets.len() {
            if let Some(mut node) = self.table.buckets[self.bucket_index].take() {
                self.table.buckets[self.bucket_index] = node.next.take();
                self.table.len -= 1;
                return Some(node.value);
            }

            self.bucket_index += 1;
        }

        None
    }
}

/// A consuming iterator over the values of a [`HashTable`].
///
/// This struct is created by the `into_iter` method on [`HashTable`].
pub struct IntoIter<V> {
    table: HashTable<V>,
    bucket_index: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket_index < self.table.buckets.len() {
            if let Some(mut node) = self.table.buckets[self.bucket_index].take() {
                self.table.buckets[self.bucket_index] = node.next.take();
                self.table.len -= 1;
                return Some(node.value);
            }

            self.bucket_index += 1;
        }

        None
    }
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            table: self,
            bucket_index: 0,
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
