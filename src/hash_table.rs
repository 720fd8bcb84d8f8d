use alloc::vec;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;

use crate::chain;
use crate::chain::Chain;
use crate::config::TableConfig;
use crate::entry::Entry;
use crate::hasher::bucket_index;

fn empty_buckets<K, V>(capacity: usize) -> Vec<Chain<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Chain::new);
    buckets
}

/// A separately chained hash table.
///
/// `HashTable` is the storage engine behind [`HashMap`](crate::HashMap) and
/// [`HashSet`](crate::HashSet). It does not hash keys itself: callers pass the
/// key's 64-bit hash to every operation, and operations that may grow the
/// table also take a closure that re-hashes stored keys.
///
/// The table owns `capacity` buckets, each a [`Chain`]. An entry lives in
/// bucket `hash % capacity`. Whenever an insertion of a new key leaves more
/// than `capacity * load_factor` entries in the table, every entry is moved
/// into a fresh bucket array of twice the size. The table never shrinks.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashTable;
/// use chain_hash::TableConfig;
/// use chain_hash::hasher::polynomial_hash;
///
/// let mut table = HashTable::with_config(TableConfig::new(4, 0.75).unwrap());
/// let rehash = |key: &&str| polynomial_hash(key);
///
/// for (value, key) in ["key0", "key1", "key2", "key3"].into_iter().enumerate() {
///     table.insert_or_update(polynomial_hash(key), key, value, rehash);
/// }
///
/// assert_eq!(table.len(), 4);
/// assert_eq!(table.capacity(), 8);
/// assert_eq!(
///     table.find(polynomial_hash("key2"), "key2").map(|e| *e.value()),
///     Some(2)
/// );
/// ```
#[derive(Clone)]
pub struct HashTable<K, V> {
    buckets: Vec<Chain<K, V>>,
    load_factor: f64,
    populated: usize,
}

impl<K, V> Debug for HashTable<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("buckets", &self.buckets)
            .field("populated", &self.populated)
            .field("capacity", &self.capacity())
            .field("load_factor", &self.load_factor)
            .finish()
    }
}

impl<K, V> HashTable<K, V> {
    /// Creates a table with 16 buckets and a load factor of 0.75.
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates a table from a validated configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            buckets: empty_buckets(config.initial_capacity()),
            load_factor: config.load_factor(),
            populated: 0,
        }
    }

    /// The current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// The entries-per-bucket ratio above which the table grows.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// The number of entries, summed over every bucket.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Chain::len).sum()
    }

    /// Returns `true` if no bucket holds an entry.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Chain::is_empty)
    }

    /// The bucket an entry with hash `hash` belongs to.
    pub fn bucket_index(&self, hash: u64) -> usize {
        bucket_index(hash, self.capacity())
    }

    /// Read access to a single bucket.
    pub fn bucket(&self, index: usize) -> Option<&Chain<K, V>> {
        self.buckets.get(index)
    }

    /// All buckets, in index order.
    pub fn buckets(&self) -> &[Chain<K, V>] {
        &self.buckets
    }

    /// Discards every entry and reallocates `capacity` empty buckets.
    pub fn clear(&mut self) {
        log::trace!("clearing table with {} buckets", self.capacity());
        self.buckets = empty_buckets(self.capacity());
        self.populated = 0;
    }

    /// Iterates over entries in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }

    /// Iterates over entries with mutable values, in bucket order then chain
    /// order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            current: None,
        }
    }

    /// Removes every entry, yielding them in bucket order then chain order.
    /// The table keeps its capacity.
    pub fn drain(&mut self) -> IntoIter<K, V> {
        let capacity = self.capacity();
        let buckets = core::mem::replace(&mut self.buckets, empty_buckets(capacity));
        self.populated = 0;
        IntoIter {
            buckets: buckets.into_iter(),
            current: None,
        }
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        for chain in &mut self.buckets {
            chain.retain(&mut f);
        }
        self.populated = self.len();
    }

    /// Renders every bucket with [`Chain::fmt_with`], one bucket per line.
    pub fn fmt_buckets(
        &self,
        f: &mut fmt::Formatter<'_>,
        mut render: impl FnMut(&Entry<K, V>, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            chain.fmt_with(f, &mut render)?;
        }
        Ok(())
    }

    fn exceeds_load_factor(&self) -> bool {
        self.populated as f64 > self.capacity() as f64 * self.load_factor
    }
}

impl<K, V> HashTable<K, V>
where
    K: Eq,
{
    /// Returns the entry with key `key`, which hashes to `hash`.
    pub fn find<Q>(&self, hash: u64, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.buckets[self.bucket_index(hash)].find_by_key(key)
    }

    /// Mutable form of [`find`](Self::find).
    pub fn find_mut<Q>(&mut self, hash: u64, key: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let index = self.bucket_index(hash);
        self.buckets[index].find_by_key_mut(key)
    }

    /// Returns `true` if an entry with key `key` exists.
    pub fn contains<Q>(&self, hash: u64, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.find(hash, key).is_some()
    }

    /// Stores `value` under `key`, overwriting the value in place if the key
    /// is already present, and returns the replaced value.
    ///
    /// When a new key pushes the table past its load factor the table doubles
    /// its buckets, using `hasher` to re-hash every stored key. `hasher` must
    /// agree with the hash passed for `key`.
    pub fn insert_or_update(
        &mut self,
        hash: u64,
        key: K,
        value: V,
        hasher: impl Fn(&K) -> u64,
    ) -> Option<V> {
        let index = self.bucket_index(hash);
        let previous = self.buckets[index].insert_or_update(key, value);
        if previous.is_none() {
            self.populated += 1;
            self.grow_if_needed(hasher);
        }
        previous
    }

    /// Removes the entry with key `key` and returns its key and value.
    pub fn remove<Q>(&mut self, hash: u64, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let index = self.bucket_index(hash);
        let removed = self.buckets[index].remove_entry(key);
        if removed.is_some() {
            self.populated -= 1;
        }
        removed
    }

    // Entries move in bucket order then chain order. Only called with a
    // doubled capacity.
    fn rehash(&mut self, new_capacity: usize, hasher: impl Fn(&K) -> u64) {
        debug_assert!(new_capacity > self.capacity());
        debug_assert_eq!(self.populated, self.len());
        log::debug!(
            "rehashing {} entries from {} to {} buckets",
            self.populated,
            self.capacity(),
            new_capacity
        );

        let old_buckets = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for chain in old_buckets {
            for (key, value) in chain {
                let index = bucket_index(hasher(&key), new_capacity);
                self.buckets[index].insert_or_update(key, value);
            }
        }
    }

    fn grow_if_needed(&mut self, hasher: impl Fn(&K) -> u64) {
        if !self.exceeds_load_factor() {
            return;
        }

        match self.capacity().checked_mul(2) {
            Some(new_capacity) => self.rehash(new_capacity, hasher),
            None => log::warn!(
                "table with {} buckets is over its load factor but cannot grow",
                self.capacity()
            ),
        }
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Display for HashTable<K, V>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_buckets(f, |entry, f| {
            write!(f, "( {}: {} )", entry.key(), entry.value())
        })
    }
}

impl<K, V> IntoIterator for HashTable<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            current: None,
        }
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = &'a Entry<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a [`HashTable`].
#[derive(Clone)]
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<K, V>>,
    current: Option<chain::Iter<'a, K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                return Some(entry);
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }
}

/// An iterator over the entries of a [`HashTable`] with mutable values.
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Chain<K, V>>,
    current: Option<chain::IterMut<'a, K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.current.as_mut().and_then(Iterator::next) {
                return Some(pair);
            }
            self.current = Some(self.buckets.next()?.iter_mut());
        }
    }
}

/// A consuming iterator over the entries of a [`HashTable`].
pub struct IntoIter<K, V> {
    buckets: vec::IntoIter<Chain<K, V>>,
    current: Option<chain::IntoIter<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.current.as_mut().and_then(Iterator::next) {
                return Some(pair);
            }
            self.current = Some(self.buckets.next()?.into_iter());
        }
    }
}
