use core::borrow::Borrow;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;

use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::hash_table;
use crate::hash_table::HashTable;
use crate::hasher::KeyHasher;
use crate::hasher::Polynomial31;

/// A hash set backed by a separately chained [`HashTable`].
///
/// Each bucket chain stores bare keys. Adding a key that is already present
/// leaves the set unchanged, so [`length`](Self::length) counts every key
/// once no matter how often it is set.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashSet;
///
/// let mut set = HashSet::new();
/// assert!(set.set("key1"));
/// assert!(!set.set("key1"));
/// assert_eq!(set.length(), 1);
/// assert_eq!(set.get("key1"), Some(&"key1"));
/// ```
#[derive(Clone)]
pub struct HashSet<T, S = Polynomial31> {
    table: HashTable<T, ()>,
    hasher: S,
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders every bucket on its own line as `( key ) -> ... -> nil`.
impl<T, S> Display for HashSet<T, S>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.table
            .fmt_buckets(f, |entry, f| write!(f, "( {} )", entry.key()))
    }
}

impl<T> HashSet<T, Polynomial31> {
    /// Creates an empty set with 16 buckets and a load factor of 0.75.
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty set with `capacity` buckets that grows once it holds
    /// more than `capacity * load_factor` keys.
    ///
    /// # Errors
    ///
    /// Fails if `capacity` is zero or `load_factor` is not a positive finite
    /// number.
    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_config(TableConfig::new(capacity, load_factor)?))
    }

    /// Creates an empty set from a validated configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, Polynomial31)
    }
}

impl<T, S> HashSet<T, S> {
    /// Creates an empty set with the default configuration and the given
    /// hashing strategy.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(TableConfig::default(), hasher)
    }

    /// Creates an empty set with the given configuration and hashing strategy.
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Self {
        Self {
            table: HashTable::with_config(config),
            hasher,
        }
    }

    /// The set's hashing strategy.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// The number of keys, counted across every bucket.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Same as [`len`](Self::len).
    pub fn length(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// The growth threshold the set was configured with.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Read access to the underlying table, for inspecting bucket layout.
    pub fn table(&self) -> &HashTable<T, ()> {
        &self.table
    }

    /// Removes every key. The bucket count is kept.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// An iterator over the keys, in bucket order then chain order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Same as [`iter`](Self::iter).
    pub fn keys(&self) -> Iter<'_, T> {
        self.iter()
    }

    /// Removes every key and yields it. The bucket count is kept.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
            _set: core::marker::PhantomData,
        }
    }

    /// Keeps only the keys for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&T) -> bool) {
        self.table.retain(|key, _| f(key));
    }
}

impl<T, S> HashSet<T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
    /// Adds `key`, returning `true` if it was not already present. Setting a
    /// present key changes nothing.
    pub fn set(&mut self, key: T) -> bool {
        let hash = self.hasher.hash_key(&key);
        let hasher = &self.hasher;
        self.table
            .insert_or_update(hash, key, (), |k| hasher.hash_key(k))
            .is_none()
    }

    /// Same as [`set`](Self::set).
    pub fn insert(&mut self, key: T) -> bool {
        self.set(key)
    }

    /// Returns the stored key equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        self.table
            .find(self.hasher.hash_key(key), key)
            .map(|entry| entry.key())
    }

    /// Returns `true` if `key` is present.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        self.table.contains(self.hasher.hash_key(key), key)
    }

    /// Same as [`has`](Self::has).
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        self.has(key)
    }

    /// Removes `key`, returning `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set = HashSet::new();
    /// set.set("key1".to_string());
    /// assert!(set.remove("key1"));
    /// assert!(!set.has("key1"));
    /// assert!(!set.remove("key1"));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        self.take(key).is_some()
    }

    /// Removes `key` and returns the stored key.
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        let hash = self.hasher.hash_key(key);
        self.table.remove(hash, key).map(|(key, ())| key)
    }

    /// Returns `true` if `self` has no keys in common with `other`.
    pub fn is_disjoint(&self, other: &HashSet<T, S>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if every key of `self` is also in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let a: HashSet<&str> = ["x", "y"].into_iter().collect();
    /// let b: HashSet<&str> = ["x", "y", "z"].into_iter().collect();
    ///
    /// assert!(a.is_subset(&b));
    /// assert!(b.is_superset(&a));
    /// assert!(!b.is_subset(&a));
    /// ```
    pub fn is_subset(&self, other: &HashSet<T, S>) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if every key of `other` is also in `self`.
    pub fn is_superset(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Keys in `self` or `other`, each yielded once.
    pub fn union<'a>(&'a self, other: &'a HashSet<T, S>) -> Union<'a, T, S> {
        Union {
            iter: self.iter(),
            other_iter: other.iter(),
            set: self,
        }
    }

    /// Keys in both `self` and `other`.
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, S>) -> Intersection<'a, T, S> {
        Intersection {
            iter: self.iter(),
            other,
        }
    }

    /// Keys in `self` but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, S>) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }
}

impl<T, S> Default for HashSet<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.set(key);
        }
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Eq,
    S: KeyHasher<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::default();
        set.extend(iter);
        set
    }
}

impl<T, S> IntoIterator for HashSet<T, S> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys of a [`HashSet`].
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: hash_table::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.key())
    }
}

/// A draining iterator over the keys of a [`HashSet`].
pub struct Drain<'a, T> {
    inner: hash_table::IntoIter<T, ()>,
    _set: core::marker::PhantomData<&'a mut HashTable<T, ()>>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, ())| key)
    }
}

/// A consuming iterator over the keys of a [`HashSet`].
pub struct IntoIter<T> {
    inner: hash_table::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, ())| key)
    }
}

/// An iterator over the union of two sets.
pub struct Union<'a, T, S> {
    iter: Iter<'a, T>,
    other_iter: Iter<'a, T>,
    set: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.iter.next() {
            return Some(v);
        }
        loop {
            let v = self.other_iter.next()?;
            if !self.set.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the difference of two sets.
pub struct Difference<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if !self.other.contains(v) {
                return Some(v);
            }
        }
    }
}
