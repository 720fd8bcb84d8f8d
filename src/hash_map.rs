use core::borrow::Borrow;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::ops::Index;

use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::hash_table;
use crate::hash_table::HashTable;
use crate::hasher::KeyHasher;
use crate::hasher::Polynomial31;

/// A hash map backed by a separately chained [`HashTable`].
///
/// Keys are hashed with a [`KeyHasher`] strategy `S`, by default
/// [`Polynomial31`], which supports string and `char` keys. Use
/// [`StdHasher`](crate::hasher::StdHasher) to store any [`Hash`](core::hash::Hash)
/// key.
///
/// Setting an existing key overwrites its value in place. The map doubles its
/// bucket count whenever a new key leaves more than `capacity * load_factor`
/// entries, and never shrinks.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
///
/// let mut map = HashMap::with_capacity_and_load_factor(4, 0.75).unwrap();
/// for i in 0..4 {
///     map.set(format!("key{i}"), i);
/// }
///
/// assert_eq!(map.length(), 4);
/// assert_eq!(map.capacity(), 8);
/// assert_eq!(map.get("key2"), Some(&2));
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = Polynomial31> {
    table: HashTable<K, V>,
    hasher: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders every bucket on its own line as `( key: value ) -> ... -> nil`.
impl<K, V, S> Display for HashMap<K, V, S>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.table, f)
    }
}

impl<K, V> HashMap<K, V, Polynomial31> {
    /// Creates an empty map with 16 buckets and a load factor of 0.75.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<String, i32> = HashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty map with `capacity` buckets that grows once it holds
    /// more than `capacity * load_factor` entries.
    ///
    /// # Errors
    ///
    /// Fails if `capacity` is zero or `load_factor` is not a positive finite
    /// number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::ConfigError;
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<String, i32> = HashMap::with_capacity_and_load_factor(4, 0.5).unwrap();
    /// assert_eq!(map.capacity(), 4);
    ///
    /// let err = HashMap::<String, i32>::with_capacity_and_load_factor(0, 0.5).unwrap_err();
    /// assert_eq!(err, ConfigError::ZeroCapacity);
    /// ```
    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_config(TableConfig::new(capacity, load_factor)?))
    }

    /// Creates an empty map from a validated configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, Polynomial31)
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty map with the default configuration and the given
    /// hashing strategy.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(TableConfig::default(), hasher)
    }

    /// Creates an empty map with the given configuration and hashing strategy.
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Self {
        Self {
            table: HashTable::with_config(config),
            hasher,
        }
    }

    /// The map's hashing strategy.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// The number of entries, counted across every bucket.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Same as [`len`](Self::len).
    pub fn length(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// The growth threshold the map was configured with.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Read access to the underlying table, for inspecting bucket layout.
    pub fn table(&self) -> &HashTable<K, V> {
        &self.table
    }

    /// Removes every entry. The bucket count is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.set("a", 1);
    /// map.clear();
    /// assert_eq!(map.length(), 0);
    /// assert_eq!(map.get("a"), None);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// An iterator over the keys, in bucket order then chain order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator over the values, in bucket order then chain order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// An iterator over mutable values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// An iterator over `(key, value)` pairs, in bucket order then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Same as [`iter`](Self::iter).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.set("a", "x");
    /// map.set("b", "y");
    ///
    /// let mut entries: Vec<_> = map.entries().collect();
    /// entries.sort();
    /// assert_eq!(entries, [(&"a", &"x"), (&"b", &"y")]);
    /// ```
    pub fn entries(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// An iterator over `(key, value)` pairs with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Removes every entry and yields it. The bucket count is kept.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
            _map: core::marker::PhantomData,
        }
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub fn retain(&mut self, f: impl FnMut(&K, &mut V) -> bool) {
        self.table.retain(f);
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Eq,
    S: KeyHasher<K>,
{
    /// Stores `value` under `key` and returns the value it replaced.
    ///
    /// An existing entry is updated in place and keeps its original key. A
    /// new key may trigger a rehash into twice as many buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.set("a", 1), None);
    /// assert_eq!(map.set("a", 2), Some(1));
    /// assert_eq!(map.get("a"), Some(&2));
    /// assert_eq!(map.length(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_key(&key);
        let hasher = &self.hasher;
        self.table
            .insert_or_update(hash, key, value, |k| hasher.hash_key(k))
    }

    /// Same as [`set`](Self::set).
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.set(key, value)
    }

    /// Returns the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        self.table
            .find(self.hasher.hash_key(key), key)
            .map(|entry| entry.pair())
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        let hash = self.hasher.hash_key(key);
        self.table.find_mut(hash, key).map(|entry| entry.value_mut())
    }

    /// Returns `true` if `key` is present.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        self.table.contains(self.hasher.hash_key(key), key)
    }

    /// Same as [`has`](Self::has).
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        self.has(key)
    }

    /// Removes `key` and returns its value. Absent keys leave the map
    /// untouched and return `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.set("x", 123);
    /// assert_eq!(map.remove("x"), Some(123));
    /// assert!(!map.has("x"));
    /// assert_eq!(map.remove("nothing"), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key and its value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        S: KeyHasher<Q>,
    {
        let hash = self.hasher.hash_key(key);
        self.table.remove(hash, key)
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Eq,
    V: PartialEq,
    S: KeyHasher<K>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|v| *value == *v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Eq,
    V: Eq,
    S: KeyHasher<K>,
{
}

impl<K, Q, V, S> Index<&Q> for HashMap<K, V, S>
where
    K: Eq + Borrow<Q>,
    Q: Eq + ?Sized,
    S: KeyHasher<K> + KeyHasher<Q>,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not present in map"),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Eq,
    S: KeyHasher<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Eq,
    S: KeyHasher<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::default();
        map.extend(iter);
        map
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

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An iterator over the entries of a [`HashMap`].
#[derive(Clone)]
pub struct Iter<'a, K, V> {
    inner: hash_table::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.pair())
    }
}

/// An iterator over the entries of a [`HashMap`] with mutable values.
pub struct IterMut<'a, K, V> {
    inner: hash_table::IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An iterator over the keys of a [`HashMap`].
#[derive(Clone)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// An iterator over the values of a [`HashMap`].
#[derive(Clone)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}

/// An iterator over mutable values of a [`HashMap`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}

/// A draining iterator over the entries of a [`HashMap`].
pub struct Drain<'a, K, V> {
    inner: hash_table::IntoIter<K, V>,
    _map: core::marker::PhantomData<&'a mut HashTable<K, V>>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A consuming iterator over the entries of a [`HashMap`].
pub struct IntoIter<K, V> {
    inner: hash_table::IntoIter<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use rand::rngs::SmallRng;
    use siphasher::sip::SipHasher;

    use super::*;
    use crate::hasher::StdHasher;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    fn small_map() -> HashMap<String, i32> {
        HashMap::with_capacity_and_load_factor(4, 0.75).unwrap()
    }

    #[test]
    fn test_new_and_defaults() {
        let map: HashMap<String, i32> = HashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.load_factor(), 0.75);

        let map2: HashMap<String, i32> = HashMap::default();
        assert_eq!(map2.capacity(), 16);
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            HashMap::<String, i32>::with_capacity_and_load_factor(0, 0.75).unwrap_err(),
            ConfigError::ZeroCapacity
        );
        assert_eq!(
            HashMap::<String, i32>::with_capacity_and_load_factor(4, -1.0).unwrap_err(),
            ConfigError::InvalidLoadFactor(-1.0)
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut map = small_map();
        assert_eq!(map.set("a".to_string(), 1), None);
        assert_eq!(map.get("a"), Some(&1));

        assert_eq!(map.set("a".to_string(), 2), Some(1));
        assert_eq!(map.get("a"), Some(&2));
        assert_eq!(map.length(), 1);

        assert_eq!(map.get("ghost"), None);
    }

    #[test]
    fn test_has() {
        let mut map = small_map();
        map.set("key".to_string(), 42);
        assert!(map.has("key"));
        assert!(map.contains_key("key"));
        assert!(!map.has("nope"));
    }

    #[test]
    fn test_remove() {
        let mut map = small_map();
        map.set("x".to_string(), 123);
        map.set("y".to_string(), 7);

        assert_eq!(map.remove("x"), Some(123));
        assert!(!map.has("x"));
        assert_eq!(map.remove("nothing"), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove_entry("y"), Some(("y".to_string(), 7)));
        assert!(map.is_empty());
    }

    #[test]
    fn test_length_counts_distinct_keys() {
        let mut map = small_map();
        map.set("a".to_string(), 1);
        map.set("b".to_string(), 2);
        map.set("a".to_string(), 3);
        assert_eq!(map.length(), 2);
    }

    #[test]
    fn test_clear() {
        let mut map = small_map();
        map.set("a".to_string(), 1);
        map.clear();
        assert_eq!(map.length(), 0);
        assert!(!map.has("a"));
        assert_eq!(map.capacity(), 4);
    }

    #[test]
    fn test_keys_values_entries() {
        let mut map = small_map();
        map.set("a".to_string(), 1);
        map.set("b".to_string(), 2);

        let mut keys: Vec<_> = map.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);

        let mut values: Vec<_> = map.values().copied().collect();
        values.sort();
        assert_eq!(values, vec![1, 2]);

        let mut entries: Vec<_> = map.entries().map(|(k, v)| (k.clone(), *v)).collect();
        entries.sort();
        assert_eq!(entries, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_keys_follow_bucket_order() {
        let mut map = small_map();
        for i in 0..4 {
            map.set(format!("key{i}"), i);
        }
        // Buckets 1..=4 of 8 hold key0..key3 in turn.
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["key0", "key1", "key2", "key3"]);
    }

    #[test_log::test]
    fn test_growth_scenario() {
        let mut map = small_map();
        for i in 0..3 {
            map.set(format!("key{i}"), i);
        }
        assert_eq!(map.capacity(), 4);

        map.set("key3".to_string(), 3);
        assert_eq!(map.length(), 4);
        assert_eq!(map.capacity(), 8);
        assert_eq!(map.get("key2"), Some(&2));
    }

    #[test]
    fn test_capacity_never_shrinks() {
        let mut map = HashMap::new();
        for i in 0..20 {
            map.set(format!("k{i}"), i);
        }
        assert_eq!(map.capacity(), 32);

        for i in 0..20 {
            assert_eq!(map.remove(format!("k{i}").as_str()), Some(i));
        }
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 32);

        for i in 0..24 {
            map.set(format!("k{i}"), i);
        }
        assert_eq!(map.capacity(), 32);
        map.set("k24".to_string(), 24);
        assert_eq!(map.capacity(), 64);
        assert!(map.len() as f64 <= map.capacity() as f64 * map.load_factor());
    }

    #[test]
    fn test_to_string() {
        let mut map = small_map();
        map.set("a".to_string(), 1);
        let output = map.to_string();
        assert!(output.contains("( a: 1 )"));
        assert_eq!(output.lines().count(), map.capacity());
    }

    #[test]
    fn test_debug() {
        let mut map = small_map();
        map.set("a".to_string(), 1);
        assert_eq!(format!("{map:?}"), "{\"a\": 1}");
    }

    #[test]
    fn test_get_mut_and_values_mut() {
        let mut map = small_map();
        map.set("a".to_string(), 1);
        map.set("b".to_string(), 2);

        if let Some(value) = map.get_mut("a") {
            *value += 10;
        }
        for value in map.values_mut() {
            *value *= 2;
        }
        assert_eq!(map.get("a"), Some(&22));
        assert_eq!(map["b"], 4);
    }

    #[test]
    #[should_panic(expected = "key not present")]
    fn test_index_missing_panics() {
        let map = small_map();
        let _value: i32 = map["missing"];
    }

    #[test]
    fn test_str_slice_keys() {
        let mut map = HashMap::new();
        map.set("k1", "v1");
        map.set("k2", "v2");
        assert_eq!(map.get("k1"), Some(&"v1"));
        assert_eq!(map.get(&"k2"), Some(&"v2"));

        let mut keys: Vec<_> = map.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, ["k1", "k2"]);
    }

    #[test]
    fn test_char_keys() {
        let mut map = HashMap::new();
        for (i, c) in "hello".chars().enumerate() {
            map.set(c, i);
        }
        assert_eq!(map.len(), 4);
        assert_eq!(map.get(&'l'), Some(&3));
    }

    #[test]
    fn test_std_hasher_with_integer_keys() {
        let mut map = HashMap::with_hasher(StdHasher::new(SipHashBuilder::default()));
        for i in 0..100_u32 {
            map.set(i, i * 2);
        }
        assert_eq!(map.len(), 100);
        assert_eq!(map.capacity(), 256);
        for i in 0..100_u32 {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }
        assert_eq!(map.remove(&50), Some(100));
        assert!(!map.has(&50));
    }

    #[test]
    fn test_retain_and_drain() {
        let mut map = small_map();
        for i in 0..10 {
            map.set(format!("k{i}"), i);
        }
        map.retain(|_, v| *v >= 5);
        assert_eq!(map.len(), 5);

        let capacity = map.capacity();
        let mut drained: Vec<_> = map.drain().map(|(_, v)| v).collect();
        drained.sort();
        assert_eq!(drained, vec![5, 6, 7, 8, 9]);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
    }

    #[test]
    fn test_from_iter_extend_eq() {
        let map: HashMap<String, i32> = [("a".to_string(), 1), ("b".to_string(), 2)]
            .into_iter()
            .collect();
        let mut other = small_map();
        other.extend([("b".to_string(), 2), ("a".to_string(), 1)]);
        assert_eq!(map, other);

        other.set("a".to_string(), 5);
        assert_ne!(map, other);

        let cloned = map.clone();
        let mut pairs: Vec<_> = cloned.into_iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_matches_std_model() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut map = HashMap::with_capacity_and_load_factor(1, 0.75).unwrap();
        let mut model = std::collections::HashMap::new();

        for _ in 0..5_000 {
            let key = format!("k{}", rng.random_range(0..500));
            match rng.random_range(0..3) {
                0 | 1 => {
                    let value = rng.random::<u32>();
                    assert_eq!(map.set(key.clone(), value), model.insert(key, value));
                }
                _ => assert_eq!(map.remove(key.as_str()), model.remove(&key)),
            }
            assert_eq!(map.len(), model.len());
        }

        for (key, value) in &model {
            assert_eq!(map.get(key.as_str()), Some(value));
        }
        assert!(map.capacity().is_power_of_two());
        assert!(map.len() as f64 <= map.capacity() as f64 * 0.75);
    }
}
