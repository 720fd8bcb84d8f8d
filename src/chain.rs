use alloc::vec;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;

use crate::entry::Entry;

/// A singly linked chain of entries that share one bucket.
///
/// Entries are kept in an arena and linked by slot index rather than by
/// pointer. `head` and `tail` name the first and last reachable slots, so
/// appending is O(1) and every other lookup is a linear walk from the head.
/// Removing an entry unlinks it and then fills its slot with the arena's last
/// entry, re-pointing the one link that referred to the moved slot. Arena
/// order is therefore unrelated to chain order; only the links define the
/// sequence.
///
/// Positional operations accept negative indices counted from the end
/// (`-1` is the last entry). Out-of-range positions yield `None`.
///
/// # Examples
///
/// ```rust
/// use chain_hash::Chain;
///
/// let mut chain = Chain::new();
/// chain.append("a", 10);
/// chain.append("b", 20);
///
/// assert_eq!(chain.to_string(), "( a: 10 ) -> ( b: 20 ) -> nil");
/// assert_eq!(chain.at(-1).map(|e| *e.key()), Some("b"));
/// assert_eq!(chain.remove_by_key("a"), Some(10));
/// assert_eq!(chain.len(), 1);
/// ```
#[derive(Clone)]
pub struct Chain<K, V> {
    entries: Vec<Entry<K, V>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K, V> Chain<K, V> {
    /// Creates an empty chain.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// The number of entries reachable from the head.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the chain holds no entries.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The first entry, if any.
    pub fn head(&self) -> Option<&Entry<K, V>> {
        self.head.map(|slot| &self.entries[slot])
    }

    /// The last entry, if any.
    pub fn tail(&self) -> Option<&Entry<K, V>> {
        self.tail.map(|slot| &self.entries[slot])
    }

    /// Same as [`head`](Self::head).
    pub fn first(&self) -> Option<&Entry<K, V>> {
        self.head()
    }

    /// Same as [`tail`](Self::tail).
    pub fn last(&self) -> Option<&Entry<K, V>> {
        self.tail()
    }

    /// Adds an entry after the current tail in O(1).
    ///
    /// No duplicate check is made; use [`insert_or_update`](Self::insert_or_update)
    /// to keep keys unique.
    pub fn append(&mut self, key: K, value: V) {
        let slot = self.entries.len();
        self.entries.push(Entry::new(key, value));
        match self.tail {
            Some(tail) => self.entries[tail].set_next(Some(slot)),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    /// Returns a lazy, front-to-back iterator over the entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: &self.entries,
            cursor: self.head,
            remaining: self.entries.len(),
        }
    }

    /// Returns a front-to-back iterator yielding mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        // Hand out each slot at most once, in link order.
        let mut order = Vec::with_capacity(self.entries.len());
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            order.push(slot);
            cursor = self.entries[slot].next();
        }

        let mut slots: Vec<Option<&mut Entry<K, V>>> =
            self.entries.iter_mut().map(Some).collect();
        let ordered = order
            .into_iter()
            .filter_map(|slot| slots[slot].take())
            .collect::<Vec<_>>();

        IterMut {
            inner: ordered.into_iter(),
        }
    }

    /// Keys in chain order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(Entry::key)
    }

    /// Values in chain order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(Entry::value)
    }

    /// Key/value pairs in chain order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.iter().map(Entry::pair)
    }

    /// Returns the entry at `index`, counting from the end when negative.
    pub fn at(&self, index: isize) -> Option<&Entry<K, V>> {
        let index = self.resolve_index(index)?;
        self.iter().nth(index)
    }

    /// Removes the entry at `index`, counting from the end when negative,
    /// and returns its value.
    pub fn remove_at(&mut self, index: isize) -> Option<V> {
        let index = self.resolve_index(index)?;

        let mut prev = None;
        let mut cursor = self.head;
        for _ in 0..index {
            let slot = cursor?;
            prev = Some(slot);
            cursor = self.entries[slot].next();
        }

        let slot = cursor?;
        Some(self.unlink(prev, slot).into_pair().1)
    }

    /// Position of the first entry matching `predicate`.
    pub fn find_index_by(&self, mut predicate: impl FnMut(&Entry<K, V>) -> bool) -> Option<usize> {
        self.iter().position(|entry| predicate(entry))
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.head = None;
        self.tail = None;
    }

    /// Keeps only the entries for which `f` returns `true`, preserving order.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let (key, value) = self.entries[slot].pair_mut();
            if f(key, value) {
                prev = Some(slot);
                cursor = self.entries[slot].next();
                continue;
            }

            let next = self.entries[slot].next();
            let last = self.entries.len() - 1;
            self.unlink(prev, slot);
            // `unlink` moved the old last slot into `slot`; follow it if the
            // walk was about to visit it.
            cursor = if next == Some(last) && slot != last {
                Some(slot)
            } else {
                next
            };
            if prev == Some(last) && slot != last {
                prev = Some(slot);
            }
        }
    }

    /// Formats the chain as `"<entry> -> <entry> -> nil"`, rendering each
    /// entry with `render`. An empty chain renders as `" -> nil"`.
    pub fn fmt_with(
        &self,
        f: &mut fmt::Formatter<'_>,
        mut render: impl FnMut(&Entry<K, V>, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        for (position, entry) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            render(entry, f)?;
        }
        f.write_str(" -> nil")
    }

    fn resolve_index(&self, index: isize) -> Option<usize> {
        let len = self.entries.len();
        let resolved = if index < 0 {
            len.checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        (resolved < len).then_some(resolved)
    }

    /// Detaches the entry in `slot`, whose predecessor is `prev`, and
    /// compacts the arena.
    fn unlink(&mut self, prev: Option<usize>, slot: usize) -> Entry<K, V> {
        let next = self.entries[slot].next();
        match prev {
            Some(prev) => self.entries[prev].set_next(next),
            None => self.head = next,
        }
        if self.tail == Some(slot) {
            self.tail = prev;
        }

        let last = self.entries.len() - 1;
        let removed = self.entries.swap_remove(slot);
        if slot != last {
            self.relocate(last, slot);
        }

        debug_assert_eq!(self.head.is_none(), self.tail.is_none());
        removed
    }

    /// Re-points the link that referred to `from`, which now lives at `to`.
    fn relocate(&mut self, from: usize, to: usize) {
        if self.head == Some(from) {
            self.head = Some(to);
        } else if let Some(pred) = self
            .entries
            .iter_mut()
            .find(|entry| entry.next() == Some(from))
        {
            pred.set_next(Some(to));
        }

        if self.tail == Some(from) {
            self.tail = Some(to);
        }
    }
}

impl<K, V> Chain<K, V>
where
    K: Eq,
{
    /// Returns the first entry whose key equals `key`.
    pub fn find_by_key<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.iter().find(|entry| entry.key().borrow() == key)
    }

    /// Mutable form of [`find_by_key`](Self::find_by_key).
    pub fn find_by_key_mut<Q>(&mut self, key: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let (_, slot) = self.locate(key)?;
        Some(&mut self.entries[slot])
    }

    /// Position of the first entry whose key equals `key`.
    pub fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.find_index_by(|entry| entry.key().borrow() == key)
    }

    /// Returns `true` if some entry has the key `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.find_by_key(key).is_some()
    }

    /// Overwrites the value of the entry keyed `key` in place, or appends a
    /// new entry if there is none. Returns the replaced value.
    ///
    /// The stored key is kept when the entry already exists.
    pub fn insert_or_update(&mut self, key: K, value: V) -> Option<V> {
        match self.find_by_key_mut(&key) {
            Some(entry) => Some(entry.replace_value(value)),
            None => {
                self.append(key, value);
                None
            }
        }
    }

    /// Unlinks the entry keyed `key` and returns its value.
    pub fn remove_by_key<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Unlinks the entry keyed `key` and returns its key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let (prev, slot) = self.locate(key)?;
        Some(self.unlink(prev, slot).into_pair())
    }

    /// Finds `(predecessor, slot)` of the entry keyed `key`.
    fn locate<Q>(&self, key: &Q) -> Option<(Option<usize>, usize)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let entry = &self.entries[slot];
            if entry.key().borrow() == key {
                return Some((prev, slot));
            }
            prev = Some(slot);
            cursor = entry.next();
        }
        None
    }
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for Chain<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries()).finish()
    }
}

impl<K, V> Display for Chain<K, V>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, |entry, f| {
            write!(f, "( {}: {} )", entry.key(), entry.value())
        })
    }
}

impl<K, V> PartialEq for Chain<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries().eq(other.entries())
    }
}

impl<K, V> Extend<(K, V)> for Chain<K, V>
where
    K: Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert_or_update(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Chain<K, V>
where
    K: Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut chain = Chain::new();
        chain.extend(iter);
        chain
    }
}

impl<K, V> IntoIterator for Chain<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        let mut slots: Vec<Option<Entry<K, V>>> = self.entries.into_iter().map(Some).collect();

        // Pull entries out in link order so the consumer sees chain order.
        let mut ordered = Vec::with_capacity(slots.len());
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let Some(entry) = slots[slot].take() else {
                break;
            };
            cursor = entry.next();
            ordered.push(entry.into_pair());
        }

        IntoIter {
            inner: ordered.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Chain<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = &'a Entry<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A forward iterator over the entries of a [`Chain`].
///
/// Created by [`Chain::iter`]; each call starts again from the head.
#[derive(Clone)]
pub struct Iter<'a, K, V> {
    entries: &'a [Entry<K, V>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let entry = &self.entries[slot];
        self.cursor = entry.next();
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// A forward iterator over a [`Chain`] yielding mutable values.
pub struct IterMut<'a, K, V> {
    inner: vec::IntoIter<&'a mut Entry<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::pair_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A consuming iterator over a [`Chain`], in chain order.
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
