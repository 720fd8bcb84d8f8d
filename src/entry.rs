/// A single key/value pair stored in a [`Chain`](crate::chain::Chain).
///
/// Entries live in their chain's arena and are linked by slot index. The
/// chain owns every entry reachable from its head, and an entry is never
/// shared between chains. Set tables store `()` as the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
    next: Option<usize>,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            next: None,
        }
    }

    /// The entry's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The entry's value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Mutable access to the value. The key is never exposed mutably since
    /// changing it would invalidate the bucket it was hashed into.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Both halves of the pair, borrowed.
    pub fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Consumes the entry, returning its key and value.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    pub(crate) fn pair_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    pub(crate) fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    pub(crate) fn next(&self) -> Option<usize> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<usize>) {
        self.next = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut entry = Entry::new("a", 1);
        assert_eq!(entry.key(), &"a");
        assert_eq!(entry.value(), &1);
        assert_eq!(entry.next(), None);

        *entry.value_mut() += 9;
        assert_eq!(entry.pair(), (&"a", &10));

        assert_eq!(entry.replace_value(3), 10);
        assert_eq!(entry.into_pair(), ("a", 3));
    }
}
