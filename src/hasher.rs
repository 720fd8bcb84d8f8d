use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use core::hash::BuildHasher;
use core::hash::Hash;

const MULTIPLIER: u64 = 31;

/// Polynomial string hash: `h = h * 31 + c` over every `char` of `key`.
///
/// Each multiply-add wraps modulo 2^64. Keys whose exact polynomial value
/// fits in 64 bits (ASCII keys of up to 12 characters, for instance) hash to
/// the same value as an arbitrary-precision evaluation. Because 2^64 is a
/// multiple of every power of two, bucket indices for power-of-two bucket
/// counts agree with the arbitrary-precision result for keys of any length.
///
/// # Examples
///
/// ```rust
/// use chain_hash::hasher::polynomial_hash;
///
/// assert_eq!(polynomial_hash(""), 0);
/// assert_eq!(polynomial_hash("a"), 97);
/// assert_eq!(polynomial_hash("ab"), 97 * 31 + 98);
/// ```
pub fn polynomial_hash(key: &str) -> u64 {
    key.chars().fold(0, |acc: u64, c| {
        acc.wrapping_mul(MULTIPLIER).wrapping_add(u64::from(c))
    })
}

/// Reduces a hash to a bucket index in `0..buckets`.
///
/// `buckets` must be non-zero.
#[inline]
pub fn bucket_index(hash: u64, buckets: usize) -> usize {
    debug_assert!(buckets > 0);
    // The remainder is below `buckets`, so narrowing back is lossless.
    (hash % buckets as u64) as usize
}

/// A key hashing strategy.
///
/// Tables are parameterized over a `KeyHasher` the way `std` collections are
/// parameterized over a [`BuildHasher`]. A strategy must be deterministic:
/// equal keys always produce equal hashes. When a table is queried with a
/// borrowed form `Q` of its key type `K`, `hash_key` for `Q` must agree with
/// `hash_key` for `K`.
pub trait KeyHasher<Q: ?Sized> {
    /// Hashes `key` to a 64-bit value.
    fn hash_key(&self, key: &Q) -> u64;
}

/// The default strategy: [`polynomial_hash`] over the key's characters.
///
/// Implemented for the string types and `char` (a one-character string and
/// the `char` itself hash identically), plus references to any of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Polynomial31;

impl KeyHasher<str> for Polynomial31 {
    fn hash_key(&self, key: &str) -> u64 {
        polynomial_hash(key)
    }
}

impl KeyHasher<String> for Polynomial31 {
    fn hash_key(&self, key: &String) -> u64 {
        polynomial_hash(key)
    }
}

impl KeyHasher<Box<str>> for Polynomial31 {
    fn hash_key(&self, key: &Box<str>) -> u64 {
        polynomial_hash(key)
    }
}

impl KeyHasher<Cow<'_, str>> for Polynomial31 {
    fn hash_key(&self, key: &Cow<'_, str>) -> u64 {
        polynomial_hash(key)
    }
}

impl KeyHasher<char> for Polynomial31 {
    fn hash_key(&self, key: &char) -> u64 {
        u64::from(*key)
    }
}

impl<T> KeyHasher<&T> for Polynomial31
where
    T: ?Sized,
    Polynomial31: KeyHasher<T>,
{
    fn hash_key(&self, key: &&T) -> u64 {
        self.hash_key(*key)
    }
}

/// Adapts any [`BuildHasher`] into a [`KeyHasher`] so tables can hold
/// arbitrary [`Hash`] keys.
///
/// # Examples
///
/// ```rust
/// use std::hash::RandomState;
///
/// use chain_hash::HashMap;
/// use chain_hash::hasher::StdHasher;
///
/// let mut map = HashMap::with_hasher(StdHasher::new(RandomState::new()));
/// map.set(7_u32, "seven");
/// assert_eq!(map.get(&7), Some(&"seven"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StdHasher<S> {
    hash_builder: S,
}

impl<S> StdHasher<S> {
    /// Wraps a hasher builder.
    pub fn new(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// The wrapped hasher builder.
    pub fn hash_builder(&self) -> &S {
        &self.hash_builder
    }
}

impl<Q, S> KeyHasher<Q> for StdHasher<S>
where
    Q: Hash + ?Sized,
    S: BuildHasher,
{
    fn hash_key(&self, key: &Q) -> u64 {
        self.hash_builder.hash_one(key)
    }
}

/// [`StdHasher`] over the standard library's randomly seeded SipHash.
#[cfg(feature = "std")]
pub type RandomStateHasher = StdHasher<std::hash::RandomState>;

#[cfg(test)]
mod tests {
    use alloc::borrow::ToOwned;
    use alloc::string::ToString;

    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone, Default)]
    struct SipHashBuilder;

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new()
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(polynomial_hash(""), 0);
        assert_eq!(polynomial_hash("a"), 97);
        assert_eq!(polynomial_hash("ab"), 3105);
        assert_eq!(polynomial_hash("key0"), 3_288_497);
        assert_eq!(polynomial_hash("hello world"), 88_006_926_820_958_916);
    }

    #[test]
    fn test_hashes_code_points_not_bytes() {
        // 'é' is two UTF-8 bytes but a single code point (233).
        assert_eq!(polynomial_hash("héllo"), 103_094_734);
    }

    #[test]
    fn test_long_keys_wrap() {
        let key = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(polynomial_hash(key), 7_250_214_665_611_535_789);
        // Power-of-two bucket counts agree with the unbounded evaluation.
        assert_eq!(bucket_index(polynomial_hash(key), 16), 13);
        assert_eq!(bucket_index(polynomial_hash(key), 8), 5);
    }

    #[test]
    fn test_bucket_index_in_range() {
        for buckets in 1..64 {
            for key in ["", "a", "key0", "key1", "a much longer key than usual"] {
                assert!(bucket_index(polynomial_hash(key), buckets) < buckets);
            }
        }
        assert_eq!(bucket_index(polynomial_hash("key3"), 4), 0);
        assert_eq!(bucket_index(polynomial_hash("key3"), 8), 4);
    }

    #[test]
    fn test_borrowed_forms_agree() {
        let hasher = Polynomial31;
        let owned = "k1".to_string();
        let boxed: Box<str> = "k1".into();
        let cow: Cow<'_, str> = Cow::Owned("k1".to_owned());

        let expected = hasher.hash_key("k1");
        assert_eq!(expected, 3366);
        assert_eq!(hasher.hash_key(&owned), expected);
        assert_eq!(hasher.hash_key(&boxed), expected);
        assert_eq!(hasher.hash_key(&cow), expected);
        assert_eq!(hasher.hash_key(&"k1"), expected);
        assert_eq!(hasher.hash_key(&'x'), hasher.hash_key("x"));
    }

    #[test]
    fn test_std_hasher_matches_builder() {
        let hasher = StdHasher::new(SipHashBuilder);
        assert_eq!(hasher.hash_key(&42_u64), SipHashBuilder.hash_one(42_u64));
        assert_eq!(hasher.hash_key("k1"), hasher.hash_key(&"k1".to_string()));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_random_state_hasher_backs_a_map() {
        let hasher = RandomStateHasher::default();
        assert_eq!(hasher.hash_key(&(1_u8, 'x')), hasher.hash_key(&(1_u8, 'x')));

        let mut map = crate::HashMap::with_hasher(hasher);
        map.set((1_u8, 'x'), "pair");
        assert_eq!(map.get(&(1_u8, 'x')), Some(&"pair"));
        assert!(!map.has(&(2_u8, 'x')));
    }
}
