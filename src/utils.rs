use fnv::FnvHasher;
use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hash}
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;
pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Construct a hash set sized up front for `capacity` items.
/// FNV beats the default SipHash on the small fixed width coordinate keys
/// the search code uses, at the cost of collision attack robustness.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashSet::<T, _>::with_capacity_and_hasher(capacity, fnv)
}

/// Construct a hash map sized up front for `capacity` keys.
/// Same hashing trade off as `fnv_hashset`.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashMap::<K, V, _>::with_capacity_and_hasher(capacity, fnv)
}
