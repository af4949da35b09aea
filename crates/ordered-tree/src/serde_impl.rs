//! `serde` support, enabled by the `serde` feature.
//!
//! Maps serialize as maps and sets as sequences, both in key order.
//! Deserialization uses the default comparator and rejects duplicate keys.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::map::SortedMap;
use crate::set::SortedSet;

impl<K: Serialize, V: Serialize, C> Serialize for SortedMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Serialize, C> Serialize for SortedSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for k in self.iter() {
            seq.serialize_element(k)?;
        }
        seq.end()
    }
}

struct MapVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = SortedMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with unique keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = SortedMap::new();
        while let Some((k, v)) = access.next_entry()? {
            if !map.try_insert(k, v).map_err(A::Error::custom)? {
                return Err(A::Error::custom("duplicate map key"));
            }
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for SortedMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}

struct SetVisitor<K>(PhantomData<K>);

impl<'de, K> Visitor<'de> for SetVisitor<K>
where
    K: Deserialize<'de> + Ord,
{
    type Value = SortedSet<K>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of unique keys")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = SortedSet::new();
        while let Some(k) = access.next_element()? {
            if !set.try_insert(k).map_err(A::Error::custom)? {
                return Err(A::Error::custom("duplicate set element"));
            }
        }
        Ok(set)
    }
}

impl<'de, K> Deserialize<'de> for SortedSet<K>
where
    K: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SetVisitor(PhantomData))
    }
}
