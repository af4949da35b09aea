use std::cmp::Ordering;

/// Parent/child link access shared by the navigator and the balancer.
///
/// Links are arena indices. `None` is an absent child (nil) or, for the
/// parent link, the root.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// A node that carries a key the tree is ordered by.
pub trait KvNode: Node {
    type Key;
    type Value;

    fn key(&self) -> &Self::Key;
    fn value(&self) -> &Self::Value;
    fn value_mut(&mut self) -> &mut Self::Value;
}

/// A node that carries a red-black color bit.
pub trait RbNodeLike: Node {
    fn is_black(&self) -> bool;
    fn set_black(&mut self, black: bool);
}

/// Red-black tree node.
#[derive(Clone, Debug)]
pub struct RbNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// `false` = red, `true` = black.
    pub b: bool,
}

impl<K, V> RbNode<K, V> {
    /// A detached red node.
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            b: false,
        }
    }

    pub fn into_entry(self) -> (K, V) {
        (self.k, self.v)
    }
}

impl<K, V> Node for RbNode<K, V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K, V> KvNode for RbNode<K, V> {
    type Key = K;
    type Value = V;

    fn key(&self) -> &K {
        &self.k
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }
}

impl<K, V> RbNodeLike for RbNode<K, V> {
    fn is_black(&self) -> bool {
        self.b
    }

    fn set_black(&mut self, black: bool) {
        self.b = black;
    }
}

/// Comparator used by `new()` constructors: the key type's total order.
pub fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}
