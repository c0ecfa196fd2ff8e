//! Edge descriptors and the weight abstraction.

use std::{cmp::Ordering, fmt::Debug};

/// Stateless weight function used to fill in weights that are not given
/// explicitly. Plain `fn` pointers cannot capture state.
pub type WeightFn<V, W> = fn(&V, &V) -> W;

/// Values usable as edge weights.
///
/// Ordering must be total so the distance cache can sort reproducibly; floats
/// use IEEE 754 `totalOrder`.
pub trait Weight: Copy + Debug {
    /// Compares two weights.
    fn compare(&self, other: &Self) -> Ordering;
}

macro_rules! impl_integer_weight {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Weight for $ty {
                fn compare(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )+
    };
}

impl_integer_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Weight for f32 {
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Weight for f64 {
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// An edge to insert, with optional explicit weight and active state.
///
/// # Examples
/// ```
/// use linkwise_core::EdgeSpec;
///
/// let spec: EdgeSpec<char, u32> = ('a', 'b', 7).into();
/// assert_eq!(spec.weight, Some(7));
/// assert_eq!(spec.active, None);
///
/// let spec = EdgeSpec::<char, u32>::new('a', 'c').with_active(true);
/// assert_eq!(spec.weight, None);
/// assert_eq!(spec.active, Some(true));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSpec<V, W> {
    /// Source vertex.
    pub source: V,
    /// Target vertex.
    pub target: V,
    /// Explicit weight; the weight function is used when absent.
    pub weight: Option<W>,
    /// Explicit active state; the graph default is used when absent.
    pub active: Option<bool>,
}

impl<V, W> EdgeSpec<V, W> {
    /// An edge with neither weight nor active state specified.
    #[must_use]
    pub const fn new(source: V, target: V) -> Self {
        Self {
            source,
            target,
            weight: None,
            active: None,
        }
    }

    /// Sets an explicit weight.
    #[must_use]
    pub fn with_weight(mut self, weight: W) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets an explicit active state.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

impl<V, W> From<(V, V)> for EdgeSpec<V, W> {
    fn from((source, target): (V, V)) -> Self {
        Self::new(source, target)
    }
}

impl<V, W> From<(V, V, W)> for EdgeSpec<V, W> {
    fn from((source, target, weight): (V, V, W)) -> Self {
        Self::new(source, target).with_weight(weight)
    }
}

impl<V, W> From<(V, V, W, bool)> for EdgeSpec<V, W> {
    fn from((source, target, weight, active): (V, V, W, bool)) -> Self {
        Self::new(source, target)
            .with_weight(weight)
            .with_active(active)
    }
}

/// Stored state of one directional edge record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EdgeState<W> {
    pub(crate) weight: W,
    pub(crate) active: bool,
}
