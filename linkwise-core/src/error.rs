//! Error types for the linkwise core library.
//!
//! Defines the error enum raised by [`crate::IncrementalGraph`], its stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Why a component query was refused.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UnsupportedReason {
    /// The graph was built with `union_find` disabled.
    UnionFindDisabled,
    /// Components are undefined on directed graphs.
    Directed,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnionFindDisabled => "union-find tracking is disabled",
            Self::Directed => "the graph is directed",
        })
    }
}

/// Error type produced by [`crate::IncrementalGraph`] operations.
///
/// Vertex payloads are captured through their `Debug` rendering so the error
/// stays independent of the graph's vertex type.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// No edge record exists for the directed pair.
    #[error("no edge from {from} to {to}")]
    NoSuchEdge {
        /// Rendered source vertex.
        from: String,
        /// Rendered target vertex.
        to: String,
    },
    /// A component query was issued on a graph that does not track components.
    #[error("`{operation}` is unsupported: {reason}")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Why the graph cannot answer it.
        reason: UnsupportedReason,
    },
    /// The vertex is already registered.
    #[error("vertex {vertex} is already present")]
    DuplicateVertex {
        /// Rendered vertex.
        vertex: String,
    },
    /// The vertex has never been registered.
    #[error("vertex {vertex} is not present")]
    UnknownVertex {
        /// Rendered vertex.
        vertex: String,
    },
}

impl GraphError {
    pub(crate) fn no_such_edge(from: &impl fmt::Debug, to: &impl fmt::Debug) -> Self {
        Self::NoSuchEdge {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    pub(crate) fn duplicate_vertex(vertex: &impl fmt::Debug) -> Self {
        Self::DuplicateVertex {
            vertex: format!("{vertex:?}"),
        }
    }

    pub(crate) fn unknown_vertex(vertex: &impl fmt::Debug) -> Self {
        Self::UnknownVertex {
            vertex: format!("{vertex:?}"),
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// No edge record exists for the directed pair.
        NoSuchEdge => NoSuchEdge { .. } => "LINKWISE_NO_SUCH_EDGE",
        /// A component query was issued on a graph that does not track components.
        Unsupported => Unsupported { .. } => "LINKWISE_UNSUPPORTED",
        /// The vertex is already registered.
        DuplicateVertex => DuplicateVertex { .. } => "LINKWISE_DUPLICATE_VERTEX",
        /// The vertex has never been registered.
        UnknownVertex => UnknownVertex { .. } => "LINKWISE_UNKNOWN_VERTEX",
    }
}

/// Convenient alias for results returned by the graph API.
pub type Result<T> = core::result::Result<T, GraphError>;
