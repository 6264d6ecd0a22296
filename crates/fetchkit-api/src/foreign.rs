//! Opaque handles on values owned by the other side of the boundary.
//!
//! A `Foreign` carries a value this crate does not know the type of (an
//! engine repository or logger) so that it can travel through the public
//! model unchanged. Handles compare by the identity of the value they wrap,
//! never structurally.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Value that can be carried by a `Foreign` handle
pub trait ForeignValue: Any + Send + Sync + fmt::Debug {
    /// Address of the wrapped value; equal identities mean the same value
    fn identity(&self) -> usize;

    fn as_any(&self) -> &dyn Any;
}

/// Opaque, identity-compared handle
#[derive(Clone)]
pub struct Foreign(Arc<dyn ForeignValue>);

impl Foreign {
    pub fn new(value: impl ForeignValue) -> Self {
        Self(Arc::new(value))
    }

    pub fn identity(&self) -> usize {
        self.0.identity()
    }

    /// Recover the wrapped value if it has type `T`
    pub fn downcast_ref<T: ForeignValue>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for Foreign {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Foreign {}

impl fmt::Debug for Foreign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Foreign").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Shared(Arc<String>);

    impl ForeignValue for Shared {
        fn identity(&self) -> usize {
            Arc::as_ptr(&self.0) as usize
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_identity_equality() {
        let value = Arc::new("repo".to_string());
        let a = Foreign::new(Shared(value.clone()));
        let b = Foreign::new(Shared(value));
        let c = Foreign::new(Shared(Arc::new("repo".to_string())));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_downcast() {
        let handle = Foreign::new(Shared(Arc::new("repo".to_string())));
        assert_eq!(handle.downcast_ref::<Shared>().unwrap().0.as_str(), "repo");
    }
}
