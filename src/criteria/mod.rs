//! Accept/reject predicates over raw oplog records.

mod namespace;
mod opcode;
mod operation;
pub mod text;

use std::fmt;

pub use namespace::{NamespaceCriteria, record_opcode};
pub use opcode::Opcode;
pub use operation::{OperationType, classify_namespace};

/// A predicate over one textual record.
pub trait Criterion {
    fn is_satisfied_by(&self, record: &str) -> bool;
}

impl<C: Criterion + ?Sized> Criterion for &C {
    fn is_satisfied_by(&self, record: &str) -> bool {
        (**self).is_satisfied_by(record)
    }
}

impl<C: Criterion + ?Sized> Criterion for Box<C> {
    fn is_satisfied_by(&self, record: &str) -> bool {
        (**self).is_satisfied_by(record)
    }
}

/// Satisfied when every member is. An empty set accepts everything.
#[derive(Default)]
pub struct AllCriteria {
    members: Vec<Box<dyn Criterion + Send + Sync>>,
}

impl AllCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<C>(&mut self, criterion: C)
    where
        C: Criterion + Send + Sync + 'static,
    {
        self.members.push(Box::new(criterion));
    }

    #[must_use]
    pub fn with<C>(mut self, criterion: C) -> Self
    where
        C: Criterion + Send + Sync + 'static,
    {
        self.push(criterion);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Criterion for AllCriteria {
    fn is_satisfied_by(&self, record: &str) -> bool {
        self.members
            .iter()
            .all(|criterion| criterion.is_satisfied_by(record))
    }
}

impl fmt::Debug for AllCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllCriteria")
            .field("members", &self.members.len())
            .finish()
    }
}
