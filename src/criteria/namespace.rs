use crate::constants::{NAMESPACE_KEY, OPCODE_KEY};
use crate::error::{OplogError, Result};

use super::Criterion;
use super::opcode::Opcode;
use super::operation::{OperationType, classify_namespace};
use super::text::quoted_value;

/// Accepts (or, when excluding, rejects) records that belong to one
/// namespace, optionally narrowed to a single operation.
///
/// The configured namespace is `db.collection` (any operation) or
/// `db.collection.<insert|update|delete|command>`. Its collection part and
/// opcode are derived once, here, and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceCriteria {
    namespace: String,
    exclude: bool,
    collection_namespace: String,
    opcode: Opcode,
}

impl NamespaceCriteria {
    #[must_use]
    pub fn new<S: Into<String>>(namespace: S, exclude: bool) -> Self {
        let namespace = namespace.into();
        let (collection_namespace, opcode) = classify_namespace(&namespace);
        let collection_namespace = collection_namespace.to_owned();
        Self {
            namespace,
            exclude,
            collection_namespace,
            opcode,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn collection_namespace(&self) -> &str {
        &self.collection_namespace
    }

    /// Opcode records must carry, or `NO_OP` when any opcode is accepted.
    #[must_use]
    pub fn opcode(&self) -> &'static str {
        self.opcode.code()
    }

    #[must_use]
    pub fn excludes(&self) -> bool {
        self.exclude
    }

    fn is_criteria_satisfied(&self, record: &str) -> bool {
        let Some(record_namespace) = quoted_value(record, NAMESPACE_KEY).filter(|ns| !ns.is_empty())
        else {
            return false;
        };
        let operation = OperationType::create(record_namespace);
        if !operation.matches(record, record_namespace, &self.collection_namespace) {
            return false;
        }
        match operation {
            OperationType::Ddl => true,
            OperationType::Data => self.match_operation(record),
        }
    }

    fn match_operation(&self, record: &str) -> bool {
        if self.opcode.is_no_op() {
            return true;
        }
        match record_opcode(record) {
            Ok(opcode) => opcode == self.opcode.code(),
            Err(err) => {
                tracing::debug!(
                    criteria.namespace = %self.namespace,
                    error = %err,
                    "record treated as non-matching"
                );
                false
            }
        }
    }
}

impl Criterion for NamespaceCriteria {
    fn is_satisfied_by(&self, record: &str) -> bool {
        if self.exclude {
            return !self.is_criteria_satisfied(record);
        }
        self.is_criteria_satisfied(record)
    }
}

/// The record's own `op` value.
pub fn record_opcode(record: &str) -> Result<&str> {
    match quoted_value(record, OPCODE_KEY) {
        Some(opcode) if !opcode.is_empty() => Ok(opcode),
        Some(_) => Err(OplogError::MalformedRecord {
            reason: "empty \"op\" value".into(),
        }),
        None => Err(OplogError::MalformedRecord {
            reason: "missing \"op\" key".into(),
        }),
    }
}
