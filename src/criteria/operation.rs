//! Classification of namespaces into collection + opcode, and of records into
//! structural (DDL) versus data operations.

use crate::constants::{COMMAND_COLLECTION, NAMESPACE_KEY, OBJECT_KEY, SYSTEM_INDEXES};

use super::opcode::Opcode;
use super::text::{object_value, quoted_value};

/// Command keys whose value names the collection a `db.$cmd` record targets.
const COLLECTION_COMMANDS: [&str; 6] = [
    "create",
    "drop",
    "createIndexes",
    "dropIndexes",
    "deleteIndexes",
    "collMod",
];
const RENAME_COMMAND: &str = "renameCollection";
const RENAME_TARGET: &str = "to";
const DROP_DATABASE_COMMAND: &str = "dropDatabase";

/// Split a filter namespace (`db.collection` or `db.collection.operation`)
/// into its collection namespace and opcode.
///
/// When the last segment is not an operation token, the whole input is the
/// collection namespace and the opcode is [`Opcode::NoOp`].
#[must_use]
pub fn classify_namespace(namespace: &str) -> (&str, Opcode) {
    match namespace.rsplit_once('.') {
        Some((collection, token)) => match Opcode::map(token) {
            Opcode::NoOp => (namespace, Opcode::NoOp),
            opcode => (collection, opcode),
        },
        None => (namespace, Opcode::NoOp),
    }
}

/// Kind of operation a record represents, decided from the record's own namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Database command or index build (`db.$cmd`, `db.system.indexes`).
    Ddl,
    /// Insert, update or delete against a collection.
    Data,
}

impl OperationType {
    #[must_use]
    pub fn create(record_namespace: &str) -> Self {
        if is_command_namespace(record_namespace) || is_index_namespace(record_namespace) {
            Self::Ddl
        } else {
            Self::Data
        }
    }

    /// Whether `record` (whose namespace is `record_namespace`) concerns
    /// `collection_namespace`.
    #[must_use]
    pub fn matches(self, record: &str, record_namespace: &str, collection_namespace: &str) -> bool {
        match self {
            Self::Data => record_namespace == collection_namespace,
            Self::Ddl => {
                record_namespace == collection_namespace
                    || ddl_targets(record, record_namespace, collection_namespace)
            }
        }
    }
}

fn is_command_namespace(namespace: &str) -> bool {
    namespace
        .rsplit_once('.')
        .is_some_and(|(_, last)| last == COMMAND_COLLECTION)
}

fn is_index_namespace(namespace: &str) -> bool {
    namespace
        .split_once('.')
        .is_some_and(|(_, rest)| rest == SYSTEM_INDEXES)
}

fn database_of(namespace: &str) -> &str {
    namespace.split_once('.').map_or(namespace, |(db, _)| db)
}

/// `collection_namespace == format!("{db}.{collection}")` without allocating.
fn is_same_collection(collection_namespace: &str, db: &str, collection: &str) -> bool {
    collection_namespace
        .strip_prefix(db)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|rest| rest == collection)
}

fn ddl_targets(record: &str, record_namespace: &str, collection_namespace: &str) -> bool {
    let Some(body) = object_value(record, OBJECT_KEY) else {
        return false;
    };
    let db = database_of(record_namespace);

    if is_index_namespace(record_namespace) {
        return quoted_value(body, NAMESPACE_KEY) == Some(collection_namespace);
    }

    if quoted_value(body, DROP_DATABASE_COMMAND).is_some() {
        return database_of(collection_namespace) == db;
    }

    if let Some(source) = quoted_value(body, RENAME_COMMAND) {
        return source == collection_namespace
            || quoted_value(body, RENAME_TARGET) == Some(collection_namespace);
    }

    COLLECTION_COMMANDS
        .iter()
        .find_map(|command| quoted_value(body, command))
        .is_some_and(|collection| is_same_collection(collection_namespace, db, collection))
}
