use crate::constants::NO_OP;

/// Operation tokens accepted in a filter namespace and the oplog code each maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Insert,
    Update,
    Delete,
    Command,
    /// Unspecified operation: matches any opcode.
    NoOp,
}

impl Opcode {
    /// Map an operation token (`insert`, `update`, ...) or its one-letter
    /// code to an opcode. Matching ignores ASCII case; anything unrecognised
    /// is [`Opcode::NoOp`].
    #[must_use]
    pub fn map(token: &str) -> Self {
        const TOKENS: [(&str, Opcode); 4] = [
            ("insert", Opcode::Insert),
            ("update", Opcode::Update),
            ("delete", Opcode::Delete),
            ("command", Opcode::Command),
        ];
        TOKENS
            .iter()
            .find(|(name, opcode)| {
                name.eq_ignore_ascii_case(token) || opcode.code().eq_ignore_ascii_case(token)
            })
            .map_or(Self::NoOp, |(_, opcode)| *opcode)
    }

    /// Code as written in a record's `op` field, or the `NO_OP` sentinel.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Insert => "i",
            Self::Update => "u",
            Self::Delete => "d",
            Self::Command => "c",
            Self::NoOp => NO_OP,
        }
    }

    #[must_use]
    pub fn is_no_op(self) -> bool {
        self == Self::NoOp
    }
}
