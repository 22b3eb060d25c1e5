//! Types for representing branches and branch outcomes.

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N
        }
    }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> bool {
        matches!(x, Outcome::T)
    }
}

/// The control-flow operations that appear in a text trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BranchOp {
    /// An unconditional branch (`BUC`).
    Unconditional,

    /// A conditional branch (`BCN`).
    Conditional,

    /// A procedure call (`CAL`).
    Call,

    /// A procedure return (`RET`).
    Return,
}
impl BranchOp {
    /// Every operation, in the order they are reported.
    pub const ALL: [BranchOp; 4] = [
        Self::Conditional, Self::Unconditional, Self::Call, Self::Return,
    ];

    /// Returns the mnemonic used for this operation in a trace.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Unconditional => "BUC",
            Self::Conditional   => "BCN",
            Self::Call          => "CAL",
            Self::Return        => "RET",
        }
    }

    /// Look up an operation by its trace mnemonic.
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        match s {
            "BUC" => Some(Self::Unconditional),
            "BCN" => Some(Self::Conditional),
            "CAL" => Some(Self::Call),
            "RET" => Some(Self::Return),
            _ => None,
        }
    }
}

/// The size of a single sequential instruction.
pub const INST_SIZE: u32 = 4;

/// Infer the outcome of a branch from the address that followed it.
///
/// A branch that falls through to the next sequential instruction is
/// not-taken; anything else is taken.
///
/// NOTE: A taken branch whose target is exactly `pc + 4` is indistinguishable
/// from a fall-through here and will be reported as not-taken.
pub fn infer_outcome(pc: u32, next_pc: u32) -> Outcome {
    Outcome::from(next_pc != pc.wrapping_add(INST_SIZE))
}

/// A single decoded line from a trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BranchEvent {
    /// The kind of operation
    pub op: BranchOp,

    /// The program counter value for this branch
    pub pc: u32,

    /// The program counter value of the next executed instruction
    pub next_pc: u32,
}
impl BranchEvent {
    pub fn new(op: BranchOp, pc: u32, next_pc: u32) -> Self {
        Self { op, pc, next_pc }
    }

    /// Returns 'true' if this is a conditional branch.
    pub fn is_conditional(&self) -> bool {
        self.op == BranchOp::Conditional
    }

    /// Returns the inferred outcome of this branch.
    pub fn outcome(&self) -> Outcome {
        infer_outcome(self.pc, self.next_pc)
    }
}
