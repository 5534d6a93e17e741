//! Error types used by this crate.
//!
//! Mirrors the error kinds named in the formula algebra's design: most of
//! these are unlikely to occur through the public builders, since the
//! builders themselves rule out the shapes that would trigger them.

/// A union of the error kinds this crate can signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A caller tried to name a [`crate::formula::Formula::Variable`] or
    /// [`crate::intvar::IntVariable`] using a reserved name: one starting
    /// with the Tseytin auxiliary prefix, or one that collides with the
    /// `"{var}=={val}"` encoding used by [`crate::formula::Formula::EqConstTerm`].
    ReservedName {
        /// The offending name.
        name: String,
    },

    /// A raw constructor (e.g. [`crate::formula::Formula::clause`] or
    /// [`crate::formula::Formula::cnf`]) received a child of an unsupported
    /// shape — a non-literal inside a clause, or a non-clause inside a CNF.
    ///
    /// The smart builders (`not`/`or`/`and`) can never produce this error:
    /// they choose the resulting variant from the shape of their operands,
    /// so there is no operand shape left for them to reject. It only
    /// arises when a caller bypasses the smart builders and assembles a
    /// `Clause` or `CNF` directly.
    TypeMismatch {
        /// What was expected at this position.
        expected: &'static str,
        /// What was found instead.
        found: &'static str,
    },

    /// An [`crate::intvar::IntVariable`] was constructed with `min > max`.
    ///
    /// The original Python implementation this crate generalizes left this
    /// unchecked; spec.md's "min ≤ max" invariant is enforced here instead.
    InvalidDomain {
        /// The variable's name.
        name: String,
        /// The requested (invalid) minimum.
        min: i64,
        /// The requested (invalid) maximum.
        max: i64,
    },

    /// An [`crate::formula::Formula::EqVarTerm`] was built over two
    /// integer variables with disjoint domains.
    ///
    /// Not actually returned anywhere in this crate: per spec.md §7 this
    /// is not fatal, and [`crate::tseytin::transform`] instead produces a
    /// CNF equivalent to `false` (the empty clause). Kept here so the
    /// error surface documents the condition spec.md names, even though
    /// resolving it is handled in-band rather than by propagating `Err`.
    EmptyDomain,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ReservedName { name } => {
                write!(f, "'{name}' is a reserved name")
            }
            Error::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Error::InvalidDomain { name, min, max } => {
                write!(f, "invalid domain for '{name}': min {min} > max {max}")
            }
            Error::EmptyDomain => write!(f, "domains do not intersect"),
        }
    }
}

impl std::error::Error for Error {}
