//! A propositional-logic formula algebra, Tseytin CNF transformation, and
//! bounded-integer equality layer for feeding external SAT solvers.
//!
//! Callers build a [`formula::Formula`] with the algebraic builders in
//! [`formula`], convert it with [`formula::Formula::to_cnf`], render the
//! result through a [`synth::Synthesizer`] into a signed-integer clause
//! matrix, and hand that matrix — together with
//! [`synth::Synthesizer::get_assumptions`] — to an external SAT solver.
//! The solver's model translates back to named literals via
//! [`synth::Synthesizer::translate`]. [`intvar::IntVariable`] adds a
//! bounded-integer layer with one-hot domains on top of the boolean core.
//!
//! This crate does not implement SAT solving, simplification beyond what
//! Tseytin inherently performs, or any CLI — those are external
//! collaborators that consume the types defined here.

pub mod error;
pub mod formula;
pub mod intvar;
pub mod synth;
pub mod tseytin;

pub use error::Error;
pub use formula::Formula;
pub use intvar::IntVariable;
pub use synth::{DefaultSynthesizer, Synthesizer};
