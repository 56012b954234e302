use super::smiles::SmilesError;
use crate::core::models::molecule::Molecule;

/// Defines the interface for turning a linear structural encoding into a molecular graph.
///
/// Parse failure is reported as an explicit error value rather than an absent structure;
/// callers decide whether a failure is fatal or merely disqualifies the candidate.
pub trait StructureParser {
    /// Parses an encoding string into a [`Molecule`].
    ///
    /// # Errors
    ///
    /// Returns a [`SmilesError`] if the encoding is syntactically invalid or describes a
    /// chemically impossible structure (e.g. a valence violation).
    fn parse(&self, encoding: &str) -> Result<Molecule, SmilesError>;
}
