use super::DescriptorError;
use crate::core::models::element::Element;
use crate::core::models::molecule::Molecule;

/// Average molecular weight in g/mol, counting implicit and explicit hydrogens.
pub fn average_molecular_weight(molecule: &Molecule) -> Result<f64, DescriptorError> {
    if molecule.is_empty() {
        return Err(DescriptorError::EmptyMolecule);
    }
    let hydrogen = Element::H.average_mass();
    Ok(molecule
        .atoms_iter()
        .map(|(_, atom)| atom.mass() + f64::from(atom.total_hydrogens()) * hydrogen)
        .sum())
}
