use super::element::Element;
use nalgebra::Point2;

/// Tetrahedral chirality marker as written in a bracket atom.
///
/// The descriptors in this crate are chirality-agnostic; the marker is preserved so that a
/// parsed structure keeps everything its encoding stated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chirality {
    /// No chirality specified.
    #[default]
    Unspecified,
    /// Anticlockwise (`@`).
    CounterClockwise,
    /// Clockwise (`@@`).
    Clockwise,
}

/// Represents a heavy (or explicit hydrogen) atom of a parsed molecular structure.
///
/// Hydrogens that the linear encoding leaves implicit are not materialized as atoms; they
/// are tracked as a count on their parent atom, which is all the descriptor calculators
/// need.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The chemical element of the atom.
    pub element: Element,
    /// Whether the atom was written in aromatic (lowercase) form.
    pub aromatic: bool,
    /// Mass number for isotopically labelled atoms.
    pub isotope: Option<u16>,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Hydrogen count stated inside a bracket atom; `None` for organic-subset atoms.
    pub explicit_hydrogens: Option<u8>,
    /// Hydrogens derived from the default valence model.
    pub implicit_hydrogens: u8,
    /// Chirality marker, if any.
    pub chirality: Chirality,
    /// Atom-map class (`[CH3:1]`).
    pub atom_class: Option<u32>,
    /// 2D depiction coordinates, filled in by the layout routine.
    pub position: Option<Point2<f64>>,
}

impl Atom {
    /// Creates a new `Atom` of the given element with default values for all other fields.
    ///
    /// # Arguments
    ///
    /// * `element` - The chemical element.
    /// * `aromatic` - Whether the atom is part of an aromatic system.
    pub fn new(element: Element, aromatic: bool) -> Self {
        Self {
            element,
            aromatic,
            isotope: None,
            formal_charge: 0,
            explicit_hydrogens: None,
            implicit_hydrogens: 0,
            chirality: Chirality::default(),
            atom_class: None,
            position: None,
        }
    }

    /// Total number of hydrogens attached to the atom, explicit or implicit.
    pub fn total_hydrogens(&self) -> u8 {
        self.explicit_hydrogens.unwrap_or(0) + self.implicit_hydrogens
    }

    /// Atomic mass of the atom itself, excluding attached hydrogens.
    ///
    /// Isotopically labelled atoms use their mass number.
    pub fn mass(&self) -> f64 {
        match self.isotope {
            Some(mass_number) => f64::from(mass_number),
            None => self.element.average_mass(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(Element::C, false);

        assert_eq!(atom.element, Element::C);
        assert!(!atom.aromatic);
        assert_eq!(atom.isotope, None);
        assert_eq!(atom.formal_charge, 0);
        assert_eq!(atom.explicit_hydrogens, None);
        assert_eq!(atom.implicit_hydrogens, 0);
        assert_eq!(atom.chirality, Chirality::Unspecified);
        assert_eq!(atom.atom_class, None);
        assert!(atom.position.is_none());
    }

    #[test]
    fn total_hydrogens_sums_explicit_and_implicit_counts() {
        let mut atom = Atom::new(Element::N, false);
        atom.implicit_hydrogens = 2;
        assert_eq!(atom.total_hydrogens(), 2);

        atom.implicit_hydrogens = 0;
        atom.explicit_hydrogens = Some(3);
        assert_eq!(atom.total_hydrogens(), 3);
    }

    #[test]
    fn mass_uses_isotope_when_present() {
        let mut atom = Atom::new(Element::C, false);
        assert!((atom.mass() - 12.011).abs() < 1e-9);
        atom.isotope = Some(13);
        assert!((atom.mass() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new(Element::O, false);
        atom1.formal_charge = -1;
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
