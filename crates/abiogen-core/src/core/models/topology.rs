use super::ids::AtomId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    /// Contribution of the bond to an atom's explicit valence.
    ///
    /// Aromatic bonds count as one here; the aromatic atom itself adds the missing half
    /// electron pair when hydrogens are assigned.
    pub fn valence_contribution(self) -> u8 {
        match self {
            Self::Single | Self::Aromatic => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quadruple => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Self {
        Self {
            atom1_id,
            atom2_id,
            order,
        }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }

    /// Returns the partner of `atom_id` in this bond, if `atom_id` participates at all.
    pub fn other(&self, atom_id: AtomId) -> Option<AtomId> {
        if self.atom1_id == atom_id {
            Some(self.atom2_id)
        } else if self.atom2_id == atom_id {
            Some(self.atom1_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn valence_contribution_matches_bond_multiplicity() {
        assert_eq!(BondOrder::Single.valence_contribution(), 1);
        assert_eq!(BondOrder::Double.valence_contribution(), 2);
        assert_eq!(BondOrder::Triple.valence_contribution(), 3);
        assert_eq!(BondOrder::Quadruple.valence_contribution(), 4);
        assert_eq!(BondOrder::Aromatic.valence_contribution(), 1);
    }

    #[test]
    fn bond_order_default_is_single() {
        assert_eq!(BondOrder::default(), BondOrder::Single);
    }

    #[test]
    fn bond_contains_and_other_agree() {
        let a1 = dummy_atom_id(1);
        let a2 = dummy_atom_id(2);
        let unrelated = dummy_atom_id(3);
        let bond = Bond::new(a1, a2, BondOrder::Double);

        assert!(bond.contains(a1));
        assert!(bond.contains(a2));
        assert!(!bond.contains(unrelated));
        assert_eq!(bond.other(a1), Some(a2));
        assert_eq!(bond.other(a2), Some(a1));
        assert_eq!(bond.other(unrelated), None);
    }
}
