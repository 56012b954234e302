use super::atom::Atom;
use super::element::Element;
use super::ids::AtomId;
use super::topology::{Bond, BondOrder};
use slotmap::{SecondaryMap, SlotMap};

/// A parsed molecular structure: a graph of atoms connected by bonds.
///
/// This is the handle produced by the structure parser and consumed by the descriptor
/// calculators. Implicit hydrogens are stored as counts on their parent atoms, so the graph
/// only contains atoms the encoding named explicitly.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// List of all bonds in the molecule.
    bonds: Vec<Bond>,
    /// Cached adjacency list, indexed by atom ID, holding indices into `bonds`.
    bond_adjacency: SecondaryMap<AtomId, Vec<usize>>,
}

impl Molecule {
    /// Creates a new, empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an atom to the molecule and returns its ID.
    ///
    /// Atoms are iterated in insertion order, which for parsed structures is the order in
    /// which they appear in the encoding.
    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let id = self.atoms.insert(atom);
        self.bond_adjacency.insert(id, Vec::new());
        id
    }

    /// Adds a bond between two existing atoms.
    ///
    /// # Arguments
    ///
    /// * `atom1_id` - The first atom.
    /// * `atom2_id` - The second atom.
    /// * `order` - The bond order.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if the bond was added, or `None` if either atom does not exist,
    /// the two IDs are equal, or the atoms are already bonded.
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Option<()> {
        if atom1_id == atom2_id
            || !self.atoms.contains_key(atom1_id)
            || !self.atoms.contains_key(atom2_id)
            || self.bond_between(atom1_id, atom2_id).is_some()
        {
            return None;
        }

        let index = self.bonds.len();
        self.bonds.push(Bond::new(atom1_id, atom2_id, order));
        self.bond_adjacency.get_mut(atom1_id)?.push(index);
        self.bond_adjacency.get_mut(atom2_id)?.push(index);
        Some(())
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms in insertion order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns a mutable iterator over all atoms in insertion order.
    pub fn atoms_iter_mut(&mut self) -> impl Iterator<Item = (AtomId, &mut Atom)> {
        self.atoms.iter_mut()
    }

    /// Returns all bonds in the order they were added.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Returns the bond connecting two atoms, if any.
    pub fn bond_between(&self, atom1_id: AtomId, atom2_id: AtomId) -> Option<&Bond> {
        self.bond_adjacency
            .get(atom1_id)?
            .iter()
            .map(|&index| &self.bonds[index])
            .find(|bond| bond.contains(atom2_id))
    }

    /// Returns an iterator over the neighbors of an atom together with the connecting bond
    /// order. Unknown IDs yield an empty iterator.
    pub fn neighbors(&self, id: AtomId) -> impl Iterator<Item = (AtomId, BondOrder)> + '_ {
        self.bond_adjacency
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(move |&index| {
                let bond = &self.bonds[index];
                bond.other(id).map(|other| (other, bond.order))
            })
    }

    /// Number of atoms explicitly bonded to `id`.
    pub fn degree(&self, id: AtomId) -> usize {
        self.bond_adjacency.get(id).map_or(0, Vec::len)
    }

    /// Sum of bond valence contributions around an atom, excluding hydrogens.
    pub fn bond_valence(&self, id: AtomId) -> u16 {
        self.neighbors(id)
            .map(|(_, order)| u16::from(order.valence_contribution()))
            .sum()
    }

    /// Returns the number of atoms stored in the graph.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Returns the number of non-hydrogen atoms in the graph.
    pub fn heavy_atom_count(&self) -> usize {
        self.atoms
            .values()
            .filter(|atom| atom.element != Element::H)
            .count()
    }

    /// Total hydrogen count, whether stored as atoms or as counts on parent atoms.
    pub fn hydrogen_count(&self) -> usize {
        self.atoms
            .values()
            .map(|atom| {
                let own = usize::from(atom.element == Element::H);
                own + usize::from(atom.total_hydrogens())
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Partitions the atoms into connected components, each listed in insertion order.
    pub fn fragments(&self) -> Vec<Vec<AtomId>> {
        let mut assigned: SecondaryMap<AtomId, ()> = SecondaryMap::new();
        let mut fragments = Vec::new();

        for (start, _) in self.atoms.iter() {
            if assigned.contains_key(start) {
                continue;
            }
            let mut fragment = Vec::new();
            let mut stack = vec![start];
            assigned.insert(start, ());
            while let Some(current) = stack.pop() {
                fragment.push(current);
                for (next, _) in self.neighbors(current) {
                    if assigned.insert(next, ()).is_none() {
                        stack.push(next);
                    }
                }
            }
            fragment.sort_by_key(|id| self.insertion_rank(*id));
            fragments.push(fragment);
        }
        fragments
    }

    fn insertion_rank(&self, id: AtomId) -> usize {
        self.atoms
            .keys()
            .position(|key| key == id)
            .unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ethanol() -> (Molecule, [AtomId; 3]) {
        let mut molecule = Molecule::new();
        let c1 = molecule.add_atom(Atom::new(Element::C, false));
        let c2 = molecule.add_atom(Atom::new(Element::C, false));
        let o = molecule.add_atom(Atom::new(Element::O, false));
        molecule.add_bond(c1, c2, BondOrder::Single).unwrap();
        molecule.add_bond(c2, o, BondOrder::Single).unwrap();
        (molecule, [c1, c2, o])
    }

    #[test]
    fn new_molecule_is_empty() {
        let molecule = Molecule::new();
        assert!(molecule.is_empty());
        assert_eq!(molecule.atom_count(), 0);
        assert!(molecule.bonds().is_empty());
        assert!(molecule.fragments().is_empty());
    }

    #[test]
    fn add_bond_updates_adjacency_in_both_directions() {
        let (molecule, [c1, c2, o]) = ethanol();

        assert_eq!(molecule.degree(c1), 1);
        assert_eq!(molecule.degree(c2), 2);
        assert_eq!(molecule.degree(o), 1);

        let neighbors: Vec<_> = molecule.neighbors(c2).map(|(id, _)| id).collect();
        assert_eq!(neighbors, vec![c1, o]);
        assert!(molecule.bond_between(o, c2).is_some());
        assert!(molecule.bond_between(c1, o).is_none());
    }

    #[test]
    fn add_bond_rejects_self_and_duplicate_bonds() {
        let (mut molecule, [c1, c2, _]) = ethanol();

        assert!(molecule.add_bond(c1, c1, BondOrder::Single).is_none());
        assert!(molecule.add_bond(c2, c1, BondOrder::Double).is_none());
        assert_eq!(molecule.bonds().len(), 2);
    }

    #[test]
    fn bond_valence_sums_bond_orders() {
        let mut molecule = Molecule::new();
        let c = molecule.add_atom(Atom::new(Element::C, false));
        let o = molecule.add_atom(Atom::new(Element::O, false));
        let n = molecule.add_atom(Atom::new(Element::N, false));
        molecule.add_bond(c, o, BondOrder::Double).unwrap();
        molecule.add_bond(c, n, BondOrder::Single).unwrap();

        assert_eq!(molecule.bond_valence(c), 3);
        assert_eq!(molecule.bond_valence(o), 2);
        assert_eq!(molecule.bond_valence(n), 1);
    }

    #[test]
    fn bond_valence_does_not_wrap_for_crowded_atoms() {
        let mut molecule = Molecule::new();
        let hub = molecule.add_atom(Atom::new(Element::C, false));
        for _ in 0..100 {
            let leaf = molecule.add_atom(Atom::new(Element::C, false));
            molecule.add_bond(hub, leaf, BondOrder::Triple).unwrap();
        }
        assert_eq!(molecule.bond_valence(hub), 300);
    }

    #[test]
    fn hydrogen_count_includes_implicit_and_explicit_hydrogens() {
        let (mut molecule, [c1, c2, o]) = ethanol();
        molecule.atom_mut(c1).unwrap().implicit_hydrogens = 3;
        molecule.atom_mut(c2).unwrap().implicit_hydrogens = 2;
        molecule.atom_mut(o).unwrap().implicit_hydrogens = 1;
        molecule.add_atom(Atom::new(Element::H, false));

        assert_eq!(molecule.hydrogen_count(), 7);
        assert_eq!(molecule.heavy_atom_count(), 3);
    }

    #[test]
    fn fragments_split_disconnected_components() {
        let (mut molecule, [c1, c2, o]) = ethanol();
        let na = molecule.add_atom(Atom::new(Element::Na, false));

        let fragments = molecule.fragments();
        assert_eq!(fragments, vec![vec![c1, c2, o], vec![na]]);
    }
}
