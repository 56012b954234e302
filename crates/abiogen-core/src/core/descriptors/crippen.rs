use super::DescriptorError;
use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use phf::{Map, phf_map};

/// Atom-type contributions to logP, after Wildman & Crippen (1999), over a reduced set of
/// types covering aliphatic and aromatic C/N/O/S/P frameworks and halogens.
static CONTRIBUTIONS: Map<&'static str, f64> = phf_map! {
    "C.sp3" => 0.1441,
    "C.sp3.branched" => 0.0000,
    "C.sp3.X" => -0.2035,
    "C.sp3.X.branched" => -0.2051,
    "C.sp2.X" => -0.2783,
    "C.sp2.C" => 0.1551,
    "C.sp" => 0.0017,
    "C.ar.H" => 0.1581,
    "C.ar.C" => 0.2955,
    "C.ar.X" => 0.1360,
    "C.other" => 0.0813,
    "H.C" => 0.1230,
    "H.N" => 0.2142,
    "H.O" => -0.2677,
    "H.acid" => 0.2980,
    "H.other" => 0.1125,
    "N.amine.primary" => -1.0190,
    "N.amine.secondary" => -0.7096,
    "N.amine.tertiary" => -1.0270,
    "N.sp2" => -0.5188,
    "N.sp" => -0.3187,
    "N.ar" => -0.4806,
    "N.charged" => -0.3396,
    "O.hydroxyl" => -0.2893,
    "O.ether" => -0.0684,
    "O.carbonyl" => -0.1526,
    "O.ar" => 0.1552,
    "O.charged" => -1.3260,
    "S.aliphatic" => 0.6482,
    "S.ar" => 0.6237,
    "P" => 0.8612,
    "F" => 0.4202,
    "Cl" => 0.6895,
    "Br" => 0.8456,
    "I" => 0.8857,
};

#[derive(Debug, Clone, Copy)]
struct Neighbor {
    element: Element,
    order: BondOrder,
}

/// Estimated octanol/water partition coefficient: the sum of per-atom contributions of
/// every heavy atom and every hydrogen.
pub fn log_p(molecule: &Molecule) -> Result<f64, DescriptorError> {
    if molecule.is_empty() {
        return Err(DescriptorError::EmptyMolecule);
    }

    let mut total = 0.0;
    for (id, atom) in molecule.atoms_iter() {
        if atom.element == Element::H {
            let parent = molecule.neighbors(id).next().map(|(parent, _)| parent);
            total += contribution(hydrogen_type(molecule, parent));
            continue;
        }
        total += contribution(heavy_atom_type(molecule, id, atom)?);
        let hydrogens = f64::from(atom.total_hydrogens());
        total += contribution(hydrogen_type(molecule, Some(id))) * hydrogens;
    }
    Ok(total)
}

/// Returns the contribution table key assigned to a heavy atom.
pub fn heavy_atom_type(
    molecule: &Molecule,
    id: AtomId,
    atom: &Atom,
) -> Result<&'static str, DescriptorError> {
    let hydrogen_atoms = molecule
        .neighbors(id)
        .filter(|(other, _)| molecule.atom(*other).is_some_and(|a| a.element == Element::H))
        .count();
    let hydrogens = usize::from(atom.total_hydrogens()) + hydrogen_atoms;

    let neighbors: Vec<Neighbor> = molecule
        .neighbors(id)
        .filter_map(|(other, order)| {
            molecule
                .atom(other)
                .filter(|a| a.element != Element::H)
                .map(|a| Neighbor {
                    element: a.element,
                    order,
                })
        })
        .collect();

    let type_key = match atom.element {
        Element::C => carbon_type(atom, &neighbors),
        Element::N => nitrogen_type(atom, &neighbors),
        Element::O => oxygen_type(atom, &neighbors, hydrogens),
        Element::S if atom.aromatic => "S.ar",
        Element::S => "S.aliphatic",
        Element::P => "P",
        Element::F => "F",
        Element::Cl => "Cl",
        Element::Br => "Br",
        Element::I => "I",
        other => {
            return Err(DescriptorError::UnsupportedElement {
                descriptor: "logP",
                symbol: other.symbol(),
            });
        }
    };
    Ok(type_key)
}

fn carbon_type(atom: &Atom, neighbors: &[Neighbor]) -> &'static str {
    if atom.formal_charge != 0 {
        return "C.other";
    }
    let hetero = neighbors.iter().any(|n| n.element.is_heteroatom());

    if atom.aromatic {
        return if hetero {
            "C.ar.X"
        } else if neighbors.len() > 2 {
            "C.ar.C"
        } else {
            "C.ar.H"
        };
    }
    if neighbors.iter().any(|n| n.order == BondOrder::Triple) {
        return "C.sp";
    }
    if let Some(double) = neighbors.iter().find(|n| n.order == BondOrder::Double) {
        return if double.element.is_heteroatom() {
            "C.sp2.X"
        } else {
            "C.sp2.C"
        };
    }

    let branched = neighbors.len() >= 3;
    match (hetero, branched) {
        (true, true) => "C.sp3.X.branched",
        (true, false) => "C.sp3.X",
        (false, true) => "C.sp3.branched",
        (false, false) => "C.sp3",
    }
}

fn nitrogen_type(atom: &Atom, neighbors: &[Neighbor]) -> &'static str {
    if atom.formal_charge != 0 {
        "N.charged"
    } else if atom.aromatic {
        "N.ar"
    } else if neighbors.iter().any(|n| n.order == BondOrder::Triple) {
        "N.sp"
    } else if neighbors.iter().any(|n| n.order == BondOrder::Double) {
        "N.sp2"
    } else {
        match neighbors.len() {
            0 | 1 => "N.amine.primary",
            2 => "N.amine.secondary",
            _ => "N.amine.tertiary",
        }
    }
}

fn oxygen_type(atom: &Atom, neighbors: &[Neighbor], hydrogens: usize) -> &'static str {
    if atom.formal_charge != 0 {
        "O.charged"
    } else if atom.aromatic {
        "O.ar"
    } else if neighbors.iter().any(|n| n.order == BondOrder::Double) {
        "O.carbonyl"
    } else if hydrogens > 0 {
        "O.hydroxyl"
    } else {
        "O.ether"
    }
}

/// Returns the contribution table key for a hydrogen attached to `parent`.
fn hydrogen_type(molecule: &Molecule, parent: Option<AtomId>) -> &'static str {
    let Some(parent) = parent else {
        return "H.other";
    };
    let Some(parent_atom) = molecule.atom(parent) else {
        return "H.other";
    };
    match parent_atom.element {
        Element::C => "H.C",
        Element::N => "H.N",
        Element::O if is_acid_oxygen(molecule, parent) => "H.acid",
        Element::O => "H.O",
        _ => "H.other",
    }
}

/// An oxygen single-bonded to a carbon that carries a double bond to a heteroatom.
fn is_acid_oxygen(molecule: &Molecule, oxygen: AtomId) -> bool {
    molecule.neighbors(oxygen).any(|(carbon, order)| {
        order == BondOrder::Single
            && molecule.atom(carbon).is_some_and(|a| a.element == Element::C)
            && molecule.neighbors(carbon).any(|(other, order)| {
                order == BondOrder::Double
                    && molecule
                        .atom(other)
                        .is_some_and(|a| a.element.is_heteroatom())
            })
    })
}

fn contribution(type_key: &str) -> f64 {
    CONTRIBUTIONS.get(type_key).copied().unwrap_or(0.0)
}
