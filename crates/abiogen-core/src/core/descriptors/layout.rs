use super::DescriptorError;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use nalgebra::{Point2, Rotation2, Vector2};
use slotmap::SecondaryMap;
use std::f64::consts::PI;

/// Depiction bond length in Angstroms.
pub const BOND_LENGTH: f64 = 1.5;
/// Horizontal gap left between disconnected fragments.
pub const FRAGMENT_SPACING: f64 = 3.0;

const ZIGZAG_TURN: f64 = PI / 3.0;

/// Assigns 2D coordinates to every atom.
///
/// Each fragment is laid out as a spanning tree rooted at its first atom: unbranched chains
/// follow a 120° zig-zag and branches fan out around the incoming bond. Ring-closure bonds
/// are not used for placement. Fragments are placed left to right.
pub fn compute_2d_coords(molecule: &mut Molecule) -> Result<(), DescriptorError> {
    if molecule.is_empty() {
        return Err(DescriptorError::EmptyMolecule);
    }

    let mut positions: SecondaryMap<AtomId, Point2<f64>> = SecondaryMap::new();
    let mut cursor_x = 0.0;

    for fragment in molecule.fragments() {
        let placed = layout_fragment(molecule, fragment[0]);
        let min_x = placed.iter().map(|(_, p)| p.x).fold(f64::INFINITY, f64::min);
        let max_x = placed.iter().map(|(_, p)| p.x).fold(f64::NEG_INFINITY, f64::max);
        let shift = Vector2::new(cursor_x - min_x, 0.0);

        for (id, point) in placed {
            positions.insert(id, point + shift);
        }
        cursor_x += (max_x - min_x) + FRAGMENT_SPACING;
    }

    for (id, atom) in molecule.atoms_iter_mut() {
        atom.position = positions.get(id).copied();
    }
    Ok(())
}

fn layout_fragment(molecule: &Molecule, root: AtomId) -> Vec<(AtomId, Point2<f64>)> {
    let mut placed = vec![(root, Point2::origin())];
    let mut visited: SecondaryMap<AtomId, ()> = SecondaryMap::new();
    visited.insert(root, ());

    // (atom, position, heading of the bond that reached it, depth)
    let mut stack: Vec<(AtomId, Point2<f64>, Option<f64>, usize)> =
        vec![(root, Point2::origin(), None, 0)];

    while let Some((atom, position, heading, depth)) = stack.pop() {
        let children: Vec<AtomId> = molecule
            .neighbors(atom)
            .map(|(next, _)| next)
            .filter(|next| !visited.contains_key(*next))
            .collect();
        for &child in &children {
            visited.insert(child, ());
        }

        let angles = child_angles(children.len(), heading, depth);
        for (child, angle) in children.into_iter().zip(angles).rev() {
            let offset = Rotation2::new(angle) * Vector2::new(BOND_LENGTH, 0.0);
            let child_position = position + offset;
            placed.push((child, child_position));
            stack.push((child, child_position, Some(angle), depth + 1));
        }
    }
    placed
}

fn child_angles(count: usize, heading: Option<f64>, depth: usize) -> Vec<f64> {
    match (heading, count) {
        (_, 0) => Vec::new(),
        (None, n) => (0..n).map(|i| 2.0 * PI * i as f64 / n as f64).collect(),
        (Some(heading), 1) => {
            let turn = if depth % 2 == 0 { ZIGZAG_TURN } else { -ZIGZAG_TURN };
            vec![heading + turn]
        }
        (Some(heading), n) => {
            let spread = if n == 2 { 2.0 * ZIGZAG_TURN } else { PI };
            (0..n)
                .map(|i| heading - spread / 2.0 + spread * i as f64 / (n - 1) as f64)
                .collect()
        }
    }
}
