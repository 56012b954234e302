use super::traits::StructureParser;
use crate::core::models::atom::{Atom, Chirality};
use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use slotmap::SecondaryMap;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid SMILES at position {position}: {kind}")]
pub struct SmilesError {
    pub position: usize,
    pub kind: SmilesErrorKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SmilesErrorKind {
    #[error("input is empty")]
    Empty,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("bond, branch or ring closure has no preceding atom")]
    MissingAtom,
    #[error("bond is not followed by an atom")]
    DanglingBond,
    #[error("unbalanced ')'")]
    UnbalancedBranchClose,
    #[error("branch is never closed")]
    UnclosedBranch,
    #[error("branch contains no atoms")]
    EmptyBranch,
    #[error("ring bond {0} is never closed")]
    UnclosedRing(u16),
    #[error("ring bond {0} closes onto the atom that opened it")]
    SelfRingBond(u16),
    #[error("ring bond {0} has conflicting bond orders")]
    RingBondConflict(u16),
    #[error("ring closure duplicates an existing bond")]
    DuplicateBond,
    #[error("malformed ring bond number")]
    MalformedRingBond,
    #[error("unknown element '{0}'")]
    UnknownElement(String),
    #[error("malformed bracket atom")]
    MalformedBracketAtom,
    #[error("atom {symbol} has valence {valence}, which exceeds every allowed valence")]
    ValenceExceeded { symbol: &'static str, valence: u16 },
}

/// Parser for the SMILES linear notation.
///
/// Supports the organic subset (`B C N O P S F Cl Br I` and aromatic `b c n o p s`),
/// bracket atoms with isotope, chirality, hydrogen count, charge and atom class, the bond
/// symbols `- = # $ : / \`, branches, ring closures (`0`-`9` and `%nn`) and `.`-separated
/// fragments. Parsing stops at the first whitespace character.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmilesParser;

impl StructureParser for SmilesParser {
    fn parse(&self, encoding: &str) -> Result<Molecule, SmilesError> {
        parse_smiles(encoding)
    }
}

/// Parses a SMILES string into a [`Molecule`], assigning implicit hydrogens to
/// organic-subset atoms from their default valences.
pub fn parse_smiles(input: &str) -> Result<Molecule, SmilesError> {
    let molecule = Reader::new(input).read()?;
    trace!(
        heavy_atoms = molecule.heavy_atom_count(),
        bonds = molecule.bonds().len(),
        "Parsed SMILES '{}'",
        input
    );
    Ok(molecule)
}

#[derive(Debug, Clone, Copy)]
struct RingOpening {
    atom: AtomId,
    order: Option<BondOrder>,
    position: usize,
}

struct Reader<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    molecule: Molecule,
    atom_positions: SecondaryMap<AtomId, usize>,
    previous: Option<AtomId>,
    branches: Vec<(AtomId, usize)>,
    pending_bond: Option<(BondOrder, usize)>,
    rings: BTreeMap<u16, RingOpening>,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            molecule: Molecule::new(),
            atom_positions: SecondaryMap::new(),
            previous: None,
            branches: Vec::new(),
            pending_bond: None,
            rings: BTreeMap::new(),
        }
    }

    fn read(mut self) -> Result<Molecule, SmilesError> {
        while let Some(byte) = self.peek() {
            match byte {
                b'(' => self.open_branch()?,
                b')' => self.close_branch()?,
                b'-' | b'=' | b'#' | b'$' | b':' | b'/' | b'\\' => self.read_bond(byte)?,
                b'0'..=b'9' | b'%' => self.read_ring_bond()?,
                b'.' => self.read_dot()?,
                b'[' => {
                    let start = self.pos;
                    let atom = self.read_bracket_atom()?;
                    self.attach(atom, start);
                }
                b' ' | b'\t' | b'\r' | b'\n' => break,
                _ => {
                    let start = self.pos;
                    let atom = self.read_organic_atom()?;
                    self.attach(atom, start);
                }
            }
        }
        self.finish()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn error(&self, position: usize, kind: SmilesErrorKind) -> SmilesError {
        SmilesError { position, kind }
    }

    fn unexpected_here(&self) -> SmilesError {
        match self.input.get(self.pos..).and_then(|rest| rest.chars().next()) {
            Some(c) => self.error(self.pos, SmilesErrorKind::UnexpectedChar(c)),
            None => self.error(self.pos, SmilesErrorKind::UnexpectedEnd),
        }
    }

    fn default_order(&self, a: AtomId, b: AtomId) -> BondOrder {
        let aromatic = |id| self.molecule.atom(id).is_some_and(|atom| atom.aromatic);
        if aromatic(a) && aromatic(b) {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn attach(&mut self, atom: Atom, position: usize) {
        let id = self.molecule.add_atom(atom);
        self.atom_positions.insert(id, position);
        if let Some(previous) = self.previous {
            let order = match self.pending_bond.take() {
                Some((order, _)) => order,
                None => self.default_order(previous, id),
            };
            // A freshly added atom cannot already be bonded.
            let _ = self.molecule.add_bond(previous, id, order);
        }
        self.previous = Some(id);
    }

    fn read_bond(&mut self, byte: u8) -> Result<(), SmilesError> {
        if self.previous.is_none() {
            return Err(self.error(self.pos, SmilesErrorKind::MissingAtom));
        }
        if self.pending_bond.is_some() {
            return Err(self.unexpected_here());
        }
        let order = match byte {
            b'=' => BondOrder::Double,
            b'#' => BondOrder::Triple,
            b'$' => BondOrder::Quadruple,
            b':' => BondOrder::Aromatic,
            _ => BondOrder::Single,
        };
        self.pending_bond = Some((order, self.pos));
        self.pos += 1;
        Ok(())
    }

    fn open_branch(&mut self) -> Result<(), SmilesError> {
        let Some(previous) = self.previous else {
            return Err(self.error(self.pos, SmilesErrorKind::MissingAtom));
        };
        if let Some((_, position)) = self.pending_bond {
            return Err(self.error(position, SmilesErrorKind::DanglingBond));
        }
        self.branches.push((previous, self.pos));
        self.pos += 1;
        Ok(())
    }

    fn close_branch(&mut self) -> Result<(), SmilesError> {
        let Some((branch_atom, _)) = self.branches.pop() else {
            return Err(self.error(self.pos, SmilesErrorKind::UnbalancedBranchClose));
        };
        if let Some((_, position)) = self.pending_bond {
            return Err(self.error(position, SmilesErrorKind::DanglingBond));
        }
        if self.previous == Some(branch_atom) {
            return Err(self.error(self.pos, SmilesErrorKind::EmptyBranch));
        }
        self.previous = Some(branch_atom);
        self.pos += 1;
        Ok(())
    }

    fn read_dot(&mut self) -> Result<(), SmilesError> {
        if let Some((_, position)) = self.pending_bond {
            return Err(self.error(position, SmilesErrorKind::DanglingBond));
        }
        if self.previous.is_none() || !self.branches.is_empty() {
            return Err(self.unexpected_here());
        }
        self.previous = None;
        self.pos += 1;
        Ok(())
    }

    fn read_ring_bond(&mut self) -> Result<(), SmilesError> {
        let start = self.pos;
        let Some(current) = self.previous else {
            return Err(self.error(start, SmilesErrorKind::MissingAtom));
        };

        let number = if self.peek() == Some(b'%') {
            match (self.peek_at(1), self.peek_at(2)) {
                (Some(tens @ b'0'..=b'9'), Some(units @ b'0'..=b'9')) => {
                    self.pos += 3;
                    u16::from(tens - b'0') * 10 + u16::from(units - b'0')
                }
                _ => return Err(self.error(start, SmilesErrorKind::MalformedRingBond)),
            }
        } else {
            let digit = self.bytes[self.pos] - b'0';
            self.pos += 1;
            u16::from(digit)
        };

        let pending = self.pending_bond.take().map(|(order, _)| order);
        match self.rings.remove(&number) {
            Some(opening) => {
                if opening.atom == current {
                    return Err(self.error(start, SmilesErrorKind::SelfRingBond(number)));
                }
                let order = match (opening.order, pending) {
                    (Some(a), Some(b)) if a != b => {
                        return Err(self.error(start, SmilesErrorKind::RingBondConflict(number)));
                    }
                    (Some(order), _) | (None, Some(order)) => order,
                    (None, None) => self.default_order(opening.atom, current),
                };
                self.molecule
                    .add_bond(opening.atom, current, order)
                    .ok_or_else(|| self.error(start, SmilesErrorKind::DuplicateBond))?;
            }
            None => {
                self.rings.insert(
                    number,
                    RingOpening {
                        atom: current,
                        order: pending,
                        position: start,
                    },
                );
            }
        }
        Ok(())
    }

    fn read_organic_atom(&mut self) -> Result<Atom, SmilesError> {
        let (element, aromatic, width) = match (self.peek(), self.peek_at(1)) {
            (Some(b'B'), Some(b'r')) => (Element::Br, false, 2),
            (Some(b'C'), Some(b'l')) => (Element::Cl, false, 2),
            (Some(b'B'), _) => (Element::B, false, 1),
            (Some(b'C'), _) => (Element::C, false, 1),
            (Some(b'N'), _) => (Element::N, false, 1),
            (Some(b'O'), _) => (Element::O, false, 1),
            (Some(b'P'), _) => (Element::P, false, 1),
            (Some(b'S'), _) => (Element::S, false, 1),
            (Some(b'F'), _) => (Element::F, false, 1),
            (Some(b'I'), _) => (Element::I, false, 1),
            (Some(b'b'), _) => (Element::B, true, 1),
            (Some(b'c'), _) => (Element::C, true, 1),
            (Some(b'n'), _) => (Element::N, true, 1),
            (Some(b'o'), _) => (Element::O, true, 1),
            (Some(b'p'), _) => (Element::P, true, 1),
            (Some(b's'), _) => (Element::S, true, 1),
            _ => return Err(self.unexpected_here()),
        };
        self.pos += width;
        Ok(Atom::new(element, aromatic))
    }

    fn read_number(&mut self) -> Option<u32> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.input.get(start..self.pos)?.parse().ok()
    }

    fn read_bracket_atom(&mut self) -> Result<Atom, SmilesError> {
        let start = self.pos;
        self.pos += 1;

        let isotope = match self.read_number() {
            Some(mass) => Some(
                u16::try_from(mass)
                    .map_err(|_| self.error(start, SmilesErrorKind::MalformedBracketAtom))?,
            ),
            None => None,
        };

        let (element, aromatic) = self.read_bracket_symbol()?;
        let mut atom = Atom::new(element, aromatic);
        atom.isotope = isotope;

        if self.peek() == Some(b'@') {
            self.pos += 1;
            atom.chirality = if self.peek() == Some(b'@') {
                self.pos += 1;
                Chirality::Clockwise
            } else {
                Chirality::CounterClockwise
            };
        }

        let mut hydrogens = 0;
        if self.peek() == Some(b'H') {
            self.pos += 1;
            hydrogens = match self.read_number() {
                Some(count) => u8::try_from(count)
                    .map_err(|_| self.error(start, SmilesErrorKind::MalformedBracketAtom))?,
                None => 1,
            };
        }
        atom.explicit_hydrogens = Some(hydrogens);

        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let magnitude = match self.read_number() {
                Some(value) => value,
                None => {
                    let mut count = 1;
                    while self.peek() == Some(sign) {
                        self.pos += 1;
                        count += 1;
                    }
                    count
                }
            };
            let magnitude = i8::try_from(magnitude)
                .map_err(|_| self.error(start, SmilesErrorKind::MalformedBracketAtom))?;
            atom.formal_charge = if sign == b'+' { magnitude } else { -magnitude };
        }

        if self.peek() == Some(b':') {
            self.pos += 1;
            atom.atom_class = Some(
                self.read_number()
                    .ok_or_else(|| self.error(start, SmilesErrorKind::MalformedBracketAtom))?,
            );
        }

        match self.peek() {
            Some(b']') => {
                self.pos += 1;
                Ok(atom)
            }
            Some(_) => Err(self.error(self.pos, SmilesErrorKind::MalformedBracketAtom)),
            None => Err(self.error(self.pos, SmilesErrorKind::UnexpectedEnd)),
        }
    }

    fn read_bracket_symbol(&mut self) -> Result<(Element, bool), SmilesError> {
        let start = self.pos;
        let Some(first) = self.peek() else {
            return Err(self.error(start, SmilesErrorKind::UnexpectedEnd));
        };

        if first.is_ascii_lowercase() {
            let (element, width) = match (first, self.peek_at(1)) {
                (b's', Some(b'e')) => (Element::Se, 2),
                (b'b', _) => (Element::B, 1),
                (b'c', _) => (Element::C, 1),
                (b'n', _) => (Element::N, 1),
                (b'o', _) => (Element::O, 1),
                (b'p', _) => (Element::P, 1),
                (b's', _) => (Element::S, 1),
                _ => {
                    return Err(self.error(
                        start,
                        SmilesErrorKind::UnknownElement((first as char).to_string()),
                    ));
                }
            };
            self.pos += width;
            return Ok((element, true));
        }

        if !first.is_ascii_uppercase() {
            return Err(self.unexpected_here());
        }

        if let Some(second) = self.peek_at(1).filter(u8::is_ascii_lowercase) {
            let two = [first, second];
            if let Some(element) = std::str::from_utf8(&two).ok().and_then(Element::from_symbol) {
                self.pos += 2;
                return Ok((element, false));
            }
        }

        let one = [first];
        match std::str::from_utf8(&one).ok().and_then(Element::from_symbol) {
            Some(element) => {
                self.pos += 1;
                Ok((element, false))
            }
            None => Err(self.error(
                start,
                SmilesErrorKind::UnknownElement((first as char).to_string()),
            )),
        }
    }

    fn finish(mut self) -> Result<Molecule, SmilesError> {
        if let Some((_, position)) = self.pending_bond {
            return Err(self.error(position, SmilesErrorKind::DanglingBond));
        }
        if let Some(&(_, position)) = self.branches.last() {
            return Err(self.error(position, SmilesErrorKind::UnclosedBranch));
        }
        if let Some((&number, opening)) = self.rings.iter().next() {
            return Err(self.error(opening.position, SmilesErrorKind::UnclosedRing(number)));
        }
        if self.molecule.is_empty() {
            return Err(self.error(self.pos, SmilesErrorKind::Empty));
        }
        self.assign_implicit_hydrogens()?;
        Ok(self.molecule)
    }

    fn assign_implicit_hydrogens(&mut self) -> Result<(), SmilesError> {
        let mut assignments = Vec::new();
        for (id, atom) in self.molecule.atoms_iter() {
            if atom.explicit_hydrogens.is_some() {
                continue;
            }
            let valence = self.molecule.bond_valence(id);
            let target = atom
                .element
                .default_valences()
                .iter()
                .copied()
                .find(|&allowed| u16::from(allowed) >= valence)
                .ok_or_else(|| {
                    self.error(
                        self.atom_positions.get(id).copied().unwrap_or(0),
                        SmilesErrorKind::ValenceExceeded {
                            symbol: atom.element.symbol(),
                            valence,
                        },
                    )
                })?;
            // Aromatic B, C, N and P donate one electron to the pi system.
            let pi_electron = u8::from(
                atom.aromatic
                    && matches!(atom.element, Element::B | Element::C | Element::N | Element::P),
            );
            let spare = u16::from(target) - valence;
            let hydrogens = u8::try_from(spare)
                .unwrap_or(u8::MAX)
                .saturating_sub(pi_electron);
            assignments.push((id, hydrogens));
        }

        for (id, hydrogens) in assignments {
            if let Some(atom) = self.molecule.atom_mut(id) {
                atom.implicit_hydrogens = hydrogens;
            }
        }
        Ok(())
    }
}
