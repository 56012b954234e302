use super::residue::{FREE_AMINO_ACID_WEIGHTS, ResidueSequence};
use phf::{Map, phf_map};

/// Average mass of water in g/mol, lost once per peptide bond.
pub const WATER_WEIGHT: f64 = 18.01528;

const N_TERMINUS_PK: f64 = 7.5;
const C_TERMINUS_PK: f64 = 3.55;

const PI_INITIAL_PH: f64 = 7.775;
const PI_LOWER_PH: f64 = 4.05;
const PI_UPPER_PH: f64 = 12.0;
const PI_TOLERANCE: f64 = 1e-4;

static POSITIVE_SIDE_CHAIN_PKS: Map<char, f64> = phf_map! {
    'K' => 10.0,
    'R' => 12.0,
    'H' => 5.98,
};

static NEGATIVE_SIDE_CHAIN_PKS: Map<char, f64> = phf_map! {
    'D' => 4.05,
    'E' => 4.45,
    'C' => 9.0,
    'Y' => 10.0,
};

/// N-terminal pKa overrides depending on the first residue.
static N_TERMINAL_PKS: Map<char, f64> = phf_map! {
    'A' => 7.59,
    'M' => 7.0,
    'S' => 6.93,
    'P' => 8.36,
    'T' => 6.82,
    'V' => 7.44,
    'E' => 7.7,
};

/// C-terminal pKa overrides depending on the last residue.
static C_TERMINAL_PKS: Map<char, f64> = phf_map! {
    'D' => 4.55,
    'E' => 4.75,
};

/// Average molecular weight of the linear peptide: free amino-acid weights minus one water
/// per peptide bond.
pub fn molecular_weight(sequence: &ResidueSequence) -> f64 {
    let residues: f64 = sequence
        .residues()
        .filter_map(|code| FREE_AMINO_ACID_WEIGHTS.get(&code))
        .sum();
    let bonds = sequence.len().saturating_sub(1) as f64;
    residues - bonds * WATER_WEIGHT
}

/// Net charge of the peptide at the given pH (Henderson–Hasselbalch over the termini and
/// all ionisable side chains).
pub fn charge_at_ph(sequence: &ResidueSequence, ph: f64) -> f64 {
    let n_terminus = sequence
        .first()
        .and_then(|code| N_TERMINAL_PKS.get(&code).copied())
        .unwrap_or(N_TERMINUS_PK);
    let c_terminus = sequence
        .last()
        .and_then(|code| C_TERMINAL_PKS.get(&code).copied())
        .unwrap_or(C_TERMINUS_PK);

    let positive = |pk: f64| 1.0 / (10f64.powf(ph - pk) + 1.0);
    let negative = |pk: f64| 1.0 / (10f64.powf(pk - ph) + 1.0);

    let mut charge = positive(n_terminus) - negative(c_terminus);
    for code in sequence.residues() {
        if let Some(&pk) = POSITIVE_SIDE_CHAIN_PKS.get(&code) {
            charge += positive(pk);
        } else if let Some(&pk) = NEGATIVE_SIDE_CHAIN_PKS.get(&code) {
            charge -= negative(pk);
        }
    }
    charge
}

/// Isoelectric point: the pH at which the net charge is zero, found by bisection.
pub fn isoelectric_point(sequence: &ResidueSequence) -> f64 {
    let mut ph = PI_INITIAL_PH;
    let mut lower = PI_LOWER_PH;
    let mut upper = PI_UPPER_PH;

    while upper - lower > PI_TOLERANCE {
        if charge_at_ph(sequence, ph) > 0.0 {
            lower = ph;
        } else {
            upper = ph;
        }
        ph = (lower + upper) / 2.0;
    }
    ph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::residue::GLYCINE;

    fn glycine_chain(length: usize) -> ResidueSequence {
        ResidueSequence::homopolymer(GLYCINE, length).unwrap()
    }

    #[test]
    fn single_residue_weight_is_the_free_amino_acid_weight() {
        assert!((molecular_weight(&glycine_chain(1)) - 75.0666).abs() < 1e-9);
    }

    #[test]
    fn polyglycine_weight_loses_one_water_per_bond() {
        let expected = 10.0 * 75.0666 - 9.0 * WATER_WEIGHT;
        assert!((molecular_weight(&glycine_chain(10)) - expected).abs() < 1e-9);
        assert_eq!(format!("{:.1}", molecular_weight(&glycine_chain(10))), "588.5");
    }

    #[test]
    fn polyglycine_isoelectric_point_sits_between_the_terminal_pkas() {
        let pi = isoelectric_point(&glycine_chain(10));
        assert!((pi - (N_TERMINUS_PK + C_TERMINUS_PK) / 2.0).abs() < 1e-3);
        assert!((pi - 5.525).abs() < 1e-4);
        assert_eq!(format!("{pi:.2}"), "5.53");
    }

    #[test]
    fn default_terminal_pkas_apply_to_glycine_termini() {
        let sequence = glycine_chain(3);
        let n_terminus = 1.0 / (10f64.powf(7.0 - 7.5) + 1.0);
        let c_terminus = 1.0 / (10f64.powf(3.55 - 7.0) + 1.0);
        let expected = n_terminus - c_terminus;
        assert!((charge_at_ph(&sequence, 7.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn charge_is_positive_below_and_negative_above_the_isoelectric_point() {
        let sequence = glycine_chain(4);
        let pi = isoelectric_point(&sequence);
        assert!(charge_at_ph(&sequence, pi - 1.0) > 0.0);
        assert!(charge_at_ph(&sequence, pi + 1.0) < 0.0);
        assert!(charge_at_ph(&sequence, pi).abs() < 1e-3);
    }

    #[test]
    fn basic_residues_raise_the_isoelectric_point() {
        let basic = ResidueSequence::new("GKKKG").unwrap();
        let acidic = ResidueSequence::new("GDDDG").unwrap();
        assert!(isoelectric_point(&basic) > 9.0);
        assert!(isoelectric_point(&acidic) < isoelectric_point(&glycine_chain(5)));
    }

    #[test]
    fn terminal_residues_override_terminal_pkas() {
        let serine_start = ResidueSequence::new("SGG").unwrap();
        let glycine_start = ResidueSequence::new("GGG").unwrap();
        assert!(charge_at_ph(&serine_start, 7.0) < charge_at_ph(&glycine_start, 7.0));

        let aspartate_end = ResidueSequence::new("GGD").unwrap();
        let aspartate_inside = ResidueSequence::new("GDG").unwrap();
        assert!(charge_at_ph(&aspartate_end, 4.0) > charge_at_ph(&aspartate_inside, 4.0));
    }
}
