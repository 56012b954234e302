use super::config::StabilityThresholds;
use crate::core::descriptors::{DescriptorError, DescriptorService};
use crate::core::models::molecule::Molecule;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StabilityVerdict {
    NoStructure,
    Assessed {
        molecular_weight: f64,
        log_p: f64,
        stable: bool,
    },
}

impl StabilityVerdict {
    pub fn is_stable(&self) -> bool {
        matches!(self, Self::Assessed { stable: true, .. })
    }
}

/// Accepts parsed structures whose weight and logP both fall strictly inside the thresholds.
pub struct StabilityFilter<'a> {
    thresholds: StabilityThresholds,
    descriptors: &'a dyn DescriptorService,
}

impl<'a> StabilityFilter<'a> {
    pub fn new(thresholds: StabilityThresholds, descriptors: &'a dyn DescriptorService) -> Self {
        Self {
            thresholds,
            descriptors,
        }
    }

    pub fn classify(&self, molecular_weight: f64, log_p: f64) -> bool {
        self.thresholds.admits(molecular_weight, log_p)
    }

    /// Descriptors are only computed when a structure is present.
    pub fn evaluate(&self, parsed: Option<&Molecule>) -> Result<StabilityVerdict, DescriptorError> {
        let Some(molecule) = parsed else {
            return Ok(StabilityVerdict::NoStructure);
        };
        let molecular_weight = self.descriptors.molecular_weight(molecule)?;
        let log_p = self.descriptors.log_p(molecule)?;
        Ok(StabilityVerdict::Assessed {
            molecular_weight,
            log_p,
            stable: self.classify(molecular_weight, log_p),
        })
    }

    /// A descriptor fault reads as "not stable"; use [`Self::evaluate`] to see the error.
    pub fn is_stable(&self, parsed: Option<&Molecule>) -> bool {
        self.evaluate(parsed)
            .map(|verdict| verdict.is_stable())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptors::StandardDescriptors;
    use crate::core::io::smiles::parse_smiles;
    use std::cell::Cell;

    struct FixedDescriptors {
        molecular_weight: f64,
        log_p: f64,
        calls: Cell<usize>,
    }

    impl FixedDescriptors {
        fn new(molecular_weight: f64, log_p: f64) -> Self {
            Self {
                molecular_weight,
                log_p,
                calls: Cell::new(0),
            }
        }
    }

    impl DescriptorService for FixedDescriptors {
        fn molecular_weight(&self, _: &Molecule) -> Result<f64, DescriptorError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.molecular_weight)
        }
        fn log_p(&self, _: &Molecule) -> Result<f64, DescriptorError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.log_p)
        }
        fn compute_2d_layout(&self, _: &mut Molecule) -> Result<(), DescriptorError> {
            Ok(())
        }
    }

    struct FailingDescriptors;

    impl DescriptorService for FailingDescriptors {
        fn molecular_weight(&self, _: &Molecule) -> Result<f64, DescriptorError> {
            Err(DescriptorError::EmptyMolecule)
        }
        fn log_p(&self, _: &Molecule) -> Result<f64, DescriptorError> {
            Err(DescriptorError::EmptyMolecule)
        }
        fn compute_2d_layout(&self, _: &mut Molecule) -> Result<(), DescriptorError> {
            Err(DescriptorError::EmptyMolecule)
        }
    }

    #[test]
    fn absent_structure_is_never_stable_and_computes_nothing() {
        let descriptors = FixedDescriptors::new(500.0, 0.0);
        let filter = StabilityFilter::new(StabilityThresholds::default(), &descriptors);
        assert!(!filter.is_stable(None));
        assert_eq!(filter.evaluate(None), Ok(StabilityVerdict::NoStructure));
        assert_eq!(descriptors.calls.get(), 0);
    }

    #[test]
    fn classify_requires_both_descriptors_strictly_inside() {
        let descriptors = StandardDescriptors;
        let filter = StabilityFilter::new(StabilityThresholds::default(), &descriptors);
        assert!(filter.classify(500.0, 0.0));
        for (mw, log_p) in [
            (200.0, 0.0),
            (2000.0, 0.0),
            (150.0, 0.0),
            (500.0, -3.0),
            (500.0, 1.0),
            (500.0, -4.2),
            (f64::NAN, 0.0),
        ] {
            assert!(!filter.classify(mw, log_p), "({mw}, {log_p}) should be unstable");
        }
    }

    #[test]
    fn present_structure_uses_the_descriptor_service() {
        let molecule = parse_smiles("CCO").unwrap();
        let descriptors = FixedDescriptors::new(500.0, 0.0);
        let filter = StabilityFilter::new(StabilityThresholds::default(), &descriptors);
        assert!(filter.is_stable(Some(&molecule)));
        assert_eq!(descriptors.calls.get(), 2);
    }

    #[test]
    fn polyglycine_is_too_hydrophilic_for_the_default_thresholds() {
        let molecule = parse_smiles("NCC(=O)NCC(=O)NCC(=O)NCC(=O)N").unwrap();
        let descriptors = StandardDescriptors;
        let filter = StabilityFilter::new(StabilityThresholds::default(), &descriptors);
        match filter.evaluate(Some(&molecule)).unwrap() {
            StabilityVerdict::Assessed {
                molecular_weight,
                log_p,
                stable,
            } => {
                assert!((molecular_weight - 245.239).abs() < 0.01);
                assert!(log_p < -3.0);
                assert!(!stable);
            }
            other => panic!("unexpected verdict {other:?}"),
        }
    }

    #[test]
    fn descriptor_faults_propagate_from_evaluate() {
        let molecule = parse_smiles("C").unwrap();
        let filter = StabilityFilter::new(StabilityThresholds::default(), &FailingDescriptors);
        assert_eq!(
            filter.evaluate(Some(&molecule)),
            Err(DescriptorError::EmptyMolecule)
        );
        assert!(!filter.is_stable(Some(&molecule)));
    }
}
