use super::candidate::{CandidateBuilder, PolyglycineBuilder};
use super::config::{SimulationConfig, StabilityThresholds, ViabilityWindow};
use super::environment::{EnvironmentSampler, UniformEnvironmentSampler};
use super::stability::{StabilityFilter, StabilityVerdict};
use crate::core::descriptors::{DescriptorService, StandardDescriptors};
use crate::core::io::smiles::SmilesParser;
use crate::core::io::traits::StructureParser;
use crate::core::sequence::{ProtParamAnalyzer, SequenceAnalyzer};
use rand::RngCore;
use std::fmt;
use tracing::{debug, trace, warn};

/// Sequence-level summary of a candidate that survived every filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessRecord {
    pub length: usize,
    pub molecular_weight: f64,
    pub isoelectric_point: f64,
}

impl fmt::Display for SuccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Success: Polyglycine length {}, MW = {:.1}, pI = {:.2}",
            self.length, self.molecular_weight, self.isoelectric_point
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrialOutcome {
    OutsideWindow,
    ParseFailed,
    Unstable,
    DescriptorFault,
    Success(SuccessRecord),
}

impl TrialOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(&self) -> Option<&SuccessRecord> {
        match self {
            Self::Success(record) => Some(record),
            _ => None,
        }
    }
}

/// Executes a single sample, gate, build, parse and filter pass.
///
/// Collaborators default to the implementations shipped with this crate and can be replaced
/// individually with the `with_*` methods.
pub struct TrialRunner {
    viability: ViabilityWindow,
    thresholds: StabilityThresholds,
    sampler: Box<dyn EnvironmentSampler>,
    builder: Box<dyn CandidateBuilder>,
    parser: Box<dyn StructureParser>,
    descriptors: Box<dyn DescriptorService>,
    sequences: Box<dyn SequenceAnalyzer>,
}

impl Default for TrialRunner {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

impl TrialRunner {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            viability: config.viability,
            thresholds: config.stability,
            sampler: Box::new(UniformEnvironmentSampler),
            builder: Box::new(PolyglycineBuilder::new(config.chain_length)),
            parser: Box::new(SmilesParser),
            descriptors: Box::new(StandardDescriptors),
            sequences: Box::new(ProtParamAnalyzer),
        }
    }

    pub fn with_sampler(mut self, sampler: impl EnvironmentSampler + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    pub fn with_builder(mut self, builder: impl CandidateBuilder + 'static) -> Self {
        self.builder = Box::new(builder);
        self
    }

    pub fn with_parser(mut self, parser: impl StructureParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_descriptors(mut self, descriptors: impl DescriptorService + 'static) -> Self {
        self.descriptors = Box::new(descriptors);
        self
    }

    pub fn with_sequence_analyzer(mut self, analyzer: impl SequenceAnalyzer + 'static) -> Self {
        self.sequences = Box::new(analyzer);
        self
    }

    /// Runs one trial. Failures of any stage are folded into the returned outcome.
    pub fn run_one(&self, rng: &mut dyn RngCore) -> TrialOutcome {
        let environment = self.sampler.sample(rng);
        if !self.viability.admits(&environment) {
            trace!(?environment, "Conditions outside the viable window");
            return TrialOutcome::OutsideWindow;
        }

        let candidate = self.builder.build(rng);
        trace!(encoding = %candidate.encoding, "Built candidate");

        let mut molecule = match self.parser.parse(&candidate.encoding) {
            Ok(molecule) => molecule,
            Err(e) => {
                debug!(encoding = %candidate.encoding, error = %e, "Candidate failed to parse");
                return TrialOutcome::ParseFailed;
            }
        };

        let filter = StabilityFilter::new(self.thresholds, self.descriptors.as_ref());
        match filter.evaluate(Some(&molecule)) {
            Ok(verdict) if verdict.is_stable() => {}
            Ok(StabilityVerdict::Assessed {
                molecular_weight,
                log_p,
                ..
            }) => {
                debug!(
                    length = candidate.length(),
                    molecular_weight, log_p, "Candidate rejected as unstable"
                );
                return TrialOutcome::Unstable;
            }
            Ok(StabilityVerdict::NoStructure) => return TrialOutcome::Unstable,
            Err(e) => {
                warn!(encoding = %candidate.encoding, error = %e, "Descriptor computation failed");
                return TrialOutcome::DescriptorFault;
            }
        }

        if let Err(e) = self.descriptors.compute_2d_layout(&mut molecule) {
            warn!(encoding = %candidate.encoding, error = %e, "2D layout failed");
        }

        let properties = match self.sequences.analyze(&candidate.residues) {
            Ok(properties) => properties,
            Err(e) => {
                warn!(residues = %candidate.residues, error = %e, "Sequence analysis failed");
                return TrialOutcome::DescriptorFault;
            }
        };

        let record = SuccessRecord {
            length: properties.length,
            molecular_weight: properties.molecular_weight,
            isoelectric_point: properties.isoelectric_point,
        };
        debug!(%record, "Trial succeeded");
        TrialOutcome::Success(record)
    }
}
