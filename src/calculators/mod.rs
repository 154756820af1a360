//! Metric calculators.
//!
//! Calculators form a closed set per tree level so the processor can
//! enumerate a level and barrier on it. Each one is a pure function from a
//! project node to the metrics it can compute there; an unmet precondition
//! yields fewer metrics, never an error.

pub mod cbo;
pub mod counts;
pub mod coupling;
pub mod cyclomatic;
pub mod fan;
pub mod inheritance;
pub mod lcom;
pub mod lines;
pub mod nesting;
pub mod parameters;
pub mod registry;
pub mod totals;
pub mod wmc;

pub use registry::CalculatorRegistry;

use crate::core::{Metric, NodeId, NodeKind, Project};

/// Signature shared by every calculator body.
pub type CalculateFn = fn(&Project, NodeId) -> Vec<Metric>;

/// A calculator supplied by the embedding application.
#[derive(Debug, Clone, Copy)]
pub struct CustomCalculator {
    pub id: &'static str,
    pub metric_names: &'static [&'static str],
    pub calculate: CalculateFn,
}

#[derive(Debug, Clone, Copy)]
pub enum MethodCalculator {
    Cyclomatic,
    Lines,
    Parameters,
    Nesting,
    Fan,
    Custom(CustomCalculator),
}

#[derive(Debug, Clone, Copy)]
pub enum TypeCalculator {
    Depth,
    Children,
    WeightedMethods,
    Cohesion,
    Specialization,
    Counts,
    Coupling,
    Lines,
    Custom(CustomCalculator),
}

#[derive(Debug, Clone, Copy)]
pub enum PackageCalculator {
    MartinCoupling,
    Counts,
    Lines,
    Custom(CustomCalculator),
}

#[derive(Debug, Clone, Copy)]
pub enum ProjectCalculator {
    Counts,
    Lines,
    Custom(CustomCalculator),
}

impl MethodCalculator {
    pub const REFERENCE: [Self; 5] = [
        Self::Cyclomatic,
        Self::Lines,
        Self::Parameters,
        Self::Nesting,
        Self::Fan,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Cyclomatic => "cyclomatic",
            Self::Lines => "method-lines",
            Self::Parameters => "parameters",
            Self::Nesting => "nesting",
            Self::Fan => "fan",
            Self::Custom(custom) => custom.id,
        }
    }

    pub fn metric_names(&self) -> &'static [&'static str] {
        match self {
            Self::Cyclomatic => &[cyclomatic::VG],
            Self::Lines => &[lines::LOC],
            Self::Parameters => &[parameters::NOP],
            Self::Nesting => &[nesting::NBD],
            Self::Fan => &[fan::FIN, fan::FOUT, fan::SC],
            Self::Custom(custom) => custom.metric_names,
        }
    }

    fn calculate_fn(&self) -> CalculateFn {
        match self {
            Self::Cyclomatic => cyclomatic::calculate,
            Self::Lines => lines::calculate,
            Self::Parameters => parameters::calculate,
            Self::Nesting => nesting::calculate,
            Self::Fan => fan::calculate,
            Self::Custom(custom) => custom.calculate,
        }
    }
}

impl TypeCalculator {
    pub const REFERENCE: [Self; 8] = [
        Self::Depth,
        Self::Children,
        Self::WeightedMethods,
        Self::Cohesion,
        Self::Specialization,
        Self::Counts,
        Self::Coupling,
        Self::Lines,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Depth => "dit",
            Self::Children => "noc",
            Self::WeightedMethods => "wmc",
            Self::Cohesion => "lcom",
            Self::Specialization => "six",
            Self::Counts => "type-counts",
            Self::Coupling => "cbo",
            Self::Lines => "type-lines",
            Self::Custom(custom) => custom.id,
        }
    }

    pub fn metric_names(&self) -> &'static [&'static str] {
        match self {
            Self::Depth => &[inheritance::DIT],
            Self::Children => &[inheritance::NOC],
            Self::WeightedMethods => &[wmc::WMC],
            Self::Cohesion => &[lcom::LCOM],
            Self::Specialization => &[inheritance::SIX],
            Self::Counts => &[counts::NOM, counts::NOF],
            Self::Coupling => &[cbo::CBO],
            Self::Lines => &[lines::LOC],
            Self::Custom(custom) => custom.metric_names,
        }
    }

    fn calculate_fn(&self) -> CalculateFn {
        match self {
            Self::Depth => inheritance::calculate_dit,
            Self::Children => inheritance::calculate_noc,
            Self::WeightedMethods => wmc::calculate,
            Self::Cohesion => lcom::calculate,
            Self::Specialization => inheritance::calculate_six,
            Self::Counts => counts::calculate_type,
            Self::Coupling => cbo::calculate,
            Self::Lines => lines::calculate,
            Self::Custom(custom) => custom.calculate,
        }
    }
}

impl PackageCalculator {
    pub const REFERENCE: [Self; 3] = [Self::MartinCoupling, Self::Counts, Self::Lines];

    pub fn id(&self) -> &'static str {
        match self {
            Self::MartinCoupling => "martin-coupling",
            Self::Counts => "package-counts",
            Self::Lines => "package-lines",
            Self::Custom(custom) => custom.id,
        }
    }

    pub fn metric_names(&self) -> &'static [&'static str] {
        match self {
            Self::MartinCoupling => &[
                coupling::CA,
                coupling::CE,
                coupling::I,
                coupling::A,
                coupling::D,
            ],
            Self::Counts => &[counts::NOT],
            Self::Lines => &[totals::TLOC],
            Self::Custom(custom) => custom.metric_names,
        }
    }

    fn calculate_fn(&self) -> CalculateFn {
        match self {
            Self::MartinCoupling => coupling::calculate,
            Self::Counts => counts::calculate_package,
            Self::Lines => totals::calculate_package,
            Self::Custom(custom) => custom.calculate,
        }
    }
}

impl ProjectCalculator {
    pub const REFERENCE: [Self; 2] = [Self::Counts, Self::Lines];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Counts => "project-counts",
            Self::Lines => "project-lines",
            Self::Custom(custom) => custom.id,
        }
    }

    pub fn metric_names(&self) -> &'static [&'static str] {
        match self {
            Self::Counts => &[counts::NOPK, counts::NOT],
            Self::Lines => &[totals::TLOC],
            Self::Custom(custom) => custom.metric_names,
        }
    }

    fn calculate_fn(&self) -> CalculateFn {
        match self {
            Self::Counts => counts::calculate_project,
            Self::Lines => totals::calculate_project,
            Self::Custom(custom) => custom.calculate,
        }
    }
}

/// Any calculator, tagged with the tree level it runs at.
#[derive(Debug, Clone, Copy)]
pub enum Calculator {
    Method(MethodCalculator),
    Type(TypeCalculator),
    Package(PackageCalculator),
    Project(ProjectCalculator),
}

impl Calculator {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Method(c) => c.id(),
            Self::Type(c) => c.id(),
            Self::Package(c) => c.id(),
            Self::Project(c) => c.id(),
        }
    }

    pub fn level(&self) -> NodeKind {
        match self {
            Self::Method(_) => NodeKind::Method,
            Self::Type(_) => NodeKind::Type,
            Self::Package(_) => NodeKind::Package,
            Self::Project(_) => NodeKind::Project,
        }
    }

    pub fn metric_names(&self) -> &'static [&'static str] {
        match self {
            Self::Method(c) => c.metric_names(),
            Self::Type(c) => c.metric_names(),
            Self::Package(c) => c.metric_names(),
            Self::Project(c) => c.metric_names(),
        }
    }

    /// Metrics for `node`, which must be of this calculator's level.
    pub fn calculate(&self, project: &Project, node: NodeId) -> Vec<Metric> {
        let calculate = match self {
            Self::Method(c) => c.calculate_fn(),
            Self::Type(c) => c.calculate_fn(),
            Self::Package(c) => c.calculate_fn(),
            Self::Project(c) => c.calculate_fn(),
        };
        calculate(project, node)
    }
}

impl From<MethodCalculator> for Calculator {
    fn from(calculator: MethodCalculator) -> Self {
        Self::Method(calculator)
    }
}

impl From<TypeCalculator> for Calculator {
    fn from(calculator: TypeCalculator) -> Self {
        Self::Type(calculator)
    }
}

impl From<PackageCalculator> for Calculator {
    fn from(calculator: PackageCalculator) -> Self {
        Self::Package(calculator)
    }
}

impl From<ProjectCalculator> for Calculator {
    fn from(calculator: ProjectCalculator) -> Self {
        Self::Project(calculator)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::builders::TreeBuilder;
    use crate::core::{NodeId, Project};
    use crate::source::TypeDeclaration;

    pub fn project(types: Vec<TypeDeclaration>) -> Project {
        TreeBuilder::new("test").build(types).unwrap()
    }

    pub fn type_id(project: &Project, package: &str, name: &str) -> NodeId {
        project.find_type(package, name).unwrap()
    }

    pub fn method_id(project: &Project, ty: NodeId, signature: &str) -> NodeId {
        project.node(ty).method_by_signature(signature).unwrap()
    }
}
