use crate::calculators::cyclomatic::VG;
use crate::core::{Metric, NodeId, NodeKind, Project};
use crate::numeric::NumericValue;

pub const WMC: &str = "WMC";

/// Sum of the `VG` metrics already attached to the type's methods. Methods
/// without a body carry no `VG` and add nothing.
pub fn calculate(project: &Project, ty: NodeId) -> Vec<Metric> {
    let total = project
        .node(ty)
        .children()
        .filter(|child| child.kind() == NodeKind::Method)
        .filter_map(|method| method.metric(VG))
        .fold(NumericValue::zero(), |sum, vg| sum.plus(vg.value()));
    vec![Metric::new(WMC, "Weighted Methods per Class", total)]
}
