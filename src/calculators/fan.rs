use crate::core::{Metric, NodeId, Project};
use crate::numeric::NumericValue;

pub const FIN: &str = "FIN";
pub const FOUT: &str = "FOUT";
pub const SC: &str = "SC";

/// Fan-in, fan-out and structural complexity (`FOUT²`) from the call
/// network. Every call site counts, parallel edges included.
pub fn calculate(project: &Project, method: NodeId) -> Vec<Metric> {
    let network = project.call_network();
    let fan_in = NumericValue::from(network.fan_in(method));
    let fan_out = NumericValue::from(network.fan_out(method));
    let structural = fan_out.times(&fan_out);

    vec![
        Metric::new(FIN, "Fan-in", fan_in),
        Metric::new(FOUT, "Fan-out", fan_out),
        Metric::new(SC, "Structural Complexity", structural),
    ]
}
