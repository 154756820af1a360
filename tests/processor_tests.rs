mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use codemetrics::calculators::{CustomCalculator, MethodCalculator, TypeCalculator};
use codemetrics::config::{EngineConfig, ParallelConfig};
use codemetrics::core::attributes::{BEGIN_LINE, END_LINE};
use codemetrics::source::{
    FieldDeclaration, MethodCall, MethodTarget, ObjectCreation, QualifiedName, ResolutionError,
    SymbolResolver, TypeDeclaration, TypeReference,
};
use codemetrics::{
    compute_metrics, CalculatorRegistry, Metric, NodeId, NodeKind, ProcessingState, Processor,
    Project, TreeBuilder,
};
use common::*;
use pretty_assertions::assert_eq;
use rayon::prelude::*;

fn two_methods(first: usize, second: usize) -> TypeDeclaration {
    TypeDeclaration::class(Some("calc"), "Engine")
        .with_method(method("first", branches(first)))
        .with_method(method("second", branches(second)))
}

#[test]
fn test_wmc_sums_method_complexity() {
    // VG 3 and 5
    let project = build(vec![two_methods(2, 4)]);
    let summary = process_parallel(&project);
    assert_eq!(summary.state, ProcessingState::ProjectDone);

    let engine = type_node(&project, "calc", "Engine");
    assert_eq!(metric(&project, engine, "WMC").as_deref(), Some("8"));
}

#[test]
fn test_wmc_is_stable_across_runs_and_pool_sizes() {
    for threads in [1, 2, 8] {
        for _ in 0..10 {
            let project = build(vec![two_methods(2, 4)]);
            process(&project, ParallelConfig::new().with_max_concurrency(threads));
            let engine = type_node(&project, "calc", "Engine");
            assert_eq!(metric(&project, engine, "WMC").as_deref(), Some("8"));
        }
    }
}

#[test]
fn test_sequential_and_parallel_runs_agree() {
    let declarations = || {
        vec![
            two_methods(1, 3),
            TypeDeclaration::class(Some("calc"), "Gear")
                .with_supertype(resolved("calc", "Engine"))
                .with_field(FieldDeclaration::new("engine", resolved("calc", "Engine")))
                .with_method(method("turn", vec![call("calc", "Engine", "void first()", "first")])),
        ]
    };
    let sequential = build(declarations());
    process(&sequential, ParallelConfig::sequential());
    let parallel = build(declarations());
    process_parallel(&parallel);

    for kind in NodeKind::BOTTOM_UP {
        let left = sequential.tree().nodes_of_kind(kind);
        let right = parallel.tree().nodes_of_kind(kind);
        assert_eq!(left, right);
        for (l, r) in left.into_iter().zip(right) {
            assert_eq!(sequential.tree().metrics(l), parallel.tree().metrics(r));
        }
    }
}

#[test]
fn test_concurrent_metric_writes_round_trip() {
    let project = build(vec![two_methods(0, 0)]);
    let engine = type_node(&project, "calc", "Engine");
    let names: Vec<String> = (0..64).map(|i| format!("M{i:02}")).collect();

    names.par_iter().enumerate().for_each(|(i, name)| {
        project
            .tree()
            .attach_metric(engine, Metric::new(name.clone(), "test", i));
    });

    let read: Vec<_> = project.tree().metrics(engine);
    assert_eq!(read.len(), 64);
    for (i, metric) in read.iter().enumerate() {
        assert_eq!(metric, &Metric::new(names[i].clone(), "test", i));
    }
}

#[test]
fn test_last_write_wins_for_same_name() {
    let project = build(vec![two_methods(0, 0)]);
    let engine = type_node(&project, "calc", "Engine");
    project.tree().attach_metric(engine, Metric::new("X", "first", 1));
    project.tree().attach_metric(engine, Metric::new("X", "second", 2));

    assert_eq!(project.tree().metrics(engine), vec![Metric::new("X", "second", 2)]);
}

#[test]
fn test_graphs_are_built_once_under_concurrent_access() {
    let project = build(vec![
        two_methods(1, 1),
        TypeDeclaration::class(Some("calc"), "Gear").with_supertype(resolved("calc", "Engine")),
    ]);

    let edges: Vec<usize> = (0..32)
        .into_par_iter()
        .map(|_| {
            project.inheritance_graph().edge_count()
                + project.usage_graph().edge_count()
                + project.call_network().call_site_count()
        })
        .collect();
    assert!(edges.iter().all(|&e| e == edges[0]));
    assert_eq!(project.graph_builds(), 3);

    process_parallel(&project);
    assert_eq!(project.graph_builds(), 3);
}

#[test]
fn test_graphs_are_lazy() {
    let project = build(vec![two_methods(1, 1)]);
    assert_eq!(project.graph_builds(), 0);

    let registry = CalculatorRegistry::new(vec![MethodCalculator::Cyclomatic.into()]).unwrap();
    Processor::new(registry, &ParallelConfig::sequential())
        .unwrap()
        .process(&project)
        .unwrap();
    assert_eq!(project.graph_builds(), 0);
}

fn explode(_: &Project, _: NodeId) -> Vec<Metric> {
    panic!("calculator bug")
}

#[test]
fn test_calculator_panic_is_contained() {
    let faulty = CustomCalculator {
        id: "faulty",
        metric_names: &["BOOM"],
        calculate: explode,
    };
    let registry = CalculatorRegistry::reference()
        .with(TypeCalculator::Custom(faulty))
        .unwrap();
    let project = build(vec![two_methods(2, 4)]);

    let summary = Processor::new(registry, &ParallelConfig::new().with_max_concurrency(2))
        .unwrap()
        .process(&project)
        .unwrap();

    assert_eq!(summary.state, ProcessingState::ProjectDone);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].calculator, "faulty");
    assert_eq!(summary.failures[0].node, "calc/Engine");
    assert_eq!(summary.failures[0].message, "calculator bug");

    let engine = type_node(&project, "calc", "Engine");
    assert_eq!(metric(&project, engine, "WMC").as_deref(), Some("8"));
    assert_eq!(metric(&project, engine, "BOOM"), None);
}

fn impersonate_wmc(_: &Project, _: NodeId) -> Vec<Metric> {
    vec![
        Metric::new("WMC", "Weighted Methods per Class", 99),
        Metric::new("X", "declared metric", 1),
    ]
}

#[test]
fn test_undeclared_metrics_cannot_overwrite_reference_metrics() {
    let impostor = CustomCalculator {
        id: "impostor",
        metric_names: &["X"],
        calculate: impersonate_wmc,
    };
    let registry = CalculatorRegistry::reference()
        .with(TypeCalculator::Custom(impostor))
        .unwrap();
    let processor = Processor::new(registry, &ParallelConfig::new().with_max_concurrency(4)).unwrap();

    for _ in 0..20 {
        let project = build(vec![two_methods(2, 4)]);
        let summary = processor.process(&project).unwrap();

        let engine = type_node(&project, "calc", "Engine");
        assert_eq!(metric(&project, engine, "WMC").as_deref(), Some("8"));
        assert_eq!(metric(&project, engine, "X").as_deref(), Some("1"));

        assert_eq!(summary.state, ProcessingState::ProjectDone);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].calculator, "impostor");
        assert_eq!(summary.failures[0].node, "calc/Engine");
        assert_eq!(summary.failures[0].message, "undeclared metric `WMC`");
    }
}

fn methods_with_vg(project: &Project, ty: NodeId) -> Vec<Metric> {
    let measured = project
        .node(ty)
        .children()
        .filter(|m| m.metric("VG").is_some())
        .count();
    vec![Metric::new("MVG", "methods carrying VG", measured)]
}

#[test]
fn test_type_level_sees_every_method_metric() {
    let observer = CustomCalculator {
        id: "observer",
        metric_names: &["MVG"],
        calculate: methods_with_vg,
    };
    let registry = CalculatorRegistry::reference()
        .with(TypeCalculator::Custom(observer))
        .unwrap();
    let engine = (0..40).fold(TypeDeclaration::class(Some("calc"), "Big"), |ty, i| {
        ty.with_method(method(&format!("m{i}"), branches(i % 5)))
    });
    let project = build(vec![engine]);

    Processor::new(registry, &ParallelConfig::new().with_max_concurrency(8))
        .unwrap()
        .process(&project)
        .unwrap();

    let big = type_node(&project, "calc", "Big");
    assert_eq!(metric(&project, big, "MVG").as_deref(), Some("40"));
}

/// Resolver whose every lookup fails, counting how often it was asked.
#[derive(Default)]
struct FailingResolver {
    calls: AtomicUsize,
}

impl FailingResolver {
    fn fail<T>(&self, name: &str) -> Result<T, ResolutionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(ResolutionError::Failed {
            name: name.to_string(),
            message: "index unavailable".to_string(),
        })
    }
}

impl SymbolResolver for FailingResolver {
    fn resolve_type(&self, reference: &TypeReference) -> Result<QualifiedName, ResolutionError> {
        self.fail(&reference.name)
    }

    fn resolve_call(&self, call: &MethodCall) -> Result<MethodTarget, ResolutionError> {
        self.fail(&call.name)
    }

    fn resolve_creation(&self, creation: &ObjectCreation) -> Result<MethodTarget, ResolutionError> {
        self.fail(&creation.type_ref.name)
    }
}

#[test]
fn test_resolution_failures_mean_no_edges() {
    let resolver = Arc::new(FailingResolver::default());
    let project = TreeBuilder::new("fixture")
        .with_resolver(resolver.clone())
        .build(vec![
            TypeDeclaration::class(Some("p"), "Base"),
            TypeDeclaration::class(Some("p"), "Derived")
                .with_supertype(resolved("p", "Base"))
                .with_field(FieldDeclaration::new("base", resolved("p", "Base")))
                .with_method(method("go", vec![call("p", "Base", "void x()", "x"), creation("p", "Base")])),
        ])
        .unwrap();

    let summary = process_parallel(&project);
    assert!(summary.is_clean());
    assert!(resolver.calls.load(Ordering::Relaxed) > 0);

    let derived = type_node(&project, "p", "Derived");
    assert_eq!(metric(&project, derived, "DIT").as_deref(), Some("1"));
    assert_eq!(metric(&project, derived, "CBO").as_deref(), Some("0"));
    assert_eq!(project.call_network().call_site_count(), 0);
}

#[test]
fn test_disabled_calculators_do_not_run() {
    let mut config = EngineConfig::default();
    config.metrics.disabled = vec!["wmc".to_string(), "fan".to_string()];
    config.parallel = ParallelConfig::sequential();

    let project = build(vec![two_methods(1, 1)]);
    compute_metrics(&project, &config).unwrap();

    let engine = type_node(&project, "calc", "Engine");
    assert_eq!(metric(&project, engine, "WMC"), None);
    assert_eq!(metric(&project, engine, "NOM").as_deref(), Some("2"));
    let first = method_node(&project, engine, "void first()");
    assert_eq!(metric(&project, first, "FOUT"), None);
    assert_eq!(metric(&project, first, "VG").as_deref(), Some("2"));
}

#[test]
fn test_line_totals_roll_up() {
    let with_span = |ty: TypeDeclaration, begin: &str, end: &str| {
        ty.with_attribute(BEGIN_LINE, begin).with_attribute(END_LINE, end)
    };
    let project = build(vec![
        with_span(TypeDeclaration::class(Some("a"), "X"), "1", "10"),
        with_span(TypeDeclaration::class(Some("a"), "Y"), "1", "5"),
        with_span(TypeDeclaration::class(Some("b"), "Z"), "3", "4"),
        TypeDeclaration::class(Some("c"), "NoSpan"),
    ]);
    process_parallel(&project);

    let a = package_node(&project, "a");
    let c = package_node(&project, "c");
    let root = project.tree().root();
    assert_eq!(metric(&project, a, "TLOC").as_deref(), Some("15"));
    assert_eq!(metric(&project, c, "TLOC"), None);
    assert_eq!(metric(&project, root, "TLOC").as_deref(), Some("17"));
    assert_eq!(metric(&project, root, "NOPK").as_deref(), Some("3"));
    assert_eq!(metric(&project, root, "NOT").as_deref(), Some("4"));
}
