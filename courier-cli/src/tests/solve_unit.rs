//! Focused unit tests covering solve CLI configuration, request parsing and
//! output.

use super::helpers::{Workspace, five_stop_request, write_request, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use courier_core::{CostMatrixError, SolveError};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn solve_to_output(args: SolveArgs) -> Result<SolveOutput, CliError> {
    let mut buffer = Vec::new();
    run_solve_with(args, &DefaultSolveSolverBuilder, &mut buffer)?;
    let stdout = String::from_utf8(buffer).expect("stdout utf-8");
    Ok(serde_json::from_str(&stdout).expect("output should be a JSON solve response"))
}

fn args_for(path: Utf8PathBuf) -> SolveArgs {
    SolveArgs {
        request_path: Some(path),
        ..SolveArgs::default()
    }
}

#[rstest]
fn converting_solve_without_request_errors() {
    let err = SolveConfig::try_from(SolveArgs::default()).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SOLVE_REQUEST);
            assert_eq!(env, ENV_SOLVE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn solve_config_defaults_depot_and_limit() {
    let config =
        SolveConfig::try_from(args_for(Utf8PathBuf::from("stops.json"))).expect("config");
    assert_eq!(config.depot, 0);
    assert_eq!(config.expansion_limit, None);
}

#[rstest]
fn validate_sources_reports_missing_request(workspace: Workspace) {
    let config = SolveConfig {
        request_path: workspace.path("missing.json"),
        depot: 0,
        expansion_limit: None,
    };
    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_SOLVE_REQUEST),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file(workspace: Workspace) {
    let request_path = workspace.path("request.json");
    std::fs::create_dir(request_path.as_std_path()).expect("request directory");
    let config = SolveConfig {
        request_path: request_path.clone(),
        depot: 0,
        expansion_limit: None,
    };

    let err = config
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_SOLVE_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_solve_request_decodes_nulls_as_missing_roads(workspace: Workspace) {
    let request_path = workspace.path("request.json");
    write_request(&request_path, &json!({ "costs": [[null, 3.5], [2, null]] }));

    let decoded = load_solve_request(&request_path).expect("request should decode");
    assert_eq!(
        decoded,
        SolveRequestFile {
            costs: vec![vec![None, Some(3.5)], vec![Some(2.0), None]],
        }
    );
}

#[rstest]
fn load_solve_request_rejects_invalid_json(workspace: Workspace) {
    let request_path = workspace.path("request.json");
    write_utf8(&request_path, b"{ not valid json");

    let err = load_solve_request(&request_path).expect_err("invalid json should error");
    match err {
        CliError::ParseSolveRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn load_solve_request_io_error_returns_open_error(workspace: Workspace) {
    let request_path = workspace.path("request.json");

    let err = load_solve_request(&request_path).expect_err("missing request should error");
    match err {
        CliError::OpenSolveRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected OpenSolveRequest, found {other:?}"),
    }
}

#[rstest]
fn solve_prints_the_optimal_tour(workspace: Workspace) {
    let request_path = workspace.path("request.json");
    write_request(&request_path, &five_stop_request());

    let output = solve_to_output(args_for(request_path)).expect("solve should succeed");
    assert_eq!(output.cost, 199.0);
    assert_eq!(output.visit_order, vec![0, 2, 4, 3, 1]);
    assert_eq!(output.tour.len(), 5);
    assert_eq!(output.diagnostics.nodes_created, 15);
}

#[rstest]
#[case(0, vec![0, 2, 4, 3, 1])]
#[case(3, vec![3, 1, 0, 2, 4])]
fn visit_order_starts_at_the_depot(
    workspace: Workspace,
    #[case] depot: usize,
    #[case] expected: Vec<usize>,
) {
    let request_path = workspace.path("request.json");
    write_request(&request_path, &five_stop_request());
    let args = SolveArgs {
        depot: Some(depot),
        ..args_for(request_path)
    };

    let output = solve_to_output(args).expect("solve should succeed");
    assert_eq!(output.visit_order, expected);
}

#[rstest]
fn depot_outside_the_matrix_is_rejected(workspace: Workspace) {
    let request_path = workspace.path("request.json");
    write_request(&request_path, &five_stop_request());
    let args = SolveArgs {
        depot: Some(5),
        ..args_for(request_path)
    };

    let err = solve_to_output(args).expect_err("depot 5 should be rejected");
    match err {
        CliError::DepotOutOfRange { depot, stops } => assert_eq!((depot, stops), (5, 5)),
        other => panic!("expected DepotOutOfRange, found {other:?}"),
    }
}

#[rstest]
fn negative_costs_are_rejected_before_solving(workspace: Workspace) {
    let request_path = workspace.path("request.json");
    write_request(&request_path, &json!({ "costs": [[null, -1], [2, null]] }));

    let err = solve_to_output(args_for(request_path.clone())).expect_err("negative cost");
    match err {
        CliError::InvalidSolveRequest { path, source } => {
            assert_eq!(path, request_path);
            assert_eq!(source, CostMatrixError::NegativeCost { from: 0, to: 1 });
        }
        other => panic!("expected InvalidSolveRequest, found {other:?}"),
    }
}

#[rstest]
fn infeasible_requests_surface_the_solver_error(workspace: Workspace) {
    let request_path = workspace.path("request.json");
    write_request(
        &request_path,
        &json!({ "costs": [[null, 1, 2], [null, null, null], [3, 4, null]] }),
    );

    let err = solve_to_output(args_for(request_path)).expect_err("infeasible instance");
    match err {
        CliError::Solve { source } => assert_eq!(source, SolveError::Infeasible),
        other => panic!("expected Solve, found {other:?}"),
    }
}

#[rstest]
fn expansion_limit_reaches_the_solver(workspace: Workspace) {
    let request_path = workspace.path("request.json");
    write_request(&request_path, &five_stop_request());
    let args = SolveArgs {
        expansion_limit: Some(2),
        ..args_for(request_path)
    };

    let err = solve_to_output(args).expect_err("limit should stop the search");
    match err {
        CliError::Solve { source } => {
            assert_eq!(source, SolveError::ExpansionLimitReached { limit: 2 });
        }
        other => panic!("expected Solve, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence(workspace: Workspace) {
    use ortho_config::MergeComposer;

    let env_request = workspace.path("from-env.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": workspace.path("from-file.json").as_str(),
            "depot": 1,
            "expansion_limit": 500,
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": env_request.as_str(),
        "depot": 2,
    }));
    composer.push_cli(json!({ "depot": 3 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, env_request);
    assert_eq!(config.depot, 3);
    assert_eq!(config.expansion_limit, Some(500));
}
