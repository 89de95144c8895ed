//! Navigation through the default route table.

use spa_shell::config::{RouteConfig, ShellConfig};
use spa_shell::routing::{RecordingHost, RouteParams, ViewEvent, ViewId};
use spa_shell::Shell;

fn shell() -> Shell {
    Shell::bootstrap(ShellConfig::default()).unwrap()
}

fn params(pairs: &[(&str, &str)]) -> RouteParams {
    pairs.iter().copied().collect()
}

#[test]
fn test_parameterized_route_mounts_with_props() {
    let shell = shell();
    let nav = shell.navigator(RecordingHost::new(), "/datasets/view/42").unwrap();

    let state = nav.current();
    assert_eq!(state.view, ViewId::from("dataset-view"));
    assert_eq!(state.params.get("id"), Some("42"));
    assert_eq!(state.view_props(), Some(&params(&[("id", "42")])));
    assert_eq!(
        nav.host().events(),
        &[ViewEvent::Mount {
            view: ViewId::from("dataset-view"),
            props: Some(params(&[("id", "42")])),
        }]
    );
}

#[test]
fn test_unknown_path_falls_back() {
    let shell = shell();
    let nav = shell.navigator(RecordingHost::new(), "/unknown").unwrap();

    assert!(nav.current().is_fallback());
    assert_eq!(nav.current().view, ViewId::from("not-found"));
    assert!(nav.current().params.is_empty());
    assert_eq!(nav.host().mounted(), Some(&ViewId::from("not-found")));
}

#[test]
fn test_every_default_route_resolves() {
    let shell = shell();
    let cases = [
        ("/", "home"),
        ("/datasets/list", "dataset-list"),
        ("/datasets/create", "dataset-create"),
        ("/datasets/run", "dataset-run"),
        ("/datasets/view/7", "dataset-view"),
        ("/datasets/list/", "dataset-list"),
        ("/datasets/run?id=3#top", "dataset-run"),
    ];

    for (path, view) in cases {
        let resolution = shell.routes().resolve(path);
        assert_eq!(resolution.view, ViewId::from(view), "path {path}");
        assert!(!resolution.is_fallback(), "path {path}");
    }
}

#[test]
fn test_near_misses_fall_back() {
    let shell = shell();
    for path in ["/datasets", "/datasets/view", "/datasets/view/7/edit", "/datasets//list"] {
        assert!(shell.routes().resolve(path).is_fallback(), "path {path}");
    }
}

#[test]
fn test_first_declared_route_wins() {
    let mut config = ShellConfig::default();
    config.router.routes = vec![
        RouteConfig::new("/datasets/:id", "by-id"),
        RouteConfig::new("/datasets/list", "dataset-list"),
    ];
    let shell = Shell::bootstrap(config).unwrap();

    let resolution = shell.routes().resolve("/datasets/list");
    assert_eq!(resolution.view, ViewId::from("by-id"));
    assert_eq!(resolution.route, Some(0));
    assert_eq!(resolution.params.get("id"), Some("list"));
}

#[test]
fn test_navigate_and_back_remount_views() {
    let shell = shell();
    let mut nav = shell.navigator(RecordingHost::new(), "/").unwrap();
    nav.host_mut().take_events();

    nav.navigate("/datasets/list").unwrap();
    nav.navigate("/datasets/view/9").unwrap();
    assert_eq!(nav.history().len(), 3);

    let state = nav.back().unwrap().unwrap();
    assert_eq!(state.view, ViewId::from("dataset-list"));

    let state = nav.forward().unwrap().unwrap();
    assert_eq!(state.params.get("id"), Some("9"));

    let events = nav.host_mut().take_events();
    assert_eq!(
        events,
        vec![
            ViewEvent::Unmount { view: ViewId::from("home") },
            ViewEvent::Mount { view: ViewId::from("dataset-list"), props: None },
            ViewEvent::Unmount { view: ViewId::from("dataset-list") },
            ViewEvent::Mount {
                view: ViewId::from("dataset-view"),
                props: Some(params(&[("id", "9")])),
            },
            ViewEvent::Unmount { view: ViewId::from("dataset-view") },
            ViewEvent::Mount { view: ViewId::from("dataset-list"), props: None },
            ViewEvent::Unmount { view: ViewId::from("dataset-list") },
            ViewEvent::Mount {
                view: ViewId::from("dataset-view"),
                props: Some(params(&[("id", "9")])),
            },
        ]
    );
}

#[test]
fn test_back_at_first_entry_is_noop() {
    let shell = shell();
    let mut nav = shell.navigator(RecordingHost::new(), "/datasets/run").unwrap();

    assert!(nav.back().unwrap().is_none());
    assert_eq!(nav.current().view, ViewId::from("dataset-run"));
    assert_eq!(nav.host().events().len(), 1);
}

#[test]
fn test_param_change_on_same_view_remounts() {
    let shell = shell();
    let mut nav = shell.navigator(RecordingHost::new(), "/datasets/view/1").unwrap();
    nav.host_mut().take_events();

    nav.navigate("/datasets/view/2").unwrap();
    assert_eq!(
        nav.host().events(),
        &[
            ViewEvent::Unmount { view: ViewId::from("dataset-view") },
            ViewEvent::Mount {
                view: ViewId::from("dataset-view"),
                props: Some(params(&[("id", "2")])),
            },
        ]
    );
}

#[test]
fn test_navigation_outside_base_is_rejected() {
    let mut config = ShellConfig::default();
    config.router.base = "/app".into();
    let shell = Shell::bootstrap(config).unwrap();
    let mut nav = shell.navigator(RecordingHost::new(), "/app/").unwrap();

    assert!(nav.navigate("/datasets/list").is_err());
    assert_eq!(nav.current().view, ViewId::from("home"));
    assert_eq!(nav.history().len(), 1);

    nav.navigate("/app/datasets/list").unwrap();
    assert_eq!(nav.current().view, ViewId::from("dataset-list"));
}

#[test]
fn test_encoded_param_reaches_view_decoded() {
    let shell = shell();
    let nav = shell.navigator(RecordingHost::new(), "/datasets/view/a%20b").unwrap();

    assert_eq!(nav.current().path, "/datasets/view/a%20b");
    assert_eq!(nav.current().view_props(), Some(&params(&[("id", "a b")])));
}
