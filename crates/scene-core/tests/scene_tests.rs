use scene_core::*;

fn config() -> SceneConfig {
    SceneConfig {
        marker_seed: Some(5),
        environment_seed: Some(6),
        ..SceneConfig::default()
    }
}

#[test]
fn markers_wait_for_the_tree() {
    let mut scene = Scene::new(config());
    assert!(scene.markers().is_empty());
    assert!(scene.tree().is_none());
    assert_eq!(scene.static_revision(), 0);

    let tree = TreeGeometry::fallback(&scene.config().tree);
    let bounds = tree.bounds();
    scene.install_tree(tree).unwrap();
    assert_eq!(scene.static_revision(), 1);
    assert_eq!(scene.markers().len(), DEFAULT_POTENTIAL_MARKERS);
    let activated = scene
        .markers()
        .markers()
        .iter()
        .filter(|m| m.is_activated())
        .count();
    assert_eq!(activated, DEFAULT_ACTIVATED_MARKERS);
    assert!(scene
        .markers()
        .markers()
        .iter()
        .all(|m| bounds.contains(m.position)));
}

#[test]
fn bad_marker_config_still_installs_tree() {
    let mut scene = Scene::new(SceneConfig {
        marker_count: 2,
        activated_markers: 3,
        ..config()
    });
    let err = scene
        .install_tree(TreeGeometry::fallback(&TreeParams::default()))
        .unwrap_err();
    assert!(matches!(err, BuildError::TooManyActivated { .. }));
    assert!(scene.tree().is_some());
    assert!(scene.markers().is_empty());
}

#[test]
fn time_of_day_toggle_bumps_revision() {
    let mut scene = Scene::new(config());
    let rev = scene.static_revision();
    scene.toggle_time_of_day();
    assert_eq!(scene.static_revision(), rev + 1);
    scene.tick(1.0 / 60.0);
}
