use crate::constants::{DEFAULT_ACTIVATED_MARKERS, DEFAULT_POTENTIAL_MARKERS};
use crate::controller::CameraConfig;
use crate::environment::{Environment, TimeOfDay};
use crate::markers::{ActivationPayload, BuildError, MarkerLayout, MarkerPlacement, MarkerSet};
use crate::tree::{TreeGeometry, TreeParams};

/// Everything needed to assemble the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub tree: TreeParams,
    /// Markers scattered in the tree bounds, activated ones included.
    pub marker_count: usize,
    pub activated_markers: usize,
    pub marker_payloads: Vec<ActivationPayload>,
    pub marker_seed: Option<u64>,
    pub environment_seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            tree: TreeParams::default(),
            marker_count: DEFAULT_POTENTIAL_MARKERS,
            activated_markers: DEFAULT_ACTIVATED_MARKERS,
            marker_payloads: (1..=DEFAULT_ACTIVATED_MARKERS)
                .map(ActivationPayload::numbered)
                .collect(),
            marker_seed: None,
            environment_seed: None,
        }
    }
}

/// Environment, tree and markers. Markers only exist once a tree has been
/// installed, since they are sampled from its bounds.
pub struct Scene {
    config: SceneConfig,
    environment: Environment,
    tree: Option<TreeGeometry>,
    markers: MarkerSet,
    /// Bumped whenever the static point layers (tree, ground) change.
    static_revision: u64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let environment = Environment::new(config.environment_seed);
        Self {
            config,
            environment,
            tree: None,
            markers: MarkerSet::empty(),
            static_revision: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn tree(&self) -> Option<&TreeGeometry> {
        self.tree.as_ref()
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut MarkerSet {
        &mut self.markers
    }

    pub fn static_revision(&self) -> u64 {
        self.static_revision
    }

    /// Store the tree and scatter markers inside its bounds.
    ///
    /// On error the tree is still installed and the previous markers kept.
    pub fn install_tree(&mut self, geometry: TreeGeometry) -> Result<(), BuildError> {
        let layout = MarkerLayout {
            placement: MarkerPlacement::Sampled {
                count: self.config.marker_count,
                bounds: geometry.bounds(),
            },
            activated_count: self.config.activated_markers,
            payloads: self.config.marker_payloads.clone(),
            seed: self.config.marker_seed,
        };
        log::info!(
            "[scene] tree installed: {} points ({:?})",
            geometry.len(),
            geometry.source()
        );
        self.tree = Some(geometry);
        self.static_revision += 1;
        self.markers = MarkerSet::build(&layout)?;
        Ok(())
    }

    pub fn toggle_time_of_day(&mut self) -> TimeOfDay {
        self.static_revision += 1;
        self.environment.toggle_time_of_day()
    }

    pub fn tick(&mut self, dt: f32) {
        self.environment.tick(dt);
        self.markers.tick(dt);
    }
}
