use marshallmix::engine::session::DesignSession;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub session: DesignSession,
}

/// Values given through dedicated flags; they win over the file and `--set`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub target_vtm: Option<f64>,
    pub specimen_count: Option<usize>,
    pub sum_tolerance: Option<f64>,
}
