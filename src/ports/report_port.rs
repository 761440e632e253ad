//! Report output port trait.

use std::path::Path;

use crate::domain::error::RotraderError;
use crate::domain::run::RotationRun;

/// Port for writing a run's output tables.
pub trait ReportPort {
    fn write(&self, run: &RotationRun, output_dir: &Path) -> Result<(), RotraderError>;
}
