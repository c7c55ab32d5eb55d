//! Frontier report port trait.

use crate::domain::error::FrontierError;
use crate::domain::frontier::FrontierResult;
use crate::domain::universe::AssetUniverse;
use std::path::Path;

/// Port for writing a ranked frontier.
///
/// One row per portfolio, in `result` order, with weight columns in
/// `universe` order.
pub trait FrontierReportPort {
    fn write(
        &self,
        result: &FrontierResult,
        universe: &AssetUniverse,
        output_path: &Path,
    ) -> Result<(), FrontierError>;
}
