//! Typed access to run settings.
//!
//! `Ok(None)` means the key is absent. A present value that does not parse as
//! the requested type is a `ConfigInvalid` error, never a silent default.

use crate::domain::error::FrontierError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, FrontierError>;
    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, FrontierError>;
    /// Accepts `true`/`yes`/`1` and `false`/`no`/`0`, case-insensitively.
    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, FrontierError>;
}
