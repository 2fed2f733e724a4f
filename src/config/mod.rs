//! Layered configuration.
//!
//! Consolidates configuration from several tiers with field-by-field merging:
//! 1. **Defaults** - built in
//! 2. **System** - `/etc/data-diff/config.yaml`
//! 3. **User** - `~/.data-diff/config.yaml`
//! 4. **Project** - `./config.yaml`
//! 5. **Environment** - `DATA_DIFF_<KEY>`
//! 6. **CLI flags**
//!
//! ## Environment Variables
//! - `DATA_DIFF_CONFIG_PATH` - Explicit config file (replaces tiers 2-4)
//! - `DATA_DIFF_USER_DIR` - User config dir (default: `~/.data-diff`)
//! - `DATA_DIFF_LOG_LEVEL`, `DATA_DIFF_LOG_FORMAT`, `DATA_DIFF_DEBUG`,
//!   `DATA_DIFF_FORMAT`, `DATA_DIFF_INPUT_FILE`, `DATA_DIFF_OUTPUT_FILE`

mod loader;
mod merge;
mod types;

pub use loader::{
    CONFIG_FILE_NAME, CONFIG_PATH_ENV, ConfigLoader, ConfigOverrides, ConfigPaths, ConfigTier,
    ENV_PREFIX, USER_DIR_ENV, env_key, init_config_file,
};
pub use merge::{deep_merge, deep_merge_all};
pub use types::*;
