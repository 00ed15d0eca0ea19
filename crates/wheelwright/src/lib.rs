//! Wheel assembly for precompiled native Python extensions
//!
//! This crate packages a shared library produced by an external compiler
//! into a binary wheel (`.whl`): a zip archive holding the native module, a
//! thin Python loader, the `.dist-info` metadata and a `RECORD` manifest
//! listing every member with its SHA-256 digest and size.
//!
//! # Wheel Structure
//!
//! ```text
//! mini_leo-0.1.0-py3-none-linux_x86_64.whl
//! ├── mini_leo/
//! │   ├── _minileo.so            # native module (.pyd on Windows)
//! │   └── __init__.py            # loader
//! └── mini_leo-0.1.0.dist-info/
//!     ├── METADATA
//!     ├── WHEEL
//!     └── RECORD                 # lists itself as `RECORD,,`
//! ```
//!
//! # Example
//!
//! ```no_run
//! use wheelwright::{
//!     BuildProfile, DistInfo, HostPlatform, NativeLayout, NativeTarget, WheelBuilder,
//!     wheel_declaration,
//! };
//!
//! let host = HostPlatform::current();
//! let tag = host.tag();
//! let layout = NativeLayout::new("rust", "mini_leo", "mini_leo", "_minileo", BuildProfile::Release);
//! let target = NativeTarget::resolve(&host.os_family(), &layout);
//!
//! let metadata = std::fs::read("METADATA")?;
//! let dist_info = DistInfo::new(metadata, wheel_declaration(&tag));
//!
//! let wheel = WheelBuilder::new("mini_leo", dist_info, tag)
//!     .native(&target)?
//!     .add_file("mini_leo/__init__.py", "mini_leo/__init__.py")?
//!     .write_to_dir("dist")?;
//! println!("{}", wheel.display());
//! # Ok::<(), wheelwright::WheelError>(())
//! ```

mod error;
mod metadata;
mod platform;
mod target;

pub mod builder;
pub mod loader;
pub mod record;
pub mod writer;

pub use builder::WheelBuilder;
pub use error::WheelError;
pub use loader::{VerifyFailure, VerifyReport, WheelLoader};
pub use metadata::{
    DistInfo, dist_info_dir, escape_distribution_name, parse_name, parse_version,
    wheel_declaration, wheel_file_name,
};
pub use platform::{HostPlatform, OsFamily, PlatformTag};
pub use record::{Record, RecordEntry, record_line, record_self_line};
pub use target::{BuildProfile, NativeLayout, NativeTarget};
pub use writer::{ArchiveMember, WheelWriter};

/// Result type for wheel operations.
pub type WheelResult<T> = Result<T, WheelError>;

/// Wheel file extension.
pub const WHEEL_EXTENSION: &str = "whl";

/// Python tag written into file names and the WHEEL declaration.
pub const PYTHON_TAG: &str = "py3";

/// ABI tag written into file names and the WHEEL declaration.
pub const ABI_TAG: &str = "none";

/// Wheel format version declared in the WHEEL file.
pub const WHEEL_VERSION: &str = "1.0";

/// Metadata file name within the dist-info directory.
pub const METADATA_FILE: &str = "METADATA";

/// Format-declaration file name within the dist-info directory.
pub const WHEEL_FILE: &str = "WHEEL";

/// Manifest file name within the dist-info directory.
pub const RECORD_FILE: &str = "RECORD";
