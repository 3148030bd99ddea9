#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_raw_string_hashes)]
#![allow(clippy::uninlined_format_args)]

pub mod app;
pub mod bootstrap;
pub mod cli;
pub mod domains;
pub mod http;
pub mod runtime;
pub mod settings;

pub mod passwords {
    pub use crate::domains::auth::passwords::*;
}

pub mod seed {
    pub use crate::domains::seed::*;
}
