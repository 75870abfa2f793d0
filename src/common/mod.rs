mod fs;
#[cfg(feature = "download")]
mod download;
mod io;

pub(crate) use fs::*;
#[cfg(feature = "download")]
pub(crate) use download::*;
pub(crate) use io::*;
