mod build;
mod load;
mod render;
mod verify;

pub use build::*;
pub use load::*;
pub use render::*;
pub use verify::*;

use crate::config::Opts;

pub trait SubCommandExtend {
    fn run(&self, opts: &Opts) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;
}
