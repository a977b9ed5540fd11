mod check;
mod config;
mod error;
mod gauss;
mod jacobi;
mod opt;
mod report;
mod solver;
mod sor;
mod system;
mod traits;

pub mod debug;
pub mod math;

pub use check::*;
pub use config::*;
pub use error::*;
pub use gauss::*;
pub use jacobi::*;
pub use opt::*;
pub use report::*;
pub use solver::*;
pub use sor::*;
pub use system::*;
pub use traits::*;
