//! Built-in cleaning strategies.

mod android;
mod cmake;
mod dotnet;
mod flutter;
mod maven;
mod node;
mod python;
mod rust;

pub use android::AndroidStrategy;
pub use cmake::CMakeStrategy;
pub use dotnet::DotnetStrategy;
pub use flutter::FlutterStrategy;
pub use maven::MavenStrategy;
pub use node::NodeStrategy;
pub use python::PythonStrategy;
pub use rust::RustStrategy;

use crate::strategy::CleaningStrategy;

/// Returns all built-in strategies in classification order.
pub fn all_strategies() -> Vec<Box<dyn CleaningStrategy>> {
    vec![
        Box::new(NodeStrategy),
        Box::new(RustStrategy),
        Box::new(FlutterStrategy),
        Box::new(AndroidStrategy),
        Box::new(MavenStrategy),
        Box::new(PythonStrategy),
        Box::new(DotnetStrategy),
        Box::new(CMakeStrategy),
    ]
}
