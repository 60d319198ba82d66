//! Files produced by the JavaScript generator.

mod controller_js;

pub use controller_js::ControllerJs;
