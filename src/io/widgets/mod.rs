//! Higher-level abstractions for rendering common bits of the UI.
//!
//! These are all output-only, i.e. they only print to the screen and don't touch input at all.

mod textbox;
pub use textbox::*;

mod header;
pub use header::*;

mod horizontal;
pub use horizontal::*;
