pub mod dispatch;
pub mod error;
pub mod language;

pub use dispatch::{Invocation, execute, resolve};
pub use error::DispatchError;
pub use language::{interpreter_for, supported_languages};
