pub mod naming;
pub mod media;
pub mod path;
pub mod errors;

pub use naming::*;
pub use media::*;
pub use path::*;
pub use errors::*;
