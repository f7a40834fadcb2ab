mod lookup;
mod source;

#[cfg(feature = "database")]
mod bind;
#[cfg(feature = "database")]
mod connect;

#[cfg(test)]
pub(crate) mod memory;

pub use lookup::*;
pub use source::*;

#[cfg(feature = "database")]
pub use connect::*;
