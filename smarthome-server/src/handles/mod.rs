mod reading_handle;

pub use reading_handle::*;
