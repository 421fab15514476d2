pub(crate) mod frame;
pub(crate) mod interpreter;
pub(crate) mod path;
pub(crate) mod state;
pub(crate) mod surface;
