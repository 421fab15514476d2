pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod script;
pub(crate) mod wire;
