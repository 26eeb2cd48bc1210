pub(crate) mod dsl;
pub(crate) mod gif_layout;
pub(crate) mod model;
pub(crate) mod portfolio;
