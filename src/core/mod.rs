pub mod index;
pub mod normalize;
pub mod quota;
pub mod suggest;
