pub mod model;
pub mod normalizer;
pub mod validator;
