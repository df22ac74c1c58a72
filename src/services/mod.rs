pub mod authn;
pub mod gateway;
