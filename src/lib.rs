pub mod aggregate;
pub mod cabrillo;
pub mod callsign;
pub mod config;
pub mod contest;
pub mod error;
pub mod normalizer;
pub mod reference;
pub mod scorer;
pub mod types;
pub mod validator;
