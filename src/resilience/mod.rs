pub mod policy;

pub use policy::FaultPolicy;
