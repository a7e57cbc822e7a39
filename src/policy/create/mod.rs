pub mod all;
pub mod existing_path_all;
pub mod existing_path_first_found;
pub mod existing_path_space;
pub mod first_found;
pub mod most_shared_path;
pub mod newest;
pub mod pfrd;
pub mod random;
pub mod space;

pub use all::AllCreatePolicy;
pub use existing_path_all::ExistingPathAllCreatePolicy;
pub use existing_path_first_found::ExistingPathFirstFoundCreatePolicy;
pub use existing_path_space::ExistingPathSpaceCreatePolicy;
pub use first_found::FirstFoundCreatePolicy;
pub use most_shared_path::MostSharedPathCreatePolicy;
pub use newest::NewestCreatePolicy;
pub use pfrd::ProportionalFillRandomDistributionCreatePolicy;
pub use random::{ExistingPathRandomCreatePolicy, RandomCreatePolicy};
pub use space::SpaceCreatePolicy;
