pub mod existing_path_all;
pub mod existing_path_first_found;
pub mod existing_path_space;
pub mod newest;
pub mod random;

pub use existing_path_all::ExistingPathAllActionPolicy;
pub use existing_path_first_found::ExistingPathFirstFoundActionPolicy;
pub use existing_path_space::ExistingPathSpaceActionPolicy;
pub use newest::NewestActionPolicy;
pub use random::RandomActionPolicy;
