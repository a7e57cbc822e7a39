pub mod all;
pub mod existing_path_space;
pub mod first_found;
pub mod newest;
pub mod random;

pub use all::AllSearchPolicy;
pub use existing_path_space::ExistingPathSpaceSearchPolicy;
pub use first_found::FirstFoundSearchPolicy;
pub use newest::NewestSearchPolicy;
pub use random::RandomSearchPolicy;
