mod traits;

pub use traits::CharacterPhysicsBackend;
