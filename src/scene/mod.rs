//! Procedural scene module
//!
//! Everything the host renderer needs to draw the black hole each frame.
//! Fields are generated once at startup from a seeded RNG and never resized;
//! per-frame work is a closed-form function of (descriptor, elapsed time).
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod disk;
pub mod error;
pub mod galaxy;
pub mod horizon;
pub mod palette;
pub mod stars;
pub mod state;
pub mod update;

pub use body::BodyRotation;
pub use clock::AnimationClock;
pub use disk::{DiskConfig, DiskField, ParticleDescriptor};
pub use error::FieldError;
pub use galaxy::{GalaxyConfig, GalaxyField};
pub use horizon::{HorizonConfig, HorizonShell, ShellPoint};
pub use palette::{Color, Palette};
pub use stars::{StarConfig, StarField};
pub use state::VoxelScene;
pub use update::{AnimationParams, FrameTransform, flicker, update_disk, update_instance};
