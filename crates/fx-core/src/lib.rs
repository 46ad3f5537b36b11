//! Platform-free core of the portfolio particle effects.
//!
//! Two effects share one particle model and drawing API:
//! - [`TitleAnimator`]: the loading-screen title that forms out of a particle
//!   cloud, holds, intensifies and dissolves, then reports completion once.
//! - [`AmbientField`]: the endless starfield behind the page content.
//!
//! Hosts wrap an effect in a [`Runner`], call `tick` once per display refresh
//! with a [`Surface`] to draw on, and stop scheduling frames when it returns
//! [`Control::Stop`].

pub mod ambient;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod letters;
pub mod particle;
pub mod phase;
pub mod rng;
pub mod runner;
pub mod surface;
pub mod title;

pub use ambient::*;
pub use color::*;
pub use config::*;
pub use error::*;
pub use letters::*;
pub use particle::*;
pub use phase::*;
pub use rng::*;
pub use runner::*;
pub use surface::*;
pub use title::*;
