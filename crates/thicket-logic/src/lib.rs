//! Pure movement and collision logic for Thicket.
//!
//! Everything here is plain data and pure functions: no ECS, no engine
//! types, no clocks, no side effects. The engine crate (`thicket-core`)
//! composes these pieces into the per-tick simulation; hosts and the
//! headless harness reuse them for their own geometry and integration.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`geometry`] | `Vec2`, `Aabb`, ray and circle intersection tests |
//! | [`level`] | `StaticLevel`: solid rectangles with world queries |
//! | [`motion`] | axis-separated AABB sweep for reference integrators |
//! | [`orientation`] | left/right `Facing` with a derived sign |
//! | [`probes`] | probe flag evaluation over ray callbacks |
//! | [`timing`] | single-slot event window stamps |

pub mod geometry;
pub mod level;
pub mod motion;
pub mod orientation;
pub mod probes;
pub mod timing;
