//! Materials are factories from a surface [`Interaction`] to a [`Bsdf`],
//! built in the per-ray [`Workspace`] so every lobe's lifetime coincides
//! with the workspace's reset cycle.
//!
//! [`Bsdf`]: crate::reflection::bsdf::Bsdf
//! [`Workspace`]: crate::workspace::Workspace

use crate::interaction::Interaction;
use crate::reflection::bsdf::Bsdf;
use crate::workspace::Workspace;

pub mod glass;
pub mod matte;
pub mod metal;
pub mod mirror;
pub mod pbr;

pub trait Material: Sync + Send {
    /// Builds this material's BSDF at `interaction`, allocating every lobe
    /// (and the `Bsdf` itself) in `workspace`.
    fn compute_bsdf<'w>(&self, workspace: &'w Workspace, interaction: &Interaction) -> &'w Bsdf<'w>;
}
